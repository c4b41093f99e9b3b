use num_traits::One;
use knotlab::{algo, Laurent, Mat, MatType};
use knotlab_link::{
    alexander_module, alexander_polynomial, jones_polynomial, knot_determinant,
    KnotGraph, Pd,
};
use knotlab_link::seifert::{conway_polynomial, seifert_matrices};

struct Case {
    pd: &'static str,
    alexander: &'static [i64],
    conway: &'static [i64],
    det: i64,
}

static CASES: [Case; 4] = [
    Case {
        pd: "PD[Xp[1,3,6,4], Xp[3,5,2,6], Xp[5,1,4,2]]",
        alexander: &[1, -1, 1],
        conway: &[1, 0, 1],
        det: 3,
    },
    Case {
        pd: "PD[Xp[4,2,5,1], Xp[8,6,1,5], Xm[3,7,4,6], Xm[7,3,8,2]]",
        alexander: &[1, -3, 1],
        conway: &[1, 0, -1],
        det: 5,
    },
    Case {
        pd: "PD[Xm[4,2,5,1], Xm[8,4,9,3], Xm[10,6,1,5], Xm[6,10,7,9], Xm[2,8,3,7]]",
        alexander: &[2, -3, 2],
        conway: &[1, 0, 2],
        det: 7,
    },
    Case {
        pd: "PD[Xm[4,2,5,1], Xm[10,8,11,7], Xp[3,9,4,8], Xp[9,3,10,2], Xm[12,6,1,5], Xm[6,12,7,11]]",
        alexander: &[2, -5, 2],
        conway: &[1, 0, -2],
        det: 9,
    },
];

fn pds() -> impl Iterator<Item = (Pd, &'static Case)> {
    CASES.iter().map(|c| (c.pd.parse::<Pd>().expect("valid pd"), c))
}

fn delta(pd: &Pd) -> Laurent {
    alexander_polynomial(&alexander_module(pd), 0)
}

#[test]
fn alexander() {
    for (pd, c) in pds() {
        assert_eq!(delta(&pd).coeffs(), c.alexander, "{}", c.pd);
        assert_eq!(delta(&pd.mirror()).coeffs(), c.alexander, "{}", c.pd);
    }
}

#[test]
fn conway() {
    for (pd, c) in pds() {
        let z = conway_polynomial(&pd).expect("a knot");
        assert_eq!(z, Laurent::from_coeffs(c.conway.to_vec(), 0), "{}", c.pd);
    }
}

#[test]
fn determinant() {
    for (pd, c) in pds() {
        assert_eq!(knot_determinant(&delta(&pd)), c.det);

        let v = &seifert_matrices(&pd)[0];
        let n = v.rows();
        let s = Mat::from_fn((n, n), |i, j| v[(i, j)] + v[(j, i)]);
        assert_eq!(algo::det(&s).abs(), c.det);
    }
}

#[test]
fn jones_through_graph() {
    for (pd, _) in pds() {
        let g = KnotGraph::from_pd(&pd);
        let pd2 = g.get_pd(true);
        assert_eq!(jones_polynomial(&pd2), jones_polynomial(&pd));
    }
}

#[test]
fn jones_mirror() {
    for (pd, _) in pds() {
        let j = jones_polynomial(&pd).expect("non-empty");
        assert_eq!(jones_polynomial(&pd.mirror()), Some(j.subst_pow(-1)));
    }
}

#[test]
fn genus_bound() {
    for (pd, c) in pds() {
        let g = KnotGraph::from_pd(&pd);
        let d = delta(&pd);
        let span = (d.max_deg() - d.min_deg()) as i64;
        assert!(span <= 2 * g.genus(), "{}", c.pd);
        assert_eq!(g.genus(), 1);
        assert_eq!(g.virtual_genus(), 0);
    }
}

#[test]
fn graph_json() -> Result<(), Box<dyn std::error::Error>> {
    for (pd, c) in pds() {
        let g = KnotGraph::from_pd(&pd);
        let h = KnotGraph::from_json(&g.to_json()?)?;
        assert_eq!(h.get_dt(), g.get_dt());
        assert_eq!(h.seifert_form(), g.seifert_form());
        assert_eq!(delta(&h.get_pd(true)).coeffs(), c.alexander);
    }
    Ok(())
}

#[test]
fn alternating_switch() {
    // switching one crossing of the trefoil gives the unknot.
    let pd: Pd = "PD[Xp[1,3,6,4], Xm[3,5,2,6], Xp[5,1,4,2]]".parse().expect("valid pd");
    assert_eq!(jones_polynomial(&pd), Some(Laurent::one()));

    let mut g = KnotGraph::from_pd(&pd);
    g.make_alternating();
    let j = jones_polynomial(&g.get_pd(true)).expect("non-empty");
    let trefoil = jones_polynomial(&Pd::trefoil()).expect("non-empty");
    assert!(j == trefoil || j == trefoil.subst_pow(-1));
}
