use std::collections::HashSet;
use std::convert::Infallible;
use itertools::Itertools;
use log::trace;
use num_traits::One;
use knotlab::{Laurent, MDeg, MLaurent, RingOps, Sign};

use crate::pd::{form_cabling, to_tangle, Edge, Entity, Pd};
use super::{Strand, Tangle, ATL, TL};

fn take_best(remain: &[Entity], front: &HashSet<Edge>) -> usize {
    let mut best = 0;
    let mut max = 0;

    for (i, x) in remain.iter().enumerate() {
        let c = x.edges().iter().filter(|e| front.contains(e)).count();
        if c == x.edges().len() {
            return i
        } else if c > max {
            best = i;
            max = c;
        }
    }

    best
}

/// Orders the entities so that each one touches the boundary of
/// those already taken as much as possible.
pub fn sort_entities(data: &[Entity]) -> Vec<Entity> {
    let mut remain = data.to_vec();
    let mut front = HashSet::new();
    let mut res = Vec::with_capacity(data.len());

    while !remain.is_empty() {
        let i = take_best(&remain, &front);
        let x = remain.remove(i);
        for &e in x.edges() {
            if !front.remove(&e) {
                front.insert(e);
            }
        }
        res.push(x);
    }

    res
}

/// Multiplies the local tangles of all entities, in the order of `sort_entities`.
/// `step` is called after each entity; an error from it aborts the fold.
pub fn fold<S, F, E, G>(data: &[Entity], local: F, mut step: G) -> Result<Tangle<S>, E>
where
    S: Strand,
    for<'x> &'x S::R: RingOps<S::R>,
    F: Fn(&Entity) -> Tangle<S>,
    G: FnMut(usize) -> Result<(), E>
{
    let mut res = Tangle::one();
    for (i, x) in sort_entities(data).iter().enumerate() {
        res *= local(x);
        trace!("fold {}/{}: {x}, {} terms.", i + 1, data.len(), res.nterms());
        step(i)?;
    }
    Ok(res)
}

fn unwrap_infallible<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(t) => t,
        Err(e) => match e {}
    }
}

fn no_step(_: usize) -> Result<(), Infallible> {
    Ok(())
}

/// `(−A³)^{−w}`
pub fn writhe_factor(w: i64) -> Laurent {
    let a = i64::from(Sign::from_parity(w));
    Laurent::mono(-3 * w as isize, a)
}

/// The Kauffman bracket normalized so that the unknot is `1`.
/// `None` for the empty diagram.
pub fn kauffman_bracket_with<E, G>(pd: &Pd, step: G) -> Result<Option<Laurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    if pd.is_empty() {
        return Ok(None)
    }
    let t = fold(pd.data(), TL::from_entity, step)?;
    Ok(Some(t.eval().div_by_loop()))
}

pub fn kauffman_bracket(pd: &Pd) -> Option<Laurent> {
    unwrap_infallible(kauffman_bracket_with(pd, no_step))
}

/// `(−A³)^{−w}⟨D⟩` in `T = A²`.
pub fn jones_polynomial_with<E, G>(pd: &Pd, step: G) -> Result<Option<Laurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    assert!(pd.is_oriented(), "{pd} is not oriented.");
    let Some(b) = kauffman_bracket_with(pd, step)? else {
        return Ok(None)
    };
    let j = b * writhe_factor(pd.writhe());
    Ok(Some(j.div_degrees(2)))
}

pub fn jones_polynomial(pd: &Pd) -> Option<Laurent> {
    unwrap_infallible(jones_polynomial_with(pd, no_step))
}

/// `(−A³)^{−w}⟨Dⁿ⟩` for the `n`-cable of the writhe-normalized diagram, in `A`.
pub fn cabled_jones_polynomial_with<E, G>(pd: &Pd, n: usize, step: G) -> Result<Option<Laurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    if pd.is_empty() {
        return Ok(None)
    }
    let c = form_cabling(pd, n);
    let Some(b) = kauffman_bracket_with(&c, step)? else {
        return Ok(None)
    };
    Ok(Some(b * writhe_factor(c.writhe())))
}

pub fn cabled_jones_polynomial(pd: &Pd, n: usize) -> Option<Laurent> {
    unwrap_infallible(cabled_jones_polynomial_with(pd, n, no_step))
}

/// The arrow bracket, evaluated on the 1-1 tangle obtained by cutting one edge.
/// Normalized so that the unknot is `1`. `None` for the empty diagram.
pub fn arrow_bracket_with<E, G>(pd: &Pd, step: G) -> Result<Option<MLaurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    if pd.is_empty() {
        return Ok(None)
    }
    assert!(pd.is_oriented(), "{pd} is not oriented.");

    let (data, _) = to_tangle(pd);
    let t = fold(&data, ATL::from_entity, step)?;
    Ok(Some(t.eval()))
}

pub fn arrow_bracket(pd: &Pd) -> Option<MLaurent> {
    unwrap_infallible(arrow_bracket_with(pd, no_step))
}

/// `(−A³)^{−w}⟨Dⁿ⟩_A` for the `n`-cable of the writhe-normalized diagram.
pub fn cabled_arrow_polynomial_with<E, G>(pd: &Pd, n: usize, step: G) -> Result<Option<MLaurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    if pd.is_empty() {
        return Ok(None)
    }
    let c = form_cabling(pd, n);
    let Some(b) = arrow_bracket_with(&c, step)? else {
        return Ok(None)
    };
    let f = writhe_factor(c.writhe());
    Ok(Some(b * MLaurent::from_laurent(&f, 0)))
}

pub fn cabled_arrow_polynomial(pd: &Pd, n: usize) -> Option<MLaurent> {
    unwrap_infallible(cabled_arrow_polynomial_with(pd, n, no_step))
}

/// The arrow polynomial `(−A³)^{−w}⟨D⟩_A`.
pub fn arrow_polynomial(pd: &Pd) -> Option<MLaurent> {
    let b = arrow_bracket(pd)?;
    let f = writhe_factor(pd.writhe());
    Some(b * MLaurent::from_laurent(&f, 0))
}

/// Exponent vectors of `p` in the `Kₖ` variables, i.e. with `A` dropped.
pub fn k_degrees(p: &MLaurent) -> Vec<MDeg> {
    p.split_first().into_iter().map(|(d, _)| d).collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alg::arrow_var_name;
    use crate::pd::Entity::*;
    use num_traits::Zero;

    fn arrow_str(p: &MLaurent) -> String {
        p.to_string_with(arrow_var_name)
    }

    #[test]
    fn sort() {
        let pd = Pd::figure8();
        let sorted = sort_entities(pd.data());
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted[0], pd.data()[0]);
        assert!(sorted[0].is_adj_to(&sorted[1]));
    }

    #[test]
    fn fold_cancel() {
        let res = fold(Pd::trefoil().data(), TL::from_entity, |i| if i < 1 { Ok(()) } else { Err(i) });
        assert_eq!(res, Err(1));
    }

    #[test]
    fn bracket_empty() {
        assert_eq!(kauffman_bracket(&Pd::empty()), None);
    }

    #[test]
    fn bracket_unknot() {
        assert_eq!(kauffman_bracket(&Pd::unknot()), Some(Laurent::one()));
    }

    #[test]
    fn bracket_two_unknots() {
        let pd = Pd::new(vec![P([1, 1]), P([2, 2])]);
        assert_eq!(kauffman_bracket(&pd), Some(Laurent::loop_value()));
    }

    #[test]
    fn bracket_trefoil() {
        let pd = Pd::from_pd_code([[1,3,6,4],[3,5,2,6],[5,1,4,2]]);
        assert_eq!(
            kauffman_bracket(&pd),
            Some(Laurent::from_coeffs(vec![1,0,0,0,-1,0,0,0,0,0,0,0,-1], -7))
        );
        // Xp is read as X.
        assert_eq!(kauffman_bracket(&Pd::trefoil()), kauffman_bracket(&pd));
    }

    #[test]
    fn bracket_kink() {
        let pd = Pd::new(vec![Xp([1, 1, 2, 2])]);
        assert_eq!(kauffman_bracket(&pd), Some(Laurent::mono(3, -1)));
    }

    #[test]
    fn jones_trefoil() {
        let j = jones_polynomial(&Pd::trefoil()).unwrap();
        assert_eq!(j, Laurent::from_terms([(-8, -1), (-6, 1), (-2, 1)]));

        let j = jones_polynomial(&Pd::trefoil().mirror()).unwrap();
        assert_eq!(j, Laurent::from_terms([(8, -1), (6, 1), (2, 1)]));
    }

    #[test]
    fn jones_figure8() {
        let j = jones_polynomial(&Pd::figure8()).unwrap();
        assert_eq!(j, Laurent::from_terms([(-4, 1), (-2, -1), (0, 1), (2, -1), (4, 1)]));
    }

    #[test]
    fn jones_hopf() {
        let j = jones_polynomial(&Pd::hopf_link()).unwrap();
        assert_eq!(j, Laurent::from_terms([(-5, -1), (-1, -1)]));
    }

    #[test]
    fn jones_kink_invariance() {
        let pd = Pd::new(vec![Xm([1, 1, 2, 2])]);
        assert_eq!(jones_polynomial(&pd), Some(Laurent::one()));
    }

    #[test]
    fn cabled_jones_one() {
        let j = cabled_jones_polynomial(&Pd::trefoil(), 1).unwrap();
        assert_eq!(j, jones_polynomial(&Pd::trefoil()).unwrap().subst_pow(2));
    }

    #[test]
    fn cabled_jones_two() {
        let j = cabled_jones_polynomial(&Pd::trefoil(), 2).unwrap();
        assert_eq!(j, Laurent::from_terms([(-46, -1), (-42, 1), (-34, 1), (-18, -1), (-10, -1), (-2, -1)]));
    }

    #[test]
    fn cabled_jones_unknot() {
        let j = cabled_jones_polynomial(&Pd::unknot(), 2).unwrap();
        assert_eq!(j, Laurent::loop_value());
    }

    #[test]
    fn arrow_unknot() {
        assert_eq!(arrow_bracket(&Pd::unknot()), Some(MLaurent::one()));
        assert_eq!(arrow_bracket(&Pd::empty()), None);
    }

    #[test]
    fn arrow_classical() {
        // no K variables appear for classical knots.
        let p = arrow_polynomial(&Pd::trefoil()).unwrap();
        let j = jones_polynomial(&Pd::trefoil()).unwrap().subst_pow(2);
        assert_eq!(p, MLaurent::from_laurent(&j, 0));
    }

    #[test]
    fn arrow_virtual_trefoil() {
        let pd = Pd::virtual_trefoil();
        let b = arrow_bracket(&pd).unwrap();
        assert_eq!(arrow_str(&b), "-A⁻⁴K1 + K1 + A²");

        let p = arrow_polynomial(&pd).unwrap();
        assert_eq!(arrow_str(&p), "-A⁻¹⁰K1 + A⁻⁶K1 + A⁻⁴");
        assert_eq!(k_degrees(&p), vec![MDeg::zero(), MDeg::new(vec![1])]);
    }

    #[test]
    fn cabled_arrow_one() {
        let pd = Pd::virtual_trefoil();
        assert_eq!(cabled_arrow_polynomial(&pd, 1), arrow_polynomial(&pd));
    }

    #[test]
    fn writhe_factors() {
        assert_eq!(writhe_factor(0), Laurent::one());
        assert_eq!(writhe_factor(1), Laurent::mono(-3, -1));
        assert_eq!(writhe_factor(-2), Laurent::mono(6, 1));
        assert!(!writhe_factor(5).is_zero());
    }
}
