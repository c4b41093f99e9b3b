use std::convert::Infallible;
use ahash::AHashMap;
use log::{debug, info};
use num_traits::{One, Zero};
use knotlab::{algo, Laurent, Mat, MatType};

use crate::pd::Pd;
use super::{FGWord, Gen, Presentation};

/// Presentation matrix of the Alexander module of the simplified Wirtinger
/// presentation, with rows indexed by generators and columns by relations,
/// the first row removed.
///
/// `step` is called after each column.
pub fn alexander_module_with<E, G>(pd: &Pd, mut step: G) -> Result<Mat<Laurent>, E>
where G: FnMut(usize) -> Result<(), E> {
    let p = Presentation::wirtinger(pd).simplify();
    let (gens, rels) = (p.gens(), p.rels());

    if gens.is_empty() {
        return Ok(Mat::zero((0, 0)))
    }

    let mut cols = vec![];
    for (j, r) in rels.iter().enumerate() {
        let mut col = linearize(r);
        cols.push(gens.iter().map(|g| col.remove(g).unwrap_or_default()).collect::<Vec<_>>());
        step(j)?;
    }

    let m = Mat::from_fn((gens.len(), rels.len()), |i, j| cols[j][i].clone());
    let m = m.remove_row(0);

    info!("alexander module: {} x {}", m.rows(), m.cols());

    Ok(m)
}

/// Entries of one column, read off the relation letter by letter. With `s`
/// the exponent sum of the prefix, a letter `g^e` contributes
/// `t^s + ... + t^(s+e−1)` to row `g` if `e > 0`, and
/// `−t^(s−1) − ... − t^(s+e)` if `e < 0`.
fn linearize(r: &FGWord) -> AHashMap<Gen, Laurent> {
    let mut res: AHashMap<Gen, Laurent> = AHashMap::new();
    let mut s = 0;

    for &(g, e) in r.letters() {
        let terms = if e > 0 {
            (s..s + e).map(|k| (k as isize, 1)).collect::<Vec<_>>()
        } else {
            (s + e..s).map(|k| (k as isize, -1)).collect()
        };
        *res.entry(g).or_default() += Laurent::from_terms(terms);
        s += e;
    }

    res
}

pub fn alexander_module(pd: &Pd) -> Mat<Laurent> {
    match alexander_module_with(pd, |_| Ok::<_, Infallible>(())) {
        Ok(m) => m,
        Err(e) => match e {}
    }
}

/// The `n`-th Alexander polynomial, the gcd of all `(r − n)`-minors of
/// the `r`-rowed module matrix, shifted to minimum degree `0` with
/// positive lowest coefficient.
pub fn alexander_polynomial(module: &Mat<Laurent>, n: usize) -> Laurent {
    let (r, c) = module.shape();
    if r <= n {
        return Laurent::one()
    }

    let k = r - n;
    if c < k {
        return Laurent::zero()
    }

    debug!("gcd of {k}-minors of {r} x {c} matrix.");

    algo::minors(module, k).fold(Laurent::zero(), |g, d|
        if d.is_zero() { g } else { g.gcd(&d) }
    )
}

/// `|Δ(−1)|`
pub fn knot_determinant(alexander: &Laurent) -> i64 {
    alexander.eval(-1).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pd::Entity::*;

    fn delta(pd: &Pd) -> Vec<i64> {
        alexander_polynomial(&alexander_module(pd), 0).coeffs().to_vec()
    }

    fn knot_5_2() -> Pd {
        Pd::new(vec![Xm([4, 2, 5, 1]), Xm([8, 4, 9, 3]), Xm([10, 6, 1, 5]), Xm([6, 10, 7, 9]), Xm([2, 8, 3, 7])])
    }

    fn knot_6_1() -> Pd {
        Pd::new(vec![
            Xm([4, 2, 5, 1]), Xm([10, 8, 11, 7]), Xp([3, 9, 4, 8]),
            Xp([9, 3, 10, 2]), Xm([12, 6, 1, 5]), Xm([6, 12, 7, 11])
        ])
    }

    #[test]
    fn linearized() {
        // x₁x₂x₁⁻¹x₂⁻¹ ↦ (1 − t, t − 1)
        let r = FGWord::new([(1, 1), (2, 1), (1, -1), (2, -1)]);
        let c = linearize(&r);
        assert_eq!(c[&1], Laurent::from_coeffs(vec![1, -1], 0));
        assert_eq!(c[&2], Laurent::from_coeffs(vec![-1, 1], 0));

        // x₁x₂x₁⁻¹ ↦ (1 − t, t)
        let r = FGWord::new([(1, 1), (2, 1), (1, -1)]);
        let c = linearize(&r);
        assert_eq!(c[&1], Laurent::from_coeffs(vec![1, -1], 0));
        assert_eq!(c[&2], Laurent::mono(1, 1));

        // x₁² ↦ 1 + t, x₁⁻² ↦ −t⁻² − t⁻¹
        assert_eq!(linearize(&FGWord::new([(1, 2)]))[&1], Laurent::from_coeffs(vec![1, 1], 0));
        assert_eq!(linearize(&FGWord::new([(1, -2)]))[&1], Laurent::from_coeffs(vec![-1, -1], -2));
    }

    #[test]
    fn module_trefoil() {
        let m = alexander_module(&Pd::trefoil());
        assert_eq!(m.shape(), (1, 1));
    }

    #[test]
    fn trefoil() {
        assert_eq!(delta(&Pd::trefoil()), vec![1, -1, 1]);
        assert_eq!(delta(&Pd::trefoil().mirror()), vec![1, -1, 1]);
    }

    #[test]
    fn figure8() {
        assert_eq!(delta(&Pd::figure8()), vec![1, -3, 1]);
    }

    #[test]
    fn hopf() {
        assert_eq!(delta(&Pd::hopf_link()), vec![1, -1]);
    }

    #[test]
    fn unknot() {
        assert_eq!(delta(&Pd::unknot()), vec![1]);
        assert_eq!(alexander_module(&Pd::unknot()).shape(), (0, 0));
    }

    #[test]
    fn five_two() {
        assert_eq!(delta(&knot_5_2()), vec![2, -3, 2]);
    }

    #[test]
    fn six_one() {
        assert_eq!(delta(&knot_6_1()), vec![2, -5, 2]);
    }

    #[test]
    fn higher() {
        let m = alexander_module(&Pd::trefoil());
        assert_eq!(alexander_polynomial(&m, 1), Laurent::one());

        // the 2-component unlink has a zero first polynomial.
        let m = alexander_module(&Pd::new(vec![P([1, 1]), P([2, 2])]));
        assert_eq!(m.shape(), (1, 0));
        assert!(alexander_polynomial(&m, 0).is_zero());
        assert_eq!(alexander_polynomial(&m, 1), Laurent::one());
    }

    #[test]
    fn determinant() {
        let d = |pd: &Pd| knot_determinant(&alexander_polynomial(&alexander_module(pd), 0));
        assert_eq!(d(&Pd::trefoil()), 3);
        assert_eq!(d(&Pd::figure8()), 5);
        assert_eq!(d(&knot_5_2()), 7);
        assert_eq!(d(&knot_6_1()), 9);
    }

    #[test]
    fn module_cancel() {
        let res = alexander_module_with(&Pd::figure8(), |_| Err("stop"));
        assert_eq!(res, Err("stop"));
    }
}
