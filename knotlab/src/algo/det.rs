use itertools::Itertools;
use crate::{Ring, RingOps, Field, FieldOps, Mat, MatType};

/// Determinant by cofactor expansion along the first row, 
/// valid over any commutative ring. 
/// Matrices up to `3 × 3` use closed forms.
pub fn det<R>(a: &Mat<R>) -> R
where R: Ring, for<'x> &'x R: RingOps<R> {
    assert!(a.is_square(), "det of non-square matrix: {:?}", a.shape());
    let n = a.rows();
    let idx = (0..n).collect_vec();
    minor(a, &idx, &idx)
}

/// Determinant of the submatrix of `a` on `rows × cols`.
pub fn minor<R>(a: &Mat<R>, rows: &[usize], cols: &[usize]) -> R
where R: Ring, for<'x> &'x R: RingOps<R> {
    assert_eq!(rows.len(), cols.len());

    let e = |i: usize, j: usize| &a[(rows[i], cols[j])];

    match rows.len() { 
        0 => R::one(),
        1 => e(0, 0).clone(),
        2 => e(0, 0) * e(1, 1) - e(0, 1) * e(1, 0),
        3 => { 
            e(0, 0) * (e(1, 1) * e(2, 2) - e(1, 2) * e(2, 1)) - 
            e(0, 1) * (e(1, 0) * e(2, 2) - e(1, 2) * e(2, 0)) + 
            e(0, 2) * (e(1, 0) * e(2, 1) - e(1, 1) * e(2, 0))
        },
        n => { 
            let sub_rows = &rows[1..];
            (0..n).filter(|&j| !e(0, j).is_zero()).map(|j| { 
                let sub_cols = cols.iter().enumerate().filter(|&(k, _)| k != j).map(|(_, &c)| c).collect_vec();
                let d = e(0, j) * minor(a, sub_rows, &sub_cols);
                if j % 2 == 0 { d } else { -d }
            }).sum()
        }
    }
}

/// All `k × k` minors of `a`, rows and columns chosen in increasing order.
pub fn minors<R>(a: &Mat<R>, k: usize) -> impl Iterator<Item = R> + '_
where R: Ring, for<'x> &'x R: RingOps<R> {
    let (m, n) = a.shape();
    let rows = (0..m).combinations(k).collect_vec();
    let cols = (0..n).combinations(k).collect_vec();

    rows.into_iter().cartesian_product(cols).map(move |(r, c)| 
        minor(a, &r, &c)
    )
}

/// Determinant by Gaussian elimination over a field.
pub fn det_by_elimination<R>(a: &Mat<R>) -> R
where R: Field, for<'x> &'x R: FieldOps<R> {
    assert!(a.is_square(), "det of non-square matrix: {:?}", a.shape());

    let n = a.rows();
    let mut m = a.clone();
    let mut d = R::one();

    for k in 0..n { 
        let Some(p) = (k..n).find(|&i| !m[(i, k)].is_zero()) else { 
            return R::zero()
        };

        if p != k { 
            m.swap_rows(p, k);
            d = -d;
        }

        let piv = m[(k, k)].clone();
        let Some(inv) = piv.inv() else { 
            return R::zero()
        };
        d *= &piv;

        for i in k + 1..n { 
            if m[(i, k)].is_zero() { 
                continue
            }
            let f = &m[(i, k)] * &inv;
            for j in k..n { 
                let x = &m[(k, j)] * &f;
                m[(i, j)] -= x;
            }
        }
    }

    d
}
