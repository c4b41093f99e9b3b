use std::fmt::Display;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign};
use auto_impl_ops::auto_ops;
use itertools::{EitherOrBoth, Itertools};
use num_traits::{Zero, One};
use crate::{Elem, Ring, Laurent, MDeg};
use crate::util::format::{lc, subscript};

/// Multivariate Laurent polynomial over `Z` in `x₀, x₁, ...`, 
/// with no bound on the number of variables. 
/// 
/// Terms are kept sorted by exponent vector, 
/// with no duplicates and no zero coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MLaurent { 
    terms: Vec<(i64, MDeg)>
}

impl MLaurent { 
    pub fn from_terms<I>(terms: I) -> Self
    where I: IntoIterator<Item = (i64, MDeg)> { 
        let terms = terms.into_iter()
            .sorted_by(|a, b| a.1.cmp(&b.1))
            .coalesce(|(a, x), (b, y)| 
                if x == y { Ok((a + b, x)) } else { Err(((a, x), (b, y))) }
            )
            .filter(|(a, _)| *a != 0)
            .collect();
        Self { terms }
    }

    pub fn constant(a: i64) -> Self { 
        Self::mono(a, MDeg::zero())
    }

    pub fn mono(a: i64, deg: MDeg) -> Self { 
        if a == 0 { 
            Self::zero()
        } else { 
            Self { terms: vec![(a, deg)] }
        }
    }

    /// The variable `xᵢ`.
    pub fn variable(i: usize) -> Self { 
        Self::mono(1, MDeg::single(i, 1))
    }

    /// Embeds a univariate Laurent polynomial as a polynomial in `xᵢ`.
    pub fn from_laurent(p: &Laurent, i: usize) -> Self { 
        Self::from_terms(p.terms().map(|(k, a)| (a, MDeg::single(i, k))))
    }

    pub fn terms(&self) -> impl Iterator<Item = &(i64, MDeg)> { 
        self.terms.iter()
    }

    pub fn nterms(&self) -> usize { 
        self.terms.len()
    }

    pub fn coeff(&self, deg: &MDeg) -> i64 { 
        match self.terms.binary_search_by(|(_, d)| d.cmp(deg)) { 
            Ok(i) => self.terms[i].0,
            Err(_) => 0
        }
    }

    pub fn scale(&self, k: i64) -> Self { 
        if k == 0 { 
            return Self::zero()
        }
        Self { terms: self.terms.iter().map(|(a, d)| (a * k, d.clone())).collect() }
    }

    /// `self + scalar · x^offset · other`, merging the two sorted term lists.
    pub fn add_scaled(&self, other: &Self, scalar: i64, offset: &MDeg) -> Self { 
        if scalar == 0 || other.is_zero() { 
            return self.clone()
        }

        let rhs = other.terms.iter().map(|(a, d)| (a * scalar, d + offset));
        let terms = self.terms.iter().cloned().merge_join_by(rhs, |x, y| x.1.cmp(&y.1)).filter_map(|e| 
            match e { 
                EitherOrBoth::Both((a, d), (b, _)) => (a + b != 0).then_some((a + b, d)),
                EitherOrBoth::Left(t) | EitherOrBoth::Right(t) => Some(t)
            }
        ).collect();

        Self { terms }
    }

    /// Collects the coefficients of `x₀` for the monomials in `x₁, x₂, ...`. 
    pub fn split_first(&self) -> Vec<(MDeg, Laurent)> { 
        self.terms.iter()
            .into_group_map_by(|(_, d)| MDeg::new((1..d.len()).map(|i| d.of(i)).collect()))
            .into_iter()
            .map(|(k, ts)| (k, Laurent::from_terms(ts.into_iter().map(|(a, d)| (d.of(0), *a)))))
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect()
    }

    pub fn to_string_with<F>(&self, name: F) -> String
    where F: Fn(usize) -> String { 
        let terms = self.terms.iter().map(|(a, d)| { 
            let x = d.to_string_with(&name);
            (if x.is_empty() { String::from("1") } else { x }, a)
        });
        lc(terms)
    }
}

impl Display for MLaurent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.to_string_with(|i| format!("x{}", subscript(i as isize)));
        write!(f, "{s}")
    }
}

impl Zero for MLaurent {
    fn zero() -> Self {
        Self { terms: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for MLaurent {
    fn one() -> Self {
        Self::constant(1)
    }

    fn is_one(&self) -> bool { 
        self.terms.len() == 1 && self.terms[0].0 == 1 && self.terms[0].1.is_zero()
    }
}

#[auto_ops]
impl AddAssign<&MLaurent> for MLaurent {
    fn add_assign(&mut self, rhs: &MLaurent) {
        *self = self.add_scaled(rhs, 1, &MDeg::zero())
    }
}

#[auto_ops]
impl SubAssign<&MLaurent> for MLaurent {
    fn sub_assign(&mut self, rhs: &MLaurent) {
        *self = self.add_scaled(rhs, -1, &MDeg::zero())
    }
}

#[auto_ops]
impl MulAssign<&MLaurent> for MLaurent {
    fn mul_assign(&mut self, rhs: &MLaurent) {
        let lhs = std::mem::take(self);
        *self = rhs.terms.iter().fold(Self::zero(), |res, (a, d)| 
            res.add_scaled(&lhs, *a, d)
        )
    }
}

impl_alg_base!(MLaurent);

impl Elem for MLaurent { 
    fn math_symbol() -> String {
        String::from("Z[x₀^±1, x₁^±1, ...]")
    }
}

impl Ring for MLaurent {
    fn inv(&self) -> Option<Self> {
        if self.is_unit() { 
            let (a, d) = &self.terms[0];
            Some(Self::mono(*a, -d))
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].0.abs() == 1
    }

    fn normalizing_unit(&self) -> Self {
        match self.terms.first() { 
            Some((a, _)) if *a < 0 => Self::constant(-1),
            _ => Self::one()
        }
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    fn x(i: usize) -> MLaurent { 
        MLaurent::variable(i)
    }

    fn m(terms: &[(i64, &[isize])]) -> MLaurent { 
        MLaurent::from_terms(terms.iter().map(|(a, d)| (*a, MDeg::new(d.to_vec()))))
    }

    #[test]
    fn from_terms() { 
        let a = m(&[(1, &[1]), (2, &[0, 1]), (-1, &[1, 0]), (3, &[])]);
        assert_eq!(a.nterms(), 2);
        assert_eq!(a.coeff(&MDeg::new(vec![0, 1])), 2);
        assert_eq!(a.coeff(&MDeg::zero()), 3);
        assert_eq!(a.coeff(&MDeg::new(vec![1])), 0);
    }

    #[test]
    fn ring_laws() { 
        let a = m(&[(1, &[1]), (-2, &[0, 1])]);
        let b = m(&[(3, &[-2, 0, 1]), (1, &[])]);
        let c = m(&[(-1, &[0, -1])]);

        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a + MLaurent::zero(), a);
        assert_eq!(&a * MLaurent::one(), a);
        assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
        assert!((&a - &a).is_zero());
    }

    #[test]
    fn mul() { 
        let f = (x(0) + x(1)) * (x(0) - x(1));
        assert_eq!(f, m(&[(1, &[2]), (-1, &[0, 2])]));
    }

    #[test]
    fn add_scaled() { 
        let a = x(0);
        let b = x(1);
        let c = a.add_scaled(&b, -3, &MDeg::new(vec![-1]));
        assert_eq!(c, m(&[(1, &[1]), (-3, &[-1, 1])]));
    }

    #[test]
    fn inv() { 
        let a = m(&[(-1, &[2, -1])]);
        assert_eq!(&a * a.inv().unwrap(), MLaurent::one());
        assert_eq!((x(0) + x(1)).inv(), None);
    }

    #[test]
    fn from_laurent() { 
        let p = Laurent::from_coeffs(vec![1, 0, -1], -1);
        let a = MLaurent::from_laurent(&p, 0);
        assert_eq!(a, m(&[(1, &[-1]), (-1, &[1])]));
        assert_eq!(a.split_first(), vec![(MDeg::zero(), p)]);
    }

    #[test]
    fn display() { 
        let a = m(&[(1, &[2]), (-1, &[-1, 1]), (2, &[])]);
        assert_eq!(a.to_string(), "-x₀⁻¹x₁ + 2 + x₀²");
        assert_eq!(a.to_string_with(|i| ["A", "K"][i].to_string()), "-A⁻¹K + 2 + A²");
    }
}
