use std::fmt::Display;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign};
use auto_impl_ops::auto_ops;
use num_traits::{Zero, One, Pow};
use crate::{Elem, Ring, Poly};
use crate::util::format::{lc, power};

/// Laurent polynomial over `Z` in one variable `t`. 
/// 
/// Stored as a dense coefficient list starting at degree `offset`. 
/// Both ends of the list are non-zero; the zero polynomial has 
/// an empty list and offset `0`.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Laurent { 
    coeffs: Vec<i64>,
    offset: isize
}

impl Laurent { 
    pub fn from_coeffs(mut coeffs: Vec<i64>, mut offset: isize) -> Self { 
        while coeffs.last() == Some(&0) { 
            coeffs.pop();
        }
        let k = coeffs.iter().take_while(|&&a| a == 0).count();
        if k > 0 { 
            coeffs.drain(..k);
            offset += k as isize;
        }
        if coeffs.is_empty() { 
            offset = 0;
        }
        Self { coeffs, offset }
    }

    pub fn from_terms<I>(terms: I) -> Self
    where I: IntoIterator<Item = (isize, i64)> { 
        let terms: Vec<_> = terms.into_iter().collect();
        let Some(min) = terms.iter().map(|(i, _)| *i).min() else { 
            return Self::zero()
        };
        let max = terms.iter().map(|(i, _)| *i).max().unwrap_or(min);
        let mut coeffs = vec![0; (max - min + 1) as usize];
        for (i, a) in terms { 
            coeffs[(i - min) as usize] += a;
        }
        Self::from_coeffs(coeffs, min)
    }

    pub fn constant(a: i64) -> Self { 
        Self::mono(0, a)
    }

    pub fn mono(deg: isize, a: i64) -> Self { 
        if a == 0 { 
            Self::zero()
        } else { 
            Self { coeffs: vec![a], offset: deg }
        }
    }

    pub fn variable() -> Self { 
        Self::mono(1, 1)
    }

    /// The value `−t² − t⁻²` of a closed loop in the bracket.
    pub fn loop_value() -> Self { 
        Self::from_coeffs(vec![-1, 0, 0, 0, -1], -2)
    }

    pub fn coeffs(&self) -> &[i64] { 
        &self.coeffs
    }

    pub fn offset(&self) -> isize { 
        self.offset
    }

    pub fn min_deg(&self) -> isize { 
        self.offset
    }

    pub fn max_deg(&self) -> isize { 
        self.offset + self.coeffs.len() as isize - 1
    }

    pub fn coeff(&self, i: isize) -> i64 { 
        let j = i - self.offset;
        if j < 0 { 
            0
        } else { 
            self.coeffs.get(j as usize).copied().unwrap_or(0)
        }
    }

    /// Non-zero terms `(deg, coeff)` in increasing degree.
    pub fn terms(&self) -> impl Iterator<Item = (isize, i64)> + '_ { 
        self.coeffs.iter().enumerate().filter(|(_, a)| **a != 0).map(|(i, a)| 
            (self.offset + i as isize, *a)
        )
    }

    pub fn nterms(&self) -> usize { 
        self.terms().count()
    }

    pub fn is_monomial(&self) -> bool { 
        self.coeffs.len() == 1
    }

    pub fn scale(&self, k: i64) -> Self { 
        if k == 0 { 
            return Self::zero()
        }
        Self { coeffs: self.coeffs.iter().map(|a| a * k).collect(), offset: self.offset }
    }

    /// Multiplication by `tᵏ`.
    pub fn shift(&self, k: isize) -> Self { 
        if self.is_zero() { 
            return Self::zero()
        }
        Self { coeffs: self.coeffs.clone(), offset: self.offset + k }
    }

    /// Substitutes `t ↦ tᵏ` for `k ≠ 0`.
    pub fn subst_pow(&self, k: isize) -> Self { 
        assert!(k != 0);
        Self::from_terms(self.terms().map(|(i, a)| (i * k, a)))
    }

    /// Substitutes `tᵏ ↦ t`, all degrees must be divisible by `k`.
    pub fn div_degrees(&self, k: isize) -> Self { 
        assert!(k != 0);
        Self::from_terms(self.terms().map(|(i, a)| { 
            assert!(i % k == 0, "degree {i} is not divisible by {k} in {self}");
            (i / k, a)
        }))
    }

    pub fn from_poly(p: &Poly) -> Self { 
        Self::from_coeffs(p.coeffs().to_vec(), 0)
    }

    /// Shifts to minimum degree `0` and returns the underlying polynomial.
    pub fn to_poly_shifted(&self) -> Poly { 
        Poly::new(self.coeffs.clone())
    }

    pub fn to_poly(&self) -> Option<Poly> { 
        if self.offset >= 0 { 
            let mut coeffs = vec![0; self.offset as usize];
            coeffs.extend(&self.coeffs);
            Some(Poly::new(coeffs))
        } else { 
            None
        }
    }

    pub fn eval(&self, x: i64) -> i64 { 
        assert!(x.abs() == 1 || self.offset >= 0, "cannot evaluate {self} at {x} over Z");

        self.terms().map(|(i, a)| { 
            let e = i.unsigned_abs() as u32;
            a * if x.abs() == 1 { x.pow(e % 2) } else { x.pow(e) }
        }).sum()
    }

    /// Gcd computed on both operands shifted to minimum degree `0`. 
    /// The result has minimum degree `0` and positive lowest coefficient.
    pub fn gcd(&self, other: &Laurent) -> Laurent { 
        let g = self.to_poly_shifted().gcd(&other.to_poly_shifted());
        Self::from_poly(&g).normalized()
    }

    /// Exact division by the loop value `−t² − t⁻²`. 
    /// 
    /// Panics if `self` is not divisible.
    pub fn div_by_loop(&self) -> Laurent { 
        if self.is_zero() { 
            return Self::zero()
        }

        let p = &self.coeffs;
        let n = p.len();
        assert!(n > 4, "{self} is not divisible by the loop value");

        // p[i] = −q[i] − q[i−4]
        let mut q = vec![0; n - 4];
        for i in 0..n - 4 { 
            let prev = if i >= 4 { q[i - 4] } else { 0 };
            q[i] = -p[i] - prev;
        }
        for i in n - 4..n { 
            let prev = if i >= 4 { q[i - 4] } else { 0 };
            assert_eq!(p[i], -prev, "{self} is not divisible by the loop value");
        }

        Self::from_coeffs(q, self.offset + 2)
    }

    /// Formats in the variable `x` in place of `t`.
    pub fn to_string_with(&self, x: &str) -> String { 
        lc(self.terms().map(|(i, a)| (power(x, i), a)))
    }

    pub fn normalized(&self) -> Self { 
        self * self.normalizing_unit()
    }
}

impl Pow<isize> for &Laurent { 
    type Output = Laurent;
    fn pow(self, n: isize) -> Laurent {
        if n < 0 { 
            let inv = self.inv().unwrap_or_else(|| panic!("{self} is not invertible"));
            return (&inv).pow(-n)
        }
        (0..n).fold(Laurent::one(), |res, _| res * self)
    }
}

impl Display for Laurent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with("t"))
    }
}

impl Zero for Laurent {
    fn zero() -> Self {
        Self { coeffs: vec![], offset: 0 }
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl One for Laurent {
    fn one() -> Self {
        Self::constant(1)
    }

    fn is_one(&self) -> bool { 
        self.offset == 0 && self.coeffs == [1]
    }
}

#[auto_ops]
impl AddAssign<&Laurent> for Laurent {
    fn add_assign(&mut self, rhs: &Laurent) {
        if rhs.is_zero() { 
            return
        } else if self.is_zero() { 
            *self = rhs.clone();
            return
        }

        let min = self.min_deg().min(rhs.min_deg());
        let max = self.max_deg().max(rhs.max_deg());
        let mut coeffs = vec![0; (max - min + 1) as usize];

        for x in [&*self, rhs] { 
            let k = (x.offset - min) as usize;
            for (i, a) in x.coeffs.iter().enumerate() { 
                coeffs[k + i] += a;
            }
        }

        *self = Self::from_coeffs(coeffs, min);
    }
}

#[auto_ops]
impl SubAssign<&Laurent> for Laurent {
    fn sub_assign(&mut self, rhs: &Laurent) {
        *self += rhs.scale(-1)
    }
}

#[auto_ops]
impl MulAssign<&Laurent> for Laurent {
    fn mul_assign(&mut self, rhs: &Laurent) {
        if self.is_zero() || rhs.is_zero() { 
            *self = Self::zero();
            return
        }
        let mut coeffs = vec![0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() { 
            if *a == 0 { continue }
            for (j, b) in rhs.coeffs.iter().enumerate() { 
                coeffs[i + j] += a * b;
            }
        }
        *self = Self::from_coeffs(coeffs, self.offset + rhs.offset);
    }
}

impl_alg_base!(Laurent);

impl Elem for Laurent { 
    fn math_symbol() -> String {
        String::from("Z[t,t⁻¹]")
    }
}

impl Ring for Laurent {
    fn inv(&self) -> Option<Self> {
        if self.is_unit() { 
            Some(Self::mono(-self.offset, self.coeffs[0]))
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.is_monomial() && self.coeffs[0].abs() == 1
    }

    /// The unit `±t⁻ᵏ` shifting `self` to minimum degree `0` 
    /// with positive lowest coefficient.
    fn normalizing_unit(&self) -> Self {
        match self.coeffs.first() { 
            Some(a) => Self::mono(-self.offset, a.signum()),
            None => Self::one()
        }
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    fn l(coeffs: &[i64], offset: isize) -> Laurent { 
        Laurent::from_coeffs(coeffs.to_vec(), offset)
    }

    #[test]
    fn normalize() { 
        let a = l(&[0, 0, 1, 2, 0], -3);
        assert_eq!(a.coeffs(), &[1, 2]);
        assert_eq!(a.offset(), -1);
        assert_eq!(a.max_deg(), 0);
        assert_eq!(l(&[0, 0], 5), Laurent::zero());
        assert_eq!(Laurent::zero().offset(), 0);
    }

    #[test]
    fn display() { 
        assert_eq!(l(&[1, 0, -1], -1).to_string(), "t⁻¹ - t");
        assert_eq!(l(&[2, -1], 0).to_string(), "2 - t");
        assert_eq!(l(&[1, 0, 1], 0).to_string_with("z"), "1 + z²");
    }

    #[test]
    fn ring_laws() { 
        let a = l(&[1, -2, 3], -2);
        let b = l(&[4, 0, -1], 1);
        let c = l(&[-5, 1], 0);

        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a + Laurent::zero(), a);
        assert_eq!(&a * Laurent::one(), a);
        assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
        assert!((&a - &a).is_zero());
    }

    #[test]
    fn cancellation() { 
        let a = l(&[1, 2, 3], -1);
        let b = l(&[-1, 0, -3], -1);
        assert_eq!(a + b, Laurent::mono(0, 2));
    }

    #[test]
    fn inv() { 
        let a = Laurent::mono(-3, -1);
        assert_eq!(a.inv(), Some(Laurent::mono(3, -1)));
        assert_eq!(l(&[1, 1], 0).inv(), None);
        assert_eq!((&Laurent::variable()).pow(-2), Laurent::mono(-2, 1));
    }

    #[test]
    fn div_by_loop() { 
        assert_eq!(l(&[-1, 0, 0, 0, -1], -2).div_by_loop(), Laurent::one());

        let q = l(&[3, -1, 0, 2, 5, 1], -4);
        let p = Laurent::loop_value() * &q;
        assert_eq!(p.div_by_loop(), q);
        assert_eq!(Laurent::zero().div_by_loop(), Laurent::zero());
    }

    #[test]
    fn div_by_loop_short() { 
        // −t⁻² − t² is the loop value itself.
        let p = l(&[-1, 0, 0, 0, -1], -2);
        assert_eq!(p.div_by_loop(), Laurent::one());

        let q = l(&[2, -1], 3);
        assert_eq!((Laurent::loop_value() * &q).div_by_loop(), q);
    }

    #[test]
    #[should_panic]
    fn div_by_loop_fails() { 
        l(&[1, 0, 0, 0, 2], 0).div_by_loop();
    }

    #[test]
    fn gcd() { 
        // (t − 1)(t + 1)t⁻² and (t − 1)t³
        let a = l(&[-1, 0, 1], -2);
        let b = l(&[-1, 1], 3);
        assert_eq!(a.gcd(&b), l(&[1, -1], 0));
    }

    #[test]
    fn normalizing() { 
        let a = l(&[-1, 1, -1], -1);
        assert_eq!(a.normalized(), l(&[1, -1, 1], 0));
    }

    #[test]
    fn subst() { 
        let a = l(&[1, 0, 2], -1);
        assert_eq!(a.subst_pow(-2), Laurent::from_terms([(2, 1), (-2, 2)]));
        assert_eq!(a.subst_pow(2).div_degrees(2), a);
    }

    #[test]
    fn eval() { 
        let a = l(&[1, -1, 1], -1);
        assert_eq!(a.eval(-1), -3);
        assert_eq!(a.eval(1), 1);
        assert_eq!(l(&[1, 2], 1).eval(3), 21);
    }
}
