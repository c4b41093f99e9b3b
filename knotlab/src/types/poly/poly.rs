use std::fmt::Display;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign};
use auto_impl_ops::auto_ops;
use num_traits::{Zero, One};
use crate::{Elem, Ring, gcd_all};
use crate::util::format::{lc, power};

/// Univariate polynomial over `Z`, stored densely with 
/// `coeffs[i]` the coefficient of `xⁱ`. 
/// 
/// The coefficient list never ends with `0`, 
/// so the zero polynomial has an empty list and degree `-1`.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poly { 
    coeffs: Vec<i64>
}

impl Poly { 
    pub fn new(mut coeffs: Vec<i64>) -> Self { 
        while coeffs.last() == Some(&0) { 
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn constant(a: i64) -> Self { 
        Self::mono(0, a)
    }

    pub fn mono(deg: usize, a: i64) -> Self { 
        if a == 0 { 
            return Self::zero()
        }
        let mut coeffs = vec![0; deg + 1];
        coeffs[deg] = a;
        Self { coeffs }
    }

    pub fn variable() -> Self { 
        Self::mono(1, 1)
    }

    pub fn coeffs(&self) -> &[i64] { 
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> i64 { 
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    pub fn deg(&self) -> isize { 
        self.coeffs.len() as isize - 1
    }

    pub fn lead_coeff(&self) -> i64 { 
        self.coeffs.last().copied().unwrap_or(0)
    }

    pub fn is_const(&self) -> bool { 
        self.coeffs.len() <= 1
    }

    pub fn is_monomial(&self) -> bool { 
        self.coeffs.iter().filter(|&&a| a != 0).count() == 1
    }

    pub fn scale(&self, k: i64) -> Self { 
        if k == 0 { 
            return Self::zero()
        }
        Self { coeffs: self.coeffs.iter().map(|a| a * k).collect() }
    }

    /// Multiplication by `xᵏ`.
    pub fn shift(&self, k: usize) -> Self { 
        if self.is_zero() { 
            return Self::zero()
        }
        let mut coeffs = vec![0; k];
        coeffs.extend(&self.coeffs);
        Self { coeffs }
    }

    pub fn eval(&self, x: i64) -> i64 { 
        self.coeffs.iter().rev().fold(0, |res, a| res * x + a)
    }

    /// The non-negative gcd of the coefficients.
    pub fn content(&self) -> i64 { 
        gcd_all(self.coeffs.iter().copied())
    }

    /// `self` divided by its content, with positive leading coefficient.
    pub fn primitive_part(&self) -> Self { 
        if self.is_zero() { 
            return Self::zero()
        }
        let c = self.content() * self.lead_coeff().signum();
        Self { coeffs: self.coeffs.iter().map(|a| a / c).collect() }
    }

    /// Remainder of `lc(g)ᵏ · self` modulo `g`, 
    /// computed without leaving `Z[x]`.
    pub fn pseudo_rem(&self, g: &Poly) -> Poly { 
        assert!(!g.is_zero(), "division by zero polynomial");

        let lg = g.lead_coeff();
        let mut r = self.clone();

        while !r.is_zero() && r.deg() >= g.deg() { 
            let k = (r.deg() - g.deg()) as usize;
            let lr = r.lead_coeff();
            r = r.scale(lg) - g.shift(k).scale(lr);
        }

        r
    }

    /// Gcd over `Z[x]`, normalized to a positive leading coefficient.
    pub fn gcd(&self, other: &Poly) -> Poly { 
        if self.is_zero() { 
            return other.normalized()
        } else if other.is_zero() { 
            return self.normalized()
        }

        let c = num_integer::gcd(self.content(), other.content());
        let (mut f, mut g) = (self.primitive_part(), other.primitive_part());

        if f.deg() < g.deg() { 
            std::mem::swap(&mut f, &mut g);
        }

        while !g.is_zero() { 
            let r = f.pseudo_rem(&g).primitive_part();
            (f, g) = (g, r);
        }

        f.scale(c)
    }

    /// Exact quotient `self / g` in `Z[x]`, or `None` if `g` does not divide `self`.
    pub fn div_exact(&self, g: &Poly) -> Option<Poly> { 
        assert!(!g.is_zero(), "division by zero polynomial");

        if self.is_zero() { 
            return Some(Self::zero())
        } else if self.deg() < g.deg() { 
            return None
        }

        let dg = g.deg() as usize;
        let lg = g.lead_coeff();
        let n = (self.deg() - g.deg()) as usize;

        let mut q = vec![0; n + 1];
        let mut r = self.coeffs.clone();

        for k in (0..=n).rev() { 
            let a = r[k + dg];
            if a % lg != 0 { 
                return None
            }
            let a = a / lg;
            for (j, b) in g.coeffs.iter().enumerate() { 
                r[k + j] -= a * b;
            }
            q[k] = a;
        }

        if r.iter().all(|&a| a == 0) { 
            Some(Self::new(q))
        } else { 
            None
        }
    }

    pub fn normalized(&self) -> Self { 
        self * self.normalizing_unit()
    }
}

impl Display for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms = self.coeffs.iter().enumerate().filter(|(_, a)| **a != 0).map(|(i, a)| 
            (power("x", i as isize), a)
        );
        write!(f, "{}", lc(terms))
    }
}

impl Zero for Poly {
    fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl One for Poly {
    fn one() -> Self {
        Self::constant(1)
    }

    fn is_one(&self) -> bool { 
        self.coeffs == [1]
    }
}

#[auto_ops]
impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, rhs: &Poly) {
        if self.coeffs.len() < rhs.coeffs.len() { 
            self.coeffs.resize(rhs.coeffs.len(), 0);
        }
        for (a, b) in self.coeffs.iter_mut().zip(&rhs.coeffs) { 
            *a += b;
        }
        *self = Self::new(std::mem::take(&mut self.coeffs));
    }
}

#[auto_ops]
impl SubAssign<&Poly> for Poly {
    fn sub_assign(&mut self, rhs: &Poly) {
        *self += rhs.scale(-1)
    }
}

#[auto_ops]
impl MulAssign<&Poly> for Poly {
    fn mul_assign(&mut self, rhs: &Poly) {
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
        *self = Self::new(coeffs);
    }
}

impl_alg_base!(Poly);

impl Elem for Poly { 
    fn math_symbol() -> String {
        String::from("Z[x]")
    }
}

impl Ring for Poly {
    fn inv(&self) -> Option<Self> {
        if self.is_unit() { 
            Some(self.clone())
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.is_const() && self.lead_coeff().abs() == 1
    }

    fn normalizing_unit(&self) -> Self {
        if self.lead_coeff() < 0 { 
            Self::constant(-1)
        } else { 
            Self::one()
        }
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    fn p(coeffs: &[i64]) -> Poly { 
        Poly::new(coeffs.to_vec())
    }

    #[test]
    fn normalize() { 
        let f = p(&[1, 2, 0, 0]);
        assert_eq!(f.coeffs(), &[1, 2]);
        assert_eq!(f.deg(), 1);
        assert_eq!(Poly::zero().deg(), -1);
        assert_eq!(p(&[0, 0]), Poly::zero());
    }

    #[test]
    fn display() { 
        assert_eq!(p(&[1, -3, 0, 2]).to_string(), "1 - 3x + 2x³");
        assert_eq!(Poly::zero().to_string(), "0");
    }

    #[test]
    fn ring_laws() { 
        let a = p(&[1, -2, 3]);
        let b = p(&[0, 4, 0, -1]);
        let c = p(&[-5, 1]);

        assert_eq!(&a + &b, &b + &a);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a + Poly::zero(), a);
        assert_eq!(&a * Poly::one(), a);
        assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
        assert_eq!(&a - &a, Poly::zero());
    }

    #[test]
    fn mul() { 
        let x = Poly::variable();
        let f = (&x - Poly::one()) * (&x + Poly::one());
        assert_eq!(f, p(&[-1, 0, 1]));
    }

    #[test]
    fn content() { 
        let f = p(&[-4, 6, -2]);
        assert_eq!(f.content(), 2);
        assert_eq!(f.primitive_part(), p(&[2, -3, 1]));
    }

    #[test]
    fn gcd() { 
        // (x - 1)(x + 2) and (x - 1)(2x + 3)
        let a = p(&[-2, 1, 1]);
        let b = p(&[-3, 1, 2]);
        assert_eq!(a.gcd(&b), p(&[-1, 1]));
    }

    #[test]
    fn gcd_with_content() { 
        let a = p(&[4, 4]);     // 4(x + 1)
        let b = p(&[-6, 0, 6]); // 6(x - 1)(x + 1)
        assert_eq!(a.gcd(&b), p(&[2, 2]));
        assert_eq!(a.gcd(&Poly::zero()), a);
        assert_eq!(p(&[0, -3]).gcd(&Poly::zero()), p(&[0, 3]));
    }

    #[test]
    fn gcd_divides() { 
        let g = p(&[1, -1, 1]);
        let a = &g * p(&[3, 0, 1]);
        let b = &g * p(&[-2, 5]);
        let d = a.gcd(&b);
        assert_eq!(d, g);
        assert!(a.div_exact(&d).is_some());
        assert!(b.div_exact(&d).is_some());
    }

    #[test]
    fn coprime() { 
        let a = p(&[1, 0, 1]);
        let b = p(&[1, 1]);
        assert_eq!(a.gcd(&b), Poly::one());
    }

    #[test]
    fn div_exact() { 
        let f = p(&[-1, 0, 0, 1]);
        assert_eq!(f.div_exact(&p(&[-1, 1])), Some(p(&[1, 1, 1])));
        assert_eq!(f.div_exact(&p(&[1, 1])), None);
        assert_eq!(p(&[2, 4]).div_exact(&p(&[2])), Some(p(&[1, 2])));
        assert_eq!(p(&[1, 4]).div_exact(&p(&[2])), None);
    }

    #[test]
    fn eval() { 
        assert_eq!(p(&[1, -1, 1]).eval(-1), 3);
        assert_eq!(p(&[1, 2, 3]).eval(2), 17);
    }
}
