use std::fmt::Display;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign, Div, DivAssign};
use auto_impl_ops::auto_ops;
use num_traits::{Zero, One};
use crate::{Elem, Ring, Field, FieldOps, Poly, Laurent};

/// Rational function `numer / denom` over `Z[x]`. 
/// 
/// Always reduced: the gcd of numerator and denominator is `1` 
/// and the leading coefficient of the denominator is positive, 
/// so equal functions have identical representations.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RatFun { 
    numer: Poly,
    denom: Poly
}

impl RatFun { 
    pub fn new(numer: Poly, denom: Poly) -> Self { 
        assert!(!denom.is_zero(), "zero denominator");

        if numer.is_zero() { 
            return Self::zero()
        }

        let g = numer.gcd(&denom);
        let (mut numer, mut denom) = if g.is_one() { 
            (numer, denom)
        } else { 
            // g divides both by construction.
            let p = numer.div_exact(&g).unwrap_or_else(|| panic!("{g} does not divide {numer}"));
            let q = denom.div_exact(&g).unwrap_or_else(|| panic!("{g} does not divide {denom}"));
            (p, q)
        };

        if denom.lead_coeff() < 0 { 
            numer = -numer;
            denom = -denom;
        }

        Self { numer, denom }
    }

    pub fn from_poly(p: Poly) -> Self { 
        Self { numer: p, denom: Poly::one() }
    }

    pub fn constant(a: i64) -> Self { 
        Self::from_poly(Poly::constant(a))
    }

    /// `p(x)` as `(p · xᵏ) / xᵏ` when `p` has negative degrees.
    pub fn from_laurent(p: &Laurent) -> Self { 
        match p.to_poly() { 
            Some(f) => Self::from_poly(f),
            None => { 
                let k = (-p.offset()) as usize;
                Self::new(p.to_poly_shifted(), Poly::mono(k, 1))
            }
        }
    }

    /// The Laurent polynomial equal to `self`, if the denominator is `±xᵏ`.
    pub fn to_laurent(&self) -> Option<Laurent> { 
        let q = &self.denom;
        if !q.is_monomial() || q.lead_coeff() != 1 { 
            return None
        }
        let k = q.deg();
        Some(Laurent::from_poly(&self.numer).shift(-k))
    }

    pub fn numer(&self) -> &Poly { 
        &self.numer
    }

    pub fn denom(&self) -> &Poly { 
        &self.denom
    }

    pub fn is_poly(&self) -> bool { 
        self.denom.is_one()
    }

    pub fn scale(&self, k: i64) -> Self { 
        Self::new(self.numer.scale(k), self.denom.clone())
    }
}

impl Default for RatFun { 
    fn default() -> Self {
        Self::zero()
    }
}

impl Display for RatFun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::paren_expr;
        if self.is_poly() { 
            write!(f, "{}", self.numer)
        } else { 
            write!(f, "{}/{}", paren_expr(&self.numer), paren_expr(&self.denom))
        }
    }
}

impl Zero for RatFun {
    fn zero() -> Self {
        Self::from_poly(Poly::zero())
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl One for RatFun {
    fn one() -> Self {
        Self::from_poly(Poly::one())
    }

    fn is_one(&self) -> bool {
        self.numer == self.denom
    }
}

#[auto_ops]
impl AddAssign<&RatFun> for RatFun {
    fn add_assign(&mut self, rhs: &RatFun) {
        if rhs.is_zero() { 
            return
        } 
        let (a, b) = (&self.numer, &self.denom);
        let (c, d) = (&rhs.numer, &rhs.denom);

        *self = if b == d { 
            Self::new(a + c, b.clone())
        } else { 
            Self::new(a * d + c * b, b * d)
        }
    }
}

#[auto_ops]
impl SubAssign<&RatFun> for RatFun {
    fn sub_assign(&mut self, rhs: &RatFun) {
        *self += rhs.scale(-1)
    }
}

#[auto_ops]
impl MulAssign<&RatFun> for RatFun {
    fn mul_assign(&mut self, rhs: &RatFun) {
        if self.is_zero() || rhs.is_one() { 
            return
        } 
        *self = Self::new(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

#[auto_ops]
impl DivAssign<&RatFun> for RatFun {
    fn div_assign(&mut self, rhs: &RatFun) {
        let inv = rhs.inv().unwrap_or_else(|| panic!("division by zero"));
        *self *= inv
    }
}

impl_alg_base!(RatFun);

impl FieldOps for RatFun {}
impl<'a> FieldOps<RatFun> for &'a RatFun {}

impl Elem for RatFun { 
    fn math_symbol() -> String {
        String::from("Q(x)")
    }
}

impl Ring for RatFun {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() { 
            None
        } else { 
            Some(Self::new(self.denom.clone(), self.numer.clone()))
        }
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or_else(Self::one)
    }
}

impl Field for RatFun {}
