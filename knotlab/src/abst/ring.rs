use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_traits::{One, Zero};

/// A coefficient value. `math_symbol` names the ring it lives in,
/// e.g. `Z[t,t⁻¹]`.
pub trait Elem: Default + Eq + Clone + Display + Debug + 'static {
    fn math_symbol() -> String;
}

/// Arithmetic by value and by reference. Implemented for `R` and `&R`.
pub trait RingOps<T = Self>:
    Sized +
    Neg<Output = T> +
    Add<T, Output = T> + for<'a> Add<&'a T, Output = T> +
    Sub<T, Output = T> + for<'a> Sub<&'a T, Output = T> +
    Mul<T, Output = T> + for<'a> Mul<&'a T, Output = T>
{}

/// Commutative rings with unit.
///
/// `normalizing_unit` returns the unit `u` such that `u * self`
/// is the preferred associate, e.g. positive lowest coefficient.
pub trait Ring:
    Elem + RingOps + From<i32> + Zero + One +
    AddAssign + for<'a> AddAssign<&'a Self> +
    SubAssign + for<'a> SubAssign<&'a Self> +
    MulAssign + for<'a> MulAssign<&'a Self> +
    Sum<Self> + for<'a> Sum<&'a Self> +
    Product<Self> + for<'a> Product<&'a Self>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;
    fn normalizing_unit(&self) -> Self;
}

pub trait FieldOps<T = Self>:
    RingOps<T> +
    Div<T, Output = T> + for<'a> Div<&'a T, Output = T>
{}

/// Rings where every non-zero element is a unit.
pub trait Field:
    Ring + FieldOps +
    DivAssign + for<'a> DivAssign<&'a Self>
where
    for<'a> &'a Self: FieldOps<Self>
{}

#[cfg(test)]
mod tests {
    use num_traits::One;
    use crate::{Laurent, Ring};

    #[test]
    fn units() {
        assert_eq!((-1i64).inv(), Some(-1));
        assert!(Laurent::mono(-3, -1).is_unit());
        assert_eq!(Laurent::mono(-3, -1).inv(), Some(Laurent::mono(3, -1)));
        assert!(!Laurent::from_coeffs(vec![1, 1], 0).is_unit());
        assert!((Laurent::mono(2, -1).normalizing_unit() * Laurent::mono(2, -1)).is_one());
    }

    #[test]
    fn sum_product() {
        let t = Laurent::mono(1, 1);
        let s: Laurent = [t.clone(), t.clone()].iter().sum();
        assert_eq!(s, Laurent::mono(1, 2));
        let p: Laurent = vec![t.clone(), t].into_iter().product();
        assert_eq!(p, Laurent::mono(2, 1));
    }
}
