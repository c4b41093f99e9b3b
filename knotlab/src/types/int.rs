use num_traits::{One, Signed};
use crate::*;

macro_rules! impl_ops {
    ($trait:ident, $type:ty) => {
        impl $trait for $type {}
        impl<'a> $trait<$type> for &'a $type {}
    };
}

macro_rules! impl_integer {
    ($type:ident) => {
        impl_ops!(RingOps, $type);

        impl Elem for $type {
            fn math_symbol() -> String { 
                String::from("Z")
            }
        }
        
        impl Ring for $type {
            fn inv(&self) -> Option<Self> {
                if self.is_unit() { 
                    Some(*self)
                } else { 
                    None
                }
            }
        
            fn is_unit(&self) -> bool {
                self.is_one() || (-self).is_one()
            }
        
            fn normalizing_unit(&self) -> Self {
                if self.is_negative() { -1 } else { 1 }
            }
        }
    };
}

impl_integer!(i32);
impl_integer!(i64);

/// Non-negative gcd of all the given integers, `0` for an empty input.
pub fn gcd_all<I>(iter: I) -> i64
where I: IntoIterator<Item = i64> {
    iter.into_iter().fold(0, |g, a| 
        if g == 1 { 1 } else { num_integer::gcd(g, a) }
    )
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn math_symbol() { 
        assert_eq!(i64::math_symbol(), "Z");
    }

    #[test]
    fn gcd_of_list() { 
        assert_eq!(gcd_all([]), 0);
        assert_eq!(gcd_all([-4, 6, 10]), 2);
        assert_eq!(gcd_all([0, 0, 9]), 9);
    }

    #[test]
    fn normalizing_unit() { 
        assert_eq!((-5i64).normalizing_unit(), -1);
        assert_eq!(0i64.normalizing_unit(), 1);
        assert_eq!(2i64.inv(), None);
        assert_eq!((-1i64).inv(), Some(-1));
    }
}
