// Shared operator boilerplate for the integer polynomial rings. 
// Each type provides `constant(i64)` and `scale(&self, i64)`,
// and `AddAssign`, `SubAssign`, `MulAssign` by reference.
macro_rules! impl_alg_base {
    ($type:ident) => {
        impl std::ops::Neg for $type {
            type Output = $type;
            fn neg(self) -> $type { 
                self.scale(-1)
            }
        }

        impl std::ops::Neg for &$type {
            type Output = $type;
            fn neg(self) -> $type { 
                self.scale(-1)
            }
        }

        impl From<i32> for $type { 
            fn from(a: i32) -> Self {
                Self::constant(a as i64)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(<$type as num_traits::Zero>::zero(), |mut res, x| { res += &x; res })
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a $type>>(iter: I) -> Self {
                iter.fold(<$type as num_traits::Zero>::zero(), |mut res, x| { res += x; res })
            }
        }

        impl std::iter::Product for $type {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(<$type as num_traits::One>::one(), |mut res, x| { res *= &x; res })
            }
        }

        impl<'a> std::iter::Product<&'a $type> for $type {
            fn product<I: Iterator<Item = &'a $type>>(iter: I) -> Self {
                iter.fold(<$type as num_traits::One>::one(), |mut res, x| { res *= x; res })
            }
        }

        impl $crate::RingOps for $type {}
        impl<'a> $crate::RingOps<$type> for &'a $type {}
    };
}

mod int;
mod ratfun;
pub mod poly;

pub use int::*;
pub use ratfun::*;
pub use poly::{Poly, Laurent, MLaurent, MDeg};
