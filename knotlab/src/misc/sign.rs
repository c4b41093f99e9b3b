use std::ops::{Mul, Neg};
use derive_more::{Display, Debug};
use is_even::IsEven;

/// Sign of a crossing, a permutation or a cofactor term.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Debug)]
#[repr(i8)]
pub enum Sign { 
    #[default]
    #[display("+")]
    #[debug("+")]
    Pos = 1,

    #[display("-")]
    #[debug("-")]
    Neg = -1
}

impl Sign { 
    pub fn is_positive(&self) -> bool { 
        self == &Sign::Pos
    }

    pub fn is_negative(&self) -> bool { 
        !self.is_positive()
    }

    pub fn from_bool(positive: bool) -> Self { 
        if positive { Sign::Pos } else { Sign::Neg }
    }

    pub fn from_parity<I: IsEven>(val: I) -> Self { 
        Self::from_bool(val.is_even())
    }
}

macro_rules! impl_int_conversion {
    ($t:ty) => {
        impl From<Sign> for $t {
            fn from(value: Sign) -> Self {
                match value { 
                    Sign::Pos =>  1,
                    Sign::Neg => -1
                }
            }
        }                
    };
}

impl_int_conversion!(i32);
impl_int_conversion!(i64);
impl_int_conversion!(isize);

impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self {
        match self { 
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg
        }
    }
}

impl Mul for Sign { 
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_bool(self == rhs)
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn mul() { 
        use Sign::*;
        assert_eq!(Pos * Pos, Pos);
        assert_eq!(Pos * Neg, Neg);
        assert_eq!(Neg * Neg, Pos);
    }

    #[test]
    fn parity() { 
        assert_eq!(Sign::from_parity(4), Sign::Pos);
        assert_eq!(Sign::from_parity(-3), Sign::Neg);
        assert_eq!(i64::from(-Sign::Pos), -1);
    }
}
