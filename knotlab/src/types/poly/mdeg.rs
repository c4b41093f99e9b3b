use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::{Add, Neg};
use itertools::{EitherOrBoth, Itertools};
use crate::util::format::{subscript, superscript};

/// Exponent vector of a monomial in `x₀, x₁, ...`. 
/// Trailing zero entries are trimmed, so vectors that differ 
/// only by zero padding are identical.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MDeg(Vec<isize>);

impl MDeg { 
    pub fn new(mut v: Vec<isize>) -> Self { 
        while v.last() == Some(&0) { 
            v.pop();
        }
        Self(v)
    }

    pub fn zero() -> Self { 
        Self(vec![])
    }

    /// `xᵢᵏ`
    pub fn single(i: usize, k: isize) -> Self { 
        let mut v = vec![0; i + 1];
        v[i] = k;
        Self::new(v)
    }

    pub fn is_zero(&self) -> bool { 
        self.0.is_empty()
    }

    pub fn of(&self, i: usize) -> isize { 
        self.0.get(i).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { 
        self.0.len()
    }

    pub fn is_empty(&self) -> bool { 
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, isize)> + '_ { 
        self.0.iter().enumerate().filter(|(_, d)| **d != 0).map(|(i, d)| (i, *d))
    }

    pub fn to_string_with<F>(&self, name: F) -> String
    where F: Fn(usize) -> String { 
        self.iter().map(|(i, d)| { 
            let x = name(i);
            if d == 1 { x } else { format!("{x}{}", superscript(d)) }
        }).join("")
    }
}

impl From<Vec<isize>> for MDeg {
    fn from(v: Vec<isize>) -> Self {
        Self::new(v)
    }
}

impl Ord for MDeg {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().zip_longest(&other.0).map(|e| match e { 
            EitherOrBoth::Both(a, b) => a.cmp(b),
            EitherOrBoth::Left(a)    => a.cmp(&0),
            EitherOrBoth::Right(b)   => 0.cmp(b),
        }).find(|c| c.is_ne()).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MDeg {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &MDeg {
    type Output = MDeg;
    fn add(self, rhs: Self) -> MDeg {
        let v = self.0.iter().zip_longest(&rhs.0).map(|e| match e { 
            EitherOrBoth::Both(a, b) => a + b,
            EitherOrBoth::Left(a) | EitherOrBoth::Right(a) => *a,
        });
        MDeg::new(v.collect())
    }
}

impl Neg for &MDeg {
    type Output = MDeg;
    fn neg(self) -> MDeg {
        MDeg(self.0.iter().map(|d| -d).collect())
    }
}

impl Display for MDeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.to_string_with(|i| format!("x{}", subscript(i as isize)));
        if s.is_empty() { 
            write!(f, "1")
        } else { 
            write!(f, "{s}")
        }
    }
}
