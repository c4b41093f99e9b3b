use std::fmt::Display;
use num_traits::One;
use knotlab::{MDeg, MLaurent};

use crate::pd::{Edge, Entity};
use super::{Strand, Tangle, Term};

/// A directed arc `a → b` carrying a signed cusp count `n`.
/// Stored with `a ≤ b`; reversing the direction negates `n`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ADir {
    a: Edge,
    b: Edge,
    n: isize,
}

impl ADir {
    pub fn new(n: isize, a: Edge, b: Edge) -> Self {
        if a <= b {
            Self { a, b, n }
        } else {
            Self { a: b, b: a, n: -n }
        }
    }

    pub fn weight(&self) -> isize {
        self.n
    }

    /// The weight and the start, for the arc read so that it ends at `e`.
    fn ending_at(&self, e: Edge) -> (isize, Edge) {
        if self.b == e { (self.n, self.a) } else { (-self.n, self.b) }
    }

    fn k_index(&self) -> usize {
        assert!(self.n % 2 == 0, "odd cusp count in {self}.");
        (self.n.unsigned_abs() / 2) as usize
    }
}

impl Display for ADir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}({},{})", self.n, self.a, self.b)
    }
}

/// `A` is `x₀`, `Kₖ` is `xₖ`.
pub fn arrow_var_name(i: usize) -> String {
    if i == 0 { "A".to_string() } else { format!("K{i}") }
}

fn k_var(k: usize) -> MLaurent {
    if k == 0 { MLaurent::one() } else { MLaurent::variable(k) }
}

fn a_pow(k: isize) -> MLaurent {
    MLaurent::mono(1, MDeg::single(0, k))
}

impl Strand for ADir {
    type R = MLaurent;

    fn ends(&self) -> [Edge; 2] {
        [self.a, self.b]
    }

    fn join(&self, other: &Self, e: Edge) -> Self {
        let (n1, x) = self.ending_at(e);
        let (n2, y) = other.ending_at(e);
        Self::new(n1 - n2, x, y)
    }

    /// `d · K_{|n|/2}` with `d = −A² − A⁻²`.
    fn loop_value(&self) -> MLaurent {
        let d = MLaurent::from_terms([(-1, MDeg::single(0, 2)), (-1, MDeg::single(0, -2))]);
        d * k_var(self.k_index())
    }

    fn end_value(&self) -> MLaurent {
        k_var(self.k_index())
    }
}

pub type ATerm = Term<ADir>;

/// The oriented category for the arrow bracket over `Z[A, A⁻¹, K₁, K₂, …]`.
pub type ATL = Tangle<ADir>;

impl ATL {
    pub fn from_entity(x: &Entity) -> Self {
        use Entity::*;

        let oriented = |a, b, c, d| vec![ADir::new(0, a, b), ADir::new(0, d, c)];
        let disoriented = |a, b, c, d| vec![ADir::new(-1, a, d), ADir::new(-1, b, c)];

        match *x {
            P([a, b]) => Self::from_term(MLaurent::one(), vec![ADir::new(0, a, b)]),
            V([a, b, c, d]) => Self::from_term(MLaurent::one(), vec![ADir::new(0, a, c), ADir::new(0, b, d)]),
            Xp([a, b, c, d]) => Self::from_terms([
                Term::new(a_pow(1), oriented(a, b, c, d)),
                Term::new(a_pow(-1), disoriented(a, b, c, d)),
            ]),
            Xm([a, b, c, d]) => Self::from_terms([
                Term::new(a_pow(1), disoriented(a, b, c, d)),
                Term::new(a_pow(-1), oriented(a, b, c, d)),
            ]),
            X(_) => panic!("{x} is not oriented.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir() {
        let d = ADir::new(1, 5, 2);
        assert_eq!(d.ends(), [2, 5]);
        assert_eq!(d.weight(), -1);
    }

    #[test]
    fn join() {
        // a -> e -> b
        let d = ADir::new(-1, 1, 3).join(&ADir::new(-1, 2, 3), 3);
        assert_eq!(d, ADir::new(0, 1, 2));

        let d = ADir::new(-1, 1, 3).join(&ADir::new(1, 2, 3), 3);
        assert_eq!(d, ADir::new(-2, 1, 2));
    }

    #[test]
    fn kinks() {
        let x = ATL::from_entity(&Entity::Xp([1, 2, 3, 3]));
        assert_eq!(x.nterms(), 1);
        assert_eq!(x.terms()[0].coeff(), &(-a_pow(3)));

        let x = ATL::from_entity(&Entity::Xm([1, 2, 3, 3]));
        assert_eq!(x.nterms(), 1);
        assert_eq!(x.terms()[0].coeff(), &(-a_pow(-3)));
    }

    #[test]
    fn loop_values() {
        let l = ADir::new(2, 1, 1);
        assert_eq!(l.loop_value().to_string_with(arrow_var_name), "-A⁻²K1 - A²K1");
        assert_eq!(ADir::new(-4, 1, 2).end_value(), MLaurent::variable(2));
        assert_eq!(ADir::new(0, 1, 2).end_value(), MLaurent::one());
    }

    #[test]
    #[should_panic]
    fn unoriented() {
        ATL::from_entity(&Entity::X([1, 2, 3, 4]));
    }
}
