use std::fmt::Display;
use num_traits::One;
use knotlab::Laurent;

use crate::pd::{Edge, Entity};
use super::{Strand, Tangle, Term};

/// An unoriented arc between two boundary points, stored with `a ≤ b`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TLPath(Edge, Edge);

impl TLPath {
    pub fn new(a: Edge, b: Edge) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    fn other_end(&self, e: Edge) -> Edge {
        if self.0 == e { self.1 } else { self.0 }
    }
}

impl Display for TLPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P({},{})", self.0, self.1)
    }
}

impl Strand for TLPath {
    type R = Laurent;

    fn ends(&self) -> [Edge; 2] {
        [self.0, self.1]
    }

    fn join(&self, other: &Self, e: Edge) -> Self {
        Self::new(self.other_end(e), other.other_end(e))
    }

    fn loop_value(&self) -> Laurent {
        Laurent::loop_value()
    }

    fn end_value(&self) -> Laurent {
        Laurent::one()
    }
}

pub type TLTerm = Term<TLPath>;

/// The Temperley–Lieb category over `Z[A, A⁻¹]`, `A` written as `t`.
pub type TL = Tangle<TLPath>;

impl TL {
    /// `X(a,b,c,d) = A P(a,b)P(c,d) + A⁻¹ P(a,d)P(b,c)`.
    pub fn from_entity(x: &Entity) -> Self {
        use Entity::*;
        let p = TLPath::new;

        match x.unoriented() {
            P([a, b]) => Self::from_term(Laurent::one(), vec![p(a, b)]),
            V([a, b, c, d]) => Self::from_term(Laurent::one(), vec![p(a, c), p(b, d)]),
            X([a, b, c, d]) => Self::from_terms([
                Term::new(Laurent::mono(1, 1), vec![p(a, b), p(c, d)]),
                Term::new(Laurent::mono(-1, 1), vec![p(a, d), p(b, c)]),
            ]),
            _ => unreachable!()
        }
    }
}
