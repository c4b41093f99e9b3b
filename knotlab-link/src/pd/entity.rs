use std::fmt::Display;
use itertools::Itertools;
use knotlab::Sign;
use serde::{Deserialize, Serialize};

pub type Edge = i64;

use Entity::{P, X, Xp, Xm, V};

/// A single entry of a planar diagram.
///
/// Slots of the 4-valent entries are listed counter-clockwise.
/// For `X`, slots `0`, `2` form the under strand.
/// For `Xp`, the under strand runs `0 → 2` and the over strand `3 → 1`;
/// `Xm` is the mirror: over `0 → 2`, under `3 → 1`.
/// Both oriented crossings have incoming slots `0`, `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Entity {
    P([Edge; 2]),
    X([Edge; 4]),
    Xp([Edge; 4]),
    Xm([Edge; 4]),
    V([Edge; 4]),
}

impl Entity {
    pub fn edges(&self) -> &[Edge] {
        match self {
            P(e) => e,
            X(e) | Xp(e) | Xm(e) | V(e) => e
        }
    }

    pub fn edge(&self, i: usize) -> Edge {
        self.edges()[i]
    }

    pub fn is_path(&self) -> bool {
        matches!(self, P(_))
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, V(_))
    }

    /// Classical crossings: `X`, `Xp`, `Xm`.
    pub fn is_crossing(&self) -> bool {
        matches!(self, X(_) | Xp(_) | Xm(_))
    }

    pub fn is_oriented(&self) -> bool {
        !matches!(self, X(_))
    }

    pub fn sign(&self) -> Option<Sign> {
        match self {
            Xp(_) => Some(Sign::Pos),
            Xm(_) => Some(Sign::Neg),
            _ => None
        }
    }

    /// The slot reached by passing straight through slot `i`.
    pub fn pass(&self, i: usize) -> usize {
        match self {
            P(_) => 1 - i,
            _    => (i + 2) % 4
        }
    }

    /// Whether slot `i` is an incoming end. Only defined for oriented entities.
    pub fn is_incoming(&self, i: usize) -> bool {
        match self {
            P(_) => i == 0,
            Xp(_) | Xm(_) => i == 0 || i == 3,
            _ => panic!("{self} is not oriented")
        }
    }

    pub fn is_adj_to(&self, other: &Entity) -> bool {
        self.edges().iter().any(|e| other.edges().contains(e))
    }

    /// Exchanges over and under.
    pub fn mirror(&self) -> Self {
        match *self {
            X([a, b, c, d]) => X([b, c, d, a]),
            Xp(e) => Xm(e),
            Xm(e) => Xp(e),
            other => other
        }
    }

    /// Forgets the orientation, keeping `a`–`c` as the under strand.
    pub fn unoriented(&self) -> Self {
        match *self {
            Xp(e) => X(e),
            Xm([a, b, c, d]) => X([d, a, b, c]),
            other => other
        }
    }

    /// Reverses the orientation of both strands.
    pub fn reversed(&self) -> Self {
        match *self {
            P([a, b]) => P([b, a]),
            Xp([a, b, c, d]) => Xp([c, d, a, b]),
            Xm([a, b, c, d]) => Xm([c, d, a, b]),
            other => other
        }
    }

    /// Orients an `X` given whether the strand through slot `0`
    /// enters at `0` and the strand through slot `1` enters at `1`.
    pub fn oriented(&self, under_in_at_0: bool, over_in_at_1: bool) -> Self {
        let X([a, b, c, d]) = *self else {
            return *self
        };
        let (u0, u1) = if under_in_at_0 { (a, c) } else { (c, a) };
        let (o0, o1) = if over_in_at_1 { (b, d) } else { (d, b) };

        // positive iff the over strand enters right after the under strand leaves, going CCW
        if under_in_at_0 == over_in_at_1 {
            Xm([o0, u1, o1, u0])
        } else {
            Xp([u0, o1, u1, o0])
        }
    }

    pub fn convert_edges<F>(&self, f: F) -> Self
    where F: Fn(Edge) -> Edge {
        match *self {
            P(e) => P(e.map(&f)),
            X(e) => X(e.map(&f)),
            Xp(e) => Xp(e.map(&f)),
            Xm(e) => Xm(e.map(&f)),
            V(e) => V(e.map(&f)),
        }
    }

    /// A copy with slot `i` relabelled to `e`.
    pub fn with_edge(&self, i: usize, e: Edge) -> Self {
        let mut y = *self;
        match &mut y {
            P(edges) => edges[i] = e,
            X(edges) | Xp(edges) | Xm(edges) | V(edges) => edges[i] = e
        }
        y
    }

    /// A copy with all slots relabelled in order.
    pub fn with_edges(&self, edges: &[Edge]) -> Self {
        assert_eq!(edges.len(), self.edges().len());
        let mut y = *self;
        for (i, &e) in edges.iter().enumerate() {
            y = y.with_edge(i, e);
        }
        y
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            P(_) => "P",
            X(_) => "X",
            Xp(_) => "Xp",
            Xm(_) => "Xm",
            V(_) => "Virtual",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.type_name(), self.edges().iter().join(", "))
    }
}
