use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, MulAssign};
use ahash::AHashMap;
use auto_impl_ops::auto_ops;
use itertools::Itertools;
use num_traits::{One, Zero};
use knotlab::{Ring, RingOps};

use crate::pd::Edge;

/// An arc of a planar tangle diagram, with its two boundary ends.
pub trait Strand: Clone + PartialEq + Eq + PartialOrd + Ord + Hash + Debug + Display
where for<'x> &'x Self::R: RingOps<Self::R> {
    type R: Ring;

    fn ends(&self) -> [Edge; 2];

    fn is_loop(&self) -> bool {
        let [a, b] = self.ends();
        a == b
    }

    /// Concatenates `self` and `other` along their common end `e`.
    fn join(&self, other: &Self, e: Edge) -> Self;

    /// The factor contributed when the strand closes up.
    fn loop_value(&self) -> Self::R;

    /// The factor of an open strand when the diagram is evaluated.
    fn end_value(&self) -> Self::R;
}

/// A diagram basis element with a coefficient.
/// Strands are sorted, pairwise disjoint and contain no loops.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Term<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    coeff: S::R,
    strands: Vec<S>
}

impl<S> Term<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    /// Joins strands sharing an end and closes up loops.
    pub fn new(coeff: S::R, strands: Vec<S>) -> Self {
        let mut coeff = coeff;
        let mut at: AHashMap<Edge, Vec<usize>> = AHashMap::new();
        for (i, s) in strands.iter().enumerate() {
            for e in s.ends() {
                at.entry(e).or_default().push(i);
            }
        }

        let mut pending = strands.into_iter().map(Some).collect_vec();
        let mut res = vec![];

        for i in 0..pending.len() {
            let Some(mut s) = pending[i].take() else {
                continue
            };
            loop {
                if s.is_loop() {
                    coeff *= s.loop_value();
                    break
                }

                let next = s.ends().into_iter().find_map(|e|
                    at.get(&e)?.iter().find_map(|&j| pending[j].take()).map(|t| (t, e))
                );

                if let Some((t, e)) = next {
                    s = s.join(&t, e);
                } else {
                    res.push(s);
                    break
                }
            }
        }

        res.sort();
        Self { coeff, strands: res }
    }

    pub fn coeff(&self) -> &S::R {
        &self.coeff
    }

    pub fn strands(&self) -> &[S] {
        &self.strands
    }

    pub fn is_closed(&self) -> bool {
        self.strands.is_empty()
    }

    pub fn eval(&self) -> S::R {
        self.strands.iter().fold(self.coeff.clone(), |c, s| c * s.end_value())
    }
}

impl<S> Display for Term<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}){}", self.coeff, self.strands.iter().join(""))
    }
}

/// Formal sums of planar tangle diagrams over `S::R`.
/// Multiplication glues diagrams along common ends.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    terms: Vec<Term<S>>
}

impl<S> Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    pub fn from_terms<I>(terms: I) -> Self
    where I: IntoIterator<Item = Term<S>> {
        let mut acc: AHashMap<Vec<S>, S::R> = AHashMap::new();
        for t in terms {
            if let Some(c) = acc.get_mut(&t.strands) {
                *c += t.coeff;
            } else {
                acc.insert(t.strands, t.coeff);
            }
        }
        let terms = acc.into_iter()
            .filter(|(_, c)| !c.is_zero())
            .sorted_by(|(s1, _), (s2, _)| s1.cmp(s2))
            .map(|(strands, coeff)| Term { coeff, strands })
            .collect();
        Self { terms }
    }

    pub fn from_term(coeff: S::R, strands: Vec<S>) -> Self {
        Self::from_terms([Term::new(coeff, strands)])
    }

    pub fn terms(&self) -> &[Term<S>] {
        &self.terms
    }

    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    /// Sums the terms, each evaluated by its open strands.
    pub fn eval(&self) -> S::R {
        self.terms.iter().map(|t| t.eval()).sum()
    }

    fn mul_impl(&self, rhs: &Self) -> Self {
        let terms = self.terms.iter().cartesian_product(rhs.terms.iter()).map(|(t1, t2)| {
            let coeff = &t1.coeff * &t2.coeff;
            let strands = t1.strands.iter().chain(t2.strands.iter()).cloned().collect();
            Term::new(coeff, strands)
        });
        Self::from_terms(terms)
    }
}

impl<S> Display for Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.terms.iter().join(" + "))
        }
    }
}

#[auto_ops]
impl<S> AddAssign<&Tangle<S>> for Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn add_assign(&mut self, rhs: &Tangle<S>) {
        let terms = std::mem::take(&mut self.terms);
        *self = Self::from_terms(terms.into_iter().chain(rhs.terms.iter().cloned()))
    }
}

#[auto_ops]
impl<S> MulAssign<&Tangle<S>> for Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn mul_assign(&mut self, rhs: &Tangle<S>) {
        *self = self.mul_impl(rhs)
    }
}

impl<S> Zero for Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn zero() -> Self {
        Self { terms: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S> One for Tangle<S>
where S: Strand, for<'x> &'x S::R: RingOps<S::R> {
    fn one() -> Self {
        Self { terms: vec![Term { coeff: S::R::one(), strands: vec![] }] }
    }
}
