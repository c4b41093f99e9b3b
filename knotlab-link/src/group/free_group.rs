use std::fmt::Display;
use std::ops::{Add, AddAssign, Sub, SubAssign, Mul, MulAssign, Neg};
use ahash::AHashMap;
use auto_impl_ops::auto_ops;
use itertools::Itertools;
use num_traits::{One, Zero};
use knotlab::Laurent;
use knotlab::util::format::{lc, superscript};

pub type Gen = i64;

/// A reduced word in the free group, as `(generator, exponent)` letters
/// with no zero exponents and no adjacent letters on the same generator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct FGWord {
    letters: Vec<(Gen, i64)>
}

impl FGWord {
    pub fn new<I>(letters: I) -> Self
    where I: IntoIterator<Item = (Gen, i64)> {
        let mut res: Vec<(Gen, i64)> = vec![];
        for (g, e) in letters {
            match res.last_mut() {
                Some((h, f)) if *h == g => {
                    *f += e;
                    if *f == 0 {
                        res.pop();
                    }
                },
                _ if e != 0 => res.push((g, e)),
                _ => ()
            }
        }
        Self { letters: res }
    }

    pub fn identity() -> Self {
        Self { letters: vec![] }
    }

    pub fn generator(g: Gen) -> Self {
        Self { letters: vec![(g, 1)] }
    }

    pub fn letters(&self) -> &[(Gen, i64)] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_identity(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn inv(&self) -> Self {
        let letters = self.letters.iter().rev().map(|&(g, e)| (g, -e)).collect();
        Self { letters }
    }

    pub fn pow(&self, k: i64) -> Self {
        let w = if k < 0 { self.inv() } else { self.clone() };
        Self::new((0..k.abs()).flat_map(|_| w.letters.iter().cloned()))
    }

    pub fn exponent_sum(&self) -> i64 {
        self.letters.iter().map(|(_, e)| e).sum()
    }

    pub fn gens(&self) -> impl Iterator<Item = Gen> + '_ {
        self.letters.iter().map(|(g, _)| *g)
    }

    /// Merges the last letter into the first while they share a generator.
    pub fn cyclically_reduced(&self) -> Self {
        let mut w = self.clone();
        while w.len() > 1 {
            let (g, e0) = w.letters[0];
            let (h, e1) = w.letters[w.len() - 1];
            if g != h {
                break
            }
            let mid = w.letters[1..w.len() - 1].iter().cloned();
            w = Self::new([(g, e0 + e1)].into_iter().chain(mid));
        }
        w
    }

    /// The minimum over all cyclic rotations of the word and its inverse,
    /// a normal form for relators up to conjugation and inversion.
    pub fn normal_form(&self) -> Self {
        let w = self.cyclically_reduced();
        if w.is_identity() {
            return w
        }

        let v = w.inv().cyclically_reduced();
        [w, v].iter().flat_map(|u| {
            let n = u.len();
            (0..n).map(move |i| {
                let letters = u.letters[i..].iter().chain(u.letters[..i].iter()).cloned().collect();
                Self { letters }
            })
        }).min().unwrap_or_default()
    }

    /// Replaces every occurrence of `g` with `w`.
    pub fn substitute(&self, g: Gen, w: &FGWord) -> Self {
        Self::new(self.letters.iter().flat_map(|&(h, e)|
            if h == g {
                w.pow(e).letters
            } else {
                vec![(h, e)]
            }
        ))
    }
}

impl Display for FGWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identity() {
            return write!(f, "1")
        }
        let s = self.letters.iter().map(|&(g, e)|
            if e == 1 { format!("x{g}") } else { format!("x{g}{}", superscript(e as isize)) }
        ).join("");
        write!(f, "{s}")
    }
}

#[auto_ops]
impl MulAssign<&FGWord> for FGWord {
    fn mul_assign(&mut self, rhs: &FGWord) {
        let letters = std::mem::take(&mut self.letters);
        *self = Self::new(letters.into_iter().chain(rhs.letters.iter().cloned()))
    }
}

impl One for FGWord {
    fn one() -> Self {
        Self::identity()
    }
}

/// An element of the integral group ring of the free group,
/// with terms sorted by word.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct FGA {
    terms: Vec<(i64, FGWord)>
}

impl FGA {
    pub fn from_terms<I>(terms: I) -> Self
    where I: IntoIterator<Item = (i64, FGWord)> {
        let mut acc: AHashMap<FGWord, i64> = AHashMap::new();
        for (a, w) in terms {
            *acc.entry(w).or_default() += a;
        }
        let terms = acc.into_iter()
            .filter(|(_, a)| *a != 0)
            .map(|(w, a)| (a, w))
            .sorted_by(|x, y| x.1.cmp(&y.1))
            .collect();
        Self { terms }
    }

    pub fn word(w: FGWord) -> Self {
        Self::from_terms([(1, w)])
    }

    pub fn terms(&self) -> &[(i64, FGWord)] {
        &self.terms
    }

    pub fn scale(&self, k: i64) -> Self {
        Self::from_terms(self.terms.iter().map(|(a, w)| (a * k, w.clone())))
    }

    pub fn substitute(&self, g: Gen, w: &FGWord) -> Self {
        Self::from_terms(self.terms.iter().map(|(a, u)| (*a, u.substitute(g, w))))
    }

    /// Image under the abelianization `g ↦ t`.
    pub fn to_laurent(&self) -> Laurent {
        Laurent::from_terms(self.terms.iter().map(|(a, w)| (w.exponent_sum() as isize, *a)))
    }
}

impl Display for FGA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", lc(self.terms.iter().map(|(a, w)| (w, a))))
    }
}

#[auto_ops]
impl AddAssign<&FGA> for FGA {
    fn add_assign(&mut self, rhs: &FGA) {
        let terms = std::mem::take(&mut self.terms);
        *self = Self::from_terms(terms.into_iter().chain(rhs.terms.iter().cloned()))
    }
}

#[auto_ops]
impl SubAssign<&FGA> for FGA {
    fn sub_assign(&mut self, rhs: &FGA) {
        let terms = std::mem::take(&mut self.terms);
        *self = Self::from_terms(terms.into_iter().chain(rhs.terms.iter().map(|(a, w)| (-a, w.clone()))))
    }
}

#[auto_ops]
impl MulAssign<&FGA> for FGA {
    fn mul_assign(&mut self, rhs: &FGA) {
        let terms = self.terms.iter().cartesian_product(rhs.terms.iter()).map(|((a, u), (b, v))|
            (a * b, u * v)
        ).collect_vec();
        *self = Self::from_terms(terms)
    }
}

impl Neg for FGA {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1)
    }
}

impl Zero for FGA {
    fn zero() -> Self {
        Self { terms: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for FGA {
    fn one() -> Self {
        Self::word(FGWord::identity())
    }
}
