use std::fmt::Display;
use itertools::Itertools;
use log::debug;

use crate::pd::{Entity, Pd};
use super::{FGWord, Gen};

/// A finite group presentation `⟨gens | rels⟩`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Presentation {
    gens: Vec<Gen>,
    rels: Vec<FGWord>
}

impl Presentation {
    pub fn new(gens: Vec<Gen>, rels: Vec<FGWord>) -> Self {
        Self { gens, rels }
    }

    /// One generator per edge, relations from each entity.
    ///
    /// - `P(a,b)`: `a = b`
    /// - `Virtual(a,b,c,d)`: `a = c`, `b = d`
    /// - `Xp(a,b,c,d)`: `b = d`, `c = d⁻¹ad`
    /// - `Xm(a,b,c,d)`: `a = c`, `b = ada⁻¹`
    pub fn wirtinger(pd: &Pd) -> Self {
        use Entity::*;
        assert!(pd.is_oriented(), "{pd} is not oriented.");

        let w = |letters: &[(Gen, i64)]| FGWord::new(letters.iter().cloned());
        let gens = pd.edges().into_iter().sorted().collect_vec();
        let mut rels = vec![];

        for x in pd.iter() {
            match *x {
                P([a, b]) => rels.push(w(&[(a, 1), (b, -1)])),
                V([a, b, c, d]) => {
                    rels.push(w(&[(a, 1), (c, -1)]));
                    rels.push(w(&[(b, 1), (d, -1)]));
                },
                Xp([a, b, c, d]) => {
                    rels.push(w(&[(b, 1), (d, -1)]));
                    rels.push(w(&[(c, 1), (d, -1), (a, -1), (d, 1)]));
                },
                Xm([a, b, c, d]) => {
                    rels.push(w(&[(a, 1), (c, -1)]));
                    rels.push(w(&[(b, 1), (a, 1), (d, -1), (a, -1)]));
                },
                X(_) => unreachable!()
            }
        }

        Self { gens, rels }
    }

    pub fn gens(&self) -> &[Gen] {
        &self.gens
    }

    pub fn rels(&self) -> &[FGWord] {
        &self.rels
    }

    fn normalize_rels(&mut self) {
        let rels = std::mem::take(&mut self.rels);
        self.rels = rels.iter()
            .map(|r| r.normal_form())
            .filter(|r| !r.is_identity())
            .sorted()
            .dedup()
            .collect();
    }

    /// The first relation containing a generator exactly once with exponent `±1`,
    /// as `(relation index, letter index)`.
    fn find_eliminable(&self) -> Option<(usize, usize)> {
        self.rels.iter().enumerate().find_map(|(i, r)| {
            let counts = r.gens().counts();
            r.letters().iter().position(|(g, e)|
                counts[g] == 1 && e.abs() == 1
            ).map(|k| (i, k))
        })
    }

    /// Repeatedly solves a relation for a generator occurring once in it,
    /// and substitutes the solution into the others.
    pub fn simplify(&self) -> Self {
        let mut res = self.clone();
        loop {
            res.normalize_rels();

            let Some((i, k)) = res.find_eliminable() else {
                break
            };

            let r = res.rels.remove(i);
            let (g, e) = r.letters()[k];
            let u = FGWord::new(r.letters()[..k].iter().cloned());
            let v = FGWord::new(r.letters()[k + 1..].iter().cloned());

            // r = u g^e v = 1
            let sub = if e == 1 {
                u.inv() * v.inv()
            } else {
                v * u
            };

            res.rels = res.rels.iter().map(|s| s.substitute(g, &sub)).collect();
            res.gens.retain(|&h| h != g);
        }

        debug!("simplified presentation: {} gens, {} rels.", res.gens.len(), res.rels.len());

        res
    }
}

impl Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gens = self.gens.iter().map(|g| format!("x{g}")).join(", ");
        let rels = self.rels.iter().join(", ");
        write!(f, "⟨{gens} | {rels}⟩")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wirtinger_trefoil() {
        let p = Presentation::wirtinger(&Pd::trefoil());
        assert_eq!(p.gens(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(p.rels().len(), 6);
        assert_eq!(p.rels()[0], FGWord::new([(3, 1), (4, -1)]));
    }

    #[test]
    fn simplify_trefoil() {
        let p = Presentation::wirtinger(&Pd::trefoil()).simplify();
        assert_eq!(p.gens(), &[4, 6]);
        assert_eq!(p.rels().len(), 1);
        assert_eq!(p.rels()[0], FGWord::new([(4, -1), (6, -1), (4, -1), (6, 1), (4, 1), (6, 1)]));
    }

    #[test]
    fn simplify_hopf() {
        let p = Presentation::wirtinger(&Pd::hopf_link()).simplify();
        assert_eq!(p.gens(), &[3, 4]);
        assert_eq!(p.rels(), &[FGWord::new([(3, -1), (4, -1), (3, 1), (4, 1)])]);
    }

    #[test]
    fn simplify_unknot() {
        let p = Presentation::wirtinger(&Pd::unknot()).simplify();
        assert_eq!(p.gens(), &[1]);
        assert!(p.rels().is_empty());
        assert_eq!(p.to_string(), "⟨x1 | ⟩");
    }

    #[test]
    fn virtual_relations() {
        let p = Presentation::wirtinger(&Pd::virtual_trefoil());
        assert_eq!(p.rels().len(), 6);
        assert!(p.rels().contains(&FGWord::new([(3, 1), (4, -1)])));
    }

    #[test]
    #[should_panic]
    fn unoriented() {
        Presentation::wirtinger(&Pd::from_pd_code([[1, 3, 6, 4], [3, 5, 2, 6], [5, 1, 4, 2]]));
    }
}
