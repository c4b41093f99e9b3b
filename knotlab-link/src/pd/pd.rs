use std::collections::HashSet;
use std::fmt::Display;
use ahash::AHashMap;
use delegate::delegate;
use itertools::Itertools;
use knotlab::{KeyedUnionFind, Sign};

use super::{Edge, Entity};
use Entity::{P, X, Xp, Xm, V};

/// Planar diagram code, a list of entities sharing edge labels.
///
/// ```text
///  3   2
///   \ /
///    \      = X(0, 1, 2, 3)
///   / \
///  0   1
/// ```
///
/// Every edge label occurs exactly twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pd {
    data: Vec<Entity>
}

impl Pd {
    pub fn new(data: Vec<Entity>) -> Self {
        let pd = Self { data };
        pd.validate();
        pd
    }

    fn validate(&self) {
        let counts = self.data.iter().flat_map(|x| x.edges()).counts();
        for (e, c) in counts {
            assert_eq!(c, 2, "edge {e} appears {c} times in {self}.");
        }
    }

    pub fn from_pd_code<I>(pd_code: I) -> Self
    where I: IntoIterator<Item = [Edge; 4]> {
        Self::new(pd_code.into_iter().map(X).collect())
    }

    pub fn empty() -> Self {
        Self { data: vec![] }
    }

    pub fn data(&self) -> &[Entity] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Entity> {
        self.data
    }

    delegate! {
        to self.data {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, Entity>;
        }
    }

    pub fn crossing_num(&self) -> usize {
        self.data.iter().filter(|x| x.is_crossing()).count()
    }

    pub fn virtual_num(&self) -> usize {
        self.data.iter().filter(|x| x.is_virtual()).count()
    }

    pub fn is_classical(&self) -> bool {
        self.virtual_num() == 0
    }

    /// No `X` entities. An empty diagram is oriented.
    pub fn is_oriented(&self) -> bool {
        self.data.iter().all(|x| x.is_oriented())
    }

    pub fn crossing_signs(&self) -> Vec<Sign> {
        assert!(self.is_oriented(), "{self} is not oriented.");
        self.data.iter().filter_map(|x| x.sign()).collect()
    }

    pub fn signed_crossing_nums(&self) -> (usize, usize) {
        let signs = self.crossing_signs().into_iter().counts();
        let pos = signs.get(&Sign::Pos).cloned().unwrap_or(0);
        let neg = signs.get(&Sign::Neg).cloned().unwrap_or(0);
        (pos, neg)
    }

    pub fn writhe(&self) -> i64 {
        let (p, n) = self.signed_crossing_nums();
        (p as i64) - (n as i64)
    }

    pub fn mirror(&self) -> Self {
        let data = self.data.iter().map(|x| x.mirror()).collect();
        Self { data }
    }

    pub fn edges(&self) -> HashSet<Edge> {
        self.data.iter().flat_map(|x| x.edges()).cloned().collect()
    }

    pub fn max_edge(&self) -> Option<Edge> {
        self.data.iter().flat_map(|x| x.edges()).max().cloned()
    }

    /// Edge label -> list of `(entity index, slot)` where it occurs.
    pub fn occurrences(&self) -> AHashMap<Edge, Vec<(usize, usize)>> {
        let mut occ: AHashMap<Edge, Vec<(usize, usize)>> = AHashMap::new();
        for (i, x) in self.data.iter().enumerate() {
            for (j, &e) in x.edges().iter().enumerate() {
                occ.entry(e).or_default().push((i, j));
            }
        }
        occ
    }

    /// The edges of each component, sorted, in order of their minimal edge.
    pub fn components(&self) -> Vec<Vec<Edge>> {
        let mut u = KeyedUnionFind::new();
        for x in self.data.iter() {
            match *x {
                P([a, b]) => u.union(&a, &b),
                X([a, b, c, d]) | Xp([a, b, c, d]) | Xm([a, b, c, d]) | V([a, b, c, d]) => {
                    u.union(&a, &c);
                    u.union(&b, &d);
                }
            }
        }
        u.classes()
            .into_iter()
            .map(|c| c.into_iter().sorted().collect_vec())
            .sorted()
            .collect()
    }

    pub fn is_knot(&self) -> bool {
        self.components().len() == 1
    }

    /// Edge label -> index of the component containing it.
    pub fn component_map(&self) -> AHashMap<Edge, usize> {
        self.components()
            .into_iter()
            .enumerate()
            .flat_map(|(i, c)| c.into_iter().map(move |e| (e, i)))
            .collect()
    }

    /// Groups of entity indices connected through shared edges.
    pub fn pieces(&self) -> Vec<Vec<usize>> {
        let mut u = knotlab::UnionFind::new(self.data.len());
        for occ in self.occurrences().values() {
            if let [(i, _), (j, _)] = occ[..] {
                u.union(i, j);
            }
        }
        u.classes()
    }
}

impl Pd {
    pub fn load(path: &str) -> Result<Pd, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let pd = Self::from_json(&json)?;
        Ok(pd)
    }

    pub fn unknot() -> Pd {
        Pd::new(vec![P([1, 1])])
    }

    pub fn trefoil() -> Pd {
        Pd::new(vec![Xp([1, 3, 6, 4]), Xp([3, 5, 2, 6]), Xp([5, 1, 4, 2])])
    }

    pub fn figure8() -> Pd {
        Pd::new(vec![Xp([4, 2, 5, 1]), Xp([8, 6, 1, 5]), Xm([3, 7, 4, 6]), Xm([7, 3, 8, 2])])
    }

    pub fn hopf_link() -> Pd {
        Pd::new(vec![Xp([2, 4, 3, 1]), Xp([4, 2, 1, 3])])
    }

    /// The virtual trefoil, one virtual and two positive crossings.
    pub fn virtual_trefoil() -> Pd {
        Pd::new(vec![Xp([4, 2, 5, 1]), Xp([5, 3, 6, 2]), V([3, 6, 4, 1])])
    }
}

impl FromIterator<Entity> for Pd {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for Pd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PD[{}]", self.data.iter().map(|x| x.to_string()).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        let pd = Pd::trefoil();
        assert_eq!(pd.len(), 3);
        assert_eq!(pd.crossing_num(), 3);
        assert!(pd.is_oriented());
        assert!(pd.is_classical());
    }

    #[test]
    #[should_panic]
    fn invalid() {
        Pd::new(vec![X([0, 1, 2, 3])]);
    }

    #[test]
    fn empty() {
        let pd = Pd::empty();
        assert!(pd.is_empty());
        assert_eq!(pd.components().len(), 0);
        assert_eq!(pd.writhe(), 0);
    }

    #[test]
    fn writhe() {
        assert_eq!(Pd::trefoil().writhe(), 3);
        assert_eq!(Pd::trefoil().mirror().writhe(), -3);
        assert_eq!(Pd::figure8().writhe(), 0);
        assert_eq!(Pd::hopf_link().writhe(), 2);
        assert_eq!(Pd::unknot().writhe(), 0);
    }

    #[test]
    fn components() {
        assert_eq!(Pd::unknot().components(), vec![vec![1]]);
        assert_eq!(Pd::trefoil().components().len(), 1);
        assert_eq!(Pd::figure8().components().len(), 1);
        assert_eq!(Pd::hopf_link().components(), vec![vec![1, 4], vec![2, 3]]);
        assert!(Pd::virtual_trefoil().is_knot());
    }

    #[test]
    fn unoriented() {
        let pd = Pd::from_pd_code([[1,4,2,5],[3,6,4,1],[5,2,6,3]]);
        assert!(!pd.is_oriented());
        assert_eq!(pd.crossing_num(), 3);
        assert_eq!(pd.components().len(), 1);
    }

    #[test]
    fn pieces() {
        let pd = Pd::new(vec![Xp([2, 4, 3, 1]), Xp([4, 2, 1, 3]), P([5, 5])]);
        assert_eq!(pd.pieces(), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn display() {
        assert_eq!(Pd::unknot().to_string(), "PD[P[1, 1]]");
    }
}
