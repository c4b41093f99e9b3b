use std::collections::HashSet;
use std::f64::consts::PI;
use ahash::AHashMap;
use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pd::{Edge, Entity, Pd};

/// A half-edge. `+(e + 1)` sits at the start of edge `e`, `−(e + 1)` at its end.
pub type Dart = i64;

#[derive(Clone, Copy, PartialEq, Debug, Default, Display, Serialize, Deserialize)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: f64,
    pub y: f64
}

/// `(start vertex, end vertex, component color)`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Segment(pub usize, pub usize, pub usize);

impl Segment {
    pub fn start(&self) -> usize { self.0 }
    pub fn end(&self) -> usize { self.1 }
    pub fn color(&self) -> usize { self.2 }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("vertex {0} has an invalid entity.")]
    InvalidEntity(usize),

    #[error("edge {0} refers to a missing vertex.")]
    InvalidEdge(usize),

    #[error("dart {dart} at vertex {vertex} has no edge.")]
    InvalidDart { vertex: usize, dart: Dart },

    #[error("dart {dart} is used {count} times.")]
    DartCount { dart: Dart, count: usize },

    #[error("dart {dart} is at vertex {vertex}, expected {expected}.")]
    Misplaced { dart: Dart, vertex: usize, expected: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A 4-valent planar graph, possibly with 2-valent vertices, given as a
/// rotation system. Each vertex lists its darts counter-clockwise as an
/// entity: `P` for 2-valent vertices, `X` for crossings with slots `0`, `2`
/// under, `V` for virtual crossings.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct KnotGraph {
    pub(super) verts: Vec<Point>,
    pub(super) edges: Vec<Segment>,
    pub(super) adjs: Vec<Entity>,
}

impl KnotGraph {
    pub fn new(verts: Vec<Point>, edges: Vec<Segment>, adjs: Vec<Entity>) -> Result<Self, GraphError> {
        let g = Self { verts, edges, adjs };
        g.consistency_check()?;
        Ok(g)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the combinatorial map of a diagram, one vertex per entity
    /// and one edge per label, oriented consistently along each component.
    pub fn from_pd(pd: &Pd) -> Self {
        let n = pd.len();
        let labels = pd.edges().into_iter().sorted().collect_vec();
        let index: AHashMap<Edge, usize> = labels.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        let comp = pd.component_map();
        let occ = pd.occurrences();

        let incoming = |(i, k): (usize, usize)| -> Option<bool> {
            let x = &pd.data()[i];
            (x.is_oriented() && !x.is_virtual()).then(|| x.is_incoming(k))
        };

        // the occurrence at which each edge starts.
        let mut starts = AHashMap::new();
        let mut edges = vec![];

        for &e in labels.iter() {
            let (o1, o2) = (occ[&e][0], occ[&e][1]);
            let (s, t) = match (incoming(o1), incoming(o2)) {
                (Some(true), _) | (_, Some(false)) => (o2, o1),
                _ => (o1, o2)
            };
            starts.insert(e, s);
            edges.push(Segment(s.0, t.0, comp[&e]));
        }

        let adjs = pd.iter().enumerate().map(|(i, x)| {
            let darts = x.edges().iter().enumerate().map(|(k, e)| {
                let d = (index[e] + 1) as Dart;
                if starts[e] == (i, k) { d } else { -d }
            }).collect_vec();
            x.with_edges(&darts).unoriented()
        }).collect();

        let verts = (0..n).map(|i| {
            let a = 2.0 * PI * (i as f64) / (n as f64);
            Point { x: a.cos(), y: a.sin() }
        }).collect();

        let mut g = Self { verts, edges, adjs };
        g.ensure_orientation();
        g
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let g: Self = serde_json::from_str(json)?;
        g.consistency_check()?;
        Ok(g)
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn verts(&self) -> &[Point] {
        &self.verts
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    pub fn adjs(&self) -> &[Entity] {
        &self.adjs
    }

    pub fn nverts(&self) -> usize {
        self.verts.len()
    }

    pub fn nedges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn is_classical(&self) -> bool {
        self.adjs.iter().all(|x| !x.is_virtual())
    }

    pub fn crossing_num(&self) -> usize {
        self.adjs.iter().filter(|x| x.is_crossing()).count()
    }

    pub fn consistency_check(&self) -> Result<(), GraphError> {
        use GraphError::*;

        let (nv, ne) = (self.verts.len(), self.edges.len());
        if self.adjs.len() != nv {
            return Err(InvalidEntity(self.adjs.len().min(nv)))
        }

        if let Some(i) = self.edges.iter().position(|s| s.start() >= nv || s.end() >= nv) {
            return Err(InvalidEdge(i))
        }

        let mut counts: AHashMap<Dart, usize> = AHashMap::new();

        for (v, x) in self.adjs.iter().enumerate() {
            if matches!(x, Entity::Xp(_) | Entity::Xm(_)) {
                return Err(InvalidEntity(v))
            }
            for &d in x.edges() {
                if d == 0 || d.unsigned_abs() as usize > ne {
                    return Err(InvalidDart { vertex: v, dart: d })
                }
                let expected = self.dart_start(d);
                if expected != v {
                    return Err(Misplaced { dart: d, vertex: v, expected })
                }
                *counts.entry(d).or_default() += 1;
            }
        }

        for e in 0..ne {
            let d = (e + 1) as Dart;
            for d in [d, -d] {
                let count = counts.get(&d).cloned().unwrap_or(0);
                if count != 1 {
                    return Err(DartCount { dart: d, count })
                }
            }
        }

        Ok(())
    }

    pub fn dart_edge(&self, d: Dart) -> usize {
        (d.unsigned_abs() - 1) as usize
    }

    pub fn opp_dart(&self, d: Dart) -> Dart {
        -d
    }

    /// The vertex where `d` sits.
    pub fn dart_start(&self, d: Dart) -> usize {
        let s = &self.edges[self.dart_edge(d)];
        if d > 0 { s.start() } else { s.end() }
    }

    pub fn dart_end(&self, d: Dart) -> usize {
        self.dart_start(-d)
    }

    pub(super) fn slot(&self, d: Dart) -> (usize, usize) {
        let v = self.dart_start(d);
        let Some(i) = self.adjs[v].edges().iter().position(|&e| e == d) else {
            panic!("dart {d} is not at vertex {v}.")
        };
        (v, i)
    }

    fn rotate(&self, d: Dart, k: usize) -> Dart {
        let (v, i) = self.slot(d);
        let a = self.adjs[v].edges();
        a[(i + k) % a.len()]
    }

    /// The next dart counter-clockwise around the same vertex.
    pub fn next_dart(&self, d: Dart) -> Dart {
        self.rotate(d, 1)
    }

    pub fn prev_dart(&self, d: Dart) -> Dart {
        let n = self.adjs[self.dart_start(d)].edges().len();
        self.rotate(d, n - 1)
    }

    /// The dart leaving the far end of `d`, going straight through.
    pub fn through_dart(&self, d: Dart) -> Dart {
        let e = -d;
        let n = self.adjs[self.dart_start(e)].edges().len();
        self.rotate(e, n / 2)
    }

    /// The dart following `d` along the boundary of a face.
    /// Virtual crossings are passed straight through.
    pub fn face_dart(&self, d: Dart) -> Dart {
        let e = -d;
        if self.adjs[self.dart_start(e)].is_virtual() {
            self.through_dart(d)
        } else {
            self.next_dart(e)
        }
    }

    /// The dart following `d` along its Seifert circle,
    /// turning at crossings to the adjacent outgoing dart.
    pub fn seifert_dart(&self, d: Dart) -> Dart {
        let e = -d;
        match self.adjs[self.dart_start(e)] {
            Entity::X(_) => {
                let n = self.next_dart(e);
                if n > 0 { n } else { self.prev_dart(e) }
            },
            _ => self.through_dart(d)
        }
    }

    fn orbit<F>(&self, d0: Dart, f: F) -> Vec<Dart>
    where F: Fn(Dart) -> Dart {
        let mut res = vec![d0];
        let mut d = f(d0);
        while d != d0 {
            res.push(d);
            d = f(d);
        }
        res
    }

    fn orbits<F, I>(&self, darts: I, f: F) -> Vec<Vec<Dart>>
    where F: Fn(Dart) -> Dart, I: IntoIterator<Item = Dart> {
        let mut seen = HashSet::new();
        let mut res = vec![];
        for d in darts {
            if seen.contains(&d) {
                continue
            }
            let c = self.orbit(d, &f);
            seen.extend(c.iter().cloned());
            res.push(c);
        }
        res
    }

    pub(super) fn positive_darts(&self) -> impl Iterator<Item = Dart> {
        1..=self.edges.len() as Dart
    }

    pub(super) fn all_darts(&self) -> impl Iterator<Item = Dart> {
        self.positive_darts().flat_map(|d| [d, -d])
    }

    pub fn dart_circuit(&self, d0: Dart) -> Vec<Dart> {
        self.orbit(d0, |d| self.through_dart(d))
    }

    pub fn dart_face(&self, d0: Dart) -> Vec<Dart> {
        self.orbit(d0, |d| self.face_dart(d))
    }

    pub fn seifert_circuit(&self, d0: Dart) -> Vec<Dart> {
        self.orbit(d0, |d| self.seifert_dart(d))
    }

    /// One circuit per component, each starting at its lowest edge in the
    /// positive direction.
    pub fn components(&self) -> Vec<Vec<Dart>> {
        let mut seen = HashSet::new();
        let mut res = vec![];
        for d in self.positive_darts() {
            if seen.contains(&d.abs()) {
                continue
            }
            let c = self.dart_circuit(d);
            seen.extend(c.iter().map(|d| d.abs()));
            res.push(c);
        }
        res
    }

    pub fn faces(&self) -> Vec<Vec<Dart>> {
        self.orbits(self.all_darts(), |d| self.face_dart(d))
    }

    pub fn seifert_circuits(&self) -> Vec<Vec<Dart>> {
        self.orbits(self.positive_darts(), |d| self.seifert_dart(d))
    }

    /// Circles of the state smoothing every crossing `A`-wise (`a = true`),
    /// or `B`-wise. `A` joins slots `(0,1)`, `(2,3)`, and `B` joins `(0,3)`, `(1,2)`.
    pub fn state_circles(&self, a: bool) -> Vec<Vec<Dart>> {
        let step = |d: Dart| {
            let e = -d;
            let (v, i) = self.slot(e);
            match self.adjs[v] {
                Entity::X(x) => x[if a { i ^ 1 } else { 3 - i }],
                _ => self.through_dart(d)
            }
        };
        // each circle is found once in each direction.
        self.orbits(self.all_darts(), step).into_iter().filter(|c| {
            let m = c.iter().map(|d| d.abs()).min().unwrap_or(0);
            c.contains(&m)
        }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pd() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        assert_eq!(g.nverts(), 3);
        assert_eq!(g.nedges(), 6);
        assert!(g.consistency_check().is_ok());
        assert!(g.adjs().iter().all(|x| matches!(x, Entity::X(_))));
    }

    #[test]
    fn from_pd_unknot() {
        let g = KnotGraph::from_pd(&Pd::unknot());
        assert_eq!(g.nverts(), 1);
        assert_eq!(g.nedges(), 1);
        assert_eq!(g.adjs()[0], Entity::P([-1, 1]));
        assert!(g.consistency_check().is_ok());
    }

    #[test]
    fn darts() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        for d in g.all_darts() {
            assert_eq!(g.dart_end(d), g.dart_start(g.opp_dart(d)));
            assert_eq!(g.prev_dart(g.next_dart(d)), d);
            assert_eq!(g.next_dart(g.next_dart(g.next_dart(g.next_dart(d)))), d);
        }
    }

    #[test]
    fn circuits() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        let cs = g.components();
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].len(), 6);
        assert!(cs[0].iter().all(|&d| d > 0));

        let g = KnotGraph::from_pd(&Pd::hopf_link());
        assert_eq!(g.components().len(), 2);
    }

    #[test]
    fn faces() {
        // V − E + F = 2
        let g = KnotGraph::from_pd(&Pd::trefoil());
        assert_eq!(g.faces().len(), 5);

        let g = KnotGraph::from_pd(&Pd::figure8());
        assert_eq!(g.faces().len(), 6);
    }

    #[test]
    fn seifert_circuits() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        assert_eq!(g.seifert_circuits().len(), 2);

        let g = KnotGraph::from_pd(&Pd::figure8());
        assert_eq!(g.seifert_circuits().len(), 3);
    }

    #[test]
    fn single_walks() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        for f in g.faces() {
            for &d in &f {
                assert_eq!(g.dart_face(d).len(), f.len());
            }
        }
        let c = g.seifert_circuits();
        let d = c[0][0];
        assert_eq!(g.seifert_circuit(d), c[0]);
    }

    #[test]
    fn state_circles() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        let (sa, sb) = (g.state_circles(true).len(), g.state_circles(false).len());
        assert_eq!(sa + sb, 5);
    }

    #[test]
    fn json() -> Result<(), GraphError> {
        let g = KnotGraph::from_pd(&Pd::figure8());
        let json = g.to_json()?;
        let h = KnotGraph::from_json(&json)?;
        assert_eq!(g, h);
        Ok(())
    }

    #[test]
    fn inconsistent() {
        let g = KnotGraph::from_pd(&Pd::trefoil());
        let mut adjs = g.adjs().to_vec();
        adjs[0] = adjs[1];
        let res = KnotGraph::new(g.verts().to_vec(), g.edges().to_vec(), adjs);
        assert!(res.is_err());
    }

    #[test]
    fn point_display() {
        assert_eq!(Point { x: 1.0, y: -0.5 }.to_string(), "(1, -0.5)");
    }
}
