use ahash::AHashMap;
use itertools::Itertools;
use petgraph::Graph;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Dfs;
use knotlab::{Mat, Sign, UnionFind};

use crate::pd::Entity;
use crate::seifert::seifert_matrices;
use super::{Dart, KnotGraph};

impl KnotGraph {
    /// The sign of each classical crossing, as `(vertex, sign)`.
    pub fn crossing_signs(&self) -> Vec<(usize, Sign)> {
        self.adjs.iter().enumerate().filter_map(|(v, x)| {
            let Entity::X(a) = x else { return None };
            let under_in = if a[0] < 0 { 0 } else { 2 };
            let over_in = if a[1] < 0 { 1 } else { 3 };
            Some((v, Sign::from_bool(over_in == (under_in + 3) % 4)))
        }).collect()
    }

    pub fn writhe(&self) -> i64 {
        self.crossing_signs().into_iter().map(|(_, s)| i64::from(s)).sum()
    }

    pub fn is_alternating(&self) -> bool {
        self.adjs.iter().filter(|x| x.is_crossing()).all(|x|
            x.edges().iter().enumerate().all(|(i, &d)| {
                let (_, j) = self.next_crossing(d);
                i % 2 != j % 2
            })
        )
    }

    fn component_of_edges(&self) -> AHashMap<usize, usize> {
        self.components().into_iter().enumerate().flat_map(|(i, c)|
            c.into_iter().map(move |d| ((d.unsigned_abs() - 1) as usize, i))
        ).collect()
    }

    /// Pairwise linking numbers, indexed by the order of `components()`.
    /// Entry `(i, j)` is half the signed count of crossings between them.
    pub fn linking_numbers(&self) -> Mat<i64> {
        let comp = self.component_of_edges();
        let n = self.components().len();
        let mut m: Mat<i64> = Mat::zero((n, n));

        for (v, s) in self.crossing_signs() {
            let a = self.adjs[v].edges();
            let (i, j) = (comp[&self.dart_edge(a[0])], comp[&self.dart_edge(a[1])]);
            if i != j {
                m[(i, j)] += i64::from(s);
                m[(j, i)] += i64::from(s);
            }
        }

        m.map(|&a| a / 2)
    }

    fn vertex_graph(&self) -> UnGraph<(), usize> {
        let mut g = UnGraph::with_capacity(self.nverts(), self.nedges());
        for _ in 0..self.nverts() {
            g.add_node(());
        }
        for (e, s) in self.edges.iter().enumerate() {
            g.add_edge(NodeIndex::new(s.start()), NodeIndex::new(s.end()), e);
        }
        g
    }

    /// Vertex sets of the connected pieces of the graph.
    pub fn pieces(&self) -> Vec<Vec<usize>> {
        let g = self.vertex_graph();
        let mut seen = vec![false; self.nverts()];
        let mut res = vec![];

        for v in 0..self.nverts() {
            if seen[v] {
                continue
            }
            let mut piece = vec![];
            let mut dfs = Dfs::new(&g, NodeIndex::new(v));
            while let Some(u) = dfs.next(&g) {
                seen[u.index()] = true;
                piece.push(u.index());
            }
            piece.sort();
            res.push(piece);
        }

        res
    }

    fn piece_map(&self) -> Vec<usize> {
        let mut map = vec![0; self.nverts()];
        for (i, p) in self.pieces().into_iter().enumerate() {
            for v in p {
                map[v] = i;
            }
        }
        map
    }

    /// Count of the given dart cycles per piece.
    fn count_by_piece(&self, map: &[usize], cycles: &[Vec<Dart>]) -> AHashMap<usize, i64> {
        cycles.iter().map(|c| map[self.dart_start(c[0])]).counts()
            .into_iter().map(|(k, n)| (k, n as i64)).collect()
    }

    /// Seifert circles as nodes, joined by an edge labelled by
    /// the vertex of each classical crossing.
    pub fn seifert_graph(&self) -> Graph<Vec<Dart>, usize> {
        let circles = self.seifert_circuits();
        let mut graph = Graph::new();
        let mut node_of = AHashMap::new();

        for c in circles {
            let i = graph.add_node(c.clone());
            for d in c {
                node_of.insert(d, i);
            }
        }

        for (v, x) in self.adjs.iter().enumerate() {
            if !x.is_crossing() {
                continue
            }
            let out = x.edges().iter().filter(|&&d| d > 0).collect_vec();
            if let [d1, d2] = out[..] {
                graph.add_edge(node_of[d1], node_of[d2], v);
            }
        }

        graph
    }

    /// Genus of the surface from Seifert's algorithm, summed over pieces.
    pub fn genus(&self) -> i64 {
        let map = self.piece_map();
        let npieces = map.iter().max().map(|m| m + 1).unwrap_or(0);

        let s = self.count_by_piece(&map, &self.seifert_circuits());
        let mu = self.count_by_piece(&map, &self.components());
        let c = self.adjs.iter().enumerate().filter(|(_, x)| x.is_crossing()).map(|(v, _)| map[v]).counts();

        (0..npieces).map(|i| {
            let c = c.get(&i).cloned().unwrap_or(0) as i64;
            let s = s.get(&i).cloned().unwrap_or(0);
            let mu = mu.get(&i).cloned().unwrap_or(0);
            (c - s + 2 - mu) / 2
        }).sum()
    }

    /// Genus of the closed surface the diagram embeds in,
    /// with virtual crossings passing through.
    pub fn virtual_genus(&self) -> i64 {
        let n = self.nedges();
        let mut u = UnionFind::new(n);
        let (mut nv, mut nvirt) = (0, 0);

        for x in self.adjs.iter() {
            let e = x.edges().iter().map(|&d| self.dart_edge(d)).collect_vec();
            if x.is_virtual() {
                nvirt += 1;
                u.union(e[0], e[2]);
                u.union(e[1], e[3]);
            } else {
                nv += 1;
                for &f in &e[1..] {
                    u.union(e[0], f);
                }
            }
        }

        let k = u.classes().len() as i64;
        let chi = nv - (n as i64 - 2 * nvirt) + self.faces().len() as i64;
        (2 * k - chi) / 2
    }

    /// Turaev genus of the diagram, from its all-`A` and all-`B` states.
    pub fn turaev(&self) -> i64 {
        assert!(self.is_classical(), "Turaev genus of a virtual diagram.");

        let k = self.pieces().len() as i64;
        let c = self.crossing_num() as i64;
        let sa = self.state_circles(true).len() as i64;
        let sb = self.state_circles(false).len() as i64;

        (2 * k + c - sa - sb) / 2
    }

    /// Seifert matrices of the pieces, one block each.
    pub fn seifert_form(&self) -> Vec<Mat<i64>> {
        seifert_matrices(&self.get_pd(true))
    }
}
