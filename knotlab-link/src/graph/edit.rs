use std::collections::VecDeque;
use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::pd::Entity;
use super::{Dart, KnotGraph, Segment};

impl KnotGraph {
    fn flip_edges(&mut self, flip: &AHashSet<usize>) {
        if flip.is_empty() {
            return
        }
        for &e in flip {
            let s = &mut self.edges[e];
            *s = Segment(s.1, s.0, s.2);
        }
        for x in self.adjs.iter_mut() {
            *x = x.convert_edges(|d| {
                let e = (d.unsigned_abs() - 1) as usize;
                if flip.contains(&e) { -d } else { d }
            });
        }
    }

    /// Orients every component along the direction of its lowest edge.
    pub fn ensure_orientation(&mut self) {
        let mut seen = AHashSet::new();
        let mut flip = AHashSet::new();

        for d in self.positive_darts() {
            let e = self.dart_edge(d);
            if seen.contains(&e) {
                continue
            }
            for c in self.dart_circuit(d) {
                let f = self.dart_edge(c);
                seen.insert(f);
                if c < 0 {
                    flip.insert(f);
                }
            }
        }

        debug!("flip {} edges.", flip.len());
        self.flip_edges(&flip);
    }

    pub fn reverse_orientation(&mut self, color: usize) {
        let flip = self.edges.iter().enumerate().filter_map(|(e, s)|
            (s.color() == color).then_some(e)
        ).collect();
        self.flip_edges(&flip);
    }

    /// The first classical crossing reached from `d`, with the slot it enters.
    pub(super) fn next_crossing(&self, d: Dart) -> (usize, usize) {
        let mut d = d;
        loop {
            let (w, j) = self.slot(-d);
            if self.adjs[w].is_crossing() {
                return (w, j)
            }
            d = self.through_dart(d);
        }
    }

    /// Switches crossings so that every strand alternates over and under,
    /// keeping the first crossing of each piece as is.
    pub fn make_alternating(&mut self) {
        assert!(self.is_classical(), "virtual diagrams cannot be made alternating.");

        let n = self.nverts();
        let mut fixed = vec![false; n];

        for v0 in 0..n {
            if fixed[v0] || !self.adjs[v0].is_crossing() {
                continue
            }
            fixed[v0] = true;

            let mut queue = VecDeque::from([v0]);
            while let Some(v) = queue.pop_front() {
                for i in 0..4 {
                    let (w, j) = self.next_crossing(self.adjs[v].edge(i));
                    if fixed[w] {
                        continue
                    }
                    // leaving under, entering over.
                    if i % 2 == j % 2 {
                        self.adjs[w] = self.adjs[w].mirror();
                    }
                    fixed[w] = true;
                    queue.push_back(w);
                }
            }
        }
    }

    /// Removes the component of the given color. Crossings with other
    /// components become 2-valent vertices.
    pub fn delete_component(&mut self, color: usize) {
        let dead = |d: Dart| self.edges[self.dart_edge(d)].color() == color;
        let adjs = self.adjs.iter().map(|x| {
            let a = x.edges();
            match a.len() {
                2 => (!dead(a[0])).then_some(*x),
                _ => match (dead(a[0]), dead(a[1])) {
                    (true, true)   => None,
                    (true, false)  => Some(Entity::P([a[1], a[3]])),
                    (false, true)  => Some(Entity::P([a[0], a[2]])),
                    (false, false) => Some(*x)
                }
            }
        }).collect();
        let keep = self.edges.iter().map(|s| s.color() != color).collect();

        self.rebuild(adjs, keep);
    }

    /// Merges chains of 2-valent vertices, leaving one vertex on each
    /// crossingless circle, and renumbers colors.
    pub fn compact(&mut self) {
        let nv = self.nverts();
        let mut keep_v = vec![true; nv];
        let mut keep_e = vec![true; self.nedges()];

        for v in 0..nv {
            let Entity::P([p, q]) = self.adjs[v] else { continue };
            if p.abs() == q.abs() {
                continue
            }

            // extend the edge of `p` over the edge of `q`.
            let (w, j) = self.slot(-q);
            let ep = self.dart_edge(p);
            keep_e[self.dart_edge(q)] = false;
            keep_v[v] = false;

            self.adjs[w] = self.adjs[w].with_edge(j, p);
            let s = &mut self.edges[ep];
            if p > 0 { s.0 = w } else { s.1 = w }
        }

        let adjs = self.adjs.iter().zip(keep_v).map(|(x, k)| k.then_some(*x)).collect();
        self.rebuild(adjs, keep_e);
    }

    /// Drops removed vertices and edges, renumbers the remaining ones
    /// and the colors in order of appearance.
    fn rebuild(&mut self, adjs: Vec<Option<Entity>>, keep_e: Vec<bool>) {
        let mut vmap = AHashMap::new();
        let mut verts = vec![];
        let mut new_adjs = vec![];

        for (v, x) in adjs.into_iter().enumerate() {
            if let Some(x) = x {
                vmap.insert(v, verts.len());
                verts.push(self.verts[v]);
                new_adjs.push(x);
            }
        }

        let mut emap = AHashMap::new();
        let mut cmap = AHashMap::new();
        let mut edges = vec![];

        for (e, s) in self.edges.iter().enumerate() {
            if !keep_e[e] {
                continue
            }
            let next = cmap.len();
            let c = *cmap.entry(s.color()).or_insert(next);
            emap.insert(e, edges.len() as Dart + 1);
            edges.push(Segment(vmap[&s.start()], vmap[&s.end()], c));
        }

        self.adjs = new_adjs.into_iter().map(|x|
            x.convert_edges(|d| d.signum() * emap[&((d.unsigned_abs() - 1) as usize)])
        ).collect();
        self.verts = verts;
        self.edges = edges;
    }
}
