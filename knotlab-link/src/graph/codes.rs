use ahash::AHashMap;
use itertools::Itertools;

use crate::pd::{Edge, Entity, Pd};
use super::KnotGraph;

impl KnotGraph {
    /// The PD code of the diagram. Arcs between 4-valent vertices are
    /// numbered component by component in color order, each from a dart
    /// leaving a 4-valent vertex. With `oriented`, crossings are tagged
    /// `Xp` / `Xm`; otherwise `X`.
    pub fn get_pd(&self, oriented: bool) -> Pd {
        let is_4 = |v: usize| self.adjs[v].edges().len() == 4;
        let mut label: AHashMap<usize, Edge> = AHashMap::new();
        let mut circles = vec![];
        let mut next: Edge = 1;

        let comps = self.components().into_iter().sorted_by_key(|c|
            self.edges[self.dart_edge(c[0])].color()
        );

        for c in comps {
            let Some(k) = c.iter().position(|&d| is_4(self.dart_start(d))) else {
                for &d in c.iter() {
                    label.insert(self.dart_edge(d), next);
                }
                circles.push(Entity::P([next, next]));
                next += 1;
                continue
            };

            let mut l = next - 1;
            for &d in c[k..].iter().chain(c[..k].iter()) {
                if is_4(self.dart_start(d)) {
                    l += 1;
                }
                label.insert(self.dart_edge(d), l);
            }
            next = l + 1;
        }

        let crossings = self.adjs.iter().filter(|x| x.edges().len() == 4).map(|x| {
            let a = x.edges();
            let s = a.iter().map(|&d| label[&self.dart_edge(d)]).collect_vec();
            match x {
                Entity::X(_) if oriented => {
                    let k = if a[0] < 0 { 0 } else { 2 };
                    let t = |i: usize| s[(k + i) % 4];
                    if a[(k + 3) % 4] < 0 {
                        Entity::Xp([t(0), t(1), t(2), t(3)])
                    } else {
                        Entity::Xm([t(1), t(2), t(3), t(0)])
                    }
                },
                _ => x.with_edges(&s)
            }
        }).collect_vec();

        Pd::new(crossings.into_iter().chain(circles).collect())
    }

    /// The minimal Dowker–Thistlethwaite code over all starting points
    /// and both orientations. An even label is negative when it passes over.
    /// `None` unless the diagram is a classical knot.
    pub fn get_dt(&self) -> Option<Vec<i64>> {
        let comps = self.components();
        if comps.len() != 1 || !self.is_classical() {
            return None
        }

        // (crossing, passes over)
        let passages = comps[0].iter().filter_map(|&d| {
            let (w, j) = self.slot(-d);
            self.adjs[w].is_crossing().then_some((w, j % 2 == 1))
        }).collect_vec();
        let reversed = passages.iter().rev().cloned().collect_vec();

        let n = passages.len();
        if n == 0 {
            return Some(vec![])
        }

        let mut best: Option<Vec<i64>> = None;

        for seq in [&passages, &reversed] {
            for p in 0..n {
                let mut pairs: AHashMap<usize, Vec<(i64, bool)>> = AHashMap::new();
                for (i, &(w, over)) in seq.iter().enumerate() {
                    let l = ((i + n - p) % n + 1) as i64;
                    pairs.entry(w).or_default().push((l, over));
                }

                let mut code = Vec::with_capacity(n / 2);
                for ps in pairs.values() {
                    let [(a, over_a), (b, over_b)] = ps[..] else {
                        return None
                    };
                    let (odd, even, over) = if a % 2 == 1 { (a, b, over_b) } else { (b, a, over_a) };
                    if odd % 2 == even % 2 {
                        return None
                    }
                    code.push((odd, if over { -even } else { even }));
                }

                let code = code.into_iter().sorted().map(|(_, e)| e).collect_vec();
                if best.as_ref().map(|b| &code < b).unwrap_or(true) {
                    best = Some(code);
                }
            }
        }

        best
    }
}
