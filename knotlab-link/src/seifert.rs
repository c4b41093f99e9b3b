//! Seifert matrices from Seifert's algorithm on a classical oriented diagram.
//!
//! Smoothing every crossing along the orientation gives the Seifert circles.
//! The surface is built from discs bounded by the circles, joined by a
//! twisted band at each crossing. A spanning tree of the Seifert graph
//! (circles as vertices, bands as edges) gives one homology generator for
//! each band outside the tree, and the matrix entries are the linking numbers
//! of the generators with the push-offs of one another.

use std::collections::{HashSet, VecDeque};
use ahash::AHashMap;
use itertools::Itertools;
use log::debug;
use num_traits::{One, Pow, Zero};
use knotlab::{algo, KeyedUnionFind, Laurent, Mat, MatType, RatFun};

use crate::pd::{eliminate_paths, Edge, Entity, Pd};

/// `(crossing, arc)`; arc `1` is the smoothed arc `0 → 1`, arc `2` is `3 → 2`.
type Visit = (usize, usize);
type Region = (usize, usize);

/// A crossing of a diagram with its sign, `+1` or `−1`.
struct Crossing {
    sign: i64,
    edges: [Edge; 4]
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Step {
    from: usize,
    x: usize,
    d: i64,
    to: usize
}

/// A passage of a cycle along a Seifert circle, entering at `ent` and
/// leaving at `ex` towards the band at crossing `next`.
struct Chord {
    circle: usize,
    ent: Visit,
    ex: Visit,
    next: usize
}

struct SeifertSurface {
    crossings: Vec<Crossing>,
    regions: KeyedUnionFind<Region>,
    circles: Vec<Vec<Visit>>,
    circle_of: AHashMap<Visit, usize>,
    pos: AHashMap<Visit, usize>,
    child: Vec<Region>,
    n: Vec<i64>,
}

impl SeifertSurface {
    fn new(crossings: Vec<Crossing>) -> Self {
        let mut occ: AHashMap<Edge, Vec<(usize, usize)>> = AHashMap::new();
        for (x, c) in crossings.iter().enumerate() {
            for (k, &e) in c.edges.iter().enumerate() {
                occ.entry(e).or_default().push((x, k));
            }
        }

        let other = |x: usize, k: usize| -> (usize, usize) {
            let e = crossings[x].edges[k];
            occ[&e].iter().find(|&&o| o != (x, k)).cloned().unwrap_or((x, k))
        };

        // corners (x, s) lie between slots s and s + 1. corners 1 and 3 merge
        // when the crossing is smoothed.
        let mut regions = KeyedUnionFind::new();
        for x in 0..crossings.len() {
            for s in 0..4 {
                regions.union(&(x, s), &other(x, (s + 1) % 4));
            }
            regions.union(&(x, 1), &(x, 3));
        }

        let mut circles = vec![];
        let mut circle_of = AHashMap::new();
        for x in 0..crossings.len() {
            for arc in [1, 2] {
                if circle_of.contains_key(&(x, arc)) {
                    continue
                }
                let i = circles.len();
                let mut c = vec![];
                let mut cur = (x, arc);
                while !circle_of.contains_key(&cur) {
                    circle_of.insert(cur, i);
                    c.push(cur);
                    let (y, t) = other(cur.0, if cur.1 == 1 { 1 } else { 2 });
                    assert!(t == 0 || t == 3, "inconsistent orientation at crossing {y}.");
                    cur = (y, if t == 0 { 1 } else { 2 });
                }
                circles.push(c);
            }
        }

        let pos = circles.iter().flat_map(|c|
            c.iter().enumerate().map(|(i, &v)| (v, i))
        ).collect();

        let mut surf = Self {
            crossings,
            regions,
            circles,
            circle_of,
            pos,
            child: vec![],
            n: vec![],
        };
        surf.nest_circles();
        surf
    }

    fn region(&self, x: usize, s: usize) -> Region {
        self.regions.root(&(x, s))
    }

    /// The regions on the left and right of circle `i`.
    fn sides(&self, i: usize) -> (Region, Region) {
        let side = |&(x, a): &Visit| if a == 1 {
            (self.region(x, 1), self.region(x, 0))
        } else {
            (self.region(x, 2), self.region(x, 1))
        };
        let c = &self.circles[i];
        let s = side(&c[0]);
        assert!(c.iter().all(|v| side(v) == s), "circle {i} crosses itself.");
        s
    }

    /// Orients the tree of regions and circles away from the first region.
    /// `child[i]` is the side of circle `i` further from the root, and
    /// `n[i]` is `1` if that side is on its left.
    fn nest_circles(&mut self) {
        let sides = (0..self.circles.len()).map(|i| self.sides(i)).collect_vec();
        let roots = sides.iter().flat_map(|&(l, r)| [l, r]).sorted().dedup().collect_vec();
        let Some(&root) = roots.first() else {
            return
        };

        let mut child: Vec<Option<Region>> = vec![None; sides.len()];
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(r) = queue.pop_front() {
            for (i, &(left, right)) in sides.iter().enumerate() {
                if child[i].is_some() || (left != r && right != r) {
                    continue
                }
                let ch = if left == r { right } else { left };
                assert!(seen.insert(ch), "regions do not form a tree.");
                child[i] = Some(ch);
                queue.push_back(ch);
            }
        }

        self.child = child.into_iter().enumerate().map(|(i, c)|
            c.unwrap_or_else(|| panic!("circle {i} is not reached."))
        ).collect();
        self.n = self.child.iter().zip(sides.iter()).map(|(c, (l, _))|
            if c == l { 1 } else { -1 }
        ).collect();
    }

    fn ends(&self, x: usize) -> (usize, usize) {
        (self.circle_of[&(x, 1)], self.circle_of[&(x, 2)])
    }

    /// One cycle per band outside a spanning tree of the Seifert graph.
    fn cycles(&self) -> Vec<Vec<Step>> {
        let m = self.circles.len();
        let mut parent: Vec<Option<Step>> = vec![None; m];
        let mut seen = vec![false; m];
        let mut tree = HashSet::new();
        let mut queue = VecDeque::from([0]);
        seen[0] = true;

        while let Some(c) = queue.pop_front() {
            for x in 0..self.crossings.len() {
                let (c1, c2) = self.ends(x);
                for (a, b, d) in [(c1, c2, 1), (c2, c1, -1)] {
                    if a == c && !seen[b] {
                        seen[b] = true;
                        parent[b] = Some(Step { from: c, x, d, to: b });
                        tree.insert(x);
                        queue.push_back(b);
                    }
                }
            }
        }

        let path_to_root = |mut c: usize| {
            let mut p = vec![];
            while let Some(s) = parent[c] {
                p.push(s);
                c = s.from;
            }
            p.reverse();
            p
        };

        (0..self.crossings.len()).filter(|x| !tree.contains(x)).map(|x| {
            let (a, b) = self.ends(x);
            let (pa, pb) = (path_to_root(a), path_to_root(b));
            let k = pa.iter().zip(pb.iter()).take_while(|(s, t)| s == t).count();

            pa[k..].iter().cloned()
                .chain([Step { from: a, x, d: 1, to: b }])
                .chain(pb[k..].iter().rev().map(|s| Step { from: s.to, x: s.x, d: -s.d, to: s.from }))
                .collect()
        }).collect()
    }

    fn chords(&self, steps: &[Step]) -> Vec<Chord> {
        let k = steps.len();
        (0..k).map(|i| {
            let (s, t) = (steps[i], steps[(i + 1) % k]);
            assert_eq!(s.to, t.from);
            Chord {
                circle: s.to,
                ent: if s.d == 1 { (s.x, 2) } else { (s.x, 1) },
                ex: if t.d == 1 { (t.x, 1) } else { (t.x, 2) },
                next: t.x
            }
        }).collect()
    }

    fn key(&self, v: Visit, lane: isize) -> (isize, isize) {
        let i = self.pos[&v] as isize;
        (i, if v.1 == 1 { lane } else { -lane })
    }

    fn linking(&self, g: &[Step], h: &[Step]) -> i64 {
        let (cg, ch) = (self.chords(g), self.chords(h));
        let m = ch.len();
        let mut total = 0;

        for c in cg.iter() {
            let (a, b) = (self.key(c.ent, 0), self.key(c.ex, 0));
            let i = c.circle;

            if self.n[i] == 1 {
                for c2 in ch.iter().filter(|c2| c2.circle == i) {
                    total -= cyclic_sign(a, b, self.key(c2.ent, 1), self.key(c2.ex, 1));
                }
            }

            for (j, c2) in ch.iter().enumerate() {
                if c2.circle != i || self.region(c2.next, 1) != self.child[i] {
                    continue
                }
                let mut l = (j + 1) % m;
                while ch[l].circle != i {
                    l = (l + 1) % m;
                }
                let (p, q) = (self.key(c2.ex, 1), self.key(ch[l].ent, 1));
                total -= cyclic_sign(a, b, p, q) * self.n[i];
            }
        }

        for s in g.iter() {
            for t in h.iter() {
                if s.x == t.x && self.crossings[s.x].sign == 1 {
                    total -= s.d * t.d;
                }
            }
        }

        total
    }

    fn matrix(&self) -> Mat<i64> {
        let cycles = self.cycles();
        let k = cycles.len();
        Mat::from_fn((k, k), |i, j| self.linking(&cycles[i], &cycles[j]))
    }
}

fn cyclic_between(p: (isize, isize), a: (isize, isize), b: (isize, isize)) -> bool {
    if a < b {
        a < p && p < b
    } else {
        p > a || p < b
    }
}

fn cyclic_sign(a: (isize, isize), b: (isize, isize), p: (isize, isize), q: (isize, isize)) -> i64 {
    match (cyclic_between(p, a, b), cyclic_between(q, a, b)) {
        (true, false) => 1,
        (false, true) => -1,
        _ => 0
    }
}

/// Seifert matrices of a classical oriented diagram, one block per
/// connected piece; a crossingless circle gives a `0 × 0` block.
pub fn seifert_matrices(pd: &Pd) -> Vec<Mat<i64>> {
    assert!(pd.is_classical(), "{pd} is not classical.");
    assert!(pd.is_oriented(), "{pd} is not oriented.");

    let (unknots, pd) = eliminate_paths(pd);
    let mut res = pd.pieces().into_iter().map(|piece| {
        let crossings = piece.iter().map(|&i| match pd.data()[i] {
            Entity::Xp(edges) => Crossing { sign: 1, edges },
            Entity::Xm(edges) => Crossing { sign: -1, edges },
            x => panic!("unexpected {x}.")
        }).collect();
        SeifertSurface::new(crossings).matrix()
    }).collect_vec();

    res.extend((0..unknots).map(|_| Mat::zero((0, 0))));

    debug!("seifert blocks: {:?}", res.iter().map(|m| m.rows()).collect_vec());

    res
}

/// `det(s·V − s⁻¹·Vᵀ)` expressed in `z = s⁻¹ − s`.
pub fn conway_from_seifert(v: &Mat<i64>) -> Laurent {
    let s = |a: i64, k: isize| Laurent::mono(k, a);
    let m = Mat::from_fn(v.shape(), |i, j|
        RatFun::from_laurent(&(s(v[(i, j)], 1) - s(v[(j, i)], -1)))
    );
    let d = algo::det_by_elimination(&m);
    let Some(mut p) = d.to_laurent() else {
        panic!("{d} is not a Laurent polynomial.")
    };

    let z = s(1, -1) - s(1, 1);
    let mut res = Laurent::zero();

    while !p.is_zero() {
        let k = p.max_deg();
        assert!(k >= 0, "not a polynomial in s⁻¹ − s.");

        let c = p.coeff(k) * if k % 2 == 0 { 1 } else { -1 };
        p -= (&z).pow(k).scale(c);
        res += Laurent::mono(k, c);
    }

    res
}

/// The Conway polynomial, if the diagram is a single connected piece.
pub fn conway_polynomial(pd: &Pd) -> Option<Laurent> {
    match &seifert_matrices(pd)[..] {
        [v] => Some(conway_from_seifert(v)),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pd::Entity::*;

    fn conway(pd: &Pd) -> Vec<i64> {
        conway_polynomial(pd).unwrap().coeffs().to_vec()
    }

    fn alexander_from_seifert(v: &Mat<i64>) -> Laurent {
        let t = Laurent::variable();
        let m = Mat::from_fn(v.shape(), |i, j|
            Laurent::constant(v[(i, j)]) - t.scale(v[(j, i)])
        );
        algo::det(&m).normalized()
    }

    #[test]
    fn sizes() {
        let v = seifert_matrices(&Pd::trefoil());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].shape(), (2, 2));

        let v = seifert_matrices(&Pd::figure8());
        assert_eq!(v[0].shape(), (2, 2));

        let v = seifert_matrices(&Pd::hopf_link());
        assert_eq!(v[0].shape(), (1, 1));
    }

    #[test]
    fn unimodular() {
        for pd in [Pd::trefoil(), Pd::trefoil().mirror(), Pd::figure8()] {
            let v = &seifert_matrices(&pd)[0];
            let a = Mat::from_fn(v.shape(), |i, j| v[(i, j)] - v[(j, i)]);
            assert_eq!(algo::det(&a), 1);
        }
    }

    #[test]
    fn alexander() {
        let v = &seifert_matrices(&Pd::trefoil())[0];
        assert_eq!(alexander_from_seifert(v).coeffs(), &[1, -1, 1]);

        let v = &seifert_matrices(&Pd::figure8())[0];
        assert_eq!(alexander_from_seifert(v).coeffs(), &[1, -3, 1]);
    }

    #[test]
    fn conway_knots() {
        assert_eq!(conway(&Pd::trefoil()), vec![1, 0, 1]);
        assert_eq!(conway(&Pd::trefoil().mirror()), vec![1, 0, 1]);
        assert_eq!(conway(&Pd::figure8()), vec![1, 0, -1]);
        assert_eq!(conway(&Pd::unknot()), vec![1]);

        let k52 = Pd::new(vec![Xm([4, 2, 5, 1]), Xm([8, 4, 9, 3]), Xm([10, 6, 1, 5]), Xm([6, 10, 7, 9]), Xm([2, 8, 3, 7])]);
        assert_eq!(conway(&k52), vec![1, 0, 2]);
    }

    #[test]
    fn conway_hopf() {
        assert_eq!(conway_polynomial(&Pd::hopf_link()), Some(Laurent::mono(1, 1)));
    }

    #[test]
    fn split() {
        let pd = Pd::new(vec![Xp([1, 3, 6, 4]), Xp([3, 5, 2, 6]), Xp([5, 1, 4, 2]), P([7, 7])]);
        assert_eq!(seifert_matrices(&pd).len(), 2);
        assert_eq!(conway_polynomial(&pd), None);
    }

    #[test]
    fn kink() {
        let v = seifert_matrices(&Pd::new(vec![Xp([1, 1, 2, 2])]));
        assert_eq!(v[0].shape(), (0, 0));
        assert_eq!(conway_from_seifert(&v[0]), Laurent::one());
    }
}
