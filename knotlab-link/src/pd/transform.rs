use std::collections::HashSet;
use ahash::AHashMap;
use itertools::Itertools;
use knotlab::KeyedUnionFind;
use log::debug;

use super::{Edge, Entity, Pd};
use Entity::{P, Xp, Xm, V};

/// Removes `P` and `Virtual` entities by identifying the edges they join.
/// Returns the number of closed loops that were dropped, and the remaining diagram.
pub fn eliminate_paths(pd: &Pd) -> (usize, Pd) {
    let mut u = KeyedUnionFind::new();
    for x in pd.iter() {
        match *x {
            P([a, b]) => u.union(&a, &b),
            V([a, b, c, d]) => {
                u.union(&a, &c);
                u.union(&b, &d);
            },
            _ => ()
        }
    }

    let data = pd.iter()
        .filter(|x| !x.is_path() && !x.is_virtual())
        .map(|x| x.convert_edges(|e| u.root(&e)))
        .collect_vec();

    let used: HashSet<Edge> = data.iter().flat_map(|x| x.edges()).cloned().collect();
    let unknots = u.classes().iter().filter(|c| !used.contains(&u.root(&c[0]))).count();

    (unknots, Pd::new(data))
}

fn kink(sign_pos: bool, e_in: Edge, e_out: Edge, lp: Edge) -> Entity {
    if sign_pos {
        Xp([e_in, e_out, lp, lp])
    } else {
        Xm([e_in, e_out, lp, lp])
    }
}

/// Adds Reidemeister-I kinks so that every component has self-writhe zero.
/// Closed loops without crossings are put back as `P(k, k)` at the end.
pub fn writhe_normalize(pd: &Pd) -> Pd {
    assert!(pd.is_oriented(), "{pd} is not oriented.");

    let (unknots, pd) = eliminate_paths(pd);
    let comps = pd.components();
    let comp = pd.component_map();

    let mut w = vec![0i64; comps.len()];
    for x in pd.iter() {
        if let Some(s) = x.sign() {
            let (i, j) = (comp[&x.edge(0)], comp[&x.edge(1)]);
            if i == j {
                w[i] += i64::from(s);
            }
        }
    }

    let mut next = pd.max_edge().unwrap_or(0) + 1;
    let mut data = pd.into_data();

    for (c, edges) in comps.iter().enumerate() {
        let wc = w[c];
        if wc == 0 {
            continue
        }

        debug!("component {c}: writhe {wc}, adding {} kinks.", wc.abs());

        let e0 = edges[0];
        let Some((i, s)) = data.iter().enumerate().find_map(|(i, x)|
            [0, 3].into_iter().find(|&s| x.edge(s) == e0).map(|s| (i, s))
        ) else {
            panic!("no incoming end of edge {e0}.")
        };

        let mut cur = e0;
        for _ in 0..wc.abs() {
            let (m, l) = (next, next + 1);
            next += 2;
            data.push(kink(wc < 0, cur, m, l));
            cur = m;
        }
        data[i] = data[i].with_edge(s, cur);
    }

    for _ in 0..unknots {
        data.push(P([next, next]));
        next += 1;
    }

    Pd::new(data)
}

/// The `n`-parallel of the writhe-normalized diagram.
///
/// Each edge `e` becomes `n` edges, numbered from the left of the direction
/// of travel, and each crossing becomes an `n × n` grid of crossings of the
/// same sign. Closed loops are multiplied by `n`.
pub fn form_cabling(pd: &Pd, n: usize) -> Pd {
    assert!(n > 0, "number of cables must be positive.");

    let (unknots, pd) = eliminate_paths(&writhe_normalize(pd));

    let index: AHashMap<Edge, usize> = pd.edges().into_iter().sorted().enumerate().map(|(i, e)| (e, i)).collect();
    let copy = |e: Edge, i: usize| (index[&e] * n + i + 1) as Edge;
    let mut next = (index.len() * n + 1) as Edge;

    let mut data = vec![];

    for x in pd.iter() {
        let [a, b, c, d] = match *x {
            Xp(e) | Xm(e) => e,
            _ => panic!("{x} is not oriented.")
        };

        // vertical strands run a -> c, horizontal strands d -> b.
        let mut v = vec![vec![0; n + 1]; n];
        let mut h = vec![vec![0; n + 1]; n];

        for i in 0..n {
            v[i][0] = copy(a, i);
            v[i][n] = copy(c, i);
            h[i][0] = copy(d, i);
            h[i][n] = copy(b, i);
            for k in 1..n {
                v[i][k] = next;
                h[i][k] = next + 1;
                next += 2;
            }
        }

        for i in 0..n {
            for j in 0..n {
                let e = [v[i][n - 1 - j], h[j][i + 1], v[i][n - j], h[j][i]];
                data.push(if matches!(x, Xp(_)) { Xp(e) } else { Xm(e) });
            }
        }
    }

    for _ in 0..unknots * n {
        data.push(P([next, next]));
        next += 1;
    }

    Pd::new(data)
}

/// Cuts the first edge of the first entity, giving a 1-1 tangle.
/// Returns the entities and the two free ends.
pub fn to_tangle(pd: &Pd) -> (Vec<Entity>, [Edge; 2]) {
    assert!(!pd.is_empty());

    let mut data = pd.data().to_vec();
    let e = data[0].edge(0);
    let m = pd.max_edge().unwrap_or(0) + 1;
    data[0] = data[0].with_edge(0, m);

    (data, [e, m])
}
