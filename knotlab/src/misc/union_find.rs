use std::cell::Cell;
use ahash::AHashMap as HashMap;
use std::hash::Hash;
use itertools::Itertools;

/// Disjoint sets over `0..n`. The representative of a class is 
/// always its smallest member.
pub struct UnionFind { 
    p: Vec<Cell<usize>>
}

impl UnionFind { 
    pub fn new(n: usize) -> Self { 
        Self { p: (0..n).map(Cell::new).collect() }
    }

    pub fn size(&self) -> usize { 
        self.p.len()
    }

    pub fn root(&self, i: usize) -> usize { 
        let p = self.p[i].get();
        if p == i { 
            return i
        }
        let r = self.root(p);
        self.p[i].set(r);
        r
    }
    
    pub fn is_same(&self, i: usize, j: usize) -> bool { 
        self.root(i) == self.root(j)
    }

    pub fn union(&mut self, i: usize, j: usize) {
        let ri = self.root(i);
        let rj = self.root(j);

        if ri < rj { 
            self.p[rj].set(ri)
        } else if rj < ri { 
            self.p[ri].set(rj)
        }
    }

    pub fn classes(&self) -> Vec<Vec<usize>> { 
        (0..self.size())
            .into_group_map_by(|&i| self.root(i))
            .into_iter()
            .sorted_by_key(|&(r, _)| r)
            .map(|(_, l)| l)
            .collect()
    }
}

/// `UnionFind` over arbitrary hashable keys, 
/// registered on first use.
pub struct KeyedUnionFind<X> where X: Eq + Hash + Clone { 
    inner: UnionFind,
    keys: Vec<X>,
    dict: HashMap<X, usize>
}

impl<X> KeyedUnionFind<X> where X: Eq + Hash + Clone { 
    pub fn new() -> Self { 
        Self { inner: UnionFind::new(0), keys: vec![], dict: HashMap::new() }
    }

    fn index_or_insert(&mut self, x: &X) -> usize { 
        if let Some(&i) = self.dict.get(x) { 
            return i
        }
        let i = self.keys.len();
        self.inner.p.push(Cell::new(i));
        self.keys.push(x.clone());
        self.dict.insert(x.clone(), i);
        i
    }

    pub fn union(&mut self, x: &X, y: &X) { 
        let i = self.index_or_insert(x);
        let j = self.index_or_insert(y);
        self.inner.union(i, j)
    }

    /// The first-registered key in the class of `x`, 
    /// or `x` itself if it was never registered.
    pub fn root(&self, x: &X) -> X { 
        match self.dict.get(x) { 
            Some(&i) => self.keys[self.inner.root(i)].clone(),
            None => x.clone()
        }
    }

    pub fn is_same(&self, x: &X, y: &X) -> bool { 
        self.root(x) == self.root(y)
    }

    pub fn classes(&self) -> Vec<Vec<X>> { 
        self.inner.classes().into_iter().map(|c| 
            c.into_iter().map(|i| self.keys[i].clone()).collect()
        ).collect()
    }
}

impl<X> Default for KeyedUnionFind<X> where X: Eq + Hash + Clone { 
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn union_find() { 
        let mut u = UnionFind::new(6);
        u.union(4, 2);
        u.union(2, 5);
        u.union(0, 1);

        assert!(u.is_same(4, 5));
        assert!(!u.is_same(1, 2));
        assert_eq!(u.root(5), 2);
        assert_eq!(u.classes(), vec![vec![0, 1], vec![2, 4, 5], vec![3]]);
    }

    #[test]
    fn keyed() { 
        let mut u = KeyedUnionFind::new();
        u.union(&"c", &"a");
        u.union(&"b", &"d");
        u.union(&"a", &"d");

        assert!(u.is_same(&"c", &"b"));
        assert_eq!(u.root(&"b"), "c");
        assert_eq!(u.root(&"z"), "z");
        assert_eq!(u.classes().len(), 1);
    }
}
