use std::cell::OnceCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use derive_more::Display;
use log::trace;
use knotlab_link::{KnotGraph, Pd};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Display)]
#[display("#{_0}")]
pub struct DiagramId(u64);

impl DiagramId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Source {
    Pd,
    Graph,
}

#[derive(Debug)]
pub struct DiagramData {
    id: DiagramId,
    source: Source,
    pd: OnceCell<Pd>,
    graph: OnceCell<KnotGraph>,
}

/// A read-only diagram handed to the scheduler. Cached invariants are
/// keyed on its identity, not its content: two handles are the same
/// diagram iff they share the allocation.
#[derive(Clone, Debug)]
pub struct Diagram(Rc<DiagramData>);

impl Diagram {
    fn wrap(source: Source, pd: Option<Pd>, graph: Option<KnotGraph>) -> Self {
        let data = DiagramData {
            id: DiagramId::next(),
            source,
            pd: pd.map(OnceCell::from).unwrap_or_default(),
            graph: graph.map(OnceCell::from).unwrap_or_default(),
        };
        trace!("new diagram {}", data.id);
        Self(Rc::new(data))
    }

    pub fn from_pd(pd: Pd) -> Self {
        Self::wrap(Source::Pd, Some(pd), None)
    }

    pub fn from_graph(graph: KnotGraph) -> Self {
        Self::wrap(Source::Graph, None, Some(graph))
    }

    pub fn id(&self) -> DiagramId {
        self.0.id
    }

    pub fn source(&self) -> Source {
        self.0.source
    }

    /// The PD code; derived from the graph with oriented crossings
    /// if the diagram was given as a graph.
    pub fn pd(&self) -> &Pd {
        self.0.pd.get_or_init(|| match self.0.graph.get() {
            Some(g) => g.get_pd(true),
            None => Pd::empty()
        })
    }

    pub fn graph(&self) -> &KnotGraph {
        self.0.graph.get_or_init(|| KnotGraph::from_pd(self.pd()))
    }

    pub fn is_empty(&self) -> bool {
        match self.0.source {
            Source::Pd => self.pd().is_empty(),
            Source::Graph => self.graph().is_empty(),
        }
    }

    /// The same content under a fresh identity.
    pub fn copy(&self) -> Self {
        match self.0.source {
            Source::Pd => Self::from_pd(self.pd().clone()),
            Source::Graph => Self::from_graph(self.graph().clone()),
        }
    }

    /// A new diagram from an edited copy of the graph.
    pub fn edited<F>(&self, f: F) -> Self
    where F: FnOnce(&mut KnotGraph) {
        let mut g = self.graph().clone();
        f(&mut g);
        Self::from_graph(g)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn downgrade(&self) -> Weak<DiagramData> {
        Rc::downgrade(&self.0)
    }
}

impl From<Pd> for Diagram {
    fn from(pd: Pd) -> Self {
        Self::from_pd(pd)
    }
}

impl From<KnotGraph> for Diagram {
    fn from(g: KnotGraph) -> Self {
        Self::from_graph(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let d = Diagram::from_pd(Pd::trefoil());
        let e = d.clone();
        let f = d.copy();

        assert!(d.ptr_eq(&e));
        assert_eq!(d.id(), e.id());
        assert!(!d.ptr_eq(&f));
        assert_ne!(d.id(), f.id());
        assert_eq!(d.pd(), f.pd());
    }

    #[test]
    fn views() {
        let d = Diagram::from_pd(Pd::trefoil());
        assert_eq!(d.source(), Source::Pd);
        assert_eq!(d.graph().crossing_num(), 3);

        let g = Diagram::from_graph(KnotGraph::from_pd(&Pd::figure8()));
        assert_eq!(g.source(), Source::Graph);
        assert_eq!(g.pd().crossing_num(), 4);
        assert!(g.pd().is_oriented());
    }

    #[test]
    fn edited() {
        let d = Diagram::from_pd(Pd::hopf_link());
        let e = d.edited(|g| g.delete_component(1));
        assert_ne!(d.id(), e.id());
        assert_eq!(e.graph().crossing_num(), 0);
        assert_eq!(d.graph().crossing_num(), 2);
    }

    #[test]
    fn empty() {
        assert!(Diagram::from_pd(Pd::empty()).is_empty());
        assert!(Diagram::from_graph(KnotGraph::empty()).is_empty());
        assert!(!Diagram::from_pd(Pd::unknot()).is_empty());
    }
}
