mod knot_graph;
mod edit;
mod invariants;
mod codes;

pub use knot_graph::*;
