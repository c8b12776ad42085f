//! Common test helpers
use crate::engine::{Edge, Node};

pub fn node(id: &str, source: &str) -> Node {
    Node::new(id, source)
}

pub fn edge(source: &str, target: &str) -> Edge {
    Edge::new(source, target)
}
