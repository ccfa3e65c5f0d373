//! Emission ordering.
//!
//! A stable partition with exactly two guarantees: generator nodes precede
//! all others, and output nodes follow all others. Relative order is
//! otherwise preserved. The ordering only decides which nodes are
//! candidates for top-level emission; per-node dependency resolution is
//! driven by each node's own input list and is unaffected.

use crate::{Graph, Node, NodeType};

/// Order a graph's nodes for emission: generators first, outputs last,
/// everything else stable in between.
pub fn emission_order(graph: &Graph) -> Vec<&Node> {
    let mut generators = Vec::new();
    let mut middle = Vec::new();
    let mut outputs = Vec::new();

    for node in &graph.nodes {
        if node.kind.is_generator() {
            generators.push(node);
        } else if node.kind == NodeType::Output {
            outputs.push(node);
        } else {
            middle.push(node);
        }
    }

    generators.into_iter().chain(middle).chain(outputs).collect()
}
