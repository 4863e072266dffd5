// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and links in a `Topology`.

use petgraph::graph::DiGraph;

use crate::NetworkNode;

/// An iterator over the nodes in a `Topology`.
pub struct Nodes<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<NetworkNode>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a NetworkNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the resolved downstream links in a `Topology`, as
/// `(upstream, downstream)` pairs.
pub struct Links<'a> {
    pub(crate) graph: &'a DiGraph<NetworkNode, ()>,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a> Iterator for Links<'a> {
    type Item = (&'a NetworkNode, &'a NetworkNode);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }
}

/// An iterator over the neighbors of a node in a `Topology`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<NetworkNode, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a NetworkNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
