// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and links from a [`Topology`].

use crate::iterators::{Links, Neighbors, Nodes};
use crate::{Error, FlowConfig, NetworkNode, Topology};

/// `NetworkNode` and link retrieval.
impl Topology {
    /// Returns the node with the given `node_id`, if it exists.
    pub fn node(&self, node_id: &str) -> Result<&NetworkNode, Error> {
        self.node_indices
            .get(node_id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    /// Returns `true` if a node with the given `node_id` exists.
    pub fn contains(&self, node_id: &str) -> bool {
        self.node_indices.contains_key(node_id)
    }

    /// Returns an iterator over the nodes in the topology, in the order they
    /// were described: primary source, additional sources, transformers,
    /// lines, separators and consumers.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the resolved downstream links in the
    /// topology.  Links to unknown nodes are not included.
    pub fn links(&self) -> Links<'_> {
        Links {
            graph: &self.graph,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns the primary source.
    pub fn source(&self) -> &NetworkNode {
        &self.graph[self.node_indices[&self.source_id]]
    }

    /// Returns an iterator over the additional sources.
    pub fn additional_sources(&self) -> impl Iterator<Item = &NetworkNode> {
        self.nodes()
            .filter(|n| matches!(n, NetworkNode::AdditionalSource(_)))
    }

    /// Returns an iterator over the separators that couple the node with the
    /// given `node_id` into the network.
    pub fn separators_from<'a, 'b>(
        &'a self,
        node_id: &'b str,
    ) -> impl Iterator<Item = &'a NetworkNode> + 'b
    where
        'a: 'b,
    {
        self.nodes().filter(move |n| match n {
            NetworkNode::Separator(s) => s.connects_from.as_deref() == Some(node_id),
            _ => false,
        })
    }

    /// Returns an iterator over the *predecessors* of the node with the given
    /// `node_id`, i.e. every node whose downstream link points at it.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn predecessors(&self, node_id: &str) -> Result<Neighbors<'_>, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self
                    .graph
                    .neighbors_directed(index, petgraph::Direction::Incoming),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    /// Returns the node that the node with the given `node_id` feeds into, if
    /// its downstream link resolves to a known node.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn successor(&self, node_id: &str) -> Result<Option<&NetworkNode>, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| {
                self.graph
                    .neighbors_directed(index, petgraph::Direction::Outgoing)
                    .next()
                    .map(|i| &self.graph[i])
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    /// Returns the configuration the topology was built with.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::test_utils::NetworkBuilder;
    use crate::{NodeKind, SeparatorState};

    #[test]
    fn test_node() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let line = builder.line(20.0, 10.0);
        builder.connect(&source, &line);
        let topology = builder.build(None)?;

        assert_eq!(topology.node(line.id())?.kind(), NodeKind::Line);
        assert!(topology.contains(source.id()));
        assert!(!topology.contains("L99"));
        assert_eq!(
            topology.node("L99"),
            Err(Error::node_not_found("Node with id L99 not found."))
        );

        Ok(())
    }

    #[test]
    fn test_nodes_and_links() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let backup = builder.additional_source(2.0, 20.0);
        let line = builder.line(20.0, 10.0);
        let consumer = builder.consumer(1.0, 20.0);
        builder.connect(&source, &line);
        builder.connect(&line, &consumer);
        builder.connect(&backup, &consumer);
        let topology = builder.build(None)?;

        assert!(topology
            .nodes()
            .map(|n| n.id())
            .eq([source.id(), backup.id(), line.id(), consumer.id()]));

        let links = topology
            .links()
            .map(|(a, b)| (a.id(), b.id()))
            .collect::<Vec<_>>();
        assert_eq!(links.len(), 3);
        assert!(links.contains(&(line.id(), consumer.id())));

        assert!(topology
            .additional_sources()
            .map(|n| n.id())
            .eq([backup.id()]));

        Ok(())
    }

    #[test]
    fn test_neighbors() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let backup = builder.additional_source(2.0, 20.0);
        let separator = builder.separator(SeparatorState::Open);
        let consumer = builder.consumer(1.0, 20.0);
        builder.connect(&source, &consumer);
        builder.connect(&backup, &separator);
        builder.connect(&separator, &consumer);
        builder.connects_from(&separator, &backup);
        let topology = builder.build(None)?;

        let mut predecessors = topology
            .predecessors(consumer.id())?
            .map(|n| n.id())
            .collect::<Vec<_>>();
        predecessors.sort();
        let mut expected = vec![source.id(), separator.id()];
        expected.sort();
        assert_eq!(predecessors, expected);

        assert!(topology.predecessors(source.id())?.next().is_none());
        assert_eq!(
            topology.successor(backup.id())?.map(|n| n.id()),
            Some(separator.id())
        );
        assert_eq!(topology.successor(consumer.id())?, None);
        assert!(topology
            .separators_from(backup.id())
            .map(|n| n.id())
            .eq([separator.id()]));

        let not_found = Error::node_not_found("Node with id C99 not found.");
        assert!(topology.predecessors("C99").is_err_and(|e| e == not_found));
        assert_eq!(topology.successor("C99"), Err(not_found));

        Ok(())
    }

    #[test]
    fn test_separators_outlive_query_id() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let backup = builder.additional_source(2.0, 20.0);
        let separator = builder.separator(SeparatorState::Closed);
        let consumer = builder.consumer(1.0, 20.0);
        builder.connect(&source, &consumer);
        builder.connect(&separator, &consumer);
        builder.connects_from(&separator, &backup);
        let topology = builder.build(None)?;

        let separators = {
            let query = backup.id().to_string();
            topology.separators_from(&query).collect::<Vec<_>>()
        };
        assert!(separators.iter().map(|n| n.id()).eq([separator.id()]));

        Ok(())
    }
}
