// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`Topology`] instances from a network description.

use petgraph::graph::{DiGraph, NodeIndex};

use crate::{Error, FlowConfig, Network, NetworkNode};

use super::{NodeIndexMap, Topology};

/// `Topology` instantiation.
impl Topology {
    /// Creates a new [`Topology`] from the given network description.
    ///
    /// Returns an error if node IDs are empty or not unique, if a physical
    /// parameter is invalid, or if the topology violates one of the checks
    /// enabled in `config`.
    pub fn try_new(network: Network, config: FlowConfig) -> Result<Self, Error> {
        let source_id = network.source.id.clone();
        let (graph, node_indices) = Self::create_graph(network.into_nodes())?;

        let mut topology = Self {
            graph,
            node_indices,
            source_id,
            config,
        };
        topology.add_links()?;

        topology.validate()?;

        Ok(topology)
    }

    fn create_graph(
        nodes: impl IntoIterator<Item = NetworkNode>,
    ) -> Result<(DiGraph<NetworkNode, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            if node.id().is_empty() {
                return Err(Error::invalid_node(format!(
                    "Node ID not specified for a {}.",
                    node.kind()
                )));
            }
            if indices.contains_key(node.id()) {
                return Err(Error::invalid_topology(format!(
                    "Duplicate node ID found: {}",
                    node.id()
                )));
            }

            let id = node.id().to_string();
            let idx = graph.add_node(node);
            indices.insert(id, idx);
        }

        Ok((graph, indices))
    }

    fn add_links(&mut self) -> Result<(), Error> {
        let links: Vec<(NodeIndex, String)> = self
            .graph
            .node_indices()
            .filter_map(|idx| {
                self.graph[idx]
                    .downstream_link()
                    .map(|did| (idx, did.to_string()))
            })
            .collect();

        for (source_idx, did) in links {
            let sid = self.graph[source_idx].id().to_string();
            match self.node_indices.get(&did) {
                Some(&dest_idx) => {
                    self.graph.update_edge(source_idx, dest_idx, ());
                }
                None if self.config.reject_dangling_links => {
                    return Err(Error::invalid_connection(format!(
                        "Link:({sid}, {did}) Can't find a node with ID {did}"
                    )));
                }
                None => {
                    tracing::warn!("Link:({}, {}) points at an unknown node.", sid, did);
                }
            }
        }

        Ok(())
    }
}

impl TryFrom<Network> for Topology {
    type Error = Error;

    fn try_from(network: Network) -> Result<Self, Self::Error> {
        Self::try_new(network, FlowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::topology::test_utils::NetworkBuilder;
    use crate::SeparatorState;

    #[test]
    fn test_node_validation() {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let consumer = builder.consumer(2.0, 20.0);
        builder.connect(&source, &consumer);
        assert!(builder.build(None).is_ok());

        let mut network = builder.network();
        network.consumers.push(network.consumers[0].clone());
        assert_eq!(
            Topology::try_new(network, FlowConfig::default()).err(),
            Some(Error::invalid_topology(format!(
                "Duplicate node ID found: {}",
                consumer.id()
            )))
        );

        let mut network = builder.network();
        network.consumers[0].id = String::new();
        assert_eq!(
            Topology::try_new(network, FlowConfig::default()).err(),
            Some(Error::invalid_node("Node ID not specified for a Consumer."))
        );

        // A source and a consumer sharing an ID clash as well.
        let mut network = builder.network();
        network.consumers[0].id = source.id().to_string();
        let error = Topology::try_new(network, FlowConfig::default()).err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::InvalidTopology));
    }

    #[test]
    fn test_link_validation() {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let separator = builder.separator(SeparatorState::Closed);
        builder.connect(&source, &separator);
        builder.connect_to_id(&separator, "X9");

        let topology = builder.build(None);
        assert!(topology.is_ok());

        let config = FlowConfig {
            reject_dangling_links: true,
            ..Default::default()
        };
        assert_eq!(
            builder.build(Some(config)).err(),
            Some(Error::invalid_connection(format!(
                "Link:({}, X9) Can't find a node with ID X9",
                separator.id()
            )))
        );
    }

    #[test]
    fn test_try_from_network() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let source = builder.source(10.0, 110.0);
        let consumer = builder.consumer(2.0, 20.0);
        builder.connect(&source, &consumer);

        let topology = Topology::try_from(builder.network())?;
        assert_eq!(topology.source().id(), source.id());
        assert_eq!(topology.nodes().count(), 2);

        Ok(())
    }
}
