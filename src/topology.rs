// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the nodes of a radial distribution network and
//! the downstream links between them.

mod activation;
mod creation;
pub mod iterators;
mod retrieval;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::{FlowConfig, NetworkNode};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// `NetworkNode`s stored in a `DiGraph` instance can be addressed with
/// `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node ID, so
/// that nodes in the `DiGraph` can be retrieved from their IDs.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// An index over the nodes of a radial distribution network.
///
/// Every downstream link that points at a known node is stored as an edge,
/// so the topology can answer both "what does X feed" and "what feeds X".
/// The topology is read-only once built; computed power values are kept by
/// the [`FlowEngine`][crate::FlowEngine] in a separate report.
pub struct Topology {
    graph: DiGraph<NetworkNode, ()>,
    node_indices: NodeIndexMap,
    source_id: String,
    config: FlowConfig,
}
