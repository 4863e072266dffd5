// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity and connectedness of a
//! [`Topology`].

use std::collections::{BTreeSet, HashSet};

use crate::Error;

use super::TopologyValidator;

impl TopologyValidator<'_> {
    /// Validates that every node can be reached from a source.
    ///
    /// It does so by following the downstream links from the primary source
    /// and from every additional source.  A separator whose `connectsFrom`
    /// names a reached node is reached as well.
    pub(super) fn validate_connected_topology(&self) -> Result<(), Error> {
        let mut visited = HashSet::new();
        let mut queue = self
            .topology
            .nodes()
            .filter(|n| n.is_source())
            .map(|n| n.id())
            .collect::<Vec<_>>();
        while let Some(node_id) = queue.pop() {
            if !visited.insert(node_id) {
                continue;
            }
            if let Some(successor) = self.topology.successor(node_id)? {
                queue.push(successor.id());
            }
            queue.extend(self.topology.separators_from(node_id).map(|n| n.id()));
        }

        let unvisited = self
            .topology
            .nodes()
            .map(|n| n.id())
            .filter(|id| !visited.contains(id))
            .collect::<Vec<_>>();

        if !unvisited.is_empty() {
            return Err(Error::invalid_topology(format!(
                "Nodes {:?} are not connected to any source.",
                unvisited
            )));
        }

        Ok(())
    }

    /// Validates that there are no cycles in the downstream links.
    ///
    /// If a cycle is detected, an error is returned, that lists the nodes in
    /// the cycle.
    pub(super) fn validate_acyclicity(&self) -> Result<(), Error> {
        let mut checked = BTreeSet::new();
        for start in self.topology.nodes() {
            let mut path: Vec<&str> = vec![];
            let mut current = Some(start);
            while let Some(node) = current {
                if checked.contains(node.id()) {
                    break;
                }
                if let Some(first_occurance) = path.iter().position(|id| *id == node.id()) {
                    return Err(Error::invalid_topology(format!(
                        "Cycle detected: {} -> {}",
                        path[first_occurance..].join(" -> "),
                        node.id()
                    )));
                }
                path.push(node.id());
                current = self.topology.successor(node.id())?;
            }
            checked.extend(path);
        }
        Ok(())
    }
}
