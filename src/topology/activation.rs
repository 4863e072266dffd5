// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains methods that decide whether nodes are electrically
//! reachable.

use crate::{Error, NetworkNode, Topology};

/// Activation checks.
impl Topology {
    /// Returns `true` unless a separator directly upstream of the node with
    /// the given `node_id` is open.
    ///
    /// This is a single-hop check.  A node two hops below an open separator
    /// is still reported as active; cut-off further downstream happens
    /// through the zero power forwarded by the [`FlowEngine`][crate::FlowEngine].
    pub fn is_active(&self, node_id: &str) -> Result<bool, Error> {
        Ok(!self
            .predecessors(node_id)?
            .any(|n| n.is_open_separator()))
    }

    /// Returns the separators that connect the source with the given
    /// `node_id` to the network: every separator that names it as
    /// `connectsFrom`, and its successor if that is a separator.
    pub fn connecting_separators(&self, node_id: &str) -> Result<Vec<&NetworkNode>, Error> {
        let mut separators = self.separators_from(node_id).collect::<Vec<_>>();
        if let Some(successor) = self.successor(node_id)? {
            if successor.separator_state().is_some()
                && !separators.iter().any(|s| s.id() == successor.id())
            {
                separators.push(successor);
            }
        }
        Ok(separators)
    }

    /// Returns `true` if the source with the given `node_id` can inject power
    /// into the network, i.e. none of its connecting separators is open.
    pub fn is_injecting(&self, node_id: &str) -> Result<bool, Error> {
        Ok(!self
            .connecting_separators(node_id)?
            .iter()
            .any(|s| s.is_open_separator()))
    }
}
