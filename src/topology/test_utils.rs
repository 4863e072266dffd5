// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains the
//! `NetworkBuilder`, which can declaratively build feeder configurations for
//! use in tests.

use crate::{
    Consumer, Error, FlowConfig, Line, Network, Separator, SeparatorState, Source, Topology,
    Transformer, TransformerType,
};

/// Represents a node added to the `NetworkBuilder`.
#[derive(Eq, Hash, PartialEq, Clone, Debug)]
pub(crate) struct NodeHandle(String);

impl NodeHandle {
    /// Returns the ID of the node.
    pub(crate) fn id(&self) -> &str {
        &self.0
    }
}

/// A builder for creating feeder configurations easily, for use in tests.
pub(crate) struct NetworkBuilder {
    network: Network,
    next_id: u64,
}

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    pub(crate) fn new() -> Self {
        NetworkBuilder {
            network: Network::default(),
            next_id: 1,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Sets the primary source and returns its handle.
    pub(crate) fn source(&mut self, power_mw: f64, voltage_kv: f64) -> NodeHandle {
        let id = self.next_id("S");
        self.network.source = Source {
            id: id.clone(),
            power_mw,
            voltage_kv,
            connected_to: None,
        };
        NodeHandle(id)
    }

    /// Adds an additional source and returns its handle.
    pub(crate) fn additional_source(&mut self, power_mw: f64, voltage_kv: f64) -> NodeHandle {
        let id = self.next_id("AS");
        self.network.additional_sources.push(Source {
            id: id.clone(),
            power_mw,
            voltage_kv,
            connected_to: None,
        });
        NodeHandle(id)
    }

    /// Adds a power transformer and returns its handle.
    pub(crate) fn transformer(
        &mut self,
        input_voltage_kv: f64,
        output_voltage_kv: f64,
        steel_losses_kw: f64,
        copper_losses_kw: f64,
    ) -> NodeHandle {
        let id = self.next_id("T");
        self.network.transformers.push(Transformer {
            id: id.clone(),
            input_voltage_kv,
            output_voltage_kv,
            connected_to: None,
            transformer_type: TransformerType::Power,
            efficiency: 1.0,
            apparent_power_mva: 16.0,
            copper_losses_kw,
            steel_losses_kw,
        });
        NodeHandle(id)
    }

    /// Adds an aluminium line with a 50 mm² cross-section, 4 m phase spacing
    /// and 1 cm conductor radius, and returns its handle.
    pub(crate) fn line(&mut self, voltage_kv: f64, length_km: f64) -> NodeHandle {
        let id = self.next_id("L");
        self.network.lines.push(Line {
            id: id.clone(),
            voltage_kv,
            length_km,
            connected_to: None,
            area_mm2: 50.0,
            resistivity: 2.82e-8,
            d_rs: 4.0,
            d_st: 4.0,
            d_rt: 4.0,
            conductor_radius_m: 0.01,
        });
        NodeHandle(id)
    }

    /// Adds a separator and returns its handle.
    pub(crate) fn separator(&mut self, state: SeparatorState) -> NodeHandle {
        let id = self.next_id("SEP");
        self.network.separators.push(Separator {
            id: id.clone(),
            state,
            connects_from: None,
            connected_to: None,
        });
        NodeHandle(id)
    }

    /// Adds a consumer and returns its handle.
    pub(crate) fn consumer(&mut self, power_needed_mw: f64, voltage_kv: f64) -> NodeHandle {
        let id = self.next_id("C");
        self.network.consumers.push(Consumer {
            id: id.clone(),
            power_needed_mw,
            voltage_kv,
            connected_to: None,
        });
        NodeHandle(id)
    }

    fn link_mut(&mut self, handle: &NodeHandle) -> &mut Option<String> {
        let n = &mut self.network;
        if n.source.id == handle.0 {
            return &mut n.source.connected_to;
        }
        if let Some(s) = n.additional_sources.iter_mut().find(|s| s.id == handle.0) {
            return &mut s.connected_to;
        }
        if let Some(t) = n.transformers.iter_mut().find(|t| t.id == handle.0) {
            return &mut t.connected_to;
        }
        if let Some(l) = n.lines.iter_mut().find(|l| l.id == handle.0) {
            return &mut l.connected_to;
        }
        if let Some(s) = n.separators.iter_mut().find(|s| s.id == handle.0) {
            return &mut s.connected_to;
        }
        if let Some(c) = n.consumers.iter_mut().find(|c| c.id == handle.0) {
            return &mut c.connected_to;
        }
        panic!("Unknown node handle: {}", handle.0);
    }

    fn separator_mut(&mut self, handle: &NodeHandle) -> &mut Separator {
        self.network
            .separators
            .iter_mut()
            .find(|s| s.id == handle.0)
            .unwrap_or_else(|| panic!("Not a separator: {}", handle.0))
    }

    /// Points the downstream link of `from` at `to`.
    pub(crate) fn connect(&mut self, from: &NodeHandle, to: &NodeHandle) -> &mut Self {
        *self.link_mut(from) = Some(to.0.clone());
        self
    }

    /// Points the downstream link of `from` at an arbitrary ID.
    pub(crate) fn connect_to_id(&mut self, from: &NodeHandle, to: &str) -> &mut Self {
        *self.link_mut(from) = Some(to.to_string());
        self
    }

    /// Clears the downstream link of `node`.
    pub(crate) fn disconnect(&mut self, node: &NodeHandle) -> &mut Self {
        *self.link_mut(node) = None;
        self
    }

    /// Marks `separator` as coupling `source` into the network.
    pub(crate) fn connects_from(
        &mut self,
        separator: &NodeHandle,
        source: &NodeHandle,
    ) -> &mut Self {
        self.separator_mut(separator).connects_from = Some(source.0.clone());
        self
    }

    /// Changes the state of `separator`.
    pub(crate) fn set_state(&mut self, separator: &NodeHandle, state: SeparatorState) -> &mut Self {
        self.separator_mut(separator).state = state;
        self
    }

    /// Returns a copy of the network description built so far.
    pub(crate) fn network(&self) -> Network {
        self.network.clone()
    }

    /// Builds and returns the topology from the nodes and links added to the
    /// builder.
    pub(crate) fn build(&self, config: Option<FlowConfig>) -> Result<Topology, Error> {
        Topology::try_new(self.network(), config.unwrap_or_default())
    }
}
