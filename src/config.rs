// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `Topology` and the
//! `FlowEngine`.

/// Configuration options for building a `Topology` and propagating power
/// through it.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// Transformer input voltage, in kV, that marks the low-voltage leg.
    /// Core and copper losses are only charged on transformers fed at this
    /// voltage.
    pub low_voltage_kv: f64,

    /// System frequency, in Hz, used for line reactance.
    pub frequency_hz: f64,

    /// The power factor (cosφ) assumed when deriving line currents from the
    /// active power flowing through a line.  Must be in `(0, 1]`.
    pub nominal_power_factor: f64,

    /// Whether a downstream link pointing at an unknown node should fail
    /// topology construction.  When `false`, it is only reported during
    /// propagation.
    pub reject_dangling_links: bool,

    /// Whether cycles in the downstream links should fail topology
    /// construction.  When `false`, propagation still visits every node at
    /// most once.
    pub reject_cycles: bool,

    /// Whether nodes that can't be reached from any source should fail
    /// topology construction.
    pub reject_unconnected_nodes: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            low_voltage_kv: 20.0,
            frequency_hz: 50.0,
            nominal_power_factor: 0.9,
            reject_dangling_links: false,
            reject_cycles: false,
            reject_unconnected_nodes: false,
        }
    }
}

impl FlowConfig {
    /// Returns a config that rejects every malformed topology instead of
    /// degrading gracefully.
    pub fn strict() -> Self {
        Self {
            reject_dangling_links: true,
            reject_cycles: true,
            reject_unconnected_nodes: true,
            ..Default::default()
        }
    }
}
