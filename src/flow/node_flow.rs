// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The values computed for each node during a propagation run.

use crate::{formulas::PowerFactor, SeparatorState};

/// The values computed for a line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFlow {
    /// Power forwarded downstream, in MW.  Losses are reported but not
    /// subtracted.
    pub transferred_mw: f64,
    pub current_a: f64,
    pub resistance_ohm: f64,
    pub reactance_ohm: f64,
    pub active_losses_mw: f64,
    pub reactive_losses_mvar: f64,
    /// Absent when the transferred and reactive powers are both zero.
    pub power_factor: Option<PowerFactor>,
}

/// The values computed for a node during one propagation run.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeFlow {
    Source {
        injected_mw: f64,
    },
    Transformer {
        input_mw: f64,
        output_mw: f64,
        losses_mw: f64,
    },
    Line(LineFlow),
    Separator {
        state: SeparatorState,
        passed_mw: f64,
    },
    Consumer {
        input_mw: f64,
        demand_mw: f64,
        remaining_mw: f64,
    },
    /// The node sits right below an open separator.
    Deenergized,
}

impl NodeFlow {
    /// Returns the power the node hands on: injected power for sources,
    /// transferred power for transformers, lines and separators, and
    /// remaining power for consumers.
    pub fn power_mw(&self) -> f64 {
        match self {
            NodeFlow::Source { injected_mw } => *injected_mw,
            NodeFlow::Transformer { output_mw, .. } => *output_mw,
            NodeFlow::Line(line) => line.transferred_mw,
            NodeFlow::Separator { passed_mw, .. } => *passed_mw,
            NodeFlow::Consumer { remaining_mw, .. } => *remaining_mw,
            NodeFlow::Deenergized => 0.0,
        }
    }

    pub fn is_energized(&self) -> bool {
        !matches!(self, NodeFlow::Deenergized)
    }
}
