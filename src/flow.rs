// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The power-flow engine, which evaluates one [`Topology`] snapshot per call
//! and reports how much power reaches each node.

mod deficits;
mod node_flow;
mod propagation;
mod records;

pub use deficits::{Deficit, Deficits};
pub use node_flow::{LineFlow, NodeFlow};
pub use records::{LogRecord, LogSink, TracingSink};

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{Error, NetworkNode, Topology};
use propagation::Propagation;

/// Propagates power from the sources of a [`Topology`] to its consumers.
///
/// The engine holds no state between runs: every call starts from a fresh
/// visited set and deficit list, so it can be invoked repeatedly from a
/// periodic loop.
pub struct FlowEngine<'a> {
    topology: &'a Topology,
}

impl<'a> FlowEngine<'a> {
    /// Creates a new engine for the given topology.
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// Runs one evaluation cycle, stamping every record with the current
    /// time.
    pub fn run(&self) -> Result<FlowReport, Error> {
        self.run_at(Utc::now())
    }

    /// Runs one evaluation cycle, stamping every record with `timestamp`.
    ///
    /// Power is first propagated from the primary source.  Then every
    /// additional source whose connecting separators are all closed injects
    /// its own power, sharing the visited set of the primary run: nodes
    /// already reached keep the values computed first.
    pub fn run_at(&self, timestamp: DateTime<Utc>) -> Result<FlowReport, Error> {
        let mut propagation = Propagation::new(self.topology, timestamp);

        let source = self.topology.source();
        propagation.propagate(source.id(), source_power(source)?)?;

        for additional in self.topology.additional_sources() {
            if self.topology.is_injecting(additional.id())? {
                propagation.propagate(additional.id(), source_power(additional)?)?;
            } else {
                propagation.skip_source(additional);
            }
        }

        Ok(propagation.finish())
    }
}

fn source_power(node: &NetworkNode) -> Result<f64, Error> {
    match node {
        NetworkNode::Source(source) | NetworkNode::AdditionalSource(source) => Ok(source.power_mw),
        _ => Err(Error::internal(format!(
            "{}:{} is not a source.",
            node.kind(),
            node.id()
        ))),
    }
}

/// The outcome of one evaluation cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowReport {
    timestamp: DateTime<Utc>,
    visit_order: Vec<String>,
    flows: HashMap<String, NodeFlow>,
    deficits: Deficits,
    records: Vec<LogRecord>,
}

impl FlowReport {
    /// Returns the timestamp shared by every record of the cycle.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the values computed for the node with the given ID, if the
    /// node was reached.
    pub fn flow(&self, node_id: &str) -> Option<&NodeFlow> {
        self.flows.get(node_id)
    }

    /// Returns the power handed on by the node with the given ID, in MW.
    /// Nodes that were not reached report zero.
    pub fn power_mw(&self, node_id: &str) -> f64 {
        self.flow(node_id).map_or(0.0, NodeFlow::power_mw)
    }

    /// Returns the IDs of the processed nodes, in traversal order.
    pub fn visited(&self) -> &[String] {
        &self.visit_order
    }

    /// Returns the consumers that received less than they demand.
    pub fn deficits(&self) -> &Deficits {
        &self.deficits
    }

    /// Returns the log records of the cycle, in traversal order followed by
    /// the summary.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Consumes the report and returns its log records.
    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }

    /// Hands every record to the given sink.
    pub fn emit<S: LogSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.emit_all(&self.records)
    }

    /// Returns the summed active (MW) and reactive (MVAr) losses over all
    /// energized lines.
    pub fn total_line_losses(&self) -> (f64, f64) {
        self.visit_order
            .iter()
            .filter_map(|id| match self.flows.get(id) {
                Some(NodeFlow::Line(line)) => {
                    Some((line.active_losses_mw, line.reactive_losses_mvar))
                }
                _ => None,
            })
            .fold((0.0, 0.0), |(p, q), (dp, dq)| (p + dp, q + dq))
    }
}
