// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The traversal that pushes power from a source down its feeder chain.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::formulas::{self, PowerFactor};
use crate::network::{Consumer, Line, Separator, Source, Transformer};
use crate::{Error, NetworkNode, Topology};

use super::{Deficits, FlowReport, LineFlow, LogRecord, NodeFlow};

/// Tolerance when comparing a transformer's input voltage with the
/// low-voltage level, in kV.
const LOW_VOLTAGE_TOLERANCE_KV: f64 = 1e-9;

/// The state of a single propagation run.
///
/// The visited set is shared by all sources of a run, so a node reached
/// from the primary source is never re-evaluated from an additional one.
pub(super) struct Propagation<'a> {
    topology: &'a Topology,
    timestamp: DateTime<Utc>,
    visited: HashSet<String>,
    visit_order: Vec<String>,
    flows: HashMap<String, NodeFlow>,
    deficits: Deficits,
    records: Vec<LogRecord>,
}

impl<'a> Propagation<'a> {
    pub(super) fn new(topology: &'a Topology, timestamp: DateTime<Utc>) -> Self {
        Self {
            topology,
            timestamp,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            flows: HashMap::new(),
            deficits: Deficits::default(),
            records: Vec::new(),
        }
    }

    /// Pushes `input_power` (MW) from the node with the given ID down its
    /// chain of downstream links.
    ///
    /// Each node has a single downstream link, so the chain is walked in a
    /// loop rather than recursively.  The walk stops at the first node that
    /// was already visited, at a node with no downstream link, or at a link
    /// to an unknown node.
    pub(super) fn propagate(&mut self, start: &str, input_power: f64) -> Result<(), Error> {
        let mut next = Some((start.to_string(), input_power));
        while let Some((node_id, power)) = next {
            next = self.visit(&node_id, power)?;
        }
        Ok(())
    }

    /// Records that an additional source stayed disconnected this cycle.
    pub(super) fn skip_source(&mut self, source: &NetworkNode) {
        tracing::debug!("Additional source {} is disconnected.", source.id());
        self.record(
            source.id(),
            format!(
                "Additional source {} is disconnected by an open separator",
                source.id()
            ),
        );
    }

    fn visit(&mut self, node_id: &str, input_power: f64) -> Result<Option<(String, f64)>, Error> {
        if !self.visited.insert(node_id.to_string()) {
            tracing::debug!("Node {} already visited.", node_id);
            return Ok(None);
        }

        let topology = self.topology;
        let Ok(node) = topology.node(node_id) else {
            tracing::warn!("Node {} not found.", node_id);
            self.record(node_id, format!("Node {node_id} not found"));
            return Ok(None);
        };

        tracing::debug!("Traversing node: {} with {} MW", node_id, input_power);
        self.visit_order.push(node_id.to_string());

        let output_power = match node {
            NetworkNode::Source(source) => self.visit_source(source, input_power, "Source"),
            NetworkNode::AdditionalSource(source) => {
                self.visit_source(source, input_power, "Additional source")
            }
            NetworkNode::Transformer(transformer) => {
                self.visit_transformer(transformer, input_power)?
            }
            NetworkNode::Line(line) => self.visit_line(line, input_power)?,
            NetworkNode::Separator(separator) => self.visit_separator(separator, input_power),
            NetworkNode::Consumer(consumer) => self.visit_consumer(consumer, input_power)?,
        };

        Ok(node
            .downstream_link()
            .map(|did| (did.to_string(), output_power)))
    }

    fn visit_source(&mut self, source: &Source, input_power: f64, label: &str) -> f64 {
        self.flows.insert(
            source.id.clone(),
            NodeFlow::Source {
                injected_mw: input_power,
            },
        );
        self.record(
            &source.id,
            format!(
                "{label} {} supplying {:.2} MW at {:.2} kV",
                source.id, input_power, source.voltage_kv
            ),
        );
        input_power
    }

    fn visit_transformer(
        &mut self,
        transformer: &Transformer,
        input_power: f64,
    ) -> Result<f64, Error> {
        if !self.topology.is_active(&transformer.id)? {
            self.deenergize(&transformer.id, "Transformer");
            return Ok(0.0);
        }

        let config = self.topology.config();
        let total_losses = formulas::kw_to_mw(formulas::transformer_losses(
            transformer.steel_losses_kw,
            transformer.copper_losses_kw,
        ));
        let losses_mw = if (transformer.input_voltage_kv - config.low_voltage_kv).abs()
            < LOW_VOLTAGE_TOLERANCE_KV
        {
            total_losses
        } else {
            0.0
        };
        let output_power = input_power - losses_mw;

        self.flows.insert(
            transformer.id.clone(),
            NodeFlow::Transformer {
                input_mw: input_power,
                output_mw: output_power,
                losses_mw,
            },
        );
        self.record(
            &transformer.id,
            format!(
                concat!(
                    "Transformer {} steps {:.2} kV to {:.2} kV, ",
                    "transferring {:.4} MW -> {:.4} MW (losses: {:.4} MW)"
                ),
                transformer.id,
                transformer.input_voltage_kv,
                transformer.output_voltage_kv,
                input_power,
                output_power,
                losses_mw
            ),
        );
        Ok(output_power)
    }

    fn visit_line(&mut self, line: &Line, input_power: f64) -> Result<f64, Error> {
        if !self.topology.is_active(&line.id)? {
            self.deenergize(&line.id, "Line");
            return Ok(0.0);
        }

        let config = self.topology.config();
        let length_m = line.length_km * 1000.0;
        let area_m2 = line.area_mm2 * 1e-6;

        let resistance = formulas::ensure_finite(
            &format!("Resistance of line {}", line.id),
            formulas::resistance(line.resistivity, length_m, area_m2),
        )?;

        let dm = formulas::geometric_mean_distance(line.d_rs, line.d_st, line.d_rt);
        let re = formulas::equivalent_radius(line.conductor_radius_m);
        let omega = 2.0 * std::f64::consts::PI * config.frequency_hz;
        let reactance = formulas::ensure_finite(
            &format!("Reactance of line {}", line.id),
            formulas::reactance(omega * formulas::inductance_per_length(dm, re), length_m),
        )?;

        let current = formulas::ensure_finite(
            &format!("Current of line {}", line.id),
            formulas::current(
                formulas::mw_to_w(input_power),
                formulas::kv_to_v(line.voltage_kv),
                config.nominal_power_factor,
            ),
        )?;

        let active_losses_mw = formulas::ensure_finite(
            &format!("Active power losses of line {}", line.id),
            formulas::w_to_mw(formulas::line_loss(current, resistance)),
        )?;
        let reactive_losses_mvar = formulas::ensure_finite(
            &format!("Reactive power losses of line {}", line.id),
            formulas::w_to_mw(formulas::reactive_line_loss(current, reactance)),
        )?;
        let power_factor = PowerFactor::from_powers(input_power, reactive_losses_mvar);

        self.record(
            &line.id,
            format!(
                "Line {} ({:.2} km) has voltage {:.2} kV, transferring {:.2} MW",
                line.id, line.length_km, line.voltage_kv, input_power
            ),
        );
        let mut losses_message = format!(
            "Active power losses: {:.4} MW, reactive power losses: {:.4} MVAr",
            active_losses_mw, reactive_losses_mvar
        );
        if let Some(pf) = &power_factor {
            losses_message.push_str(&format!(
                ", cosφ {:.3}, sinφ {:.3}, tanφ {:.3}",
                pf.cos_phi, pf.sin_phi, pf.tan_phi
            ));
        }
        self.record(&line.id, losses_message);

        self.flows.insert(
            line.id.clone(),
            NodeFlow::Line(LineFlow {
                transferred_mw: input_power,
                current_a: current,
                resistance_ohm: resistance,
                reactance_ohm: reactance,
                active_losses_mw,
                reactive_losses_mvar,
                power_factor,
            }),
        );

        // Losses are reported, not subtracted from the forwarded flow.
        Ok(input_power)
    }

    fn visit_separator(&mut self, separator: &Separator, input_power: f64) -> f64 {
        let passed_mw = if separator.state.is_open() {
            0.0
        } else {
            input_power
        };
        self.flows.insert(
            separator.id.clone(),
            NodeFlow::Separator {
                state: separator.state,
                passed_mw,
            },
        );

        let mut message = format!("Separator {} is in {} state", separator.id, separator.state);
        if separator.state.is_open() {
            message.push_str(", stopping power flow");
        }
        self.record(&separator.id, message);

        passed_mw
    }

    fn visit_consumer(&mut self, consumer: &Consumer, input_power: f64) -> Result<f64, Error> {
        let remaining_power = input_power - consumer.power_needed_mw;
        if input_power < consumer.power_needed_mw {
            tracing::warn!(
                "Consumer {} is under-supplied: {} MW for a demand of {} MW.",
                consumer.id,
                input_power,
                consumer.power_needed_mw
            );
            self.deficits.push(&consumer.id, remaining_power);
        }

        if !self.topology.is_active(&consumer.id)? {
            self.deenergize(&consumer.id, "Consumer");
            return Ok(0.0);
        }

        self.flows.insert(
            consumer.id.clone(),
            NodeFlow::Consumer {
                input_mw: input_power,
                demand_mw: consumer.power_needed_mw,
                remaining_mw: remaining_power,
            },
        );
        self.record(
            &consumer.id,
            format!(
                "Consumer {} draws {:.2} MW at {:.2} kV, remaining {:.2} MW",
                consumer.id, consumer.power_needed_mw, consumer.voltage_kv, remaining_power
            ),
        );
        Ok(remaining_power)
    }

    fn deenergize(&mut self, node_id: &str, label: &str) {
        self.flows.insert(node_id.to_string(), NodeFlow::Deenergized);
        let message = format!("{label} {node_id} is de-energized by an open separator");
        self.record(node_id, message);
    }

    fn record(&mut self, component_id: &str, message: String) {
        let record = LogRecord::new(self.timestamp, component_id, message);
        self.records.push(record);
    }

    /// Appends the end-of-cycle summary and returns the report.
    pub(super) fn finish(mut self) -> FlowReport {
        if self.deficits.is_empty() {
            let source_id = self.topology.source().id().to_string();
            self.record(&source_id, "All consumers are powered".to_string());
        } else {
            let shortfalls = self
                .deficits
                .iter()
                .map(|d| (d.consumer_id.clone(), d.magnitude()))
                .collect::<Vec<_>>();
            for (consumer_id, shortfall) in shortfalls {
                let message = format!("Consumer {consumer_id} is short of {shortfall:.2} MW");
                self.record(&consumer_id, message);
            }
        }

        FlowReport {
            timestamp: self.timestamp,
            visit_order: self.visit_order,
            flows: self.flows,
            deficits: self.deficits,
            records: self.records,
        }
    }
}
