// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the physical parameters of the nodes in a
//! [`Topology`] and the options it was configured with.
//!
//! Every parameter that ends up in a denominator or a logarithm during
//! propagation must be strictly positive.

use crate::{Error, NetworkNode};

use super::TopologyValidator;

impl TopologyValidator<'_> {
    /// Validates that:
    ///  - the frequency is positive,
    ///  - the nominal power factor is in `(0, 1]`,
    ///  - the low-voltage level is a finite number.
    pub(super) fn validate_config(&self) -> Result<(), Error> {
        let config = self.topology.config();
        if !(config.frequency_hz.is_finite() && config.frequency_hz > 0.0) {
            return Err(Error::invalid_parameter(format!(
                "Frequency must be positive. Found {}.",
                config.frequency_hz
            )));
        }
        if !(config.nominal_power_factor > 0.0 && config.nominal_power_factor <= 1.0) {
            return Err(Error::invalid_parameter(format!(
                "Nominal power factor must be in (0, 1]. Found {}.",
                config.nominal_power_factor
            )));
        }
        if !config.low_voltage_kv.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "Low voltage level must be a finite number. Found {}.",
                config.low_voltage_kv
            )));
        }
        Ok(())
    }

    /// Validates the parameters of every node:
    ///  - **Sources**: finite, non-negative power.
    ///  - **Transformers**: finite, non-negative core and copper losses.
    ///  - **Lines**: positive voltage, cross-section area, conductor radius
    ///    and phase distances; finite, non-negative length and resistivity.
    ///  - **Consumers**: finite, non-negative demand.
    pub(super) fn validate_parameters(&self) -> Result<(), Error> {
        for node in self.topology.nodes() {
            match node {
                NetworkNode::Source(source) | NetworkNode::AdditionalSource(source) => {
                    ensure_non_negative(node, "power", source.power_mw)?;
                }
                NetworkNode::Transformer(transformer) => {
                    ensure_non_negative(node, "steel losses", transformer.steel_losses_kw)?;
                    ensure_non_negative(node, "copper losses", transformer.copper_losses_kw)?;
                }
                NetworkNode::Line(line) => {
                    ensure_positive(node, "voltage", line.voltage_kv)?;
                    ensure_non_negative(node, "length", line.length_km)?;
                    ensure_positive(node, "cross-section area", line.area_mm2)?;
                    ensure_non_negative(node, "resistivity", line.resistivity)?;
                    ensure_positive(node, "conductor radius", line.conductor_radius_m)?;
                    ensure_positive(node, "R-S phase distance", line.d_rs)?;
                    ensure_positive(node, "S-T phase distance", line.d_st)?;
                    ensure_positive(node, "R-T phase distance", line.d_rt)?;
                }
                NetworkNode::Separator(_) => {}
                NetworkNode::Consumer(consumer) => {
                    ensure_non_negative(node, "power demand", consumer.power_needed_mw)?;
                }
            }
        }
        Ok(())
    }
}

/// Checks that the given parameter is a finite number greater than zero.
fn ensure_positive(node: &NetworkNode, parameter: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(Error::invalid_parameter(format!(
        "{}:{} must have a positive {}. Found {}.",
        node.kind(),
        node.id(),
        parameter,
        value
    )))
}

/// Checks that the given parameter is a finite number not less than zero.
fn ensure_non_negative(node: &NetworkNode, parameter: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(Error::invalid_parameter(format!(
        "{}:{} must have a non-negative {}. Found {}.",
        node.kind(),
        node.id(),
        parameter,
        value
    )))
}
