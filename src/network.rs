// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The description of a radial distribution network, as handed over by the
//! configuration loader, and the tagged [`NetworkNode`] type that the
//! [`Topology`][crate::Topology] stores.
//!
//! Every entity except the sources carries a single *downstream link*
//! (`connectedTo`), the ID of the next node power flows into.  The field
//! names match the JSON network description.

use serde::{Deserialize, Serialize};

use crate::node_kind::{NodeKind, SeparatorState, TransformerType};

/// A power source.  Used both for the primary source and for additional
/// (backup) sources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    /// Active power, in MW.
    #[serde(rename = "power")]
    pub power_mw: f64,
    /// Voltage, in kV.
    #[serde(rename = "voltage")]
    pub voltage_kv: f64,
    #[serde(default)]
    pub connected_to: Option<String>,
}

/// A transformer between two voltage levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformer {
    pub id: String,
    #[serde(rename = "inputVoltage")]
    pub input_voltage_kv: f64,
    #[serde(rename = "outputVoltage")]
    pub output_voltage_kv: f64,
    #[serde(default)]
    pub connected_to: Option<String>,
    #[serde(rename = "type", default)]
    pub transformer_type: TransformerType,
    #[serde(alias = "efficency", default = "default_efficiency")]
    pub efficiency: f64,
    /// Rated apparent power, in MVA.
    #[serde(rename = "apparentPower", default)]
    pub apparent_power_mva: f64,
    /// Copper (joule) losses, in kW.
    #[serde(rename = "copperLosses", alias = "cooperLosses", default)]
    pub copper_losses_kw: f64,
    /// Core (steel) losses, in kW.
    #[serde(rename = "steelLosses", default)]
    pub steel_losses_kw: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

/// A three-phase overhead line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    /// Nominal voltage, in kV.
    #[serde(rename = "voltage")]
    pub voltage_kv: f64,
    /// Length, in km.
    #[serde(rename = "length")]
    pub length_km: f64,
    #[serde(default)]
    pub connected_to: Option<String>,
    /// Conductor cross-section area, in mm².
    #[serde(rename = "area")]
    pub area_mm2: f64,
    /// Conductor resistivity, in Ω·m.
    #[serde(rename = "ro")]
    pub resistivity: f64,
    /// Distance between phases R and S, in m.
    #[serde(rename = "Drs")]
    pub d_rs: f64,
    /// Distance between phases S and T, in m.
    #[serde(rename = "Dst")]
    pub d_st: f64,
    /// Distance between phases R and T, in m.
    #[serde(rename = "Drt")]
    pub d_rt: f64,
    /// Conductor radius, in m.
    #[serde(rename = "r")]
    pub conductor_radius_m: f64,
}

/// A switch that either passes power to its successor or severs the feeder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Separator {
    pub id: String,
    pub state: SeparatorState,
    /// The source this separator couples into the network, if any.
    #[serde(default)]
    pub connects_from: Option<String>,
    #[serde(default)]
    pub connected_to: Option<String>,
}

/// A load.  Consumers may chain, each one passing on what it doesn't draw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    pub id: String,
    /// Power demand, in MW.
    #[serde(rename = "powerNeeded")]
    pub power_needed_mw: f64,
    /// Voltage, in kV.
    #[serde(rename = "voltage")]
    pub voltage_kv: f64,
    #[serde(default)]
    pub connected_to: Option<String>,
}

/// The full description of a radial distribution network: exactly one
/// primary source and any number of the other entities.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub source: Source,
    #[serde(default)]
    pub additional_sources: Vec<Source>,
    #[serde(default)]
    pub transformers: Vec<Transformer>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default, alias = "separator")]
    pub separators: Vec<Separator>,
    #[serde(default)]
    pub consumers: Vec<Consumer>,
}

impl Network {
    /// Consumes the description and returns every entity as a tagged node,
    /// primary source first.
    pub fn into_nodes(self) -> Vec<NetworkNode> {
        std::iter::once(NetworkNode::Source(self.source))
            .chain(
                self.additional_sources
                    .into_iter()
                    .map(NetworkNode::AdditionalSource),
            )
            .chain(self.transformers.into_iter().map(NetworkNode::Transformer))
            .chain(self.lines.into_iter().map(NetworkNode::Line))
            .chain(self.separators.into_iter().map(NetworkNode::Separator))
            .chain(self.consumers.into_iter().map(NetworkNode::Consumer))
            .collect()
    }
}

/// A node of the network, tagged with its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkNode {
    Source(Source),
    AdditionalSource(Source),
    Transformer(Transformer),
    Line(Line),
    Separator(Separator),
    Consumer(Consumer),
}

impl NetworkNode {
    /// Returns the ID of the node.
    pub fn id(&self) -> &str {
        match self {
            NetworkNode::Source(n) | NetworkNode::AdditionalSource(n) => &n.id,
            NetworkNode::Transformer(n) => &n.id,
            NetworkNode::Line(n) => &n.id,
            NetworkNode::Separator(n) => &n.id,
            NetworkNode::Consumer(n) => &n.id,
        }
    }

    /// Returns the kind of the node.
    pub fn kind(&self) -> NodeKind {
        match self {
            NetworkNode::Source(_) => NodeKind::Source,
            NetworkNode::AdditionalSource(_) => NodeKind::AdditionalSource,
            NetworkNode::Transformer(n) => NodeKind::Transformer(n.transformer_type),
            NetworkNode::Line(_) => NodeKind::Line,
            NetworkNode::Separator(_) => NodeKind::Separator,
            NetworkNode::Consumer(_) => NodeKind::Consumer,
        }
    }

    /// Returns the ID of the node power flows into next, if any.
    ///
    /// Empty links are treated as absent.
    pub fn downstream_link(&self) -> Option<&str> {
        let link = match self {
            NetworkNode::Source(n) | NetworkNode::AdditionalSource(n) => &n.connected_to,
            NetworkNode::Transformer(n) => &n.connected_to,
            NetworkNode::Line(n) => &n.connected_to,
            NetworkNode::Separator(n) => &n.connected_to,
            NetworkNode::Consumer(n) => &n.connected_to,
        };
        link.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_source(&self) -> bool {
        matches!(
            self,
            NetworkNode::Source(_) | NetworkNode::AdditionalSource(_)
        )
    }

    /// Returns the separator state, if the node is a separator.
    pub fn separator_state(&self) -> Option<SeparatorState> {
        match self {
            NetworkNode::Separator(s) => Some(s.state),
            _ => None,
        }
    }

    pub fn is_open_separator(&self) -> bool {
        self.separator_state().is_some_and(|s| s.is_open())
    }
}
