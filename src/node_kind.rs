// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `NodeKind` enum, which represents the kind of a
//! network node, and the enums describing transformer and separator
//! variants.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the type of a transformer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformerType {
    #[serde(rename = "measure", alias = "measuring")]
    Measuring,
    #[default]
    #[serde(rename = "power")]
    Power,
}

impl Display for TransformerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformerType::Measuring => write!(f, "Measuring"),
            TransformerType::Power => write!(f, "Power"),
        }
    }
}

/// Represents the state of a separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeparatorState {
    #[serde(rename = "open")]
    Open,
    #[default]
    #[serde(rename = "close", alias = "closed")]
    Closed,
}

impl SeparatorState {
    /// Returns `true` if the separator severs the feeder.
    pub fn is_open(&self) -> bool {
        *self == SeparatorState::Open
    }
}

impl Display for SeparatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeparatorState::Open => write!(f, "open"),
            SeparatorState::Closed => write!(f, "closed"),
        }
    }
}

/// Represents the kind of a node in a radial distribution network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Source,
    AdditionalSource,
    Transformer(TransformerType),
    Line,
    Separator,
    Consumer,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Source => write!(f, "Source"),
            NodeKind::AdditionalSource => write!(f, "AdditionalSource"),
            NodeKind::Transformer(transformer_type) => {
                write!(f, "{}Transformer", transformer_type)
            }
            NodeKind::Line => write!(f, "Line"),
            NodeKind::Separator => write!(f, "Separator"),
            NodeKind::Consumer => write!(f, "Consumer"),
        }
    }
}
