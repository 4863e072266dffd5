// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Accumulation of consumers that received less power than they demand.

/// A consumer whose supplied power fell short of its demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Deficit {
    pub consumer_id: String,
    /// Supplied minus demanded power, in MW.  Always negative.
    pub shortfall_mw: f64,
}

impl Deficit {
    /// Returns the size of the shortfall, in MW.
    pub fn magnitude(&self) -> f64 {
        self.shortfall_mw.abs()
    }
}

/// The under-supplied consumers of a single propagation run, in the order
/// they were reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deficits {
    entries: Vec<Deficit>,
}

impl Deficits {
    pub(crate) fn push(&mut self, consumer_id: &str, shortfall_mw: f64) {
        self.entries.push(Deficit {
            consumer_id: consumer_id.to_string(),
            shortfall_mw,
        });
    }

    /// Returns an iterator over the deficits.
    pub fn iter(&self) -> std::slice::Iter<'_, Deficit> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the deficit of the consumer with the given ID, if it was
    /// under-supplied.
    pub fn get(&self, consumer_id: &str) -> Option<&Deficit> {
        self.entries.iter().find(|d| d.consumer_id == consumer_id)
    }

    /// Returns the sum of all shortfall magnitudes, in MW.
    pub fn total_shortfall_mw(&self) -> f64 {
        self.entries.iter().map(Deficit::magnitude).sum()
    }
}

impl<'a> IntoIterator for &'a Deficits {
    type Item = &'a Deficit;
    type IntoIter = std::slice::Iter<'a, Deficit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
