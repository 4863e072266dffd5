// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating a [`Topology`].

mod validate_parameters;
mod validate_topology;

use crate::{Error, Topology};

pub(crate) struct TopologyValidator<'a> {
    topology: &'a Topology,
}

impl Topology {
    pub(super) fn validate(&self) -> Result<(), Error> {
        if !self.contains(&self.source_id) {
            return Err(Error::internal(format!(
                "Primary source not found with detected node ID: {}.",
                self.source_id
            )));
        }

        let validator = TopologyValidator { topology: self };

        validator.validate_config()?;
        validator.validate_parameters()?;

        let config = &self.config;
        for (check, reject) in [
            (validator.validate_acyclicity(), config.reject_cycles),
            (
                validator.validate_connected_topology(),
                config.reject_unconnected_nodes,
            ),
        ] {
            match check {
                Err(err) if reject => return Err(err),
                Err(err) => tracing::warn!("{}", err),
                Ok(()) => {}
            }
        }

        Ok(())
    }
}
