// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Human-readable records describing the computed state of each node, and
//! the [`LogSink`] trait through which they are handed to a persistence
//! layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use std::convert::Infallible;

/// A single, immutable log record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub component_id: String,
    pub message: String,
}

impl LogRecord {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        component_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            component_id: component_id.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.to_rfc3339(),
            self.component_id,
            self.message
        )
    }
}

/**
This trait needs to be implemented by the type that persists log records.

The engine only produces records; writing them to a columnar file, a text
log or a database is left to the implementor.

<details>
<summary>Example implementation writing one JSON object per line:</summary>

```ignore
struct JsonLines<W: std::io::Write>(W);

impl<W: std::io::Write> radial_power_flow::LogSink for JsonLines<W> {
    type Error = std::io::Error;

    fn emit(&mut self, record: &radial_power_flow::LogRecord) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.0, record)?;
        writeln!(self.0)
    }
}
```

</details>
*/
pub trait LogSink {
    /// The error returned when a record can't be persisted.
    type Error;

    /// Persists a single record.
    fn emit(&mut self, record: &LogRecord) -> Result<(), Self::Error>;

    /// Persists all records, in order, stopping at the first failure.
    fn emit_all(&mut self, records: &[LogRecord]) -> Result<(), Self::Error> {
        for record in records {
            self.emit(record)?;
        }
        Ok(())
    }
}

/// A [`LogSink`] that forwards every record to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    type Error = Infallible;

    fn emit(&mut self, record: &LogRecord) -> Result<(), Self::Error> {
        tracing::info!(
            timestamp = %record.timestamp.to_rfc3339(),
            component_id = %record.component_id,
            "{}",
            record.message
        );
        Ok(())
    }
}

/// Collects records in memory.
impl LogSink for Vec<LogRecord> {
    type Error = Infallible;

    fn emit(&mut self, record: &LogRecord) -> Result<(), Self::Error> {
        self.push(record.clone());
        Ok(())
    }
}
