//! System usage readings served by `/api/health/{metric}`

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::DomainError;

/// A monitored system resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Disk,
    Gpu,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Cpu, Metric::Memory, Metric::Disk, Metric::Gpu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Gpu => "gpu",
        }
    }

    /// Field carrying the value when the backend answers with an object
    pub fn usage_key(&self) -> String {
        format!("{}_usage", self.as_str())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw shapes the health routes answer with
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UsagePayload {
    Bare(f64),
    Keyed(HashMap<String, Value>),
}

impl UsagePayload {
    /// Resolve the payload against the metric it was requested for
    pub fn into_reading(self, metric: Metric) -> Result<UsageReading, DomainError> {
        let percent = match self {
            Self::Bare(value) => value,
            Self::Keyed(fields) => {
                let key = metric.usage_key();
                fields.get(&key).and_then(Value::as_f64).ok_or_else(|| {
                    DomainError::decode(format!("{} reply has no numeric '{}'", metric, key))
                })?
            }
        };

        Ok(UsageReading { metric, percent })
    }
}

/// A validated usage percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageReading {
    pub metric: Metric,
    pub percent: f64,
}

impl UsageReading {
    /// Gauge text, e.g. `42%` or `42.5%`
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn exceeds(&self, threshold: f64) -> bool {
        self.percent >= threshold
    }
}
