pub mod check;
pub mod collector;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluator;

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Cpu => write!(f, "CPU"),
            MetricKind::Memory => write!(f, "Memory"),
            MetricKind::Disk => write!(f, "Disk"),
        }
    }
}

/// One utilization reading, as a percentage in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub kind: MetricKind,
    pub value: f32,
}

/// A sample that exceeded its configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub metric: MetricSample,
    pub threshold: f32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Webhook,
    Email,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Webhook => write!(f, "webhook"),
            ChannelKind::Email => write!(f, "email"),
        }
    }
}

/// Per-channel delivery record for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub channel: ChannelKind,
    pub succeeded: bool,
    pub error: Option<String>,
}

/// Everything one check cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub timestamp: DateTime<Local>,
    pub violations: Vec<Violation>,
    pub outcomes: Vec<DispatchOutcome>,
    pub healthy: bool,
}
