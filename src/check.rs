//! One collect → evaluate → dispatch cycle
//!
//! The cycle is stateless: repeated invocations are independent, and no
//! cycle depends on a prior cycle's outcome. The public entry point never
//! panics past its own boundary; whatever goes wrong is logged and returned
//! as a [`CheckError`].

use std::panic::AssertUnwindSafe;

use chrono::{DateTime, Local};
use futures::FutureExt;
use tracing::{error, info, instrument, warn};

use crate::collector::{MetricsCollector, Sampler};
use crate::config::Config;
use crate::dispatch::{AlertDispatcher, AlertMessage};
use crate::error::CheckError;
use crate::evaluator::evaluate;
use crate::{CycleResult, MetricKind, MetricSample};

const ALERT_SUBJECT: &str = "SERVER HEALTH ALERT";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct HealthCheck {
    config: Config,
    sampler: Box<dyn Sampler + Send>,
    dispatcher: AlertDispatcher,
}

impl HealthCheck {
    pub fn new(config: Config) -> Self {
        let dispatcher = AlertDispatcher::from_config(&config);
        Self {
            sampler: Box::new(MetricsCollector::new()),
            dispatcher,
            config,
        }
    }

    /// Replace the OS sampler and channel set, keeping the cycle logic.
    pub fn with_parts(
        config: Config,
        sampler: Box<dyn Sampler + Send>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            config,
            sampler,
            dispatcher,
        }
    }

    /// Run one check cycle.
    ///
    /// A collection failure aborts the cycle; a panic anywhere inside it is
    /// caught here, logged, and converted to [`CheckError::Unexpected`].
    pub async fn run(&mut self) -> Result<CycleResult, CheckError> {
        match AssertUnwindSafe(self.cycle()).catch_unwind().await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                error!("health check failed: {e}");
                Err(e)
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| String::from("unknown panic"));
                let err = CheckError::Unexpected(reason);
                error!("{err}");
                Err(err)
            }
        }
    }

    #[instrument(skip_all)]
    async fn cycle(&mut self) -> Result<CycleResult, CheckError> {
        let timestamp = Local::now();
        info!(
            "starting health check at {}",
            timestamp.format(TIMESTAMP_FORMAT)
        );

        let samples = self.collect()?;
        let violations = evaluate(&samples, &self.config.thresholds);

        let outcomes = if violations.is_empty() {
            info!("all systems nominal");
            Vec::new()
        } else {
            let joined = violations
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            warn!("health issues detected: {joined}");

            self.dispatcher
                .dispatch(&compose_alert(timestamp, &joined))
                .await
        };

        Ok(CycleResult {
            timestamp,
            healthy: violations.is_empty(),
            violations,
            outcomes,
        })
    }

    /// Sample order is fixed: cpu, memory, disk.
    fn collect(&mut self) -> Result<Vec<MetricSample>, CheckError> {
        let cpu = self.sampler.sample_cpu()?;
        let memory = self.sampler.sample_memory()?;
        let disk = self.sampler.sample_disk(&self.config.disk_path)?;

        Ok(vec![
            MetricSample {
                kind: MetricKind::Cpu,
                value: cpu,
            },
            MetricSample {
                kind: MetricKind::Memory,
                value: memory,
            },
            MetricSample {
                kind: MetricKind::Disk,
                value: disk,
            },
        ])
    }
}

fn compose_alert(timestamp: DateTime<Local>, violation_lines: &str) -> AlertMessage {
    AlertMessage {
        subject: String::from(ALERT_SUBJECT),
        body: format!(
            "Server Health Alert!\nTime: {}\n\n{}",
            timestamp.format(TIMESTAMP_FORMAT),
            violation_lines
        ),
    }
}
