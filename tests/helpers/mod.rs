//! Shared helpers for integration tests

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hostwatch::ChannelKind;
use hostwatch::collector::Sampler;
use hostwatch::config::{Config, Thresholds, WebhookConfig};
use hostwatch::dispatch::{AlertChannel, AlertMessage};
use hostwatch::error::{CollectionError, DeliveryError};

/// Sampler returning fixed percentages, no OS queries.
pub struct StubSampler {
    pub cpu: f32,
    pub memory: f32,
    pub disk: f32,
}

impl Sampler for StubSampler {
    fn sample_cpu(&mut self) -> Result<f32, CollectionError> {
        Ok(self.cpu)
    }

    fn sample_memory(&mut self) -> Result<f32, CollectionError> {
        Ok(self.memory)
    }

    fn sample_disk(&mut self, _path: &Path) -> Result<f32, CollectionError> {
        Ok(self.disk)
    }
}

/// Sampler whose CPU query always fails.
pub struct UnreadableSampler;

impl Sampler for UnreadableSampler {
    fn sample_cpu(&mut self) -> Result<f32, CollectionError> {
        Err(CollectionError::NoCpus)
    }

    fn sample_memory(&mut self) -> Result<f32, CollectionError> {
        Ok(50.0)
    }

    fn sample_disk(&mut self, path: &Path) -> Result<f32, CollectionError> {
        Err(CollectionError::DiskNotFound(path.to_path_buf()))
    }
}

/// Channel that records every delivery and optionally fails.
pub struct RecordingChannel {
    kind: ChannelKind,
    fail: bool,
    deliveries: Arc<AtomicUsize>,
}

impl RecordingChannel {
    pub fn new(kind: ChannelKind, fail: bool) -> (Box<Self>, Arc<AtomicUsize>) {
        let deliveries = Arc::new(AtomicUsize::new(0));
        let channel = Box::new(Self {
            kind,
            fail,
            deliveries: deliveries.clone(),
        });
        (channel, deliveries)
    }
}

#[async_trait]
impl AlertChannel for RecordingChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn deliver(&self, _alert: &AlertMessage) -> Result<(), DeliveryError> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(DeliveryError::Status(503))
        } else {
            Ok(())
        }
    }
}

pub fn config_with_thresholds(cpu: f32, memory: f32, disk: f32) -> Config {
    Config {
        thresholds: Thresholds { cpu, memory, disk },
        ..Config::default()
    }
}

pub fn webhook_config(url: &str) -> WebhookConfig {
    WebhookConfig {
        url: url.to_string(),
        username: String::from("Health Monitor"),
        icon_emoji: String::from(":warning:"),
    }
}
