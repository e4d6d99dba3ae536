//! Host resource sampling via `sysinfo`

use std::path::Path;

use sysinfo::{Disks, System};
use tracing::info;

use crate::error::CollectionError;

/// Seam between the check cycle and the OS queries.
///
/// Each operation returns a percentage in [0, 100] or fails immediately;
/// retrying is the caller's decision.
pub trait Sampler {
    fn sample_cpu(&mut self) -> Result<f32, CollectionError>;
    fn sample_memory(&mut self) -> Result<f32, CollectionError>;
    fn sample_disk(&mut self, path: &Path) -> Result<f32, CollectionError>;
}

/// Samples the local host.
pub struct MetricsCollector {
    sys: System,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            sys: System::new_all(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for MetricsCollector {
    fn sample_cpu(&mut self) -> Result<f32, CollectionError> {
        // usage reads as 0 without a second refresh after the minimum interval
        self.sys.refresh_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self.sys.refresh_all();

        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return Err(CollectionError::NoCpus);
        }

        let usage = cpus.iter().map(|cpu| cpu.cpu_usage()).sum::<f32>() / cpus.len() as f32;
        info!("CPU usage: {usage:.1}%");
        Ok(usage)
    }

    fn sample_memory(&mut self) -> Result<f32, CollectionError> {
        self.sys.refresh_memory();

        let total = self.sys.total_memory();
        if total == 0 {
            return Err(CollectionError::NoMemory);
        }

        let usage = (self.sys.used_memory() as f64 / total as f64 * 100.0) as f32;
        info!("Memory usage: {usage:.1}%");
        Ok(usage)
    }

    fn sample_disk(&mut self, path: &Path) -> Result<f32, CollectionError> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .iter()
            .find(|disk| disk.mount_point() == path && disk.total_space() > 0)
            .ok_or_else(|| CollectionError::DiskNotFound(path.to_path_buf()))?;

        let total = disk.total_space() as f64;
        let used = total - disk.available_space() as f64;
        let usage = (used / total * 100.0) as f32;
        info!("Disk usage: {usage:.1}%");
        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_sample_is_a_percentage() {
        let mut collector = MetricsCollector::new();
        let usage = collector.sample_cpu().unwrap();
        assert!((0.0..=100.0).contains(&usage), "got {usage}");
    }

    #[test]
    fn memory_sample_is_a_percentage() {
        let mut collector = MetricsCollector::new();
        let usage = collector.sample_memory().unwrap();
        assert!((0.0..=100.0).contains(&usage), "got {usage}");
    }

    #[test]
    fn unknown_mount_point_fails() {
        let mut collector = MetricsCollector::new();
        let result = collector.sample_disk(Path::new("/definitely/not/a/mount"));

        assert!(matches!(result, Err(CollectionError::DiskNotFound(_))));
    }
}
