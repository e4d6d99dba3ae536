use crate::config::Thresholds;
use crate::{MetricKind, MetricSample, Violation};

/// Compare each sample against its configured limit.
///
/// A sample violates only when it is strictly above its limit. Violation
/// order follows the sample order, not threshold magnitude. Pure and
/// deterministic; no I/O.
pub fn evaluate(samples: &[MetricSample], thresholds: &Thresholds) -> Vec<Violation> {
    samples
        .iter()
        .filter_map(|sample| {
            let threshold = limit_for(sample.kind, thresholds);
            (sample.value > threshold).then(|| Violation {
                metric: *sample,
                threshold,
                message: format!(
                    "High {} usage: {}% (threshold: {}%)",
                    sample.kind, sample.value, threshold
                ),
            })
        })
        .collect()
}

fn limit_for(kind: MetricKind, thresholds: &Thresholds) -> f32 {
    match kind {
        MetricKind::Cpu => thresholds.cpu,
        MetricKind::Memory => thresholds.memory,
        MetricKind::Disk => thresholds.disk,
    }
}
