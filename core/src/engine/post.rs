//! Post-dispatch stage: persist the response and close the metrics record.
use std::path::Path;

use crate::error::SmithError;
use crate::metrics::MetricsCollector;

pub(crate) async fn write_output(path: &Path, text: &str) -> Result<(), SmithError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, text).await?;
    tracing::info!(path = %path.display(), bytes = text.len(), "Output written");
    Ok(())
}

pub(crate) fn record_success(
    metrics: &mut MetricsCollector,
    response_length: usize,
) -> Result<(), SmithError> {
    metrics.complete_task(true, response_length, None)?;
    Ok(())
}

/// Close the in-flight record as failed; a write error is logged, not returned.
pub(crate) fn record_failure(metrics: &mut MetricsCollector, err: &SmithError) {
    if !metrics.is_tracking() {
        return;
    }
    if let Err(metrics_err) = metrics.complete_task(false, 0, Some(err.to_string())) {
        tracing::error!(error = %metrics_err, "Failed to record task failure");
    }
}
