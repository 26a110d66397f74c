use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::SmithError;
use crate::metrics::MetricsCollector;
use crate::provider::ProviderFactory;

/// Everything one task run needs: settings, the metrics sink and the
/// provider factory. Built once by the caller and handed to the driver.
pub struct RunContext {
    cfg: AppConfig,
    metrics: MetricsCollector,
    providers: Arc<dyn ProviderFactory>,
}

impl RunContext {
    /// Create a context whose metrics live under `cfg.paths.metrics_dir`.
    pub fn new(cfg: AppConfig, providers: Arc<dyn ProviderFactory>) -> Result<Self, SmithError> {
        let metrics = MetricsCollector::new(cfg.paths.metrics_path())?;
        Ok(Self::with_metrics(cfg, metrics, providers))
    }

    pub fn with_metrics(
        cfg: AppConfig,
        metrics: MetricsCollector,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            cfg,
            metrics,
            providers,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut MetricsCollector {
        &mut self.metrics
    }

    pub fn providers(&self) -> Arc<dyn ProviderFactory> {
        self.providers.clone()
    }
}
