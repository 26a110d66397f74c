//! Per-task run records and the rolling aggregate.
//!
//! Both files under the metrics directory are rewritten in full on every
//! completion without locking: one collector (one process) may write at a time.

mod collector;
mod report;
mod types;

pub use collector::{MetricsCollector, SYSTEM_METRICS_FILE};
pub use report::{render_report, NO_METRICS_MESSAGE};
pub use types::{SystemMetrics, TaskMetrics};
