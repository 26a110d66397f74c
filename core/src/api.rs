//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `smith_core::api` instead of reaching into internal modules.

pub use crate::config::{
    get_smith_data_dir, load_default, load_from, AgentConfig, AppConfig, LoggingConfig,
    PathsConfig, ProviderConfig, SystemConfig,
};
pub use crate::context::RunContext;
pub use crate::engine::{assemble_prompt, DispatchPolicy, Orchestrator, RunReport, RunRequest};
pub use crate::error::{DispatchError, ProviderInitError, SchemaViolation, SmithError};
pub use crate::loader::{read_jsonc, system_config_from_value, task_from_value};
pub use crate::metrics::{
    render_report, MetricsCollector, SystemMetrics, TaskMetrics, NO_METRICS_MESSAGE,
    SYSTEM_METRICS_FILE,
};
pub use crate::provider::{
    Generation, LlmProvider, ProviderFactory, TokenUsage, DEGRADED_RESPONSE,
};
pub use crate::state::{PhaseTransition, RunPhase, TransitionError};
pub use crate::task::TaskDescription;
pub use crate::validate::{
    validate_agent_config, validate_environment, validate_setup, validate_task_schema,
    SetupReport, ValidationResult, REQUIRED_DIRS, SMITH_VERSION,
};
