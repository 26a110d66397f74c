pub mod schema;
pub mod setup;

pub use schema::validate_task_schema;
pub use setup::{
    validate_agent_config, validate_environment, validate_setup, SetupReport, ValidationResult,
    REQUIRED_DIRS, SMITH_VERSION,
};
