mod post;
mod pre;
mod prompt;
mod run;
mod types;

pub use prompt::assemble_prompt;
pub use run::Orchestrator;
pub use types::{DispatchPolicy, RunReport, RunRequest};
