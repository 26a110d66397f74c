//! # 运行阶段
//!
//! One task run moves through a fixed sequence of phases; any phase may fall
//! into `Failed`, and terminal phases never transition again.

pub mod transitions;
pub mod types;

pub use transitions::{PhaseTransition, TransitionError};
pub use types::RunPhase;
