//! 状态转换规则和验证

use super::types::RunPhase;
use thiserror::Error;

/// 状态转换错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: RunPhase, to: RunPhase },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: RunPhase },
}

/// 状态转换
pub struct PhaseTransition;

impl PhaseTransition {
    /// 验证状态转换是否合法
    pub fn validate(from: RunPhase, to: RunPhase) -> Result<(), TransitionError> {
        // 终态不能转换
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        // 只允许前进到下一阶段，或进入 Failed
        let is_valid = to == RunPhase::Failed || Self::next_phase(from) == Some(to);

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    /// 获取下一个阶段
    pub fn next_phase(current: RunPhase) -> Option<RunPhase> {
        match current {
            RunPhase::Init => Some(RunPhase::ConfigLoaded),
            RunPhase::ConfigLoaded => Some(RunPhase::Validated),
            RunPhase::Validated => Some(RunPhase::TaskLoaded),
            RunPhase::TaskLoaded => Some(RunPhase::SchemaValidated),
            RunPhase::SchemaValidated => Some(RunPhase::AgentResolved),
            RunPhase::AgentResolved => Some(RunPhase::ProviderResolved),
            RunPhase::ProviderResolved => Some(RunPhase::PromptAssembled),
            RunPhase::PromptAssembled => Some(RunPhase::Dispatched),
            RunPhase::Dispatched => Some(RunPhase::MetricsRecorded),
            RunPhase::MetricsRecorded => Some(RunPhase::Done),
            RunPhase::Done | RunPhase::Failed => None,
        }
    }

    /// 判断是否为终态
    pub fn is_terminal(phase: RunPhase) -> bool {
        matches!(phase, RunPhase::Done | RunPhase::Failed)
    }

    /// 获取阶段的可读描述
    pub fn phase_description(phase: RunPhase) -> &'static str {
        match phase {
            RunPhase::Init => "starting",
            RunPhase::ConfigLoaded => "configuration loaded",
            RunPhase::Validated => "setup validated",
            RunPhase::TaskLoaded => "task loaded",
            RunPhase::SchemaValidated => "task schema validated",
            RunPhase::AgentResolved => "agent resolved",
            RunPhase::ProviderResolved => "provider resolved",
            RunPhase::PromptAssembled => "prompt assembled",
            RunPhase::Dispatched => "response generated",
            RunPhase::MetricsRecorded => "metrics recorded",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        }
    }
}
