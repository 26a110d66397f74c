//! 状态类型定义

use serde::{Deserialize, Serialize};

/// 任务运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// 初始状态
    Init,
    /// 配置已加载
    ConfigLoaded,
    /// 环境与配置校验通过
    Validated,
    /// 任务已加载
    TaskLoaded,
    /// 任务 schema 校验通过
    SchemaValidated,
    /// Agent 已解析
    AgentResolved,
    /// Provider 已确定
    ProviderResolved,
    /// Prompt 已组装
    PromptAssembled,
    /// 已调用 provider
    Dispatched,
    /// 指标已记录
    MetricsRecorded,
    /// 完成
    Done,
    /// 失败
    Failed,
}

impl RunPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ConfigLoaded => "config_loaded",
            Self::Validated => "validated",
            Self::TaskLoaded => "task_loaded",
            Self::SchemaValidated => "schema_validated",
            Self::AgentResolved => "agent_resolved",
            Self::ProviderResolved => "provider_resolved",
            Self::PromptAssembled => "prompt_assembled",
            Self::Dispatched => "dispatched",
            Self::MetricsRecorded => "metrics_recorded",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
