//! Driver: sequences one task run from configuration to recorded metrics.
use chrono::Utc;

use crate::context::RunContext;
use crate::error::SmithError;
use crate::provider::{Generation, DEGRADED_RESPONSE};
use crate::state::{PhaseTransition, RunPhase};

use super::post::{record_failure, record_success, write_output};
use super::pre::{
    load_config, load_task, resolve_agent, resolve_provider, validate_config, validate_task,
};
use super::prompt::assemble_prompt;
use super::types::{DispatchPolicy, RunReport, RunRequest};

pub struct Orchestrator<'a> {
    ctx: &'a mut RunContext,
    phase: RunPhase,
    history: Vec<RunPhase>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ctx: &'a mut RunContext) -> Self {
        Self {
            ctx,
            phase: RunPhase::Init,
            history: vec![RunPhase::Init],
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Phases visited by the last run, in order.
    pub fn history(&self) -> &[RunPhase] {
        &self.history
    }

    fn advance(&mut self, to: RunPhase) {
        debug_assert!(
            PhaseTransition::validate(self.phase, to).is_ok(),
            "illegal phase transition {} -> {}",
            self.phase,
            to
        );
        tracing::debug!(
            from = %self.phase,
            to = %to,
            "{}",
            PhaseTransition::phase_description(to)
        );
        self.phase = to;
        self.history.push(to);
    }

    /// Run one task end to end.
    ///
    /// A failure after the task has started is recorded as a failed task
    /// before the error is returned.
    pub async fn run(&mut self, request: &RunRequest) -> Result<RunReport, SmithError> {
        self.phase = RunPhase::Init;
        self.history = vec![RunPhase::Init];

        match self.execute(request).await {
            Ok(report) => Ok(report),
            Err(err) => {
                record_failure(self.ctx.metrics_mut(), &err);
                tracing::error!(phase = %self.phase, error = %err, "Task run failed");
                self.advance(RunPhase::Failed);
                Err(err)
            }
        }
    }

    async fn execute(&mut self, request: &RunRequest) -> Result<RunReport, SmithError> {
        let project_root = request.project_root.clone();
        if !project_root.is_dir() {
            tracing::error!(path = %project_root.display(), "Project root not found");
            return Err(SmithError::not_found(project_root));
        }
        let paths = self.ctx.cfg().paths.clone();
        let task_path = request
            .task_path
            .clone()
            .unwrap_or_else(|| paths.task_path());

        let raw_config = load_config(&paths)?;
        self.advance(RunPhase::ConfigLoaded);

        let config = validate_config(raw_config, &paths)?;
        self.advance(RunPhase::Validated);

        let raw_task = load_task(&task_path)?;
        self.advance(RunPhase::TaskLoaded);

        let task = validate_task(raw_task, &task_path, &paths)?;
        self.advance(RunPhase::SchemaValidated);

        let agent = resolve_agent(&config, &task, &paths, &project_root)?;
        self.advance(RunPhase::AgentResolved);

        let (provider_name, provider_cfg) = resolve_provider(&config, &agent.agent)?;
        self.advance(RunPhase::ProviderResolved);

        let task_id = format!("{}-{}", agent.agent_id, Utc::now().timestamp_millis());
        tracing::info!(
            task_id = %task_id,
            agent = %agent.agent_id,
            provider = %provider_name,
            source = %agent.source_path.display(),
            "Executing task"
        );
        self.ctx.metrics_mut().start_task(
            &task_id,
            &agent.agent_id,
            &provider_name,
            &agent.source_path,
            &agent.output_path,
        );

        let template = tokio::fs::read_to_string(&agent.prompt_path).await?;
        let source = tokio::fs::read_to_string(&agent.source_path).await?;
        let prompt = assemble_prompt(
            &agent.agent_id,
            task.context.as_deref(),
            &template,
            &agent.source_path,
            &source,
        );
        self.advance(RunPhase::PromptAssembled);

        let provider = self.ctx.providers().resolve(&provider_name, &provider_cfg)?;
        let (generation, degraded) = match provider.generate_response(&prompt).await {
            Ok(generation) => (generation, false),
            Err(err) => match request.dispatch_policy {
                DispatchPolicy::Fail => return Err(err.into()),
                DispatchPolicy::Degrade => {
                    tracing::error!(
                        provider = %provider_name,
                        kind = err.kind(),
                        error = %err,
                        "Dispatch failed, writing degraded response"
                    );
                    (Generation::text(DEGRADED_RESPONSE), true)
                }
            },
        };
        self.advance(RunPhase::Dispatched);

        if let Some(usage) = generation.usage {
            self.ctx
                .metrics_mut()
                .update_token_usage(usage.prompt_tokens, usage.response_tokens);
        }
        write_output(&agent.output_path, &generation.text).await?;
        let response_length = generation.text.chars().count();
        record_success(self.ctx.metrics_mut(), response_length)?;
        self.advance(RunPhase::MetricsRecorded);

        tracing::info!(task_id = %task_id, output = %agent.output_path.display(), "Task completed");
        self.advance(RunPhase::Done);

        Ok(RunReport {
            task_id,
            agent_id: agent.agent_id,
            provider_name,
            output_path: agent.output_path,
            response_length,
            usage: generation.usage,
            degraded,
        })
    }
}
