//! `smith run`: wires the built-in provider registry into the orchestrator.
use std::sync::Arc;

use smith_core::api::{
    AppConfig, DispatchPolicy, Orchestrator, RunContext, RunReport, RunRequest, SmithError,
};
use smith_plugins::ProviderRegistry;

use crate::commands::cli::RunArgs;

pub fn build_request(cfg: &AppConfig, args: &RunArgs) -> RunRequest {
    let mut request = RunRequest::new(&args.project_root);
    if let Some(task) = &args.task {
        request = request.with_task(cfg.paths.resolve(task));
    }
    if args.degrade_on_error {
        request = request.with_policy(DispatchPolicy::Degrade);
    }
    request
}

pub async fn run_task(cfg: AppConfig, args: &RunArgs) -> Result<RunReport, SmithError> {
    let request = build_request(&cfg, args);
    let mut ctx = RunContext::new(cfg, Arc::new(ProviderRegistry::new()))?;
    let report = Orchestrator::new(&mut ctx).run(&request).await?;

    println!(
        "Task {} completed: {} chars written to {}",
        report.task_id,
        report.response_length,
        report.output_path.display()
    );
    if report.degraded {
        println!("Warning: provider failed, a placeholder response was written");
    }
    Ok(report)
}
