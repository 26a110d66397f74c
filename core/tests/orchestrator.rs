mod common;

use common::{day_file, read_json, Behavior, FakeFactory, Fixture, SOURCE};
use pretty_assertions::assert_eq;
use smith_core::api::{
    DispatchPolicy, Generation, Orchestrator, RunPhase, RunRequest, SmithError, TokenUsage,
    DEGRADED_RESPONSE, SYSTEM_METRICS_FILE,
};

fn reply(text: &str) -> Behavior {
    Behavior::Reply(Generation {
        text: text.to_string(),
        usage: Some(TokenUsage {
            prompt_tokens: Some(120),
            response_tokens: Some(30),
        }),
    })
}

#[tokio::test]
async fn test_successful_run_writes_output_and_metrics() {
    let fx = Fixture::new();
    let factory = FakeFactory::new(reply("export const add = (a, b) => a + b;"));
    let mut ctx = fx.context(factory.clone());
    let mut orchestrator = Orchestrator::new(&mut ctx);

    let report = orchestrator
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap();

    assert_eq!(orchestrator.phase(), RunPhase::Done);
    assert_eq!(orchestrator.history().len(), 11);
    assert_eq!(report.agent_id, "codeArchitect");
    assert_eq!(report.provider_name, "openai");
    assert!(report.task_id.starts_with("codeArchitect-"));
    assert!(!report.degraded);
    assert_eq!(report.response_length, 35);

    assert_eq!(
        std::fs::read_to_string(fx.output()).unwrap(),
        "export const add = (a, b) => a + b;"
    );

    let prompt = factory.last_prompt().unwrap();
    assert!(prompt.starts_with("=== PROJECT CONTEXT ===\nArithmetic helpers\n"));
    assert!(prompt.contains("=== INSTRUCTIONS FOR AGENT \"codeArchitect\" ==="));
    assert!(prompt.contains(&format!("```ts\n{SOURCE}\n```")));

    let tasks = read_json(&day_file(&fx.metrics_dir()));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["success"], true);
    assert_eq!(tasks[0]["promptTokens"], 120);
    assert_eq!(tasks[0]["responseTokens"], 30);
    assert_eq!(tasks[0]["providerName"], "openai");

    let system = read_json(&fx.metrics_dir().join(SYSTEM_METRICS_FILE));
    assert_eq!(system["totalTasks"], 1);
    assert_eq!(system["successfulTasks"], 1);
    assert_eq!(system["totalTokensUsed"], 150);
    assert_eq!(system["agentUsage"]["codeArchitect"], 1);
}

#[tokio::test]
async fn test_schema_violation_never_starts_a_task() {
    let fx = Fixture::new();
    fx.write_task(r#"{ "agent": "codeArchitect", "sourceFile": 42 }"#);
    let factory = FakeFactory::new(reply("unused"));
    let mut ctx = fx.context(factory.clone());
    let mut orchestrator = Orchestrator::new(&mut ctx);

    let err = orchestrator
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap_err();

    match &err {
        SmithError::SchemaValidation { errors } => assert_eq!(errors.len(), 2),
        other => panic!("expected schema failure, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 10);
    assert_eq!(orchestrator.phase(), RunPhase::Failed);
    assert_eq!(factory.resolved_count(), 0);
    assert!(!day_file(&fx.metrics_dir()).exists());
    assert!(!fx.metrics_dir().join(SYSTEM_METRICS_FILE).exists());
}

#[tokio::test]
async fn test_disabled_agent_is_rejected_before_dispatch() {
    let fx = Fixture::new();
    fx.write_task(
        r#"{ "agent": "retired", "sourceFile": "src/math.ts", "outputFile": "out/x.ts" }"#,
    );
    let factory = FakeFactory::new(reply("unused"));
    let mut ctx = fx.context(factory.clone());

    let err = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap_err();

    assert!(matches!(err, SmithError::AgentDisabled(ref name) if name == "retired"));
    assert_eq!(factory.resolved_count(), 0);
    assert!(!ctx.metrics().is_tracking());
}

#[tokio::test]
async fn test_provider_init_failure_records_failed_task() {
    let fx = Fixture::new();
    let factory = FakeFactory::new(Behavior::InitFails);
    let mut ctx = fx.context(factory);

    let err = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 20);
    assert!(!fx.output().exists());

    let tasks = read_json(&day_file(&fx.metrics_dir()));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["success"], false);
    assert_eq!(tasks[0]["responseLength"], 0);
    assert!(tasks[0]["errorMessage"]
        .as_str()
        .unwrap()
        .contains("SMITH_TEST_OPENAI_KEY"));

    let system = ctx.metrics().system_metrics().unwrap();
    assert_eq!(system.failed_tasks, 1);
    assert_eq!(system.successful_tasks, 0);
}

#[tokio::test]
async fn test_dispatch_failure_propagates_by_default() {
    let fx = Fixture::new();
    let mut ctx = fx.context(FakeFactory::new(Behavior::DispatchFails));

    let err = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap_err();

    assert!(matches!(err, SmithError::Dispatch(_)));
    assert!(!fx.output().exists());
    assert_eq!(ctx.metrics().system_metrics().unwrap().failed_tasks, 1);
}

#[tokio::test]
async fn test_unwritable_aggregate_never_logs_a_successful_task() {
    let fx = Fixture::new();
    std::fs::create_dir_all(fx.metrics_dir().join(SYSTEM_METRICS_FILE)).unwrap();
    let mut ctx = fx.context(FakeFactory::new(reply("export const add = 1;")));

    let err = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project))
        .await
        .unwrap_err();

    assert!(matches!(err, SmithError::Io(_)));
    assert_eq!(err.exit_code(), 30);
    assert!(!day_file(&fx.metrics_dir()).exists());
}

#[tokio::test]
async fn test_degrade_policy_writes_sentinel() {
    let fx = Fixture::new();
    let mut ctx = fx.context(FakeFactory::new(Behavior::DispatchFails));

    let report = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project).with_policy(DispatchPolicy::Degrade))
        .await
        .unwrap();

    assert!(report.degraded);
    assert_eq!(report.usage, None);
    assert_eq!(
        std::fs::read_to_string(fx.output()).unwrap(),
        DEGRADED_RESPONSE
    );
    let system = ctx.metrics().system_metrics().unwrap();
    assert_eq!(system.successful_tasks, 1);
    assert_eq!(system.total_tokens_used, 0);
}

#[tokio::test]
async fn test_explicit_task_path_and_missing_project_root() {
    let fx = Fixture::new();
    let alt = fx.workspace.join("tasks/alt.jsonc");
    std::fs::write(
        &alt,
        r#"{ "agent": "codeArchitect", "sourceFile": "src/math.ts", "outputFile": "alt.ts" }"#,
    )
    .unwrap();
    let mut ctx = fx.context(FakeFactory::new(reply("alt")));

    let report = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(&fx.project).with_task(&alt))
        .await
        .unwrap();
    assert_eq!(report.output_path, fx.project.join("alt.ts"));

    let err = Orchestrator::new(&mut ctx)
        .run(&RunRequest::new(fx.project.join("missing")))
        .await
        .unwrap_err();
    assert!(matches!(err, SmithError::NotFound { .. }));
    assert_eq!(ctx.metrics().system_metrics().unwrap().total_tasks, 1);
}
