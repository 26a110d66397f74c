use super::types::SystemMetrics;

pub const NO_METRICS_MESSAGE: &str = "No metrics available";

/// Human-readable summary of the aggregate.
pub fn render_report(metrics: Option<&SystemMetrics>) -> String {
    let Some(m) = metrics else {
        return NO_METRICS_MESSAGE.to_string();
    };

    let success_rate = m
        .success_rate()
        .map(|r| format!("{r:.2}"))
        .unwrap_or_else(|| "0".to_string());
    let avg_secs = m.average_duration / 1000.0;

    format!(
        "
Smith Framework Metrics Report
==============================

Total Tasks: {total}
Successful: {ok}
Failed: {failed}
Success Rate: {success_rate}%

Average Duration: {avg_secs:.2}s
Total Tokens Used: {tokens}

Most Used Provider: {provider}
Most Used Agent: {agent}

Last Updated: {updated}
",
        total = m.total_tasks,
        ok = m.successful_tasks,
        failed = m.failed_tasks,
        tokens = m.total_tokens_used,
        provider = m.top_provider().unwrap_or("None"),
        agent = m.top_agent().unwrap_or("None"),
        updated = m.last_updated.to_rfc3339(),
    )
}
