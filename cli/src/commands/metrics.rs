use anyhow::Context;
use chrono::NaiveDate;
use smith_core::api::{AppConfig, MetricsCollector, TaskMetrics, NO_METRICS_MESSAGE};

use crate::commands::cli::MetricsArgs;

pub fn handle_metrics(cfg: &AppConfig, args: &MetricsArgs) -> anyhow::Result<()> {
    let collector = MetricsCollector::new(cfg.paths.metrics_path())?;

    if args.report {
        println!("{}", collector.generate_report());
    } else if let Some(date) = &args.date {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date \"{date}\", expected YYYY-MM-DD"))?;
        println!("Tasks executed on {date}:");
        println!("{}", render_task_table(&collector.task_metrics(day)));
    } else {
        println!("{}", render_summary(&collector));
    }
    Ok(())
}

fn render_summary(collector: &MetricsCollector) -> String {
    let Some(m) = collector.system_metrics() else {
        return NO_METRICS_MESSAGE.to_string();
    };
    format!(
        "Smith Framework Metrics:\n\
         Total Tasks: {}\n\
         Success Rate: {:.2}%\n\
         Average Duration: {:.2}s\n\
         Total Tokens: {}",
        m.total_tasks,
        m.success_rate().unwrap_or(0.0),
        m.average_duration / 1000.0,
        m.total_tokens_used
    )
}

fn render_task_table(tasks: &[TaskMetrics]) -> String {
    let mut out = format!(
        "{:<32} {:<18} {:<10} {:<8} {:>10} {:>16}",
        "ID", "Agent", "Provider", "Success", "Duration", "Response Length"
    );
    for task in tasks {
        let duration = task
            .duration
            .map(|d| format!("{:.2}s", d as f64 / 1000.0))
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "\n{:<32} {:<18} {:<10} {:<8} {:>10} {:>16}",
            task.task_id,
            task.agent_id,
            task.provider_name,
            if task.success { "yes" } else { "no" },
            duration,
            task.response_length
        ));
    }
    out
}
