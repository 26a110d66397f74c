use clap::Parser;
use smith_cli::app;
use smith_cli::commands::{cli, init, metrics, validate};
use smith_core::api::{load_default, load_from, AppConfig, LoggingConfig, SmithError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> anyhow::Result<i32> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    let cfg = load_settings(&args)?;
    if let Err(e) = init_tracing(&cfg, args.log_level()) {
        eprintln!("Warning: logging disabled: {e}");
    }

    match &args.command {
        cli::Commands::Run(run_args) => {
            app::run_task(cfg, run_args).await?;
            Ok(0)
        }
        cli::Commands::Metrics(metrics_args) => {
            metrics::handle_metrics(&cfg, metrics_args)?;
            Ok(0)
        }
        cli::Commands::Validate(validate_args) => {
            Ok(validate::handle_validate(&cfg, validate_args)?)
        }
        cli::Commands::Init(init_args) => {
            init::handle_init(init_args)?;
            Ok(0)
        }
    }
}

fn load_settings(args: &cli::Args) -> Result<AppConfig, SmithError> {
    let loaded = match &args.settings {
        Some(path) => load_from(path),
        None => load_default(),
    };
    loaded.map_err(|e| SmithError::Config(format!("{e:#}")))
}

fn exit_code_for_error(e: &anyhow::Error) -> i32 {
    // 0: success
    // 10: validation failure
    // 11: config error / unknown provider
    // 12: missing or unparseable file
    // 20: provider init / dispatch failure
    // 30: I/O
    // 50: internal/uncategorized
    match e.downcast_ref::<SmithError>() {
        Some(smith) => smith.exit_code(),
        None => 50,
    }
}

fn init_tracing(cfg: &AppConfig, cli_level: Option<&str>) -> Result<(), String> {
    let logging: &LoggingConfig = &cfg.logging;
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => {
            // SMITH_LOG_LEVEL is already folded into `logging.level` by the settings loader.
            let level = cli_level.unwrap_or(&logging.level);
            EnvFilter::try_new(level).map_err(|e| e.to_string())?
        }
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => cfg.paths.resolve(std::path::Path::new(d)),
            None => cfg.paths.resolve(std::path::Path::new("logs")),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "smith.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
