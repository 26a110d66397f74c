use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "smith",
    version,
    about = "AI Agent Framework for Code Architecture and Development"
)]
pub struct Args {
    /// Settings file (TOML); defaults to ~/.smith/config.toml or ./smith.toml.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Project root directory.
    #[arg(short = 'p', long)]
    pub project_root: PathBuf,

    /// Task file to execute; relative paths resolve against the workspace.
    #[arg(short = 't', long)]
    pub task: Option<PathBuf>,

    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Write "(Error generating response)" instead of failing when the provider errors.
    #[arg(long)]
    pub degrade_on_error: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MetricsArgs {
    /// Generate the detailed report.
    #[arg(short = 'r', long)]
    pub report: bool,

    /// Show the tasks recorded on a date (YYYY-MM-DD).
    #[arg(short = 'd', long)]
    pub date: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ValidateArgs {
    /// Agent configuration to validate; defaults to the configured one.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InitArgs {
    /// Target directory.
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a task against a project root.
    Run(RunArgs),
    /// Display metrics and analytics.
    Metrics(MetricsArgs),
    /// Validate configuration and environment.
    Validate(ValidateArgs),
    /// Initialize a new Smith workspace.
    Init(InitArgs),
}

impl Args {
    /// Filter requested on the command line, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        match &self.command {
            Commands::Run(run) if run.debug => Some("debug"),
            Commands::Run(run) if run.verbose => Some("info"),
            _ => None,
        }
    }
}
