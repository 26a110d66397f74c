use std::path::PathBuf;

use smith_core::api::{read_jsonc, validate_setup, AppConfig, SmithError};

use crate::commands::cli::ValidateArgs;

/// Exit status: 0 when the setup is valid, 10 otherwise.
pub fn handle_validate(cfg: &AppConfig, args: &ValidateArgs) -> Result<i32, SmithError> {
    let path: PathBuf = match &args.config {
        Some(p) => cfg.paths.resolve(p),
        None => cfg.paths.config_path(),
    };
    let config = read_jsonc(&path)?;
    let report = validate_setup(&config, &cfg.paths.workspace_dir);

    if report.is_valid() {
        println!("Configuration is valid: {}", path.display());
        for warning in report.warnings() {
            println!("  warning: {warning}");
        }
        Ok(0)
    } else {
        println!("Configuration is invalid: {}", path.display());
        for error in report.errors() {
            println!("  error: {error}");
        }
        Ok(10)
    }
}
