use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use search_probe::{Diagnostic, DiagnosticContext, DiagnosticError, DiagnosticOutcome};

/// Exit status when the diagnostic could not start.
const EXIT_SETUP_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "search-probe")]
#[command(about = "Check connectivity to the configured search engine", long_about = None)]
struct Cli {
    /// JSON file with catalog/search/* settings
    #[arg(long, env = "SEARCH_PROBE_CONFIG")]
    config: Option<PathBuf>,

    /// Print the password option instead of masking it
    #[arg(long)]
    show_secrets: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: &Cli) -> Result<DiagnosticOutcome, DiagnosticError> {
    let context = DiagnosticContext::from_env(cli.config.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = Diagnostic::new(&context)
        .show_secrets(cli.show_secrets)
        .run(&mut out)
        .await?;
    out.flush()?;

    Ok(outcome)
}

/// Process exit status for a finished or aborted run.
fn exit_status(result: &Result<DiagnosticOutcome, DiagnosticError>) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(_) => EXIT_SETUP_FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = run(&cli).await;
    let status = exit_status(&result);

    match result {
        Ok(outcome) => {
            info!(success = outcome.is_success(), "Search probe finished");
        }
        Err(e) => {
            error!(error = %e, "Search probe could not run");
            eprintln!("Error: {}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {}", err);
                source = err.source();
            }
        }
    }

    ExitCode::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_probe::{FailureReport, Step};
    use search_probe_repository::ProbeError;
    use search_probe_shared::{ConnectionTestResult, EngineId};
    use std::time::Duration;

    fn result(reachable: bool) -> ConnectionTestResult {
        ConnectionTestResult::new(
            EngineId::new("elasticsearch8").unwrap(),
            reachable,
            Duration::from_millis(2),
        )
    }

    #[test]
    fn test_exit_status_reachable() {
        assert_eq!(exit_status(&Ok(DiagnosticOutcome::Reachable(result(true)))), 0);
    }

    #[test]
    fn test_exit_status_unhealthy_or_failed_step() {
        assert_eq!(exit_status(&Ok(DiagnosticOutcome::Unreachable(result(false)))), 1);

        let report = FailureReport {
            step: Step::TestConnection,
            completed: vec![Step::ReadConfiguration, Step::ResolveEngine],
            error: ProbeError::connection("Connection refused"),
        };
        assert_eq!(exit_status(&Ok(DiagnosticOutcome::Failed(report))), 1);
    }

    #[test]
    fn test_exit_status_setup_failure() {
        let err = DiagnosticError::from(ProbeError::configuration_missing("Cannot read config file"));
        assert_eq!(exit_status(&Err(err)), EXIT_SETUP_FAILURE);

        let err = DiagnosticError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(exit_status(&Err(err)), 2);
    }
}
