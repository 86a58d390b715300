//! The diagnostic procedure.
//!
//! Runs the probe steps in order against a [`DiagnosticContext`], writing a
//! line-oriented report:
//!
//! ```text
//! catalog/search/engine => elasticsearch8
//! catalog/search/elasticsearch8_server_hostname => localhost
//! catalog/search/elasticsearch8_server_port => 9200
//! Prepared client options for engine elasticsearch8:
//!   hostname => localhost
//!   ...
//! testConnection result: true
//! ```
//!
//! The first failing step stops the run and is reported as an
//! `Exception:` / `Message:` / `Trace:` block instead.

use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

use search_probe_repository::ProbeError;
use search_probe_shared::{config_paths, ClientOptions, ConnectionTestResult, OptionValue};
use tracing::{debug, error, info};

use crate::config::DiagnosticContext;

/// Placeholder printed for absent values.
const NULL_MARKER: &str = "NULL";

/// Printed in place of the password option unless secrets are shown.
const MASKED_SECRET: &str = "******";

/// Steps of a diagnostic run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ReadConfiguration,
    ResolveEngine,
    PrepareClientOptions,
    CreateClient,
    TestConnection,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadConfiguration => "read_configuration",
            Self::ResolveEngine => "resolve_engine",
            Self::PrepareClientOptions => "prepare_client_options",
            Self::CreateClient => "create_client",
            Self::TestConnection => "test_connection",
        };
        f.write_str(name)
    }
}

/// A failed run: the step that failed, the steps completed before it and the error.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub step: Step,
    pub completed: Vec<Step>,
    pub error: ProbeError,
}

impl FailureReport {
    /// Trace frames, innermost first: the failing step, the completed steps
    /// in reverse order, then `{main}`.
    pub fn trace(&self) -> Vec<String> {
        std::iter::once(self.step.to_string())
            .chain(self.completed.iter().rev().map(Step::to_string))
            .chain(std::iter::once("{main}".to_string()))
            .enumerate()
            .map(|(i, frame)| format!("#{} {}", i, frame))
            .collect()
    }

    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Exception: {}", self.error.kind())?;
        writeln!(out, "Message: {}", self.error)?;
        writeln!(out, "Trace:")?;
        for frame in self.trace() {
            writeln!(out, "{}", frame)?;
        }
        Ok(())
    }
}

/// Result of a diagnostic run.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticOutcome {
    /// The engine answered the probe with a success status.
    Reachable(ConnectionTestResult),
    /// The engine answered, but not with a success status.
    Unreachable(ConnectionTestResult),
    /// A step failed before a result was obtained.
    Failed(FailureReport),
}

impl DiagnosticOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }

    /// Process exit status for this outcome: 0 when reachable, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Error raised inside a run, before it is turned into a report.
enum RunError {
    Step(Step, ProbeError),
    Io(io::Error),
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Runs the diagnostic steps against a context.
pub struct Diagnostic<'a> {
    context: &'a DiagnosticContext,
    show_secrets: bool,
}

impl<'a> Diagnostic<'a> {
    pub fn new(context: &'a DiagnosticContext) -> Self {
        Self {
            context,
            show_secrets: false,
        }
    }

    /// Print the password option in clear instead of masking it.
    pub fn show_secrets(mut self, show: bool) -> Self {
        self.show_secrets = show;
        self
    }

    /// Run every step, writing the report to `out`.
    ///
    /// Step failures never escape: they are written as an error block and
    /// returned as [`DiagnosticOutcome::Failed`]. Only failing to write the
    /// report is an error.
    pub async fn run(&self, out: &mut impl Write) -> io::Result<DiagnosticOutcome> {
        let mut completed = Vec::new();

        match self.run_steps(&mut *out, &mut completed).await {
            Ok(result) => {
                info!(
                    engine = %result.engine,
                    reachable = result.reachable,
                    elapsed_ms = result.elapsed.as_millis() as u64,
                    checked_at = %result.checked_at.to_rfc3339(),
                    "Diagnostic finished"
                );
                if result.reachable {
                    Ok(DiagnosticOutcome::Reachable(result))
                } else {
                    Ok(DiagnosticOutcome::Unreachable(result))
                }
            }
            Err(RunError::Step(step, error)) => {
                error!(step = %step, kind = error.kind(), error = %error, "Diagnostic step failed");
                let report = FailureReport {
                    step,
                    completed,
                    error,
                };
                report.write_to(&mut *out)?;
                Ok(DiagnosticOutcome::Failed(report))
            }
            Err(RunError::Io(e)) => Err(e),
        }
    }

    async fn run_steps(
        &self,
        out: &mut impl Write,
        completed: &mut Vec<Step>,
    ) -> Result<ConnectionTestResult, RunError> {
        let context = self.context;

        for path in config_paths::REPORTED {
            let value = context.config.value(path);
            writeln!(out, "{} => {}", path, value.as_deref().unwrap_or(NULL_MARKER))?;
        }
        completed.push(Step::ReadConfiguration);

        let engine = context
            .resolver
            .current_engine()
            .map_err(|e| RunError::Step(Step::ResolveEngine, e))?;
        completed.push(Step::ResolveEngine);

        let options = context
            .resolver
            .options_builder(&engine)
            .and_then(|builder| builder.prepare_client_options(&ClientOptions::new()))
            .map_err(|e| RunError::Step(Step::PrepareClientOptions, e))?;
        debug!(
            engine = %engine,
            options = %serde_json::to_string(&masked(&options)).unwrap_or_default(),
            "Prepared client options"
        );
        writeln!(out, "Prepared client options for engine {}:", engine)?;
        self.write_options(&mut *out, &options)?;
        completed.push(Step::PrepareClientOptions);

        let client = context
            .clients
            .create(&engine, &options)
            .map_err(|e| RunError::Step(Step::CreateClient, e))?;
        completed.push(Step::CreateClient);

        let start = Instant::now();
        let reachable = client
            .test_connection()
            .await
            .map_err(|e| RunError::Step(Step::TestConnection, e))?;
        let result = ConnectionTestResult::new(engine, reachable, start.elapsed());
        writeln!(out, "testConnection result: {}", result)?;
        completed.push(Step::TestConnection);

        Ok(result)
    }

    fn write_options(&self, out: &mut impl Write, options: &ClientOptions) -> io::Result<()> {
        let options = if self.show_secrets {
            options.clone()
        } else {
            masked(options)
        };
        for (key, value) in options.iter() {
            writeln!(out, "  {} => {}", key, value)?;
        }
        Ok(())
    }
}

/// Copy of `options` with a configured password replaced by a mask.
///
/// Blank passwords count as unset and are left as they are.
fn masked(options: &ClientOptions) -> ClientOptions {
    let mut options = options.clone();
    if options.text("password").is_some_and(|s| !s.trim().is_empty()) {
        options.insert("password", OptionValue::from(MASKED_SECRET));
    }
    options
}
