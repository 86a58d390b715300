//! # Search Probe
//!
//! Diagnostic tool that reports the search configuration of a catalog
//! application, prepares the active engine's client options and checks that
//! the engine is reachable.
//!
//! The collaborators are wired once into a [`DiagnosticContext`] and handed
//! to [`Diagnostic`], which runs the steps in order and writes a
//! human-readable report.

pub mod config;
pub mod diagnostic;

pub use config::DiagnosticContext;
pub use diagnostic::{Diagnostic, DiagnosticOutcome, FailureReport, Step};

use thiserror::Error;

/// Errors that can occur before or around a diagnostic run.
///
/// Failures inside the run itself are reported in its output, see
/// [`DiagnosticOutcome::Failed`].
#[derive(Error, Debug)]
pub enum DiagnosticError {
    /// The context could not be built, e.g. an unreadable config file.
    #[error("Probe error: {0}")]
    Probe(#[from] search_probe_repository::ProbeError),

    /// Writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
