//! Configuration and dependency wiring for the probe.

mod dependencies;

pub use dependencies::DiagnosticContext;
