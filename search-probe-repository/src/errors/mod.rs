//! Error types for the search probe repository.

mod probe_error;

pub use probe_error::ProbeError;
