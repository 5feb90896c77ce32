//! Interpreter introspection port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::python::SysconfigSnapshot;

/// Interpreter probe errors
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("Python interpreter not found: {0}")]
    InterpreterNotFound(String),

    #[error("Interpreter probe failed: {0}")]
    ProbeFailed(String),

    #[error("Failed to parse interpreter report: {0}")]
    ReportParseFailed(String),

    #[error("Unsupported Python version {0}. Python >= 3.0 is required")]
    UnsupportedVersion(String),
}

/// Port for interpreter build-configuration introspection
#[async_trait]
pub trait InterpreterProbe: Send + Sync {
    /// Capture the target interpreter's build-configuration snapshot.
    ///
    /// # Returns
    /// The snapshot, or an error when the interpreter cannot be queried
    /// or reports an unsupported generation.
    async fn inspect(&self) -> Result<SysconfigSnapshot, ProbeError>;
}
