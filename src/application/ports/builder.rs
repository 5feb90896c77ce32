//! Native build runner port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Native build errors
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("cmake not found. Install CMake and ensure it is on PATH")]
    CmakeNotFound,

    #[error("Configure failed: {0}")]
    ConfigureFailed(String),

    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Fully-resolved native build invocation, computed before any
/// subprocess is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Directory containing the extension's CMakeLists.txt
    pub source_dir: PathBuf,
    /// Out-of-source build directory (working directory for cmake)
    pub build_dir: PathBuf,
    /// `-D` definitions and other arguments for the configure step
    pub configure_args: Vec<String>,
    /// Arguments appended to `cmake --build .`
    pub build_args: Vec<String>,
}

/// Port for running the native build tool.
///
/// Configure and build are separate operations: configure must complete
/// successfully before build is invoked.
#[async_trait]
pub trait BuildRunner: Send + Sync {
    /// Run the configure step for `plan`.
    async fn configure(&self, plan: &BuildPlan) -> Result<(), BuildError>;

    /// Run the build step for `plan`. Only valid after a successful
    /// configure.
    async fn build(&self, plan: &BuildPlan) -> Result<(), BuildError>;
}
