//! CMake build runner adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;

use crate::application::ports::{BuildError, BuildPlan, BuildRunner};

/// Runner that drives `cmake` configure and build subprocesses
pub struct CmakeRunner;

impl CmakeRunner {
    /// Create a new CMake runner
    pub fn new() -> Self {
        Self
    }

    /// Arguments for the configure invocation
    fn configure_args(plan: &BuildPlan) -> Vec<String> {
        let mut args = vec![plan.source_dir.display().to_string()];
        args.extend(plan.configure_args.iter().cloned());
        args
    }

    /// Arguments for the build invocation
    fn build_args(plan: &BuildPlan) -> Vec<String> {
        let mut args = vec!["--build".to_string(), ".".to_string()];
        args.extend(plan.build_args.iter().cloned());
        args
    }

    /// Spawn cmake in the plan's build directory and wait for it
    async fn run_cmake(plan: &BuildPlan, args: &[String]) -> Result<(), CmakeFailure> {
        let output = Command::new("cmake")
            .args(args)
            .current_dir(&plan.build_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CmakeFailure::NotFound
                } else {
                    CmakeFailure::Exited(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CmakeFailure::Exited(stderr_tail(&stderr)));
        }

        Ok(())
    }
}

impl Default for CmakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal failure shape, mapped to a step-specific BuildError by the
/// trait methods
enum CmakeFailure {
    NotFound,
    Exited(String),
}

/// Last few stderr lines, newest last
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail_start = lines.len().saturating_sub(5);
    if lines.is_empty() {
        "cmake exited with non-zero status".to_string()
    } else {
        lines[tail_start..].join("\n")
    }
}

#[async_trait]
impl BuildRunner for CmakeRunner {
    async fn configure(&self, plan: &BuildPlan) -> Result<(), BuildError> {
        fs::create_dir_all(&plan.build_dir)
            .await
            .map_err(|e| BuildError::Io(e.to_string()))?;

        Self::run_cmake(plan, &Self::configure_args(plan))
            .await
            .map_err(|failure| match failure {
                CmakeFailure::NotFound => BuildError::CmakeNotFound,
                CmakeFailure::Exited(message) => BuildError::ConfigureFailed(message),
            })
    }

    async fn build(&self, plan: &BuildPlan) -> Result<(), BuildError> {
        Self::run_cmake(plan, &Self::build_args(plan))
            .await
            .map_err(|failure| match failure {
                CmakeFailure::NotFound => BuildError::CmakeNotFound,
                CmakeFailure::Exited(message) => BuildError::BuildFailed(message),
            })
    }
}
