//! CPython interpreter probe adapter

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{InterpreterProbe, ProbeError};
use crate::domain::python::SysconfigSnapshot;

/// Introspection program run on the target interpreter. Emits one JSON
/// object on stdout whose keys mirror `SysconfigSnapshot`. Falsy config
/// vars are reported as null so absent and empty read the same way.
const PROBE_SCRIPT: &str = r#"
import json, sys, sysconfig

def var(name):
    return sysconfig.get_config_var(name) or None

print(json.dumps({
    "executable": sys.executable,
    "version": sysconfig.get_python_version(),
    "abiflags": getattr(sys, "abiflags", ""),
    "include_dir": sysconfig.get_path("include"),
    "library": var("LIBRARY"),
    "libdir": var("LIBDIR"),
    "libdest": var("LIBDEST"),
    "multiarch": var("MULTIARCH"),
    "multiarch_subdir": var("multiarchsubdir"),
    "with_dyld": bool(sysconfig.get_config_var("WITH_DYLD")),
}))
"#;

/// Probe that spawns a CPython interpreter and captures its build
/// configuration
pub struct CPythonProbe {
    python: PathBuf,
}

impl CPythonProbe {
    /// Create a probe for the given interpreter executable
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// The interpreter this probe targets
    pub fn python(&self) -> &PathBuf {
        &self.python
    }

    fn parse_report(&self, stdout: &[u8]) -> Result<SysconfigSnapshot, ProbeError> {
        let report = String::from_utf8_lossy(stdout);
        serde_json::from_str(report.trim())
            .map_err(|e| ProbeError::ReportParseFailed(e.to_string()))
    }
}

#[async_trait]
impl InterpreterProbe for CPythonProbe {
    async fn inspect(&self) -> Result<SysconfigSnapshot, ProbeError> {
        let output = Command::new(&self.python)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::InterpreterNotFound(self.python.display().to_string())
                } else {
                    ProbeError::ProbeFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::ProbeFailed(
                stderr.lines().last().unwrap_or("unknown error").to_string(),
            ));
        }

        let snapshot = self.parse_report(&output.stdout)?;

        // The tool only targets CPython 3. Old interpreters run the probe
        // fine, so the gate lives here rather than at spawn time.
        if let Some(version) = snapshot.python_version() {
            if !version.is_supported() {
                return Err(ProbeError::UnsupportedVersion(version.to_string()));
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_accepts_probe_payload() {
        let probe = CPythonProbe::new("python3");
        let snapshot = probe
            .parse_report(br#"{"version": "3.11", "abiflags": "", "with_dyld": true}"#)
            .unwrap();
        assert_eq!(snapshot.version.as_deref(), Some("3.11"));
        assert!(snapshot.with_dyld);
    }

    #[test]
    fn parse_report_rejects_garbage() {
        let probe = CPythonProbe::new("python3");
        let result = probe.parse_report(b"Traceback (most recent call last):");
        assert!(matches!(result, Err(ProbeError::ReportParseFailed(_))));
    }

    #[test]
    fn probe_script_reports_every_snapshot_field() {
        for key in [
            "executable",
            "version",
            "abiflags",
            "include_dir",
            "library",
            "libdir",
            "libdest",
            "multiarch",
            "multiarch_subdir",
            "with_dyld",
        ] {
            assert!(PROBE_SCRIPT.contains(key), "missing {key}");
        }
    }

    #[tokio::test]
    async fn missing_interpreter_reports_not_found() {
        let probe = CPythonProbe::new("/nonexistent/bin/python3");
        let result = probe.inspect().await;
        assert!(matches!(result, Err(ProbeError::InterpreterNotFound(_))));
    }
}
