//! Interpreter build-configuration snapshot

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::python::PythonVersion;

/// Read-only snapshot of a CPython interpreter's build configuration,
/// captured once per invocation by the interpreter probe.
///
/// Field names match the JSON payload emitted by the probe script, which in
/// turn sources them from `sysconfig` and `sys` on the target interpreter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysconfigSnapshot {
    /// `sys.executable`
    pub executable: Option<PathBuf>,
    /// `sysconfig.get_python_version()`, the short "X.Y" form
    pub version: Option<String>,
    /// `sys.abiflags` (empty on platforms without ABI-flagged builds)
    #[serde(default)]
    pub abiflags: String,
    /// `sysconfig.get_path("include")`
    pub include_dir: Option<PathBuf>,
    /// The `LIBRARY` config var: the primary library reference, when set
    pub library: Option<String>,
    /// The `LIBDIR` config var
    pub libdir: Option<PathBuf>,
    /// The `LIBDEST` config var (stdlib destination; anchors the
    /// sibling `libs` fallback when `LIBDIR` is unset)
    pub libdest: Option<PathBuf>,
    /// The `MULTIARCH` config var
    pub multiarch: Option<String>,
    /// The `multiarchsubdir` config var
    pub multiarch_subdir: Option<String>,
    /// The `WITH_DYLD` config var: dynamic-library support flag
    #[serde(default)]
    pub with_dyld: bool,
}

impl SysconfigSnapshot {
    /// Parsed version descriptor, if the interpreter reported one
    /// in a recognizable form.
    pub fn python_version(&self) -> Option<PythonVersion> {
        self.version.as_deref().and_then(|v| v.parse().ok())
    }

    /// Key/value rendering for display (the `inspect` command)
    pub fn key_values(&self) -> Vec<(&'static str, String)> {
        fn or_unset(value: Option<String>) -> String {
            value.unwrap_or_else(|| "(not set)".to_string())
        }

        vec![
            (
                "executable",
                or_unset(self.executable.as_ref().map(|p| p.display().to_string())),
            ),
            ("version", or_unset(self.version.clone())),
            ("abiflags", self.abiflags.clone()),
            (
                "include_dir",
                or_unset(self.include_dir.as_ref().map(|p| p.display().to_string())),
            ),
            ("library", or_unset(self.library.clone())),
            (
                "libdir",
                or_unset(self.libdir.as_ref().map(|p| p.display().to_string())),
            ),
            (
                "libdest",
                or_unset(self.libdest.as_ref().map(|p| p.display().to_string())),
            ),
            ("multiarch", or_unset(self.multiarch.clone())),
            ("multiarch_subdir", or_unset(self.multiarch_subdir.clone())),
            ("with_dyld", self.with_dyld.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_probe_payload() {
        let payload = r#"{
            "executable": "/usr/bin/python3",
            "version": "3.10",
            "abiflags": "",
            "include_dir": "/usr/include/python3.10",
            "library": "libpython3.10.a",
            "libdir": "/usr/lib",
            "libdest": "/usr/lib/python3.10",
            "multiarch": "x86_64-linux-gnu",
            "multiarch_subdir": null,
            "with_dyld": false
        }"#;

        let snapshot: SysconfigSnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(snapshot.executable, Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(snapshot.version.as_deref(), Some("3.10"));
        assert_eq!(snapshot.library.as_deref(), Some("libpython3.10.a"));
        assert_eq!(snapshot.libdir, Some(PathBuf::from("/usr/lib")));
        assert_eq!(snapshot.multiarch.as_deref(), Some("x86_64-linux-gnu"));
        assert!(snapshot.multiarch_subdir.is_none());
        assert!(!snapshot.with_dyld);
    }

    #[test]
    fn deserializes_sparse_payload() {
        let payload = r#"{"version": "3.12", "with_dyld": true}"#;
        let snapshot: SysconfigSnapshot = serde_json::from_str(payload).unwrap();
        assert!(snapshot.library.is_none());
        assert!(snapshot.libdir.is_none());
        assert!(snapshot.abiflags.is_empty());
        assert!(snapshot.with_dyld);
    }

    #[test]
    fn python_version_parses_reported_version() {
        let snapshot = SysconfigSnapshot {
            version: Some("3.10".to_string()),
            ..Default::default()
        };
        assert_eq!(snapshot.python_version(), Some(PythonVersion::new(3, 10)));
    }

    #[test]
    fn python_version_none_on_unparseable() {
        let snapshot = SysconfigSnapshot {
            version: Some("unknown".to_string()),
            ..Default::default()
        };
        assert!(snapshot.python_version().is_none());
        assert!(SysconfigSnapshot::default().python_version().is_none());
    }

    #[test]
    fn key_values_covers_every_field() {
        let snapshot = SysconfigSnapshot::default();
        let pairs = snapshot.key_values();
        assert_eq!(pairs.len(), 10);
        assert!(pairs.iter().any(|(k, v)| *k == "library" && v == "(not set)"));
        assert!(pairs.iter().any(|(k, v)| *k == "with_dyld" && v == "false"));
    }
}
