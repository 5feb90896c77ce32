//! Tool configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ProfileParseError;

/// Default parallel job count passed to the native build
pub const DEFAULT_JOBS: u32 = 4;

/// Default macOS universal-binary architectures
pub const DEFAULT_MACOS_ARCHS: &str = "x86_64;arm64";

/// Default macOS deployment target
pub const DEFAULT_MACOS_DEPLOYMENT_TARGET: &str = "11.0";

/// Native build profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
    Debug,
    #[default]
    Release,
}

impl BuildProfile {
    /// The CMake `CMAKE_BUILD_TYPE` value for this profile
    pub const fn cmake_build_type(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl FromStr for BuildProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(ProfileParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Release => write!(f, "release"),
        }
    }
}

/// macOS-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacosConfig {
    pub archs: Option<String>,
    pub deployment_target: Option<String>,
}

/// Tool configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    pub python: Option<String>,
    pub profile: Option<String>,
    pub jobs: Option<u32>,
    pub source_dir: Option<String>,
    pub build_dir: Option<String>,
    pub out_dir: Option<String>,
    pub package: Option<String>,
    pub macos: Option<MacosConfig>,
}

impl ForgeConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            python: Some("python3".to_string()),
            profile: Some("release".to_string()),
            jobs: Some(DEFAULT_JOBS),
            source_dir: Some(".".to_string()),
            build_dir: Some("build".to_string()),
            out_dir: Some("dist".to_string()),
            package: None,
            macos: Some(MacosConfig {
                archs: Some(DEFAULT_MACOS_ARCHS.to_string()),
                deployment_target: Some(DEFAULT_MACOS_DEPLOYMENT_TARGET.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            python: other.python.or(self.python),
            profile: other.profile.or(self.profile),
            jobs: other.jobs.or(self.jobs),
            source_dir: other.source_dir.or(self.source_dir),
            build_dir: other.build_dir.or(self.build_dir),
            out_dir: other.out_dir.or(self.out_dir),
            package: other.package.or(self.package),
            macos: Self::merge_macos_config(self.macos, other.macos),
        }
    }

    /// Merge macOS config sections
    fn merge_macos_config(
        base: Option<MacosConfig>,
        other: Option<MacosConfig>,
    ) -> Option<MacosConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(MacosConfig {
                archs: o.archs.or(b.archs),
                deployment_target: o.deployment_target.or(b.deployment_target),
            }),
        }
    }

    /// Get the interpreter to probe, or "python3" if not set
    pub fn python_or_default(&self) -> &str {
        self.python.as_deref().unwrap_or("python3")
    }

    /// Get profile as parsed BuildProfile, or release if not set/invalid
    pub fn profile_or_default(&self) -> BuildProfile {
        self.profile
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the parallel job count, or the default if not set
    pub fn jobs_or_default(&self) -> u32 {
        self.jobs.unwrap_or(DEFAULT_JOBS)
    }

    /// Get the extension source directory, or "." if not set
    pub fn source_dir_or_default(&self) -> &str {
        self.source_dir.as_deref().unwrap_or(".")
    }

    /// Get the build-temp directory, or "build" if not set
    pub fn build_dir_or_default(&self) -> &str {
        self.build_dir.as_deref().unwrap_or("build")
    }

    /// Get the extension output directory, or "dist" if not set
    pub fn out_dir_or_default(&self) -> &str {
        self.out_dir.as_deref().unwrap_or("dist")
    }

    /// Get macOS architectures, or the universal2 default if not set
    pub fn macos_archs_or_default(&self) -> &str {
        self.macos
            .as_ref()
            .and_then(|m| m.archs.as_deref())
            .unwrap_or(DEFAULT_MACOS_ARCHS)
    }

    /// Get macOS deployment target, or the default if not set
    pub fn macos_deployment_target_or_default(&self) -> &str {
        self.macos
            .as_ref()
            .and_then(|m| m.deployment_target.as_deref())
            .unwrap_or(DEFAULT_MACOS_DEPLOYMENT_TARGET)
    }
}
