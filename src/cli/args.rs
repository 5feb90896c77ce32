//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::BuildProfile;

/// Pyforge - CMake build driver for Python native extensions
#[derive(Parser, Debug)]
#[command(name = "pyforge")]
#[command(version)]
#[command(about = "Build CMake-based native extension modules for Python")]
#[command(long_about = None)]
pub struct Cli {
    /// Python interpreter to build against
    #[arg(short, long, value_name = "PATH", global = true)]
    pub python: Option<String>,

    /// Build profile
    #[arg(short = 'P', long, value_name = "PROFILE")]
    pub profile: Option<ProfileArg>,

    /// Parallel build jobs (ignored when CMAKE_BUILD_PARALLEL_LEVEL is set)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<u32>,

    /// Directory containing the extension's CMakeLists.txt
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: Option<String>,

    /// Directory receiving the built extension
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<String>,

    /// Out-of-source build directory
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<String>,

    /// Package name (defaults to the source directory name)
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Python runtime library the build would link against
    Locate,
    /// Print the interpreter's build-configuration snapshot
    Inspect,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Profile argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Debug,
    Release,
}

impl From<ProfileArg> for BuildProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Debug => BuildProfile::Debug,
            ProfileArg::Release => BuildProfile::Release,
        }
    }
}

impl From<BuildProfile> for ProfileArg {
    fn from(profile: BuildProfile) -> Self {
        match profile {
            BuildProfile::Debug => ProfileArg::Debug,
            BuildProfile::Release => ProfileArg::Release,
        }
    }
}

/// Parsed build options
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub python: String,
    pub profile: BuildProfile,
    pub jobs: u32,
    pub source_dir: String,
    pub build_dir: String,
    pub out_dir: String,
    pub package: Option<String>,
    pub macos_archs: String,
    pub macos_deployment_target: String,
}

/// Parsed options for the locate and inspect commands
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub python: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "python",
    "profile",
    "jobs",
    "source_dir",
    "build_dir",
    "out_dir",
    "package",
    "macos.archs",
    "macos.deployment_target",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
