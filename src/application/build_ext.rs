//! Build extension use case

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::config::BuildProfile;
use crate::domain::locate::locate;
use crate::domain::python::SysconfigSnapshot;

use super::ports::{BuildError, BuildPlan, BuildRunner, InterpreterProbe, ProbeError};

/// Errors from the build extension use case
#[derive(Debug, Error)]
pub enum BuildExtError {
    #[error("Interpreter inspection failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("Native build failed: {0}")]
    Build(#[from] BuildError),
}

/// macOS cross-compile settings injected into the configure step
#[derive(Debug, Clone)]
pub struct MacosSettings {
    /// Architectures for a universal binary, semicolon-separated
    pub archs: String,
    /// Minimum supported macOS version
    pub deployment_target: String,
}

/// Input parameters for the build extension use case
#[derive(Debug, Clone)]
pub struct BuildInput {
    /// Directory containing the extension's CMakeLists.txt
    pub source_dir: PathBuf,
    /// Out-of-source build directory
    pub build_dir: PathBuf,
    /// Root directory receiving built extension artifacts
    pub out_dir: PathBuf,
    /// Package name; artifacts land in `<out_dir>/<package>`
    pub package: String,
    /// Native build profile
    pub profile: BuildProfile,
    /// Parallel job count for the build step
    pub jobs: u32,
    /// Whether CMAKE_BUILD_PARALLEL_LEVEL was set in the environment,
    /// read once at the call site. When set, the job count is left to
    /// the environment and no -j flag is passed.
    pub parallel_env_set: bool,
    /// macOS settings, present only for macOS-targeted builds
    pub macos: Option<MacosSettings>,
}

/// Output from the build extension use case
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The Python runtime library the build linked against, when resolved
    pub python_library: Option<PathBuf>,
    /// Directory the built extension was written to
    pub extension_dir: PathBuf,
}

/// Callbacks for progress and status updates
#[derive(Default)]
pub struct BuildCallbacks {
    /// Called before the interpreter is probed
    pub on_inspect_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called with the reported version once the snapshot is captured
    pub on_inspect_end: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called with the resolved runtime library path
    pub on_library_resolved: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when no runtime library could be located
    pub on_library_unresolved: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the configure step starts
    pub on_configure_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the configure step succeeds
    pub on_configure_end: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the build step starts
    pub on_build_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the build step succeeds
    pub on_build_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// One-shot extension build use case: inspect the interpreter, locate the
/// runtime library, then configure and build strictly in sequence.
pub struct BuildExtensionUseCase<P, B>
where
    P: InterpreterProbe,
    B: BuildRunner,
{
    probe: P,
    runner: B,
}

impl<P, B> BuildExtensionUseCase<P, B>
where
    P: InterpreterProbe,
    B: BuildRunner,
{
    /// Create a new use case instance
    pub fn new(probe: P, runner: B) -> Self {
        Self { probe, runner }
    }

    /// Execute the build workflow
    pub async fn execute(
        &self,
        input: BuildInput,
        callbacks: BuildCallbacks,
    ) -> Result<BuildOutput, BuildExtError> {
        if let Some(ref cb) = callbacks.on_inspect_start {
            cb();
        }

        let snapshot = self.probe.inspect().await?;

        if let Some(ref cb) = callbacks.on_inspect_end {
            cb(snapshot.version.as_deref().unwrap_or("unknown"));
        }

        // The locator runs once, before any native subprocess is spawned.
        // A miss is not fatal: the link step decides.
        let version = snapshot.python_version();
        let python_library = locate(&snapshot, version.as_ref());
        match &python_library {
            Some(path) => {
                if let Some(ref cb) = callbacks.on_library_resolved {
                    cb(&path.display().to_string());
                }
            }
            None => {
                if let Some(ref cb) = callbacks.on_library_unresolved {
                    cb();
                }
            }
        }

        let plan = Self::plan(&input, &snapshot, python_library.as_deref());

        if let Some(ref cb) = callbacks.on_configure_start {
            cb();
        }
        self.runner.configure(&plan).await?;
        if let Some(ref cb) = callbacks.on_configure_end {
            cb();
        }

        if let Some(ref cb) = callbacks.on_build_start {
            cb();
        }
        self.runner.build(&plan).await?;
        if let Some(ref cb) = callbacks.on_build_end {
            cb();
        }

        Ok(BuildOutput {
            python_library,
            extension_dir: Self::extension_dir(&input),
        })
    }

    /// Directory the built extension lands in
    fn extension_dir(input: &BuildInput) -> PathBuf {
        input.out_dir.join(&input.package)
    }

    /// Assemble the resolved build plan
    fn plan(
        input: &BuildInput,
        snapshot: &SysconfigSnapshot,
        python_library: Option<&Path>,
    ) -> BuildPlan {
        // CMake wants a trailing separator on the output directory so
        // auxiliary native libs are auto-detected next to the extension.
        let ext_dir = with_trailing_separator(&Self::extension_dir(input));

        let mut configure_args = vec![
            format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}", ext_dir),
            format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_RELEASE={}", ext_dir),
        ];

        if let Some(executable) = &snapshot.executable {
            configure_args.push(format!("-DPYTHON_EXECUTABLE={}", executable.display()));
        }
        if let Some(include_dir) = &snapshot.include_dir {
            configure_args.push(format!("-DPYTHON_INCLUDE_DIR={}", include_dir.display()));
        }
        if let Some(library) = python_library {
            configure_args.push(format!("-DPYTHON_LIBRARY={}", library.display()));
        }

        configure_args.push(format!(
            "-DCMAKE_BUILD_TYPE={}",
            input.profile.cmake_build_type()
        ));

        if let Some(macos) = &input.macos {
            configure_args.push("-DCMAKE_CROSSCOMPILING=ON".to_string());
            configure_args.push(format!("-DCMAKE_OSX_ARCHITECTURES={}", macos.archs));
            configure_args.push(format!(
                "-DCMAKE_OSX_DEPLOYMENT_TARGET={}",
                macos.deployment_target
            ));
        }

        let build_args = if input.parallel_env_set {
            // CMAKE_BUILD_PARALLEL_LEVEL governs; pass nothing through.
            Vec::new()
        } else {
            vec![format!("-j{}", input.jobs)]
        };

        BuildPlan {
            source_dir: input.source_dir.clone(),
            build_dir: input.build_dir.clone(),
            configure_args,
            build_args,
        }
    }
}

/// Render a path with a guaranteed trailing separator
fn with_trailing_separator(path: &Path) -> String {
    let mut rendered = path.display().to_string();
    if !rendered.ends_with(std::path::MAIN_SEPARATOR) {
        rendered.push(std::path::MAIN_SEPARATOR);
    }
    rendered
}
