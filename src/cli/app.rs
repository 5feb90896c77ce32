//! Main app runners for the build, locate, and inspect commands

use std::env;
use std::path::Path;
use std::process::ExitCode;

use crate::application::ports::{ConfigStore, InterpreterProbe};
use crate::application::{BuildCallbacks, BuildExtensionUseCase, BuildInput, MacosSettings};
use crate::domain::config::ForgeConfig;
use crate::domain::locate::locate;
use crate::domain::python::SysconfigSnapshot;
use crate::infrastructure::{CPythonProbe, CmakeRunner, XdgConfigStore};

use super::args::{BuildOptions, ProbeOptions};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Run the full inspect -> locate -> configure -> build pipeline
pub async fn run_build(options: BuildOptions) -> ExitCode {
    let presenter = Presenter::new();
    let shutdown = ShutdownSignal::new();

    let probe = CPythonProbe::new(&options.python);
    let runner = CmakeRunner::new();
    let use_case = BuildExtensionUseCase::new(probe, runner);

    let input = BuildInput {
        source_dir: options.source_dir.clone().into(),
        build_dir: options.build_dir.clone().into(),
        out_dir: options.out_dir.clone().into(),
        package: package_name(&options),
        profile: options.profile,
        jobs: options.jobs,
        // Ambient read happens once, here; the use case stays pure.
        parallel_env_set: env::var_os("CMAKE_BUILD_PARALLEL_LEVEL").is_some(),
        macos: macos_settings(&options),
    };

    // Status goes to stderr so stdout stays clean for scripting
    let callbacks = BuildCallbacks {
        on_inspect_start: Some(Box::new(|| {
            eprintln!("{} Inspecting interpreter...", "⠋");
        })),
        on_inspect_end: Some(Box::new(|version: &str| {
            eprintln!("{} Python {}", "✓", version);
        })),
        on_library_resolved: Some(Box::new(|path: &str| {
            eprintln!("{} Linking against {}", "✓", path);
        })),
        on_library_unresolved: Some(Box::new(|| {
            eprintln!(
                "{} No Python runtime library found; the link step may fail",
                "⚠"
            );
        })),
        on_configure_start: Some(Box::new(|| {
            eprintln!("{} Configuring...", "⠋");
        })),
        on_configure_end: Some(Box::new(|| {
            eprintln!("{} Configured", "✓");
        })),
        on_build_start: Some(Box::new(|| {
            eprintln!("{} Building...", "⠋");
        })),
        on_build_end: Some(Box::new(|| {
            eprintln!("{} Built", "✓");
        })),
    };

    // Children are spawned kill-on-drop, so dropping the build future on
    // Ctrl-C tears the subprocess down with it.
    tokio::select! {
        result = use_case.execute(input, callbacks) => match result {
            Ok(output) => {
                if let Some(library) = &output.python_library {
                    presenter.info(&format!("Python library: {}", library.display()));
                }
                presenter.success(&format!(
                    "Extension written to {}",
                    output.extension_dir.display()
                ));
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        _ = shutdown.wait() => {
            presenter.error("Build cancelled");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the locate command: print the library the build would link against
pub async fn run_locate(options: ProbeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let snapshot = match inspect_with_spinner(&mut presenter, &options).await {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };

    let version = snapshot.python_version();
    match locate(&snapshot, version.as_ref()) {
        Some(path) => presenter.output(&path.display().to_string()),
        // A miss is a hint-level outcome, not a failure.
        None => presenter.warn("No Python runtime library found"),
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Run the inspect command: print the build-configuration snapshot
pub async fn run_inspect(options: ProbeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let snapshot = match inspect_with_spinner(&mut presenter, &options).await {
        Ok(snapshot) => snapshot,
        Err(code) => return code,
    };

    for (key, value) in snapshot.key_values() {
        presenter.key_value(key, &value);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Probe the interpreter behind a spinner
async fn inspect_with_spinner(
    presenter: &mut Presenter,
    options: &ProbeOptions,
) -> Result<SysconfigSnapshot, ExitCode> {
    let probe = CPythonProbe::new(&options.python);

    presenter.start_spinner(&format!("Inspecting {}...", options.python));
    match probe.inspect().await {
        Ok(snapshot) => {
            presenter.spinner_success(&format!(
                "Python {}",
                snapshot.version.as_deref().unwrap_or("unknown")
            ));
            Ok(snapshot)
        }
        Err(e) => {
            presenter.spinner_fail("Inspection failed");
            presenter.error(&e.to_string());
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Package name: configured, or the source directory's name
fn package_name(options: &BuildOptions) -> String {
    if let Some(package) = &options.package {
        return package.clone();
    }

    Path::new(&options.source_dir)
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "extension".to_string())
}

/// macOS settings apply only when building on macOS
fn macos_settings(options: &BuildOptions) -> Option<MacosSettings> {
    if cfg!(target_os = "macos") {
        Some(MacosSettings {
            archs: options.macos_archs.clone(),
            deployment_target: options.macos_deployment_target.clone(),
        })
    } else {
        None
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: ForgeConfig) -> ForgeConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| ForgeConfig::empty());

    // Build env config
    let env_config = ForgeConfig {
        python: env::var("PYFORGE_PYTHON").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    ForgeConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
