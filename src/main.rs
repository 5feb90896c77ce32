//! Pyforge CLI entry point

use std::process::ExitCode;

use clap::Parser;

use pyforge::cli::{
    app::{load_merged_config, run_build, run_inspect, run_locate, EXIT_ERROR},
    args::{BuildOptions, Cli, Commands, ProbeOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use pyforge::domain::config::{BuildProfile, ForgeConfig};
use pyforge::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from args
    let cli_config = ForgeConfig {
        python: cli.python.clone(),
        profile: cli.profile.map(|p| BuildProfile::from(p).to_string()),
        jobs: cli.jobs,
        source_dir: cli.source_dir.clone(),
        build_dir: cli.build_dir.clone(),
        out_dir: cli.out_dir.clone(),
        package: cli.package.clone(),
        macos: None, // macOS settings come from the config file only
    };

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Locate) => {
            let config = load_merged_config(cli_config).await;
            run_locate(ProbeOptions {
                python: config.python_or_default().to_string(),
            })
            .await
        }
        Some(Commands::Inspect) => {
            let config = load_merged_config(cli_config).await;
            run_inspect(ProbeOptions {
                python: config.python_or_default().to_string(),
            })
            .await
        }
        None => {
            let config = load_merged_config(cli_config).await;

            let options = BuildOptions {
                python: config.python_or_default().to_string(),
                profile: config.profile_or_default(),
                jobs: config.jobs_or_default(),
                source_dir: config.source_dir_or_default().to_string(),
                build_dir: config.build_dir_or_default().to_string(),
                out_dir: config.out_dir_or_default().to_string(),
                package: config.package.clone(),
                macos_archs: config.macos_archs_or_default().to_string(),
                macos_deployment_target: config.macos_deployment_target_or_default().to_string(),
            };

            run_build(options).await
        }
    }
}
