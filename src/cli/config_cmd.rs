//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{BuildProfile, MacosConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "python" => config.python = Some(value.to_string()),
        "profile" => config.profile = Some(value.to_string()),
        "jobs" => {
            config.jobs = Some(parse_jobs(value).map_err(|message| {
                ConfigError::ValidationError {
                    key: key.to_string(),
                    message,
                }
            })?)
        }
        "source_dir" => config.source_dir = Some(value.to_string()),
        "build_dir" => config.build_dir = Some(value.to_string()),
        "out_dir" => config.out_dir = Some(value.to_string()),
        "package" => config.package = Some(value.to_string()),
        "macos.archs" => {
            // Initialize macos config if None
            if config.macos.is_none() {
                config.macos = Some(MacosConfig::default());
            }
            if let Some(ref mut macos) = config.macos {
                macos.archs = Some(value.to_string());
            }
        }
        "macos.deployment_target" => {
            if config.macos.is_none() {
                config.macos = Some(MacosConfig::default());
            }
            if let Some(ref mut macos) = config.macos {
                macos.deployment_target = Some(value.to_string());
            }
        }
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "python" => config.python,
        "profile" => config.profile,
        "jobs" => config.jobs.map(|j| j.to_string()),
        "source_dir" => config.source_dir,
        "build_dir" => config.build_dir,
        "out_dir" => config.out_dir,
        "package" => config.package,
        "macos.archs" => config.macos.as_ref().and_then(|m| m.archs.clone()),
        "macos.deployment_target" => config
            .macos
            .as_ref()
            .and_then(|m| m.deployment_target.clone()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value("python", config.python.as_deref().unwrap_or("(not set)"));
    presenter.key_value("profile", config.profile.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "jobs",
        &config
            .jobs
            .map(|j| j.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "source_dir",
        config.source_dir.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "build_dir",
        config.build_dir.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value("out_dir", config.out_dir.as_deref().unwrap_or("(not set)"));
    presenter.key_value("package", config.package.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "macos.archs",
        config
            .macos
            .as_ref()
            .and_then(|m| m.archs.as_deref())
            .unwrap_or("(not set)"),
    );
    presenter.key_value(
        "macos.deployment_target",
        config
            .macos
            .as_ref()
            .and_then(|m| m.deployment_target.as_deref())
            .unwrap_or("(not set)"),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "profile" => {
            value
                .parse::<BuildProfile>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "jobs" => {
            parse_jobs(value).map_err(|message| ConfigError::ValidationError {
                key: key.to_string(),
                message,
            })?;
        }
        _ => {} // Paths, package name, and macOS settings accept any string
    }
    Ok(())
}

/// Parse a job count value
fn parse_jobs(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) => Err("Value must be a positive integer".to_string()),
        Ok(jobs) => Ok(jobs),
        Err(_) => Err("Value must be a positive integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_jobs_values() {
        assert_eq!(parse_jobs("1"), Ok(1));
        assert_eq!(parse_jobs("16"), Ok(16));
        assert!(parse_jobs("0").is_err());
        assert!(parse_jobs("-2").is_err());
        assert!(parse_jobs("lots").is_err());
    }

    #[test]
    fn validate_profile_valid() {
        assert!(validate_config_value("profile", "debug").is_ok());
        assert!(validate_config_value("profile", "release").is_ok());
    }

    #[test]
    fn validate_profile_invalid() {
        assert!(validate_config_value("profile", "invalid").is_err());
    }

    #[test]
    fn validate_jobs() {
        assert!(validate_config_value("jobs", "4").is_ok());
        assert!(validate_config_value("jobs", "0").is_err());
        assert!(validate_config_value("jobs", "many").is_err());
    }

    #[test]
    fn validate_free_form_keys() {
        assert!(validate_config_value("python", "/opt/python/bin/python3").is_ok());
        assert!(validate_config_value("package", "pasteboard").is_ok());
        assert!(validate_config_value("macos.archs", "arm64").is_ok());
    }
}
