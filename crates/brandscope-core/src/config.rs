use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::brands::{load_aliases, BrandResolver};
use crate::snapshot::DEFAULT_MAX_SNAPSHOTS;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build the brand resolver described by `config`: built-in aliases, plus
/// the alias file when one is configured.
///
/// # Errors
///
/// Returns `ConfigError` if the alias file cannot be read or fails validation.
pub fn build_brand_resolver(config: &AppConfig) -> Result<BrandResolver, ConfigError> {
    let mut resolver = BrandResolver::new();
    if let Some(path) = &config.brand_aliases_path {
        let file = load_aliases(path)?;
        tracing::debug!(path = %path.display(), count = file.aliases.len(), "loaded brand aliases");
        resolver.extend(file);
    }
    Ok(resolver)
}

/// Parse and validate configuration through an injected lookup so tests can
/// drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let env = parse_environment(&or_default("BRANDSCOPE_ENV", "development"))?;
    let log_level = or_default("BRANDSCOPE_LOG_LEVEL", "info");
    let brand_aliases_path = lookup("BRANDSCOPE_BRAND_ALIASES_PATH")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from);

    let max_snapshots = parse_usize("BRANDSCOPE_MAX_SNAPSHOTS", DEFAULT_MAX_SNAPSHOTS)?;
    if max_snapshots == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDSCOPE_MAX_SNAPSHOTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        brand_aliases_path,
        max_snapshots,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BRANDSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
