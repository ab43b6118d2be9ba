//! Configuration loader
//!
//! Resolves the [`ClientConfig`] the client is constructed from.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Finally falls back to the production environment-table entry
//!
//! ## Environment Variables
//! - `CAMPUSHUB_ENV`: environment key (`development` / `production`)
//! - `CAMPUSHUB_API_BASE_URL`: override the table's base URL
//! - `CAMPUSHUB_TIMEOUT_SECS`: request timeout in seconds
//! - `CAMPUSHUB_APP_VERSION`: app version reported in device headers
//! - `CAMPUSHUB_USE_MOCK_DATA`: override the mock-data flag (true/false)
//! - `CAMPUSHUB_ALLOW_DEMO_LOGIN`: override the demo-login flag
//!
//! ## File Locations
//! The loader probes `config.json` / `config.toml` /
//! `campushub.json` / `campushub.toml` in the working directory, up to
//! two parent directories, and next to the executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use campushub_domain::{CampusHubError, ClientConfig, Environment, Result};

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `CampusHubError::Config` if a located source exists but is
/// malformed; a missing source is not an error (the next strategy is
/// tried, ending at the production defaults).
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration found, using production defaults");
                    Ok(ClientConfig::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables.
///
/// `CAMPUSHUB_ENV` selects the environment-table entry; the remaining
/// variables override individual fields.
///
/// # Errors
/// Returns `CampusHubError::Config` if `CAMPUSHUB_ENV` is missing or
/// any variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let env: Environment = env_var("CAMPUSHUB_ENV")?.parse()?;

    let app_version = std::env::var("CAMPUSHUB_APP_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    let mut config = ClientConfig::for_environment(env, app_version);

    if let Ok(base_url) = std::env::var("CAMPUSHUB_API_BASE_URL") {
        config.api_base_url = base_url;
    }

    if let Ok(secs) = std::env::var("CAMPUSHUB_TIMEOUT_SECS") {
        let secs = secs
            .parse::<u64>()
            .map_err(|e| CampusHubError::Config(format!("Invalid timeout: {}", e)))?;
        config.timeout = Duration::from_secs(secs);
    }

    if let Some(flag) = env_bool("CAMPUSHUB_USE_MOCK_DATA") {
        config.use_mock_data = flag;
    }
    if let Some(flag) = env_bool("CAMPUSHUB_ALLOW_DEMO_LOGIN") {
        config.allow_demo_login = flag;
    }

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Supports JSON
/// and TOML, detected by file extension.
///
/// # Errors
/// Returns `CampusHubError::Config` if the file is missing (when a
/// path is given), no file is found (when probing), or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CampusHubError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CampusHubError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CampusHubError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format detected by
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CampusHubError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CampusHubError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CampusHubError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let names = ["config.json", "config.toml", "campushub.json", "campushub.toml"];
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for prefix in ["", "../", "../../"] {
            for name in names {
                candidates.push(cwd.join(format!("{}{}", prefix, name)));
            }
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            for name in names {
                candidates.push(exe_dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CampusHubError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable.
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive). Returns `None` when the variable is unset.
fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_campushub_env() {
        for key in [
            "CAMPUSHUB_ENV",
            "CAMPUSHUB_API_BASE_URL",
            "CAMPUSHUB_TIMEOUT_SECS",
            "CAMPUSHUB_APP_VERSION",
            "CAMPUSHUB_USE_MOCK_DATA",
            "CAMPUSHUB_ALLOW_DEMO_LOGIN",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn load_from_env_selects_table_entry() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_campushub_env();

        std::env::set_var("CAMPUSHUB_ENV", "development");
        std::env::set_var("CAMPUSHUB_APP_VERSION", "9.9.9");

        let config = load_from_env().expect("config from env");
        assert!(config.api_base_url.contains("dev-api"));
        assert_eq!(config.app_version, "9.9.9");
        assert!(config.allow_demo_login);

        clear_campushub_env();
    }

    #[test]
    fn load_from_env_applies_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_campushub_env();

        std::env::set_var("CAMPUSHUB_ENV", "production");
        std::env::set_var("CAMPUSHUB_API_BASE_URL", "https://staging.campushub.app/api/v1");
        std::env::set_var("CAMPUSHUB_TIMEOUT_SECS", "25");
        std::env::set_var("CAMPUSHUB_ALLOW_DEMO_LOGIN", "yes");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.api_base_url, "https://staging.campushub.app/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert!(config.allow_demo_login);

        clear_campushub_env();
    }

    #[test]
    fn load_from_env_missing_env_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_campushub_env();

        let result = load_from_env();
        assert!(matches!(result, Err(CampusHubError::Config(_))));
    }

    #[test]
    fn load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_campushub_env();

        std::env::set_var("CAMPUSHUB_ENV", "production");
        std::env::set_var("CAMPUSHUB_TIMEOUT_SECS", "not-a-number");

        let result = load_from_env();
        assert!(matches!(result, Err(CampusHubError::Config(_))));

        clear_campushub_env();
    }

    #[test]
    fn load_from_file_json() {
        let json_content = r#"{
            "api_base_url": "https://api.example.edu/v1",
            "timeout": 15,
            "app_version": "2.0.0",
            "use_mock_data": false,
            "allow_demo_login": false
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from json");
        assert_eq!(config.api_base_url, "https://api.example.edu/v1");
        assert_eq!(config.timeout, Duration::from_secs(15));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_toml() {
        let toml_content = r#"
api_base_url = "https://api.example.edu/v1"
timeout = 20
app_version = "2.1.0"
use_mock_data = true
allow_demo_login = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from toml");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert!(config.use_mock_data);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(CampusHubError::Config(_))));
    }

    #[test]
    fn parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("config.yaml"));
        assert!(matches!(result, Err(CampusHubError::Config(_))));
    }
}
