//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.iotctl/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Mode;
use crate::core::handler::{DEFAULT_ECHO_BASE_URL, DEFAULT_SIM_DELAY};
use crate::transport::http::DEFAULT_TIMEOUT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub echo: EchoConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub mode: Option<Mode>,
    pub sim_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub device_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EchoConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://YOUR_PI_IP:5000";
pub const DEFAULT_DEVICE_URL: &str = "http://YOUR_PI_IP:PORT/api/lamp/on";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub mode: Mode,
    pub base_url: String,
    pub device_url: String,
    pub echo_base_url: String,
    pub sim_delay: Duration,
    pub timeout: Duration,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub mode: Option<Mode>,
    pub base_url: Option<&'a str>,
    pub device_url: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "config I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.iotctl/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".iotctl").join("config.toml"))
}

/// Load config from `~/.iotctl/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `IotConfig::default()`. If it exists but is malformed,
/// returns `SettingsError::Parse`.
pub fn load_config() -> Result<IotConfig, SettingsError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(IotConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<IotConfig, SettingsError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(IotConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(SettingsError::Io)?;
    let config: IotConfig = toml::from_str(&contents).map_err(SettingsError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# iotctl Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# mode = "simulated"                 # "simulated", "dummy-remote" or "real-backend"
# sim_delay_ms = 500                 # Artificial wait before simulated replies

# [backend]
# base_url = "http://192.168.1.50:5000"                  # Or set IOTCTL_BASE_URL
# device_url = "http://192.168.1.50:8000/api/lamp/on"    # Or set IOTCTL_DEVICE_URL
# timeout_secs = 10

# [echo]
# base_url = "https://postman-echo.com"                  # Or set IOTCTL_ECHO_URL
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &IotConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &IotConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Mode: CLI → env → config → default
    let mode = cli
        .mode
        .or_else(|| env("IOTCTL_MODE").and_then(|s| parse_mode(&s)))
        .or(config.general.mode)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or_else(|| env("IOTCTL_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let device_url = cli
        .device_url
        .map(str::to_string)
        .or_else(|| env("IOTCTL_DEVICE_URL"))
        .or_else(|| config.backend.device_url.clone())
        .unwrap_or_else(|| DEFAULT_DEVICE_URL.to_string());

    // Echo base URL: env → config → default
    let echo_base_url = env("IOTCTL_ECHO_URL")
        .or_else(|| config.echo.base_url.clone())
        .unwrap_or_else(|| DEFAULT_ECHO_BASE_URL.to_string());

    ResolvedConfig {
        mode,
        base_url,
        device_url,
        echo_base_url,
        sim_delay: config
            .general
            .sim_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SIM_DELAY),
        timeout: config
            .backend
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    }
}

fn parse_mode(s: &str) -> Option<Mode> {
    match Mode::from_str(s, true) {
        Ok(mode) => Some(mode),
        Err(_) => {
            warn!("Ignoring unknown IOTCTL_MODE value '{}'", s);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = IotConfig::default();
        assert!(config.general.mode.is_none());
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&IotConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.mode, Mode::Simulated);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.device_url, DEFAULT_DEVICE_URL);
        assert_eq!(resolved.echo_base_url, "https://postman-echo.com");
        assert_eq!(resolved.sim_delay, Duration::from_millis(500));
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = IotConfig {
            general: GeneralConfig {
                mode: Some(Mode::RealBackend),
                sim_delay_ms: Some(0),
            },
            backend: BackendConfig {
                base_url: Some("http://10.0.0.5:5000".to_string()),
                device_url: None,
                timeout_secs: Some(3),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.mode, Mode::RealBackend);
        assert_eq!(resolved.base_url, "http://10.0.0.5:5000");
        assert_eq!(resolved.sim_delay, Duration::ZERO);
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = IotConfig {
            general: GeneralConfig {
                mode: Some(Mode::Simulated),
                ..Default::default()
            },
            backend: BackendConfig {
                base_url: Some("http://from-file:5000".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("IOTCTL_MODE", "dummy-remote"),
            ("IOTCTL_BASE_URL", "http://from-env:5000"),
            ("IOTCTL_ECHO_URL", "http://127.0.0.1:9999"),
        ]);
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.mode, Mode::DummyRemote);
        assert_eq!(resolved.base_url, "http://from-env:5000");
        assert_eq!(resolved.echo_base_url, "http://127.0.0.1:9999");

        let cli = CliOverrides {
            mode: Some(Mode::RealBackend),
            base_url: Some("http://from-cli:5000"),
            device_url: None,
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.mode, Mode::RealBackend);
        assert_eq!(resolved.base_url, "http://from-cli:5000");
    }

    #[test]
    fn test_unknown_env_mode_falls_through() {
        let config = IotConfig {
            general: GeneralConfig {
                mode: Some(Mode::RealBackend),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |k| {
            (k == "IOTCTL_MODE").then(|| "bogus".to_string())
        });
        assert_eq!(resolved.mode, Mode::RealBackend);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
mode = "real-backend"
sim_delay_ms = 250

[backend]
base_url = "http://192.168.1.50:5000"
device_url = "http://192.168.1.50:8000/api/lamp/on"
timeout_secs = 5

[echo]
base_url = "http://localhost:8080"
"#;
        let config: IotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.mode, Some(Mode::RealBackend));
        assert_eq!(config.general.sim_delay_ms, Some(250));
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.50:5000")
        );
        assert_eq!(config.backend.timeout_secs, Some(5));
        assert_eq!(config.echo.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
mode = "dummy-remote"
"#;
        let config: IotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.mode, Some(Mode::DummyRemote));
        assert!(config.backend.base_url.is_none());
        assert!(config.echo.base_url.is_none());
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let result: Result<IotConfig, _> = toml::from_str("[general]\nmode = \"wireless\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: IotConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.mode.is_none());
    }

    #[test]
    fn test_load_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("iotctl-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.mode.is_none());
        assert!(path.exists());

        fs::write(&path, "[general]\nmode = \"real-backend\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.mode, Some(Mode::RealBackend));

        fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(load_config_from(&path), Err(SettingsError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
