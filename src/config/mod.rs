use anyhow::{Context, Result};
use serde::Deserialize;

/// Complete Beacon configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BeaconConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Bind address configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dispatch queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Maximum pending commands; submissions beyond this are rejected
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

fn default_max_pending() -> usize {
    10_000
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_pending: default_max_pending(),
        }
    }
}

/// Request body size limits
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum command submission body (bytes)
    #[serde(default = "default_max_command_bytes")]
    pub max_command_bytes: usize,
    /// Maximum snapshot publish body (bytes)
    #[serde(default = "default_max_snapshot_bytes")]
    pub max_snapshot_bytes: usize,
}

fn default_max_command_bytes() -> usize {
    65_536 // 64 KB
}

fn default_max_snapshot_bytes() -> usize {
    1_048_576 // 1 MB
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_command_bytes: default_max_command_bytes(),
            max_snapshot_bytes: default_max_snapshot_bytes(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API (the controller frontend).
    /// Empty means any origin, without credentials
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            queue: QueueConfig::default(),
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl BeaconConfig {
    /// Resolve the effective configuration.
    ///
    /// Reads the TOML file named by BEACON_CONFIG when set, defaults
    /// otherwise, then applies per-field env var overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BEACON_CONFIG") {
            Ok(path) => load_config(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply env var overrides, falling back to the current values.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("BEACON_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("BEACON_PORT") {
            if let Ok(n) = v.parse::<u16>() {
                self.server.port = n;
            }
        }
        if let Ok(v) = std::env::var("BEACON_MAX_PENDING") {
            if let Ok(n) = v.parse::<usize>() {
                self.queue.max_pending = n;
            }
        }
        if let Ok(v) = std::env::var("BEACON_MAX_COMMAND_BYTES") {
            if let Ok(n) = v.parse::<usize>() {
                self.limits.max_command_bytes = n;
            }
        }
        if let Ok(v) = std::env::var("BEACON_MAX_SNAPSHOT_BYTES") {
            if let Ok(n) = v.parse::<usize>() {
                self.limits.max_snapshot_bytes = n;
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<BeaconConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: BeaconConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path))?;
    Ok(config)
}
