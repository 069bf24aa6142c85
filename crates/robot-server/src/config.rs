//! Server configuration loading from file and environment variables.

use robot_gpio::PinMap;
use robot_voice::VoiceConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Message bus settings.
    #[serde(default)]
    pub mqtt: MqttConfig,

    /// Pin hardware settings.
    #[serde(default)]
    pub gpio: GpioConfig,

    /// Speech synthesis and recognition settings.
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Broker connection for the control topic.
#[derive(Debug, Clone, Deserialize)]
pub struct MqttConfig {
    /// Whether to connect to the broker at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_mqtt_host")]
    pub host: String,

    #[serde(default = "default_mqtt_port")]
    pub port: u16,

    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Topic carrying control payloads.
    #[serde(default = "default_topic")]
    pub topic: String,

    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Pause before polling the event loop again after a connection error.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

/// Pin hardware configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GpioConfig {
    /// Try to open the GPIO peripheral. Falls back to simulation when unavailable.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// BCM pin per component.
    #[serde(default)]
    pub pins: PinMap,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "robot_core=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_mqtt_host() -> String {
    "localhost".to_string()
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    "robot-server".to_string()
}

fn default_topic() -> String {
    "robot/control".to_string()
}

fn default_keep_alive_secs() -> u64 {
    60
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_mqtt_host(),
            port: default_mqtt_port(),
            client_id: default_client_id(),
            topic: default_topic(),
            keep_alive_secs: default_keep_alive_secs(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pins: PinMap::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `ROBOT_HOST` overrides `server.host`
/// - `ROBOT_PORT` overrides `server.port`
/// - `ROBOT_MQTT_HOST` overrides `mqtt.host`
/// - `ROBOT_MQTT_PORT` overrides `mqtt.port`
/// - `ROBOT_LANGUAGE` overrides `voice.language` ("en" or "es")
/// - `ROBOT_GPIO_ENABLED` overrides `gpio.enabled`
/// - `ROBOT_LOG_LEVEL` overrides `logging.level`
/// - `ROBOT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = read_config_file(path)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::FileRead(e)),
        },
        None => Ok(Config::default()),
    }
}

/// Applies `ROBOT_*` overrides looked up through `var`. Unparseable values
/// are ignored with a warning.
pub fn apply_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("ROBOT_HOST") {
        match host.parse() {
            Ok(parsed) => config.server.host = parsed,
            Err(_) => tracing::warn!(value = %host, "ignoring invalid ROBOT_HOST"),
        }
    }
    if let Some(port) = var("ROBOT_PORT") {
        match port.parse() {
            Ok(parsed) => config.server.port = parsed,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid ROBOT_PORT"),
        }
    }
    if let Some(host) = var("ROBOT_MQTT_HOST") {
        config.mqtt.host = host;
    }
    if let Some(port) = var("ROBOT_MQTT_PORT") {
        match port.parse() {
            Ok(parsed) => config.mqtt.port = parsed,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid ROBOT_MQTT_PORT"),
        }
    }
    if let Some(language) = var("ROBOT_LANGUAGE") {
        match language.parse() {
            Ok(parsed) => config.voice.language = parsed,
            Err(e) => tracing::warn!("ignoring ROBOT_LANGUAGE: {}", e),
        }
    }
    if let Some(enabled) = var("ROBOT_GPIO_ENABLED") {
        config.gpio.enabled = enabled == "true" || enabled == "1";
    }
    if let Some(level) = var("ROBOT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("ROBOT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
