use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;
use crate::services::SessionPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_min_score() -> u8 { 40 }
fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_subject_weight")]
    pub subject: f64,
    #[serde(default = "default_topic_weight")]
    pub topic: f64,
    #[serde(default = "default_schedule_weight")]
    pub schedule: f64,
    #[serde(default = "default_learning_style_weight")]
    pub learning_style: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            subject: default_subject_weight(),
            topic: default_topic_weight(),
            schedule: default_schedule_weight(),
            learning_style: default_learning_style_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            subject: config.subject,
            topic: config.topic,
            schedule: config.schedule,
            learning_style: config.learning_style,
        }
    }
}

fn default_subject_weight() -> f64 { 30.0 }
fn default_topic_weight() -> f64 { 30.0 }
fn default_schedule_weight() -> f64 { 25.0 }
fn default_learning_style_weight() -> f64 { 15.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,
    #[serde(default = "default_remember_me_factor")]
    pub remember_me_factor: i32,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: i64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
            remember_me_factor: default_remember_me_factor(),
            refresh_interval_secs: default_refresh_interval_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl From<&SessionSettings> for SessionPolicy {
    fn from(config: &SessionSettings) -> Self {
        Self {
            expiry: chrono::Duration::minutes(config.expiry_minutes),
            remember_me_factor: config.remember_me_factor,
            refresh_interval: chrono::Duration::seconds(config.refresh_interval_secs),
        }
    }
}

/// Longest session lifetime accepted, remember-me included (one year)
pub const MAX_SESSION_MINUTES: i64 = 365 * 24 * 60;

fn default_expiry_minutes() -> i64 { 30 }
fn default_remember_me_factor() -> i32 { 24 }
fn default_refresh_interval_secs() -> i64 { 300 }
fn default_sweep_interval_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STUDY_MATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STUDY_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STUDY_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STUDY_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        let all = [weights.subject, weights.topic, weights.schedule, weights.learning_style];

        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Message("scoring weights must be non-negative".to_string()));
        }
        if all.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::Message("scoring weights must not all be zero".to_string()));
        }
        if self.matching.min_score > 100 {
            return Err(ConfigError::Message("matching.min_score must be within 0-100".to_string()));
        }
        let session = &self.session;
        if session.expiry_minutes <= 0 || session.remember_me_factor <= 0 {
            return Err(ConfigError::Message("session expiry must be positive".to_string()));
        }
        let remembered = session.expiry_minutes.saturating_mul(i64::from(session.remember_me_factor));
        if remembered > MAX_SESSION_MINUTES {
            return Err(ConfigError::Message(format!(
                "session.expiry_minutes x session.remember_me_factor must not exceed {} minutes",
                MAX_SESSION_MINUTES
            )));
        }
        if session.refresh_interval_secs < 0 || session.refresh_interval_secs > session.expiry_minutes * 60 {
            return Err(ConfigError::Message(
                "session.refresh_interval_secs must be within 0 and the session expiry".to_string(),
            ));
        }

        Ok(())
    }
}

/// Honour the bare HOST and PORT variables most hosting platforms set
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(host) = env::var("HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}
