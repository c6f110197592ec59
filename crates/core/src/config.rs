use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loyalty::{ASSESSMENT_POINTS, DEFAULT_POINTS_PER_DOLLAR};
use crate::recommendations::DEFAULT_RECOMMENDATION_LIMIT;

pub const DEFAULT_CONFIG_FILE: &str = "neuroboutique.toml";
pub const DEFAULT_CONFIG_FALLBACK: &str = "config/neuroboutique.toml";
pub const DEMO_USER_ID: &str = "demo-user";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storefront: StorefrontConfig,
    pub loyalty: LoyaltyConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    pub recommendation_limit: usize,
    pub demo_user_id: String,
    pub seed_demo_data: bool,
}

#[derive(Clone, Debug)]
pub struct LoyaltyConfig {
    pub points_per_dollar: u32,
    pub assessment_points: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub recommendation_limit: Option<usize>,
    pub seed_demo_data: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 5000,
                graceful_shutdown_secs: 15,
            },
            storefront: StorefrontConfig {
                recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
                demo_user_id: DEMO_USER_ID.to_string(),
                seed_demo_data: true,
            },
            loyalty: LoyaltyConfig {
                points_per_dollar: DEFAULT_POINTS_PER_DOLLAR,
                assessment_points: ASSESSMENT_POINTS,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// `bind_address:port`, as handed to the TCP listener.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(storefront) = patch.storefront {
            if let Some(recommendation_limit) = storefront.recommendation_limit {
                self.storefront.recommendation_limit = recommendation_limit;
            }
            if let Some(demo_user_id) = storefront.demo_user_id {
                self.storefront.demo_user_id = demo_user_id;
            }
            if let Some(seed_demo_data) = storefront.seed_demo_data {
                self.storefront.seed_demo_data = seed_demo_data;
            }
        }

        if let Some(loyalty) = patch.loyalty {
            if let Some(points_per_dollar) = loyalty.points_per_dollar {
                self.loyalty.points_per_dollar = points_per_dollar;
            }
            if let Some(assessment_points) = loyalty.assessment_points {
                self.loyalty.assessment_points = assessment_points;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("NEUROBOUTIQUE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("NEUROBOUTIQUE_SERVER_PORT") {
            self.server.port = parse_env("NEUROBOUTIQUE_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("NEUROBOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_env("NEUROBOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("NEUROBOUTIQUE_STOREFRONT_RECOMMENDATION_LIMIT") {
            self.storefront.recommendation_limit =
                parse_env("NEUROBOUTIQUE_STOREFRONT_RECOMMENDATION_LIMIT", &value)?;
        }
        if let Some(value) = read_env("NEUROBOUTIQUE_STOREFRONT_DEMO_USER_ID") {
            self.storefront.demo_user_id = value;
        }
        if let Some(value) = read_env("NEUROBOUTIQUE_STOREFRONT_SEED_DEMO_DATA") {
            self.storefront.seed_demo_data =
                parse_env("NEUROBOUTIQUE_STOREFRONT_SEED_DEMO_DATA", &value)?;
        }

        if let Some(value) = read_env("NEUROBOUTIQUE_LOYALTY_POINTS_PER_DOLLAR") {
            self.loyalty.points_per_dollar =
                parse_env("NEUROBOUTIQUE_LOYALTY_POINTS_PER_DOLLAR", &value)?;
        }
        if let Some(value) = read_env("NEUROBOUTIQUE_LOYALTY_ASSESSMENT_POINTS") {
            self.loyalty.assessment_points =
                parse_env("NEUROBOUTIQUE_LOYALTY_ASSESSMENT_POINTS", &value)?;
        }

        let log_level = read_env("NEUROBOUTIQUE_LOGGING_LEVEL")
            .or_else(|| read_env("NEUROBOUTIQUE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("NEUROBOUTIQUE_LOGGING_FORMAT")
            .or_else(|| read_env("NEUROBOUTIQUE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind_address) = overrides.bind_address {
            self.server.bind_address = bind_address;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(recommendation_limit) = overrides.recommendation_limit {
            self.storefront.recommendation_limit = recommendation_limit;
        }
        if let Some(seed_demo_data) = overrides.seed_demo_data {
            self.storefront.seed_demo_data = seed_demo_data;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_storefront(&self.storefront)?;
        validate_loyalty(&self.loyalty)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// The config file `load` would read for `explicit_path`, if one exists.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(DEFAULT_CONFIG_FALLBACK)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_storefront(storefront: &StorefrontConfig) -> Result<(), ConfigError> {
    if storefront.recommendation_limit == 0 {
        return Err(ConfigError::Validation(
            "storefront.recommendation_limit must be at least 1".to_string(),
        ));
    }

    if storefront.demo_user_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "storefront.demo_user_id must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_loyalty(loyalty: &LoyaltyConfig) -> Result<(), ConfigError> {
    if loyalty.points_per_dollar == 0 {
        return Err(ConfigError::Validation(
            "loyalty.points_per_dollar must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    storefront: Option<StorefrontPatch>,
    loyalty: Option<LoyaltyPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct StorefrontPatch {
    recommendation_limit: Option<usize>,
    demo_user_id: Option<String>,
    seed_demo_data: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoyaltyPatch {
    points_per_dollar: Option<u32>,
    assessment_points: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
