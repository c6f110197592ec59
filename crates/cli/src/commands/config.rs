use std::env;
use std::fs;
use std::path::Path;

use neuroboutique_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

struct Field {
    key: &'static str,
    value: String,
    env_keys: &'static [&'static str],
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<Field> {
    vec![
        Field {
            key: "server.bind_address",
            value: config.server.bind_address.clone(),
            env_keys: &["NEUROBOUTIQUE_SERVER_BIND_ADDRESS"],
        },
        Field {
            key: "server.port",
            value: config.server.port.to_string(),
            env_keys: &["NEUROBOUTIQUE_SERVER_PORT"],
        },
        Field {
            key: "server.graceful_shutdown_secs",
            value: config.server.graceful_shutdown_secs.to_string(),
            env_keys: &["NEUROBOUTIQUE_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        },
        Field {
            key: "storefront.recommendation_limit",
            value: config.storefront.recommendation_limit.to_string(),
            env_keys: &["NEUROBOUTIQUE_STOREFRONT_RECOMMENDATION_LIMIT"],
        },
        Field {
            key: "storefront.demo_user_id",
            value: config.storefront.demo_user_id.clone(),
            env_keys: &["NEUROBOUTIQUE_STOREFRONT_DEMO_USER_ID"],
        },
        Field {
            key: "storefront.seed_demo_data",
            value: config.storefront.seed_demo_data.to_string(),
            env_keys: &["NEUROBOUTIQUE_STOREFRONT_SEED_DEMO_DATA"],
        },
        Field {
            key: "loyalty.points_per_dollar",
            value: config.loyalty.points_per_dollar.to_string(),
            env_keys: &["NEUROBOUTIQUE_LOYALTY_POINTS_PER_DOLLAR"],
        },
        Field {
            key: "loyalty.assessment_points",
            value: config.loyalty.assessment_points.to_string(),
            env_keys: &["NEUROBOUTIQUE_LOYALTY_ASSESSMENT_POINTS"],
        },
        Field {
            key: "logging.level",
            value: config.logging.level.clone(),
            env_keys: &["NEUROBOUTIQUE_LOGGING_LEVEL", "NEUROBOUTIQUE_LOG_LEVEL"],
        },
        Field {
            key: "logging.format",
            value: config.logging.format.as_str().to_string(),
            env_keys: &["NEUROBOUTIQUE_LOGGING_FORMAT", "NEUROBOUTIQUE_LOG_FORMAT"],
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
