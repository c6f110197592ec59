pub mod catalog;
pub mod config;
pub mod doctor;
pub mod impact;
pub mod recommend;

use neuroboutique_core::config::{AppConfig, LoadOptions};
use neuroboutique_db::Storefront;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    /// Success payload carrying a JSON rendering of `data` under `data`.
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loads config and a seeded demo store on a throwaway single-threaded runtime, then hands
/// both to `body`. Config failures exit 2, store failures exit 1.
pub(crate) fn with_demo_store<F, Fut>(command: &str, body: F) -> CommandResult
where
    F: FnOnce(AppConfig, Storefront) -> Fut,
    Fut: std::future::Future<Output = CommandResult>,
{
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(command, "config_validation", error.to_string(), 2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                command,
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            );
        }
    };

    runtime.block_on(async {
        match Storefront::demo(&config.storefront.demo_user_id).await {
            Ok(store) => body(config, store).await,
            Err(error) => CommandResult::failure(
                command,
                "store",
                format!("failed to seed demo store: {error}"),
                1,
            ),
        }
    })
}
