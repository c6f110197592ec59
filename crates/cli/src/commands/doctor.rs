use neuroboutique_core::config::{AppConfig, LoadOptions};
use neuroboutique_core::domain::cognitive::CognitiveProfile;
use neuroboutique_core::recommendations::{PersonalizedSelector, RecommendationSelector};
use neuroboutique_db::Storefront;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_demo_store(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["demo_store_readiness", "recommendation_engine"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

/// Seeds a scratch store and ranks the catalog for the baseline profile.
fn check_demo_store(config: &AppConfig) -> [DoctorCheck; 2] {
    let fail = |name, details: String| DoctorCheck { name, status: CheckStatus::Fail, details };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            let details = format!("failed to initialize async runtime: {error}");
            return [
                fail("demo_store_readiness", details.clone()),
                fail("recommendation_engine", details),
            ];
        }
    };

    let catalog = runtime.block_on(async {
        let store = Storefront::demo(&config.storefront.demo_user_id)
            .await
            .map_err(|error| format!("failed to seed demo store: {error}"))?;
        store.products.list().await.map_err(|error| format!("catalog query failed: {error}"))
    });

    let catalog = match catalog {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            return [
                fail("demo_store_readiness", "demo catalog is empty".to_string()),
                skipped_engine_check(),
            ];
        }
        Err(error) => return [fail("demo_store_readiness", error), skipped_engine_check()],
    };

    let store_check = DoctorCheck {
        name: "demo_store_readiness",
        status: CheckStatus::Pass,
        details: format!(
            "{} products seeded for `{}`",
            catalog.len(),
            config.storefront.demo_user_id
        ),
    };

    let limit = config.storefront.recommendation_limit;
    let ranked =
        PersonalizedSelector.recommend(&catalog, Some(&CognitiveProfile::BASELINE), limit);
    let expected = limit.min(catalog.len());
    let engine_check = if ranked.len() == expected {
        DoctorCheck {
            name: "recommendation_engine",
            status: CheckStatus::Pass,
            details: format!(
                "ranked {} of {} products for the baseline profile",
                ranked.len(),
                catalog.len()
            ),
        }
    } else {
        fail(
            "recommendation_engine",
            format!("expected {expected} recommendations, got {}", ranked.len()),
        )
    };

    [store_check, engine_check]
}

fn skipped_engine_check() -> DoctorCheck {
    DoctorCheck {
        name: "recommendation_engine",
        status: CheckStatus::Skipped,
        details: "skipped because the demo catalog is unavailable".to_string(),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
