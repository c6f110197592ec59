use neuroboutique_core::domain::cognitive::CognitiveProfile;
use neuroboutique_core::recommendations::{explain, Recommendation};
use serde::Serialize;

use super::{with_demo_store, CommandResult};

/// Dimension flags as given on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileArgs {
    pub memory: Option<f64>,
    pub focus: Option<f64>,
    pub sleep: Option<f64>,
    pub energy: Option<f64>,
    pub mood: Option<f64>,
}

impl ProfileArgs {
    /// `None` when no dimension was given; otherwise the baseline with the given overrides.
    pub fn profile(&self) -> Option<CognitiveProfile> {
        let given = [self.memory, self.focus, self.sleep, self.energy, self.mood];
        if given.iter().all(Option::is_none) {
            return None;
        }

        let baseline = CognitiveProfile::BASELINE;
        Some(CognitiveProfile {
            memory: self.memory.unwrap_or(baseline.memory),
            focus: self.focus.unwrap_or(baseline.focus),
            sleep: self.sleep.unwrap_or(baseline.sleep),
            energy: self.energy.unwrap_or(baseline.energy),
            mood: self.mood.unwrap_or(baseline.mood),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendReport {
    profile: Option<CognitiveProfile>,
    recommendations: Vec<Recommendation>,
}

pub fn run(args: ProfileArgs, limit: Option<usize>) -> CommandResult {
    if limit == Some(0) {
        return CommandResult::failure(
            "recommend",
            "invalid_argument",
            "--limit must be at least 1",
            2,
        );
    }

    with_demo_store("recommend", move |config, store| async move {
        let catalog = match store.products.list().await {
            Ok(catalog) => catalog,
            Err(error) => {
                return CommandResult::failure("recommend", "store", error.to_string(), 1);
            }
        };

        let profile = args.profile();
        let limit = limit.unwrap_or(config.storefront.recommendation_limit);
        let recommendations = explain(&catalog, profile.as_ref(), limit);
        let message = match profile {
            Some(_) => format!("{} personalized recommendations", recommendations.len()),
            None => format!("{} catalog picks (no profile given)", recommendations.len()),
        };

        CommandResult::success_with_data(
            "recommend",
            message,
            RecommendReport { profile, recommendations },
        )
    })
}
