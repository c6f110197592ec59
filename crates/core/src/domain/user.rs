use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::cognitive::CognitiveProfile;
use crate::loyalty::LoyaltyTier;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shopper. The password is kept for parity with the registration form but is
/// never serialized and never compared: the storefront performs no authentication.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: SecretString,
    pub cognitive_profile: Option<CognitiveProfile>,
    pub neural_points: u64,
    pub tier_level: LoyaltyTier,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl User {
    pub fn register(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            cognitive_profile: Some(CognitiveProfile::BASELINE),
            neural_points: 0,
            tier_level: LoyaltyTier::Bronze,
            created_at: Utc::now(),
        }
    }

    /// Credits points and moves the user to whatever tier the new balance earns.
    pub fn credit_points(&mut self, points: u64) {
        self.neural_points = self.neural_points.saturating_add(points);
        self.tier_level = crate::loyalty::tier_for_points(self.neural_points);
    }
}
