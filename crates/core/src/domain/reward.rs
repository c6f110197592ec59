use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Purchase,
    Challenge,
    Streak,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReward {
    pub id: RewardId,
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub points_earned: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A reward before the store assigns it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReward {
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub points_earned: u64,
    pub description: String,
}
