use serde::{Deserialize, Serialize};

/// Fixed identifier for the singleton profile record.
pub const PROFILE_ID: &str = "user-profile";

/// One scored keyword in the semantic fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedKeyword {
    pub keyword: String,
    /// Original AI score. Nominally 0-100; the source does not enforce it.
    pub base_score: f64,
    /// Manual calibration. Only explicit user actions change this.
    #[serde(default)]
    pub user_adjustment: i64,
    /// The 1.5x domain multiplier was applied by the model.
    #[serde(default)]
    pub multiplier_applied: bool,
    /// The score was boosted from visual (figure/chart) evidence.
    #[serde(default)]
    pub visual_boost_applied: bool,
}

/// The semantic fingerprint derived from the uploaded documents. At most one
/// profile exists at a time; replacement is assignment, not accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticProfile {
    pub id: String,
    pub file_names: Vec<String>,
    pub ranked_keywords: Vec<RankedKeyword>,
    pub summary: String,
    /// Epoch millis at analysis time.
    pub timestamp: i64,
}
