use serde::{Deserialize, Serialize};

/// Lead lifecycle. `NewLead` is the initial state; outreach generation moves a
/// lead to `Contacted` automatically; every other change is manual, and any
/// state may be archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "New Lead")]
    NewLead,
    Contacted,
    #[serde(rename = "Meeting Scheduled")]
    MeetingScheduled,
    #[serde(rename = "Solution Discussed")]
    SolutionDiscussed,
    Archived,
}

impl LeadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::NewLead => "New Lead",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::MeetingScheduled => "Meeting Scheduled",
            LeadStatus::SolutionDiscussed => "Solution Discussed",
            LeadStatus::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    /// Round label, e.g. "Series A". "Unknown" when the model omitted it.
    pub round: String,
    /// Amount string as reported, e.g. "$50M".
    #[serde(default)]
    pub amount: Option<String>,
    /// Numeric amount for filtering, derived from `amount`. 0 when absent.
    #[serde(default)]
    pub amount_value: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub lead_investor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfContact {
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Direct LinkedIn profile URL, when the model found one.
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualLink {
    pub title: String,
    pub url: String,
}

/// A candidate organization with funding, contact, and outreach state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub website: Option<String>,
    pub description: String,
    pub ai_summary: String,
    pub employees: String,
    pub funding: Funding,
    pub matched_keywords: Vec<String>,
    pub poc: PointOfContact,
    pub fit_statement: String,
    pub contextual_links: Vec<ContextualLink>,
    /// Draft A. Set together with `outreach_linked_in`, never alone.
    #[serde(default)]
    pub outreach_email: Option<String>,
    /// Draft B. Set together with `outreach_email`, never alone.
    #[serde(default)]
    pub outreach_linked_in: Option<String>,
    pub status: LeadStatus,
    /// Epoch millis at capture time.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_display_names() {
        for status in [
            LeadStatus::NewLead,
            LeadStatus::Contacted,
            LeadStatus::MeetingScheduled,
            LeadStatus::SolutionDiscussed,
            LeadStatus::Archived,
        ] {
            let encoded = serde_json::to_string(&status).unwrap();
            assert_eq!(encoded, format!("\"{}\"", status.as_str()));
            let decoded: LeadStatus = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, status);
        }
    }
}
