// Dashboard lead filtering. Pure and order-preserving: the store hands leads
// over newest-first and the filter never reorders them.

use serde::Deserialize;

use crate::models::lead::{Lead, LeadStatus};

/// Filter configuration from the dashboard controls. Every criterion is
/// optional; unset criteria exclude nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    /// Funding-round substring, or the "All" sentinel.
    pub stage: Option<String>,
    /// Lead-investor substring.
    pub investor: Option<String>,
    /// Matches either the POC role or the POC name.
    pub contact: Option<String>,
    /// Minimum funding amount, in millions.
    pub min_amount_millions: Option<f64>,
}

impl LeadFilter {
    /// Treats blank strings and the "All" stage sentinel as unset.
    pub fn normalized(mut self) -> Self {
        self.stage = self.stage.filter(|s| !s.trim().is_empty() && s != "All");
        self.investor = self.investor.filter(|s| !s.trim().is_empty());
        self.contact = self.contact.filter(|s| !s.trim().is_empty());
        self
    }
}

/// True when `lead` survives every active criterion. Archived leads never
/// match, regardless of the other filters.
pub fn matches(lead: &Lead, filter: &LeadFilter) -> bool {
    if lead.status == LeadStatus::Archived {
        return false;
    }

    if let Some(stage) = &filter.stage {
        if !contains_ci(&lead.funding.round, stage) {
            return false;
        }
    }

    if let Some(investor) = &filter.investor {
        match &lead.funding.lead_investor {
            Some(lead_investor) if contains_ci(lead_investor, investor) => {}
            _ => return false,
        }
    }

    if let Some(contact) = &filter.contact {
        let role_matches = contains_ci(&lead.poc.role, contact);
        let name_matches = contains_ci(lead.poc.name.as_deref().unwrap_or(""), contact);
        if !role_matches && !name_matches {
            return false;
        }
    }

    if let Some(millions) = filter.min_amount_millions {
        if (lead.funding.amount_value as f64) < millions * 1_000_000.0 {
            return false;
        }
    }

    true
}

/// Order-preserving subset of `leads` under `filter`.
pub fn apply(leads: Vec<Lead>, filter: &LeadFilter) -> Vec<Lead> {
    leads
        .into_iter()
        .filter(|lead| matches(lead, filter))
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
