use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::AppError;
use crate::leads::prompts::{DISCOVER_PROMPT, DISCOVER_SYSTEM};
use crate::llm_client::{parse_json_lenient, CompletionRequest, GenerativeModel};
use crate::models::lead::{ContextualLink, Funding, Lead, LeadStatus, PointOfContact};
use crate::models::profile::SemanticProfile;
use crate::profile::scoring;

/// How many calibrated keywords feed the search hint.
const HINT_KEYWORDS: usize = 5;

/// Raw model output shape. Everything optional; normalization fills named
/// defaults so downstream code never sees a hole.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLead {
    company_name: String,
    website: Option<String>,
    description: String,
    ai_summary: String,
    employees: Option<String>,
    funding: RawFunding,
    matched_keywords: Vec<String>,
    poc: Option<RawPoc>,
    fit_statement: String,
    relevant_links: Vec<RawLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFunding {
    round: Option<String>,
    amount: Option<String>,
    date: Option<String>,
    lead_investor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPoc {
    role: Option<String>,
    name: Option<String>,
    linkedin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLink {
    title: String,
    url: String,
}

/// Discovers up to 5 candidate leads for the profile. The funding-recency,
/// stage, size, and industry criteria live in the instruction text — the
/// model applies them, not this code.
pub async fn find_leads(
    model: &dyn GenerativeModel,
    config: &Config,
    profile: &SemanticProfile,
) -> Result<Vec<Lead>, AppError> {
    let hint = scoring::top_n(&profile.ranked_keywords, HINT_KEYWORDS).join(", ");

    let instruction = DISCOVER_SYSTEM
        .replace("{consultant}", &config.consultant)
        .replace("{keywords}", &hint);
    let prompt = DISCOVER_PROMPT
        .replace("{consultant}", &config.consultant)
        .replace("{keywords}", &hint);

    let text = model
        .generate(CompletionRequest {
            instruction,
            prompt,
            attachments: Vec::new(),
            enable_search: true,
            response_schema: leads_schema(),
        })
        .await?;

    let raw: Vec<RawLead> = parse_json_lenient(&text);
    let captured_at = Utc::now().timestamp_millis();
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, lead)| normalize(lead, captured_at, index))
        .collect())
}

fn normalize(raw: RawLead, captured_at: i64, index: usize) -> Lead {
    let poc = match raw.poc {
        Some(p) => PointOfContact {
            role: p.role.unwrap_or_else(|| "Unknown".to_string()),
            name: p.name,
            linkedin: p.linkedin,
        },
        None => PointOfContact {
            role: "Unknown".to_string(),
            name: Some("Unknown".to_string()),
            linkedin: None,
        },
    };

    Lead {
        id: format!("lead-{captured_at}-{index}"),
        company_name: raw.company_name,
        website: raw.website,
        description: raw.description,
        ai_summary: raw.ai_summary,
        employees: raw.employees.unwrap_or_else(|| "Unknown".to_string()),
        funding: Funding {
            round: raw.funding.round.unwrap_or_else(|| "Unknown".to_string()),
            amount_value: parse_amount_value(raw.funding.amount.as_deref()),
            amount: raw.funding.amount,
            date: raw.funding.date,
            lead_investor: raw.funding.lead_investor,
        },
        matched_keywords: raw.matched_keywords,
        poc,
        fit_statement: raw.fit_statement,
        contextual_links: raw
            .relevant_links
            .into_iter()
            .map(|l| ContextualLink {
                title: l.title,
                url: l.url,
            })
            .collect(),
        outreach_email: None,
        outreach_linked_in: None,
        status: LeadStatus::NewLead,
        timestamp: captured_at,
    }
}

/// Derives the numeric amount by stripping every non-digit character and
/// parsing what remains; 0 when absent or unparsable.
///
/// TODO: unit-aware parsing — "$1.5M" collapses to 15 here, which understates
/// the amount and skews the minimum-funding filter.
fn parse_amount_value(amount: Option<&str>) -> i64 {
    let digits: String = amount
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

fn leads_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "companyName": { "type": "STRING" },
                "website": { "type": "STRING" },
                "description": { "type": "STRING" },
                "aiSummary": { "type": "STRING", "description": "3-5 sentence summary" },
                "employees": { "type": "STRING" },
                "funding": {
                    "type": "OBJECT",
                    "properties": {
                        "round": { "type": "STRING" },
                        "amount": { "type": "STRING" },
                        "date": { "type": "STRING" },
                        "leadInvestor": { "type": "STRING" }
                    }
                },
                "matchedKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
                "poc": {
                    "type": "OBJECT",
                    "properties": {
                        "role": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "linkedin": { "type": "STRING", "description": "Full LinkedIn URL if found" }
                    }
                },
                "fitStatement": { "type": "STRING" },
                "relevantLinks": {
                    "type": "ARRAY",
                    "description": "2-3 relevant source links for this specific lead.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "url": { "type": "STRING" }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{api_error, StubModel};
    use crate::models::profile::{RankedKeyword, PROFILE_ID};

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            gemini_api_key: "test-key".to_string(),
            consultant: "Dr. Test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn test_profile(keywords: Vec<RankedKeyword>) -> SemanticProfile {
        SemanticProfile {
            id: PROFILE_ID.to_string(),
            file_names: vec![],
            ranked_keywords: keywords,
            summary: String::new(),
            timestamp: 0,
        }
    }

    fn kw(keyword: &str, base: f64, adjustment: i64) -> RankedKeyword {
        RankedKeyword {
            keyword: keyword.to_string(),
            base_score: base,
            user_adjustment: adjustment,
            multiplier_applied: false,
            visual_boost_applied: false,
        }
    }

    #[test]
    fn test_amount_value_strips_non_digits() {
        assert_eq!(parse_amount_value(Some("$50,000,000")), 50_000_000);
    }

    #[test]
    fn test_amount_value_ignores_unit_suffixes() {
        // Documented digit-stripping behavior: "$50M" is 50, not 50 million.
        assert_eq!(parse_amount_value(Some("$50M")), 50);
        assert_eq!(parse_amount_value(Some("$1.5M")), 15);
    }

    #[test]
    fn test_amount_value_defaults_to_zero() {
        assert_eq!(parse_amount_value(None), 0);
        assert_eq!(parse_amount_value(Some("undisclosed")), 0);
    }

    #[tokio::test]
    async fn test_discovery_normalizes_sparse_leads() {
        let model = StubModel(|_req: &CompletionRequest| {
            Ok(r#"[{"companyName": "VasculArt"}]"#.to_string())
        });

        let leads = find_leads(&model, &test_config(), &test_profile(vec![]))
            .await
            .unwrap();

        assert_eq!(leads.len(), 1);
        let lead = &leads[0];
        assert_eq!(lead.company_name, "VasculArt");
        assert_eq!(lead.status, LeadStatus::NewLead);
        assert_eq!(lead.funding.round, "Unknown");
        assert_eq!(lead.funding.amount_value, 0);
        assert_eq!(lead.poc.role, "Unknown");
        assert_eq!(lead.poc.name.as_deref(), Some("Unknown"));
        assert!(lead.matched_keywords.is_empty());
        assert!(lead.contextual_links.is_empty());
        assert!(lead.outreach_email.is_none());
        assert!(lead.outreach_linked_in.is_none());
        assert!(lead.id.starts_with("lead-"));
        assert!(lead.id.ends_with("-0"));
    }

    #[tokio::test]
    async fn test_discovery_preserves_reported_fields() {
        let model = StubModel(|_req: &CompletionRequest| {
            Ok(r#"[{
                "companyName": "HemoGen",
                "website": "https://hemogen.example",
                "description": "Raw blurb",
                "aiSummary": "Five sentence summary.",
                "employees": "50-100",
                "funding": {"round": "Series B", "amount": "$50,000,000", "date": "2026-05-01", "leadInvestor": "Apex Bio"},
                "matchedKeywords": ["Vascular Biology"],
                "poc": {"role": "CTO", "name": "J. Doe", "linkedin": "https://linkedin.example/jdoe"},
                "fitStatement": "Strong overlap.",
                "relevantLinks": [{"title": "Press Release", "url": "https://news.example/hemogen"}]
            }]"#
            .to_string())
        });

        let leads = find_leads(&model, &test_config(), &test_profile(vec![]))
            .await
            .unwrap();

        let lead = &leads[0];
        assert_eq!(lead.funding.round, "Series B");
        assert_eq!(lead.funding.amount_value, 50_000_000);
        assert_eq!(lead.funding.lead_investor.as_deref(), Some("Apex Bio"));
        assert_eq!(lead.poc.role, "CTO");
        assert_eq!(lead.poc.name.as_deref(), Some("J. Doe"));
        assert_eq!(lead.contextual_links.len(), 1);
        assert_eq!(lead.matched_keywords, vec!["Vascular Biology"]);
    }

    #[tokio::test]
    async fn test_discovery_hint_uses_calibrated_top_keywords() {
        // "Microfluidics" (40 + 30) outranks "Proteomics" (60) after calibration.
        let profile = test_profile(vec![kw("Proteomics", 60.0, 0), kw("Microfluidics", 40.0, 30)]);

        let model = StubModel(|req: &CompletionRequest| {
            if req.instruction.contains("Microfluidics, Proteomics") && req.enable_search {
                Ok("[]".to_string())
            } else {
                Err(api_error())
            }
        });

        let leads = find_leads(&model, &test_config(), &profile).await.unwrap();
        assert!(leads.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_degrades_on_unparsable_output() {
        let model = StubModel(|_req: &CompletionRequest| Ok("no leads today".to_string()));
        let leads = find_leads(&model, &test_config(), &test_profile(vec![]))
            .await
            .unwrap();
        assert!(leads.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_propagates_transport_failure() {
        let model = StubModel(|_req: &CompletionRequest| Err(api_error()));
        let err = find_leads(&model, &test_config(), &test_profile(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
