use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::AppError;
use crate::leads::prompts::{OUTREACH_PROMPT, OUTREACH_SYSTEM};
use crate::llm_client::{parse_json_lenient, CompletionRequest, GenerativeModel};
use crate::models::lead::Lead;
use crate::models::profile::SemanticProfile;

/// How many stored keywords anchor the drafts.
const DRAFT_KEYWORDS: usize = 3;

/// Both outreach drafts. They are generated together and stored together.
#[derive(Debug, Clone, PartialEq)]
pub struct OutreachDrafts {
    pub email: String,
    pub linked_in: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDrafts {
    email: Option<String>,
    linkedin: Option<String>,
}

/// Generates the ~200-word email and the under-200-character direct message.
/// Keywords are taken in stored order, not re-ranked.
pub async fn generate_outreach(
    model: &dyn GenerativeModel,
    config: &Config,
    lead: &Lead,
    profile: &SemanticProfile,
) -> Result<OutreachDrafts, AppError> {
    let keywords = profile
        .ranked_keywords
        .iter()
        .take(DRAFT_KEYWORDS)
        .map(|k| k.keyword.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let instruction = OUTREACH_SYSTEM
        .replace("{consultant}", &config.consultant)
        .replace("{company}", &lead.company_name)
        .replace("{keywords}", &keywords);
    let prompt = OUTREACH_PROMPT.replace("{company}", &lead.company_name);

    let text = model
        .generate(CompletionRequest {
            instruction,
            prompt,
            attachments: Vec::new(),
            enable_search: false,
            response_schema: drafts_schema(),
        })
        .await?;

    let raw: RawDrafts = parse_json_lenient(&text);
    Ok(OutreachDrafts {
        email: raw
            .email
            .unwrap_or_else(|| "Email draft failed.".to_string()),
        linked_in: raw
            .linkedin
            .unwrap_or_else(|| "LinkedIn draft failed.".to_string()),
    })
}

fn drafts_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "email": { "type": "STRING" },
            "linkedin": { "type": "STRING" }
        }
    })
}
