use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::{parse_json_lenient, Attachment, CompletionRequest, GenerativeModel};
use crate::models::profile::{RankedKeyword, SemanticProfile, PROFILE_ID};
use crate::profile::prompts::{ANALYZE_PROMPT, ANALYZE_SYSTEM};

/// One uploaded document, forwarded to the multimodal model untouched.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

/// Raw model output shape. Everything is optional at the wire; named defaults
/// are filled during normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAnalysis {
    summary: Option<String>,
    ranked_keywords: Vec<RawKeyword>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawKeyword {
    keyword: String,
    score: f64,
    multiplier_applied: bool,
    visual_boost_applied: bool,
}

/// Builds the semantic fingerprint from the uploaded documents. The model's
/// `score` becomes the immutable base score; the user adjustment always starts
/// at zero.
pub async fn analyze_profile(
    model: &dyn GenerativeModel,
    documents: &[DocumentUpload],
) -> Result<SemanticProfile, AppError> {
    if documents.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "at least one document is required for analysis".to_string(),
        ));
    }

    let attachments = documents
        .iter()
        .map(|d| Attachment {
            mime_type: d.mime_type.clone(),
            data: d.data.clone(),
        })
        .collect();

    let text = model
        .generate(CompletionRequest {
            instruction: ANALYZE_SYSTEM.to_string(),
            prompt: ANALYZE_PROMPT.to_string(),
            attachments,
            enable_search: false,
            response_schema: analysis_schema(),
        })
        .await?;

    let raw: RawAnalysis = parse_json_lenient(&text);

    let ranked_keywords = raw
        .ranked_keywords
        .into_iter()
        .map(|k| RankedKeyword {
            keyword: k.keyword,
            base_score: k.score,
            user_adjustment: 0,
            multiplier_applied: k.multiplier_applied,
            visual_boost_applied: k.visual_boost_applied,
        })
        .collect();

    Ok(SemanticProfile {
        id: PROFILE_ID.to_string(),
        file_names: documents.iter().map(|d| d.file_name.clone()).collect(),
        ranked_keywords,
        summary: raw
            .summary
            .unwrap_or_else(|| "No analysis available.".to_string()),
        timestamp: Utc::now().timestamp_millis(),
    })
}

fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "rankedKeywords": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "keyword": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "multiplierApplied": { "type": "BOOLEAN" },
                        "visualBoostApplied": { "type": "BOOLEAN" }
                    }
                }
            }
        }
    })
}
