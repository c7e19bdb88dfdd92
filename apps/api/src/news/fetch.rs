use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::{parse_json_lenient, CompletionRequest, GenerativeModel};
use crate::models::news::{NewsItem, NewsKind};
use crate::news::prompts::{FETCH_PROMPT, FETCH_SYSTEM};

/// Raw model output shape; named defaults are filled during normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawNewsItem {
    title: String,
    source: String,
    url: Option<String>,
    summary: String,
    is_open_access: bool,
    #[serde(rename = "type")]
    kind: Option<String>,
    topic: Option<String>,
    jurisdiction: Option<String>,
}

/// Fetches the mixed newsfeed: 3 regulatory items and 3 scientific items per
/// snapshot.
pub async fn fetch_news(model: &dyn GenerativeModel) -> Result<Vec<NewsItem>, AppError> {
    let text = model
        .generate(CompletionRequest {
            instruction: FETCH_SYSTEM.to_string(),
            prompt: FETCH_PROMPT.to_string(),
            attachments: Vec::new(),
            enable_search: true,
            response_schema: news_schema(),
        })
        .await?;

    let raw: Vec<RawNewsItem> = parse_json_lenient(&text);
    let captured_at = Utc::now().timestamp_millis();
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| NewsItem {
            id: format!("news-{captured_at}-{index}"),
            title: item.title,
            source: item.source,
            url: item.url.unwrap_or_else(|| "#".to_string()),
            summary: item.summary,
            is_open_access: item.is_open_access,
            kind: item
                .kind
                .as_deref()
                .and_then(NewsKind::parse)
                .unwrap_or(NewsKind::Scientific),
            topic: item.topic.unwrap_or_else(|| "General".to_string()),
            jurisdiction: item.jurisdiction,
            timestamp: captured_at,
        })
        .collect())
}

fn news_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "source": { "type": "STRING" },
                "url": { "type": "STRING", "description": "The direct URL to the source article." },
                "summary": { "type": "STRING", "description": "3-5 sentence summary" },
                "isOpenAccess": { "type": "BOOLEAN" },
                "type": { "type": "STRING", "enum": ["Scientific", "Regulatory"] },
                "topic": { "type": "STRING" },
                "jurisdiction": { "type": "STRING", "enum": ["USA", "EU", "UK", "Canada", "Global"] }
            }
        }
    })
}
