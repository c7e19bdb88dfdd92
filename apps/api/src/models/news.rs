use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsKind {
    Scientific,
    Regulatory,
}

impl NewsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NewsKind::Scientific => "Scientific",
            NewsKind::Regulatory => "Regulatory",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Scientific" => Some(NewsKind::Scientific),
            "Regulatory" => Some(NewsKind::Regulatory),
            _ => None,
        }
    }
}

/// One newsfeed item. Items are replaced wholesale on refresh, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    /// Mandatory 3-5 sentence summary.
    pub summary: String,
    /// True when the source is freely readable (PMC, public regulatory bodies).
    pub is_open_access: bool,
    #[serde(rename = "type")]
    pub kind: NewsKind,
    pub topic: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Epoch millis at capture time.
    pub timestamp: i64,
}
