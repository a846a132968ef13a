use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RUN_STATUS_COMPLETED: &str = "completed";
pub const RUN_STATUS_EMPTY: &str = "empty";
pub const RUN_STATUS_COMPLETED_WITH_FAILURES: &str = "completed_with_failures";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Whole-document substring match against a fixed vocabulary.
    Keyword,
    /// Per-line compound score from a pretrained valence lexicon.
    Lexicon,
}

impl ScoringPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Lexicon => "lexicon",
        }
    }
}

impl std::fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringPolicy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "lexicon" => Ok(Self::Lexicon),
            other => Err(ValidationError::new(format!(
                "unknown scoring policy '{other}' (expected 'keyword' or 'lexicon')"
            ))),
        }
    }
}

/// Result for a document scored as a single unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentScore {
    pub file: String,
    pub polarity: f64,
    pub sentiment: Sentiment,
}

/// Result for one line of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentScore {
    pub comment_number: usize,
    pub text: String,
    pub score: f64,
    pub sentiment: Sentiment,
}

/// Everything written for one input object: a JSON object for whole-document
/// scoring, a JSON array for per-comment scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DocumentOutcome {
    Document(DocumentScore),
    Comments(Vec<CommentScore>),
}

impl DocumentOutcome {
    pub fn to_json_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedDocument {
    pub key: String,
    pub error_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub status: String,
    pub input_bucket: String,
    pub output_bucket: String,
    pub scoring_policy: ScoringPolicy,
    pub listed: usize,
    pub written: usize,
    pub output_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedDocument>,
    pub listing_truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_fingerprint: Option<String>,
    pub started_at: String,
    pub finished_at: String,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
