use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sentiment_core::contract::ScoringPolicy;

use crate::error::PipelineError;

pub const DEFAULT_INPUT_BUCKET: &str = "raw-comments";
pub const DEFAULT_OUTPUT_BUCKET: &str = "results-sentiment";
pub const DEFAULT_HOME_DIR: &str = "/tmp";
pub const LEXICON_DATA_DIR: &str = "sentiment_data";
pub const LEXICON_FILE_NAME: &str = "vader_lexicon.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailureMode {
    /// Abort the run at the first failing document
    #[default]
    FailFast,
    /// Record failing documents and keep processing the rest
    Isolate,
}

impl FailureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::Isolate => "isolate",
        }
    }
}

/// Runtime configuration. Every field can be set from its environment
/// variable; the one-shot binary also accepts the equivalent long flag.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "sentiment_batch",
    about = "Score every text object in one bucket and write JSON results to another"
)]
pub struct BatchConfig {
    /// Bucket listed and read for source documents
    #[arg(long, env = "INPUT_BUCKET", default_value = DEFAULT_INPUT_BUCKET)]
    pub input_bucket: String,

    /// Bucket that receives one JSON result object per source document
    #[arg(long, env = "OUTPUT_BUCKET", default_value = DEFAULT_OUTPUT_BUCKET)]
    pub output_bucket: String,

    /// `keyword` (whole document) or `lexicon` (per line)
    #[arg(long, env = "SCORING_POLICY", default_value = "keyword")]
    pub scoring_policy: ScoringPolicy,

    #[arg(long, env = "FAILURE_MODE", value_enum, default_value_t = FailureMode::FailFast)]
    pub failure_mode: FailureMode,

    /// Home directory that holds downloaded resources
    #[arg(long = "home-dir", env = "SENTIMENT_HOME", default_value = DEFAULT_HOME_DIR)]
    pub home_dir: PathBuf,

    /// Explicit lexicon file, overriding the home-directory location
    #[arg(long, env = "LEXICON_PATH")]
    pub lexicon_path: Option<PathBuf>,

    /// Bucket to fetch the lexicon from when it is missing locally
    #[arg(long, env = "LEXICON_BUCKET")]
    pub lexicon_bucket: Option<String>,

    #[arg(long, env = "LEXICON_KEY")]
    pub lexicon_key: Option<String>,
}

/// Where a missing lexicon can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconSource {
    pub bucket: String,
    pub key: String,
}

impl BatchConfig {
    /// Reads configuration from the environment only, ignoring process
    /// arguments. Used by the Lambda entry point.
    pub fn from_env() -> Result<Self, PipelineError> {
        let config = Self::try_parse_from(["sentiment_batch"])
            .map_err(|error| PipelineError::Config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.input_bucket.trim().is_empty() {
            return Err(PipelineError::Config(
                "INPUT_BUCKET cannot be empty".to_string(),
            ));
        }
        if self.output_bucket.trim().is_empty() {
            return Err(PipelineError::Config(
                "OUTPUT_BUCKET cannot be empty".to_string(),
            ));
        }

        match (&self.lexicon_bucket, &self.lexicon_key) {
            (Some(bucket), Some(key)) if bucket.trim().is_empty() || key.trim().is_empty() => {
                Err(PipelineError::Config(
                    "LEXICON_BUCKET and LEXICON_KEY cannot be empty".to_string(),
                ))
            }
            (Some(_), None) | (None, Some(_)) => Err(PipelineError::Config(
                "LEXICON_BUCKET and LEXICON_KEY must be configured together".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn lexicon_location(&self) -> PathBuf {
        self.lexicon_path.clone().unwrap_or_else(|| {
            self.home_dir
                .join(LEXICON_DATA_DIR)
                .join(LEXICON_FILE_NAME)
        })
    }

    pub fn lexicon_source(&self) -> Option<LexiconSource> {
        match (&self.lexicon_bucket, &self.lexicon_key) {
            (Some(bucket), Some(key)) => Some(LexiconSource {
                bucket: bucket.clone(),
                key: key.clone(),
            }),
            _ => None,
        }
    }

    pub fn shares_buckets(&self) -> bool {
        self.input_bucket == self.output_bucket
    }
}
