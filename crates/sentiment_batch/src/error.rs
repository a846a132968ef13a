use thiserror::Error;

use sentiment_core::lexicon::LexiconError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to list objects in bucket {bucket}: {message}")]
    Listing { bucket: String, message: String },

    #[error("failed to read object {key}: {message}")]
    Read { key: String, message: String },

    #[error("object {key} is not valid UTF-8: {source}")]
    Decode {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to serialize result for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write object {key}: {message}")]
    Write { key: String, message: String },

    #[error("sentiment lexicon could not be fetched: {0}")]
    ResourceFetch(String),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
