use std::time::Instant;

use sentiment_core::contract::{
    FailedDocument, RunSummary, RUN_STATUS_COMPLETED, RUN_STATUS_COMPLETED_WITH_FAILURES,
    RUN_STATUS_EMPTY,
};
use sentiment_core::scoring::Scorer;
use sentiment_core::storage_keys::derive_output_key;
use tracing::{error, info, warn};

use crate::adapters::object_store::{ObjectListing, ObjectSource, OutcomeStore};
use crate::config::{BatchConfig, FailureMode};
use crate::error::PipelineError;

const COMPONENT: &str = "pipeline";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_bucket: String,
    pub output_bucket: String,
    pub failure_mode: FailureMode,
    pub started_at: String,
}

impl PipelineConfig {
    pub fn from_batch_config(config: &BatchConfig, started_at: impl Into<String>) -> Self {
        Self {
            input_bucket: config.input_bucket.clone(),
            output_bucket: config.output_bucket.clone(),
            failure_mode: config.failure_mode,
            started_at: started_at.into(),
        }
    }
}

/// Lists the input bucket once and scores every listed object in order,
/// writing one JSON result per object.
///
/// In [`FailureMode::FailFast`] the first failing document aborts the run;
/// results written before it stay in place. In [`FailureMode::Isolate`] the
/// failure is recorded in the summary and the remaining documents are still
/// processed. A failed listing always aborts.
pub fn run_pipeline(
    config: &PipelineConfig,
    scorer: &Scorer,
    source: &impl ObjectSource,
    store: &impl OutcomeStore,
) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    info!(
        component = COMPONENT,
        input_bucket = %config.input_bucket,
        output_bucket = %config.output_bucket,
        scoring_policy = scorer.policy().as_str(),
        failure_mode = config.failure_mode.as_str(),
        "listing objects"
    );

    let listing = source
        .list_keys()
        .map_err(|message| PipelineError::Listing {
            bucket: config.input_bucket.clone(),
            message,
        })?;

    if listing.truncated {
        warn!(
            component = COMPONENT,
            input_bucket = %config.input_bucket,
            listed = listing.keys.len(),
            "listing truncated; objects beyond the first page are not processed"
        );
    }

    if listing.keys.is_empty() {
        info!(
            component = COMPONENT,
            input_bucket = %config.input_bucket,
            "no objects found in the input bucket"
        );
        return Ok(build_summary(
            config,
            scorer,
            &listing,
            Vec::new(),
            Vec::new(),
        ));
    }

    let mut output_keys = Vec::with_capacity(listing.keys.len());
    let mut failed = Vec::new();

    for key in &listing.keys {
        match process_document(config, scorer, key, source, store) {
            Ok(output_key) => output_keys.push(output_key),
            Err(failure) => match config.failure_mode {
                FailureMode::FailFast => {
                    error!(
                        component = COMPONENT,
                        key = %key,
                        written = output_keys.len(),
                        error = %failure,
                        "document failed; aborting run"
                    );
                    return Err(failure);
                }
                FailureMode::Isolate => {
                    error!(
                        component = COMPONENT,
                        key = %key,
                        error = %failure,
                        "document failed; continuing"
                    );
                    failed.push(FailedDocument {
                        key: key.clone(),
                        error_message: failure.to_string(),
                    });
                }
            },
        }
    }

    let summary = build_summary(config, scorer, &listing, output_keys, failed);
    info!(
        component = COMPONENT,
        status = %summary.status,
        listed = summary.listed,
        written = summary.written,
        failed = summary.failed.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "run completed"
    );
    Ok(summary)
}

fn process_document(
    config: &PipelineConfig,
    scorer: &Scorer,
    key: &str,
    source: &impl ObjectSource,
    store: &impl OutcomeStore,
) -> Result<String, PipelineError> {
    info!(component = COMPONENT, key = %key, "reading object");

    let body = source
        .read_object(key)
        .map_err(|message| PipelineError::Read {
            key: key.to_string(),
            message,
        })?;
    let text = String::from_utf8(body).map_err(|source| PipelineError::Decode {
        key: key.to_string(),
        source,
    })?;

    let outcome = scorer.score_document(key, &text);
    let output_key = derive_output_key(key);
    let body = outcome
        .to_json_body()
        .map_err(|source| PipelineError::Serialize {
            key: key.to_string(),
            source,
        })?;

    store
        .write_object(&output_key, &body)
        .map_err(|message| PipelineError::Write {
            key: output_key.clone(),
            message,
        })?;

    info!(
        component = COMPONENT,
        output_bucket = %config.output_bucket,
        output_key = %output_key,
        "saved result"
    );
    Ok(output_key)
}

fn build_summary(
    config: &PipelineConfig,
    scorer: &Scorer,
    listing: &ObjectListing,
    output_keys: Vec<String>,
    failed: Vec<FailedDocument>,
) -> RunSummary {
    let status = if listing.keys.is_empty() {
        RUN_STATUS_EMPTY
    } else if failed.is_empty() {
        RUN_STATUS_COMPLETED
    } else {
        RUN_STATUS_COMPLETED_WITH_FAILURES
    };

    RunSummary {
        status: status.to_string(),
        input_bucket: config.input_bucket.clone(),
        output_bucket: config.output_bucket.clone(),
        scoring_policy: scorer.policy(),
        listed: listing.keys.len(),
        written: output_keys.len(),
        output_keys,
        failed,
        listing_truncated: listing.truncated,
        lexicon_fingerprint: scorer.lexicon_fingerprint().map(str::to_string),
        started_at: config.started_at.clone(),
        finished_at: chrono::Utc::now().to_rfc3339(),
    }
}
