//! Wiring from configuration to a finished run against S3.

use chrono::Utc;
use sentiment_core::contract::{RunSummary, ScoringPolicy};
use sentiment_core::scoring::Scorer;
use tracing::{info, warn};

use crate::adapters::lexicon_resource::{load_lexicon, RemoteLexicon};
use crate::adapters::object_store::ObjectSource;
use crate::adapters::s3::{S3ObjectSource, S3OutcomeStore};
use crate::config::BatchConfig;
use crate::error::PipelineError;
use crate::handlers::pipeline::{run_pipeline, PipelineConfig};

const COMPONENT: &str = "runtime";

/// Keys without a `.txt` suffix keep their name, so with one shared bucket
/// their result replaces the source object.
pub const SHARED_BUCKETS_WARNING: &str = "input and output buckets are the same; \
     keys without a .txt suffix are overwritten by their own results \
     and results are listed on the next run";

/// Builds the scorer for the configured policy. The lexicon policy loads its
/// resource here, so an unavailable lexicon fails before any document is read.
pub fn build_scorer(
    config: &BatchConfig,
    lexicon_store: Option<&dyn ObjectSource>,
) -> Result<Scorer, PipelineError> {
    match config.scoring_policy {
        ScoringPolicy::Keyword => Ok(Scorer::Keyword),
        ScoringPolicy::Lexicon => {
            let source = config.lexicon_source();
            let remote = match (&source, lexicon_store) {
                (Some(source), Some(store)) => Some(RemoteLexicon {
                    key: &source.key,
                    source: store,
                }),
                _ => None,
            };
            let lexicon = load_lexicon(&config.lexicon_location(), remote)?;
            Ok(Scorer::Lexicon(lexicon))
        }
    }
}

/// Runs one full pipeline pass with a single S3 client shared by every
/// adapter for the lifetime of the run.
pub async fn run_with_aws(config: &BatchConfig) -> Result<RunSummary, PipelineError> {
    config.validate()?;
    let started_at = Utc::now().to_rfc3339();
    log_startup(config);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);

    let lexicon_store = config
        .lexicon_source()
        .map(|source| S3ObjectSource::new(source.bucket, s3_client.clone()));
    let scorer = build_scorer(
        config,
        lexicon_store
            .as_ref()
            .map(|store| store as &dyn ObjectSource),
    )?;

    let source = S3ObjectSource::new(config.input_bucket.clone(), s3_client.clone());
    let store = S3OutcomeStore::new(config.output_bucket.clone(), s3_client);
    let pipeline_config = PipelineConfig::from_batch_config(config, started_at);

    run_pipeline(&pipeline_config, &scorer, &source, &store)
}

fn log_startup(config: &BatchConfig) {
    info!(
        component = COMPONENT,
        input_bucket = %config.input_bucket,
        output_bucket = %config.output_bucket,
        scoring_policy = config.scoring_policy.as_str(),
        failure_mode = config.failure_mode.as_str(),
        home_dir = %config.home_dir.display(),
        "starting sentiment batch"
    );
    if config.shares_buckets() {
        warn!(
            component = COMPONENT,
            bucket = %config.input_bucket,
            "{}",
            SHARED_BUCKETS_WARNING
        );
    }
}
