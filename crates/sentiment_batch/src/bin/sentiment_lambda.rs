use lambda_runtime::{service_fn, Error, LambdaEvent};
use sentiment_batch::config::BatchConfig;
use sentiment_batch::logging::init_tracing;
use sentiment_batch::runtime::run_with_aws;
use sentiment_core::contract::RunSummary;
use serde_json::Value;

/// One pipeline pass per invocation. The event payload (typically a schedule
/// tick) carries no parameters; configuration comes from the environment.
async fn handle_request(_event: LambdaEvent<Value>) -> Result<RunSummary, Error> {
    let config = BatchConfig::from_env()?;
    let summary = run_with_aws(&config).await?;

    if summary.has_failures() {
        return Err(Error::from(format!(
            "{} of {} documents failed",
            summary.failed.len(),
            summary.listed
        )));
    }

    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
