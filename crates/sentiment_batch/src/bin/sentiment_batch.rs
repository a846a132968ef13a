use clap::Parser;
use sentiment_batch::config::BatchConfig;
use sentiment_batch::logging::init_tracing;
use sentiment_batch::runtime::run_with_aws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = BatchConfig::parse();
    let summary = run_with_aws(&config).await?;

    if summary.has_failures() {
        anyhow::bail!(
            "{} of {} documents failed: {}",
            summary.failed.len(),
            summary.listed,
            summary
                .failed
                .iter()
                .map(|failure| failure.key.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}
