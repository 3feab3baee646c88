//! Daily signal pipeline runner.
//!
//! Wires the orchestrator to its collaborators and performs one evaluation.
//! Only mock collaborators ship with the engine; live bar/headline/broker
//! integrations plug in through the same ports.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=data/model.json cargo run --bin optionsignal -- --mode mock
//! ```

use anyhow::Result;
use clap::Parser;
use optionsignal::application::pipeline::PipelineOrchestrator;
use optionsignal::application::sentiment::SentimentAggregator;
use optionsignal::config::Config;
use optionsignal::infrastructure::mock::{
    MockBarSource, MockHeadlineSource, RecordingExecutionGateway,
};
use optionsignal::infrastructure::news::sentiment_analyzer::SentimentAnalyzer;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily options signal pipeline", long_about = None)]
struct Args {
    /// Collaborator mode. Only "mock" is built in.
    #[arg(long, default_value = "mock")]
    mode: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();
    if args.mode != "mock" {
        anyhow::bail!(
            "mode '{}' has no built-in collaborators; wire a BarSource/HeadlineSource/ExecutionGateway for it",
            args.mode
        );
    }

    let config = Config::from_env()?;
    info!(
        symbol = %config.symbol,
        history = config.history_bars,
        "optionsignal {} starting",
        env!("CARGO_PKG_VERSION")
    );

    let gateway = Arc::new(RecordingExecutionGateway::new());
    let orchestrator = PipelineOrchestrator::new(
        Arc::new(MockBarSource::trending()),
        Arc::new(MockHeadlineSource::bullish()),
        gateway.clone(),
        SentimentAggregator::new(SentimentAnalyzer::new().into_polarity_fn()),
        config,
    );

    let outcome = orchestrator.run_daily().await?;
    info!(
        sentiment = outcome.sentiment,
        prediction = outcome.prediction,
        signal = %outcome.signal,
        "daily run complete"
    );
    match &outcome.order {
        Some(intent) => info!(
            id = %intent.id,
            quantity = intent.quantity,
            profit_target = intent.profit_target,
            stop_loss = intent.stop_loss,
            "order intent emitted"
        ),
        None => info!("no clear trade signal today"),
    }

    Ok(())
}
