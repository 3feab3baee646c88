//! Replay the decision model over a CSV bar file and report returns.
//!
//! Loads the model artifact when present, otherwise trains one from the
//! same bar file first. Plotting the curve is left to external tooling;
//! this prints the numbers.

use anyhow::{Context, Result};
use clap::Parser;
use optionsignal::application::backtest::BacktestSimulator;
use optionsignal::application::features;
use optionsignal::application::model::{DirectionModel, TrainOptions};
use optionsignal::domain::errors::SignalError;
use optionsignal::domain::types::FeatureWindows;
use optionsignal::infrastructure::csv_bars;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Backtest the signal engine over historical bars", long_about = None)]
struct Args {
    /// Path to a CSV of OHLCV bars (timestamp,open,high,low,close,volume)
    #[arg(long)]
    input: PathBuf,

    /// Model artifact to replay; trained from the input bars when absent
    #[arg(long, default_value = "data/model.json")]
    model: PathBuf,

    #[arg(long, default_value_t = 50)]
    ma_fast: usize,

    #[arg(long, default_value_t = 200)]
    ma_slow: usize,

    #[arg(long, default_value_t = 14)]
    rsi: usize,

    /// Number of trees when training is needed
    #[arg(long, default_value_t = 100)]
    n_trees: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let bars = csv_bars::load_bars(&args.input)?;
    println!("Loaded {} bars from {:?}", bars.len(), args.input);

    let windows = FeatureWindows {
        fast: args.ma_fast,
        slow: args.ma_slow,
        rsi: args.rsi,
    };

    let model = match DirectionModel::load(&args.model) {
        Ok(model) => {
            println!("Loaded model from {:?}", args.model);
            model
        }
        Err(SignalError::ModelNotFound { .. }) => {
            println!("No model at {:?}, training from input bars", args.model);
            let feature_seq = features::compute(&bars, &windows).context("computing features")?;
            let examples = features::label_examples(&bars, &feature_seq);
            let opts = TrainOptions {
                estimator_count: args.n_trees,
                ..TrainOptions::default()
            };
            let (model, accuracy) = DirectionModel::train(&examples, &opts)?;
            println!("Trained fresh model, test accuracy {accuracy:.2}");
            model.save(&args.model)?;
            model
        }
        Err(e) => return Err(e.into()),
    };

    let result = BacktestSimulator::new(windows).run(&bars, &model)?;

    println!("Trades taken: {}", result.trade_returns.len());
    if let Some(final_equity) = result.equity_curve.last() {
        println!("Final equity: {final_equity:.4} (seeded at 1.0)");
    }
    println!("Total return: {:.2}%", result.total_return * 100.0);
    Ok(())
}
