//! Offline model training over a CSV bar file.

use anyhow::{Context, Result};
use clap::Parser;
use optionsignal::application::features;
use optionsignal::application::model::{DirectionModel, TrainOptions};
use optionsignal::domain::types::FeatureWindows;
use optionsignal::infrastructure::csv_bars;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the direction model from historical bars", long_about = None)]
struct Args {
    /// Path to a CSV of OHLCV bars (timestamp,open,high,low,close,volume)
    #[arg(long)]
    input: PathBuf,

    /// Where to write the model artifact
    #[arg(long, default_value = "data/model.json")]
    output: PathBuf,

    #[arg(long, default_value_t = 50)]
    ma_fast: usize,

    #[arg(long, default_value_t = 200)]
    ma_slow: usize,

    #[arg(long, default_value_t = 14)]
    rsi: usize,

    /// Trailing fraction of examples held out for the accuracy estimate
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: u16,

    /// Fix the training RNG for reproducible artifacts
    #[arg(long)]
    seed: Option<u64>,
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
    let feature_seq = features::compute(&bars, &windows).context("computing features")?;
    let examples = features::label_examples(&bars, &feature_seq);
    println!(
        "{} feature vectors, {} labeled examples",
        feature_seq.len(),
        examples.len()
    );

    let opts = TrainOptions {
        test_fraction: args.test_fraction,
        estimator_count: args.n_trees,
        seed: args.seed,
    };
    let (model, accuracy) = DirectionModel::train(&examples, &opts).context("training model")?;
    println!("Model test accuracy: {accuracy:.2}");

    model.save(&args.output)?;
    println!("Model saved to {:?}", args.output);
    Ok(())
}
