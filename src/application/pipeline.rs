//! The daily run: pull bars and headlines, predict, fuse, emit an intent.

use crate::application::features;
use crate::application::model::DirectionModel;
use crate::application::policy::DecisionPolicy;
use crate::application::sentiment::SentimentAggregator;
use crate::config::Config;
use crate::domain::errors::SignalError;
use crate::domain::ports::{BarSource, DirectionPredictor, ExecutionGateway, HeadlineSource};
use crate::domain::types::{OrderIntent, OrderSide, Signal};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// What the daily run concluded, for logging and tests. `order` is `None`
/// when the policy stayed flat.
#[derive(Debug, Clone)]
pub struct DailyOutcome {
    pub sentiment: f64,
    pub prediction: u32,
    pub signal: Signal,
    pub order: Option<OrderIntent>,
}

pub struct PipelineOrchestrator {
    bar_source: Arc<dyn BarSource>,
    headline_source: Arc<dyn HeadlineSource>,
    execution: Arc<dyn ExecutionGateway>,
    sentiment: SentimentAggregator,
    policy: DecisionPolicy,
    config: Config,
}

impl PipelineOrchestrator {
    pub fn new(
        bar_source: Arc<dyn BarSource>,
        headline_source: Arc<dyn HeadlineSource>,
        execution: Arc<dyn ExecutionGateway>,
        sentiment: SentimentAggregator,
        config: Config,
    ) -> Self {
        let policy = DecisionPolicy::new(config.sentiment_threshold);
        Self {
            bar_source,
            headline_source,
            execution,
            sentiment,
            policy,
            config,
        }
    }

    /// Execute one daily evaluation. A missing model artifact triggers a
    /// fresh training run over the fetched history and a save; every other
    /// error bubbles up with context.
    pub async fn run_daily(&self) -> Result<DailyOutcome> {
        let bars = self
            .bar_source
            .fetch_bars(&self.config.symbol, self.config.history_bars)
            .await
            .context("fetching price history")?;
        info!(symbol = %self.config.symbol, bars = bars.len(), "price history fetched");

        let windows = self.config.windows();
        let feature_seq = features::compute(&bars, &windows)?;

        let headlines = self
            .headline_source
            .fetch_headlines()
            .await
            .context("fetching headlines")?;
        let sentiment = self.sentiment.aggregate(&headlines);
        info!(
            headlines = headlines.len(),
            sentiment, "news sentiment aggregated"
        );

        let model = match DirectionModel::load(&self.config.model_path) {
            Ok(model) => {
                info!(path = %self.config.model_path.display(), "loaded existing model");
                model
            }
            Err(SignalError::ModelNotFound { .. }) => {
                warn!(path = %self.config.model_path.display(), "no model artifact, training");
                let examples = features::label_examples(&bars, &feature_seq);
                let (model, accuracy) =
                    DirectionModel::train(&examples, &self.config.train_options())?;
                info!(accuracy, "fresh model trained");
                model.save(&self.config.model_path)?;
                model
            }
            Err(e) => return Err(e.into()),
        };

        let latest = feature_seq
            .last()
            .expect("compute yields at least one vector");
        let prediction = model.predict(latest)?;
        let signal = self.policy.decide(prediction, sentiment);
        info!(prediction, %signal, "decision made");

        let order = match signal {
            Signal::None => None,
            signal => {
                let intent = self.build_intent(signal);
                self.execution
                    .submit(intent.clone())
                    .await
                    .context("submitting order intent")?;
                info!(id = %intent.id, %signal, "order intent submitted");
                Some(intent)
            }
        };

        Ok(DailyOutcome {
            sentiment,
            prediction,
            signal,
            order,
        })
    }

    /// Both signals open long option positions (a call or a put is bought
    /// either way); direction lives in `signal`.
    fn build_intent(&self, signal: Signal) -> OrderIntent {
        OrderIntent {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: self.config.symbol.clone(),
            side: OrderSide::Buy,
            signal,
            quantity: self.config.order_quantity,
            limit_price: None,
            profit_target: self.config.profit_target,
            stop_loss: self.config.stop_loss,
            expiry_days: self.config.option_expiry_days,
        }
    }
}
