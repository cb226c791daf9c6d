//! Analysis pipeline
//!
//! One refresh runs fetch -> merge -> align -> indicators -> fair value ->
//! signal and returns a [`Snapshot`]. Nothing is persisted between runs;
//! upstream responses are reused within the cache TTL.

use crate::cache::{CacheKey, SeriesCache};
use crate::config::{Config, Region};
use crate::feed::{Candle, FeedError, LiquiditySource, Observation, PriceSource};
use crate::indicators::{IndicatorEngine, IndicatorFrame};
use crate::model::{FairValueFit, FairValueModel, LinearModel};
use crate::series::{align, merge_components, AlignError, Component};
use crate::signal::{Signal, SignalComposer, SignalInputs};
use chrono::{DateTime, Days, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Terminal conditions for one refresh cycle. Any of these means no
/// partial dashboard: the caller reports and stops.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data unavailable: {0}")]
    Feed(#[from] FeedError),
    #[error("data unavailable: {0}")]
    Align(#[from] AlignError),
}

/// The complete output of one pipeline run
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub region: Region,
    pub frame: IndicatorFrame,
    /// None when history is too short or the fit is degenerate
    pub fair_value: Option<FairValueFit>,
    pub signal: Signal,
}

impl Snapshot {
    /// The KPI inputs the composer scored, from the latest frame row
    pub fn signal_inputs(frame: &IndicatorFrame) -> SignalInputs {
        SignalInputs {
            correlation: IndicatorFrame::latest(&frame.correlation),
            liquidity_3m_pct: IndicatorFrame::latest(&frame.liquidity_momentum.m3),
            price_1m_pct: IndicatorFrame::latest(&frame.price_momentum.m1),
            liquidity_yoy_pct: IndicatorFrame::latest(&frame.liquidity_momentum.y1),
        }
    }
}

/// Owns the sources, caches and analytic stages for repeated runs
pub struct Pipeline<L, P> {
    liquidity_source: L,
    price_source: P,
    liquidity_cache: SeriesCache<Vec<Observation>>,
    price_cache: SeriesCache<Vec<Candle>>,
    engine: IndicatorEngine,
    model: LinearModel,
    composer: SignalComposer,
    history_days: i64,
}

impl<L: LiquiditySource, P: PriceSource> Pipeline<L, P> {
    pub fn new(liquidity_source: L, price_source: P, config: &Config) -> Self {
        let ttl = std::time::Duration::from_secs(config.cache.ttl_secs);
        Self {
            liquidity_source,
            price_source,
            liquidity_cache: SeriesCache::new(ttl),
            price_cache: SeriesCache::new(ttl),
            engine: IndicatorEngine::new(&config.pipeline),
            model: LinearModel::new(config.model.regression_window),
            composer: SignalComposer::new(config.signal.clone()),
            history_days: config.pipeline.history_days,
        }
    }

    /// Underlying liquidity source (fixture instrumentation in tests)
    pub fn liquidity_source(&self) -> &L {
        &self.liquidity_source
    }

    /// Underlying price source (fixture instrumentation in tests)
    pub fn price_source(&self) -> &P {
        &self.price_source
    }

    /// Run one refresh for a region as of today
    pub async fn run(&self, region: Region) -> Result<Snapshot, PipelineError> {
        let end = Utc::now().date_naive();
        let start = end
            .checked_sub_days(Days::new(self.history_days.unsigned_abs()))
            .unwrap_or(end);
        self.run_range(region, start, end).await
    }

    /// Run one refresh over an explicit date range
    pub async fn run_range(
        &self,
        region: Region,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Snapshot, PipelineError> {
        let spec = region.spec();
        let bucket = format!("{start}..{end}");

        tracing::info!(region = %region, %start, %end, "Running liquidity pipeline");

        let mut component_series = Vec::with_capacity(spec.components.len());
        for component in spec.components {
            let key = CacheKey::new("fred", component.series_id, bucket.clone());
            let observations = match self.liquidity_cache.get(&key) {
                Some(cached) => cached,
                None => {
                    let fetched = self
                        .liquidity_source
                        .fetch_observations(component.series_id, start, end)
                        .await?;
                    self.liquidity_cache.insert(key, fetched.clone());
                    fetched
                }
            };
            component_series.push(observations);
        }

        let components: Vec<Component> = component_series
            .iter()
            .zip(spec.components.iter())
            .map(|(observations, c)| Component {
                observations,
                scale: c.scale,
            })
            .collect();
        let net_liquidity = merge_components(&components);

        let price_key = CacheKey::new("stooq", spec.index_symbol, bucket);
        let candles = match self.price_cache.get(&price_key) {
            Some(cached) => cached,
            None => {
                let fetched = self
                    .price_source
                    .fetch_candles(spec.index_symbol, start, end)
                    .await?;
                self.price_cache.insert(price_key, fetched.clone());
                fetched
            }
        };

        let aligned = align(&net_liquidity, &candles)?;
        tracing::debug!(rows = aligned.len(), "Series aligned");

        let frame = self.engine.compute(&aligned);

        // a short or degenerate history degrades to "not fit", it never
        // fabricates a regression
        let fair_value = match self.model.fit(&frame.liquidity, &frame.price) {
            Ok(fit) => Some(fit),
            Err(err) => {
                tracing::warn!(%err, "Fair value not fit");
                None
            }
        };

        let signal = self.composer.compose(Snapshot::signal_inputs(&frame));

        tracing::info!(
            rows = frame.len(),
            stance = %signal.stance,
            fair_value_fit = fair_value.is_some(),
            "Pipeline run complete"
        );

        Ok(Snapshot {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            region,
            frame,
            fair_value,
            signal,
        })
    }
}
