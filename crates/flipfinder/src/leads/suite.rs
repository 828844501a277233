use std::sync::Arc;

use super::arv::{ArvPrediction, ArvPredictor};
use super::capabilities::{Clock, RandomSource, SystemClock, ThreadRandom};
use super::domain::PropertyRecord;
use super::market::{MarketArea, MarketCatalog};
use super::neighborhood::{NeighborhoodAnalyzer, NeighborhoodAssessment};
use super::scoring::{PriorityEngine, ScoreResult, ScoringConfig};

/// The three valuation engines wired to one market catalog and one set of
/// capabilities.
pub struct ValuationSuite {
    catalog: Arc<MarketCatalog>,
    engine: PriorityEngine,
    arv: ArvPredictor,
    neighborhood: NeighborhoodAnalyzer,
}

impl ValuationSuite {
    pub fn new(
        catalog: Arc<MarketCatalog>,
        config: ScoringConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            catalog,
            engine: PriorityEngine::new(config, clock.clone()),
            arv: ArvPredictor::new(clock, random.clone()),
            neighborhood: NeighborhoodAnalyzer::sampled(random),
        }
    }

    /// Michigan markets, system clock and OS randomness.
    pub fn with_defaults(config: ScoringConfig) -> Self {
        Self::new(
            Arc::new(MarketCatalog::michigan()),
            config,
            Arc::new(SystemClock),
            Arc::new(ThreadRandom),
        )
    }

    pub fn with_neighborhood(mut self, analyzer: NeighborhoodAnalyzer) -> Self {
        self.neighborhood = analyzer;
        self
    }

    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &PriorityEngine {
        &self.engine
    }

    pub fn market_for(&self, city: &str) -> &MarketArea {
        self.catalog.lookup(city)
    }

    pub fn score(&self, property: &PropertyRecord) -> ScoreResult {
        self.engine.score(property)
    }

    /// ARV against the lead's own market area.
    pub fn predict_arv(&self, property: &PropertyRecord) -> ArvPrediction {
        self.arv.predict(property, self.market_for(&property.city))
    }

    pub fn predict_arv_in(&self, property: &PropertyRecord, market: &MarketArea) -> ArvPrediction {
        self.arv.predict(property, market)
    }

    pub fn analyze_neighborhood(&self, city: &str) -> NeighborhoodAssessment {
        self.neighborhood.analyze(self.market_for(city))
    }
}
