//! Lead intake, scoring and valuation.
//!
//! Engines are pure over their inputs plus the injected [`Clock`] and
//! [`RandomSource`]; storage and transport live behind [`LeadRepository`] and
//! [`lead_router`].

pub mod arv;
pub mod capabilities;
pub mod deal;
pub mod demo;
pub mod domain;
pub mod import;
pub mod market;
pub mod neighborhood;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod suite;
pub mod summary;

#[cfg(test)]
mod tests;

pub use arv::{ArvAdjustments, ArvPrediction, ArvPredictor};
pub use capabilities::{Clock, FixedClock, RandomSource, SeededRandom, SystemClock, ThreadRandom};
pub use deal::{estimate_deal_economics, DealAnalysis, DealInputs, DealVerdict};
pub use demo::{generate_demo_leads, DemoLead};
pub use domain::{
    DistressSignal, DistressSignals, OwnerContact, PipelineStage, PropertyCategory, PropertyId,
    PropertyRecord, UnknownDistressSignal, UnknownPipelineStage, UnknownPropertyCategory,
};
pub use import::{import_leads, import_leads_from_path, LeadImportError};
pub use market::{MarketArea, MarketCatalog, MarketCatalogError};
pub use neighborhood::{
    MetricsSource, NeighborhoodAnalyzer, NeighborhoodAssessment, NeighborhoodGrade,
    NeighborhoodMetrics, PopulationTrend, SampledMetrics,
};
pub use repository::{
    LeadRecord, LeadRepository, LeadRow, LeadRowError, LeadView, RepositoryError,
};
pub use router::lead_router;
pub use scoring::{
    BucketPolicy, BucketSubtotal, FactorCategory, FinancialAnalysis, PriorityEngine, PriorityTier,
    Recommendation, ScoreFactor, ScoreResult, ScoringConfig,
};
pub use service::{LeadService, LeadServiceError};
pub use suite::ValuationSuite;
pub use summary::PipelineSummary;
