use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::leads::capabilities::{FixedClock, SeededRandom};
use crate::leads::domain::{
    DistressSignal, DistressSignals, OwnerContact, PropertyId, PropertyRecord,
};
use crate::leads::market::{MarketArea, MarketCatalog};
use crate::leads::neighborhood::{
    MetricsSource, NeighborhoodAnalyzer, NeighborhoodMetrics, PopulationTrend,
};
use crate::leads::repository::{LeadRecord, LeadRepository, RepositoryError};
use crate::leads::scoring::{BucketPolicy, PriorityEngine, ScoringConfig};
use crate::leads::{lead_router, LeadService, ValuationSuite};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn june_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(date(2026, 6, 15)))
}

pub(super) fn january_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(date(2026, 1, 15)))
}

pub(super) fn engine() -> PriorityEngine {
    PriorityEngine::new(ScoringConfig::default(), june_clock())
}

pub(super) fn enforced_engine() -> PriorityEngine {
    PriorityEngine::new(
        ScoringConfig::default().with_bucket_policy(BucketPolicy::Enforced),
        june_clock(),
    )
}

/// Unknown construction year, no tags, no contact channels.
pub(super) fn clean_lead() -> PropertyRecord {
    PropertyRecord {
        id: PropertyId("clean-1".to_string()),
        city: "Lansing".to_string(),
        year_built: 0,
        list_price: 100_000,
        ..PropertyRecord::default()
    }
}

/// Every bucket saturated; scores 100 under the advisory policy.
pub(super) fn hot_lead() -> PropertyRecord {
    PropertyRecord {
        id: PropertyId("hot-1".to_string()),
        address: "412 Elm St".to_string(),
        city: "Detroit".to_string(),
        sqft: 1500,
        year_built: 2016,
        list_price: 55_000,
        arv: Some(150_000),
        equity_percent: 80,
        ownership_years: 20,
        days_on_market: 120,
        price_reductions: 2,
        distress_signals: DistressSignals::from([
            DistressSignal::Foreclosure,
            DistressSignal::PreForeclosure,
            DistressSignal::ProbateEstate,
        ]),
        owner_contact: OwnerContact {
            has_phone: true,
            has_email: true,
            has_mailing_address: true,
        },
        ..PropertyRecord::default()
    }
}

pub(super) fn lead_with(id: &str, city: &str, list_price: u32) -> PropertyRecord {
    PropertyRecord {
        id: PropertyId(id.to_string()),
        city: city.to_string(),
        year_built: 2016,
        list_price,
        arv: Some(150_000),
        ..PropertyRecord::default()
    }
}

pub(super) fn market(city: &str) -> MarketArea {
    MarketCatalog::michigan()
        .get(city)
        .cloned()
        .expect("known market")
}

pub(super) fn metrics(
    school_rating: u8,
    safety_rating: u8,
    walkability: u8,
    job_growth: f64,
    population_trend: PopulationTrend,
) -> NeighborhoodMetrics {
    NeighborhoodMetrics {
        school_rating,
        safety_rating,
        walkability,
        job_growth,
        population_trend,
    }
}

pub(super) struct FixedMetrics(pub(super) NeighborhoodMetrics);

impl MetricsSource for FixedMetrics {
    fn metrics_for(&self, _area: &MarketArea) -> NeighborhoodMetrics {
        self.0
    }
}

pub(super) fn fixed_analyzer(metrics: NeighborhoodMetrics) -> NeighborhoodAnalyzer {
    NeighborhoodAnalyzer::new(Arc::new(FixedMetrics(metrics)))
}

pub(super) fn suite() -> ValuationSuite {
    ValuationSuite::new(
        Arc::new(MarketCatalog::michigan()),
        ScoringConfig::default(),
        june_clock(),
        Arc::new(SeededRandom::new(11)),
    )
    .with_neighborhood(fixed_analyzer(metrics(
        8,
        7,
        60,
        4.0,
        PopulationTrend::Growing,
    )))
}

pub(super) fn build_service() -> (LeadService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadService::new(repository.clone(), Arc::new(suite()), june_clock());
    (service, repository)
}

pub(super) fn service_with<R: LeadRepository + 'static>(repository: R) -> LeadService<R> {
    LeadService::new(Arc::new(repository), Arc::new(suite()), june_clock())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PropertyId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn modify(
        &self,
        id: &PropertyId,
        change: &mut dyn FnMut(&mut LeadRecord),
    ) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        change(record);
        Ok(record.clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn modify(
        &self,
        _id: &PropertyId,
        _change: &mut dyn FnMut(&mut LeadRecord),
    ) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(&self, _id: &PropertyId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify(
        &self,
        _id: &PropertyId,
        _change: &mut dyn FnMut(&mut LeadRecord),
    ) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PropertyId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: LeadService<MemoryRepository>) -> axum::Router {
    lead_router(Arc::new(service))
}

pub(super) fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}
