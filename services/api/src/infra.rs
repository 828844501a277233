use flipfinder::config::ScoringSettings;
use flipfinder::error::AppError;
use flipfinder::leads::{
    Clock, LeadRecord, LeadRepository, LeadService, MarketCatalog, PropertyId, RandomSource,
    RepositoryError, ScoringConfig, SeededRandom, SystemClock, ThreadRandom, ValuationSuite,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<PropertyId, LeadRecord>>>,
}

impl InMemoryLeadRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PropertyId, LeadRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        change(record);
        Ok(record.clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.values().cloned().collect())
    }
}

/// Seeded when a seed is configured, OS randomness otherwise.
pub(crate) fn random_source(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    }
}

pub(crate) fn load_catalog(settings: &ScoringSettings) -> Result<MarketCatalog, AppError> {
    match &settings.markets_csv {
        Some(path) => {
            let file = File::open(path)?;
            let catalog = MarketCatalog::from_csv(file)?;
            info!(path = %path.display(), markets = catalog.len(), "loaded market table override");
            Ok(catalog)
        }
        None => Ok(MarketCatalog::michigan()),
    }
}

pub(crate) fn build_suite(
    settings: &ScoringSettings,
    clock: Arc<dyn Clock>,
) -> Result<ValuationSuite, AppError> {
    let catalog = load_catalog(settings)?;
    let config = ScoringConfig::default().with_bucket_policy(settings.bucket_policy);
    Ok(ValuationSuite::new(
        Arc::new(catalog),
        config,
        clock,
        random_source(settings.seed),
    ))
}

pub(crate) fn build_lead_service(
    settings: &ScoringSettings,
) -> Result<LeadService<InMemoryLeadRepository>, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let suite = build_suite(settings, clock.clone())?;
    Ok(LeadService::new(
        Arc::new(InMemoryLeadRepository::default()),
        Arc::new(suite),
        clock,
    ))
}
