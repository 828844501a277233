use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::capabilities::Clock;
use super::domain::{PipelineStage, PropertyId, PropertyRecord};
use super::repository::{LeadRecord, LeadRepository, RepositoryError};
use super::suite::ValuationSuite;
use super::summary::PipelineSummary;

/// Service composing the valuation engines with lead storage.
pub struct LeadService<R> {
    repository: Arc<R>,
    suite: Arc<ValuationSuite>,
    clock: Arc<dyn Clock>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> PropertyId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("lead-{id:06}"))
}

impl<R> LeadService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>, suite: Arc<ValuationSuite>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            suite,
            clock,
        }
    }

    pub fn suite(&self) -> &ValuationSuite {
        &self.suite
    }

    /// Score a new lead and store it in the `New Lead` stage.
    pub fn submit(&self, property: PropertyRecord) -> Result<LeadRecord, LeadServiceError> {
        self.submit_in_stage(property, PipelineStage::NewLead)
    }

    /// Score a lead and file it under `stage`. Blank ids are assigned from a sequence.
    pub fn submit_in_stage(
        &self,
        mut property: PropertyRecord,
        stage: PipelineStage,
    ) -> Result<LeadRecord, LeadServiceError> {
        if property.id.is_blank() {
            property.id = next_lead_id();
        }

        let score = self.suite.score(&property);
        let neighborhood = self.suite.analyze_neighborhood(&property.city);
        let now = self.clock.now();

        let record = LeadRecord {
            property,
            score,
            neighborhood_score: Some(neighborhood.score),
            stage,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            lead_id = %stored.id(),
            score = stored.score.score,
            tier = stored.score.tier.label(),
            "lead submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &PropertyId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Highest score first, ties broken by id.
    pub fn ranked(&self, limit: Option<usize>) -> Result<Vec<LeadRecord>, LeadServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| {
            b.score
                .score
                .cmp(&a.score.score)
                .then_with(|| a.id().cmp(b.id()))
        });
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    pub fn advance_stage(
        &self,
        id: &PropertyId,
        stage: PipelineStage,
    ) -> Result<LeadRecord, LeadServiceError> {
        let now = self.clock.now();
        let record = self.repository.modify(id, &mut |record: &mut LeadRecord| {
            record.stage = stage;
            record.updated_at = now;
        })?;
        info!(lead_id = %id, stage = stage.label(), "lead stage changed");
        Ok(record)
    }

    /// Re-run scoring against the current clock and policy.
    pub fn rescore(&self, id: &PropertyId) -> Result<LeadRecord, LeadServiceError> {
        let now = self.clock.now();
        let record = self.repository.modify(id, &mut |record: &mut LeadRecord| {
            record.score = self.suite.score(&record.property);
            record.updated_at = now;
        })?;
        Ok(record)
    }

    pub fn summary(&self) -> Result<PipelineSummary, LeadServiceError> {
        let records = self.repository.list()?;
        Ok(PipelineSummary::from_records(&records))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
