use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{
    DistressSignals, OwnerContact, PipelineStage, PropertyCategory, PropertyId, PropertyRecord,
    UnknownDistressSignal, UnknownPipelineStage, UnknownPropertyCategory,
};
use super::scoring::{PriorityTier, Recommendation, ScoreResult};

/// Repository record pairing a property with its latest score and pipeline state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub property: PropertyRecord,
    pub score: ScoreResult,
    pub neighborhood_score: Option<u8>,
    pub stage: PipelineStage,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl LeadRecord {
    pub fn id(&self) -> &PropertyId {
        &self.property.id
    }

    pub fn view(&self) -> LeadView {
        LeadView {
            id: self.property.id.clone(),
            address: self.property.address.clone(),
            city: self.property.city.clone(),
            score: self.score.score,
            tier: self.score.tier,
            action: self.score.action.clone(),
            recommendation: self.score.recommendation,
            stage: self.stage,
            stage_label: self.stage.label(),
            list_price: self.property.list_price,
            max_offer: self.score.financials.max_offer,
            roi: self.score.financials.roi,
            neighborhood_score: self.neighborhood_score,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    /// Applies `change` to the stored record under the store's write lock and
    /// returns the result. Fails with `NotFound` when no record has `id`.
    fn modify(
        &self,
        id: &PropertyId,
        change: &mut dyn FnMut(&mut LeadRecord),
    ) -> Result<LeadRecord, RepositoryError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<LeadRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("lead already exists")]
    Conflict,
    #[error("lead not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact lead representation for listings and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct LeadView {
    pub id: PropertyId,
    pub address: String,
    pub city: String,
    pub score: u8,
    pub tier: PriorityTier,
    pub action: String,
    pub recommendation: Recommendation,
    pub stage: PipelineStage,
    pub stage_label: &'static str,
    pub list_price: u32,
    pub max_offer: f64,
    pub roi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood_score: Option<u8>,
}

/// Flat row shape for tabular stores: tags comma-joined, contact flags as booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRow {
    pub id: String,
    pub address: String,
    pub city: String,
    pub beds: u8,
    pub baths: f32,
    pub sqft: u32,
    pub year_built: u16,
    pub lot_size: f32,
    pub property_type: String,
    pub list_price: u32,
    pub estimated_value: u32,
    pub arv: Option<u32>,
    pub mortgage_balance: u32,
    pub equity_percent: u8,
    pub days_on_market: u32,
    pub price_reductions: u8,
    pub ownership_years: u8,
    pub distress_signals: String,
    pub owner_phone: bool,
    pub owner_email: bool,
    pub owner_mailing: bool,
    pub stage: String,
    pub priority_score: u8,
    pub priority_tier: String,
    pub neighborhood_score: Option<u8>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&LeadRecord> for LeadRow {
    fn from(record: &LeadRecord) -> Self {
        let property = &record.property;
        Self {
            id: property.id.0.clone(),
            address: property.address.clone(),
            city: property.city.clone(),
            beds: property.beds,
            baths: property.baths,
            sqft: property.sqft,
            year_built: property.year_built,
            lot_size: property.lot_size,
            property_type: property.property_type.label().to_string(),
            list_price: property.list_price,
            estimated_value: property.estimated_value,
            arv: property.arv,
            mortgage_balance: property.mortgage_balance,
            equity_percent: property.equity_percent,
            days_on_market: property.days_on_market,
            price_reductions: property.price_reductions,
            ownership_years: property.ownership_years,
            distress_signals: property.distress_signals.to_joined(),
            owner_phone: property.owner_contact.has_phone,
            owner_email: property.owner_contact.has_email,
            owner_mailing: property.owner_contact.has_mailing_address,
            stage: record.stage.label().to_string(),
            priority_score: record.score.score,
            priority_tier: record.score.tier.label().to_string(),
            neighborhood_score: record.neighborhood_score,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl TryFrom<LeadRow> for PropertyRecord {
    type Error = LeadRowError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PropertyId(row.id),
            address: row.address,
            city: row.city,
            sqft: row.sqft,
            beds: row.beds,
            baths: row.baths,
            year_built: row.year_built,
            lot_size: row.lot_size,
            property_type: row.property_type.parse::<PropertyCategory>()?,
            list_price: row.list_price,
            estimated_value: row.estimated_value,
            arv: row.arv,
            mortgage_balance: row.mortgage_balance,
            equity_percent: row.equity_percent,
            days_on_market: row.days_on_market,
            price_reductions: row.price_reductions,
            ownership_years: row.ownership_years,
            distress_signals: row.distress_signals.parse::<DistressSignals>()?,
            owner_contact: OwnerContact {
                has_phone: row.owner_phone,
                has_email: row.owner_email,
                has_mailing_address: row.owner_mailing,
            },
        })
    }
}

impl LeadRow {
    pub fn pipeline_stage(&self) -> Result<PipelineStage, LeadRowError> {
        Ok(self.stage.parse::<PipelineStage>()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadRowError {
    #[error(transparent)]
    Signal(#[from] UnknownDistressSignal),
    #[error(transparent)]
    Category(#[from] UnknownPropertyCategory),
    #[error(transparent)]
    Stage(#[from] UnknownPipelineStage),
}
