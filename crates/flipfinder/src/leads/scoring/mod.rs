//! Priority scoring: repairs, financial feasibility, seller motivation,
//! urgency and contactability folded into a 0-100 score and tier.

mod config;
mod financials;
mod motivation;
mod policy;
mod repairs;
pub(crate) mod rules;

pub use config::{BucketPolicy, ScoringConfig, UnknownBucketPolicy};
pub use financials::{effective_arv, FinancialAnalysis};
pub use motivation::{motivation_contributions, MotivationContribution};
pub use policy::{PriorityTier, Recommendation};
pub use repairs::{estimate_repairs, property_age, RepairEstimate};
pub use rules::Award;

use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::capabilities::{Clock, SystemClock};
use super::domain::{PropertyId, PropertyRecord};
use rules::{
    DAYS_ON_MARKET, EMAIL_AWARD, GAP_PERCENT, MAILING_AWARD, PHONE_AWARD, PRICE_REDUCTIONS,
    RETURN_ON_INVESTMENT, WINTER_AWARD, WINTER_MONTHS,
};

/// Gap percent at which a lead is flagged as priced below max offer.
const SLAM_DUNK_GAP_PERCENT: f64 = 15.0;

/// Bucket a scoring factor contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Profit,
    Motivation,
    Urgency,
    Contact,
}

impl FactorCategory {
    pub const fn ordered() -> [Self; 4] {
        [Self::Profit, Self::Motivation, Self::Urgency, Self::Contact]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profit => "profit",
            Self::Motivation => "motivation",
            Self::Urgency => "urgency",
            Self::Contact => "contact",
        }
    }
}

/// Discrete contribution to a score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub points: i16,
    pub category: FactorCategory,
}

impl ScoreFactor {
    pub fn new(label: impl Into<String>, points: i16, category: FactorCategory) -> Self {
        Self {
            label: label.into(),
            points,
            category,
        }
    }

    fn from_award(award: &Award, category: FactorCategory) -> Self {
        Self::new(award.label, award.points, category)
    }
}

/// Per-category subtotal before and after its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSubtotal {
    pub category: FactorCategory,
    pub raw: i16,
    pub capped: i16,
    pub ceiling: i16,
}

/// Scoring output for a single lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub property_id: PropertyId,
    pub score: u8,
    pub tier: PriorityTier,
    pub action: String,
    pub factors: Vec<ScoreFactor>,
    pub insights: Vec<String>,
    pub recommendation: Recommendation,
    pub financials: FinancialAnalysis,
    pub buckets: Vec<BucketSubtotal>,
}

impl ScoreResult {
    pub fn bucket(&self, category: FactorCategory) -> Option<&BucketSubtotal> {
        self.buckets
            .iter()
            .find(|bucket| bucket.category == category)
    }
}

/// Stateless evaluator applying the acquisition rubric to a property.
pub struct PriorityEngine {
    config: ScoringConfig,
    clock: Arc<dyn Clock>,
}

impl PriorityEngine {
    pub fn new(config: ScoringConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn with_system_clock(config: ScoringConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, property: &PropertyRecord) -> ScoreResult {
        let today = self.clock.today();
        let repairs = estimate_repairs(property.sqft, property.year_built, today.year());
        let financials = financials::analyze(property, repairs.total, &self.config);

        let mut factors = Vec::new();
        let mut insights = vec![repairs.insight.to_string()];

        if let Some(award) = GAP_PERCENT.first_match(financials.gap_percent) {
            factors.push(ScoreFactor::from_award(award, FactorCategory::Profit));
            if financials.gap_percent >= SLAM_DUNK_GAP_PERCENT {
                insights.push("SLAM DUNK - priced below max offer".to_string());
            }
        }
        if let Some(award) = RETURN_ON_INVESTMENT.first_match(financials.roi) {
            factors.push(ScoreFactor::from_award(award, FactorCategory::Profit));
        }

        for contribution in motivation_contributions(
            &property.distress_signals,
            property.ownership_years,
            property.equity_percent,
        ) {
            factors.push(ScoreFactor::from_award(
                &contribution.award,
                FactorCategory::Motivation,
            ));
            insights.push(contribution.insight.to_string());
        }

        if let Some(award) = DAYS_ON_MARKET.first_match(f64::from(property.days_on_market)) {
            factors.push(ScoreFactor::from_award(award, FactorCategory::Urgency));
        }
        if let Some(award) = PRICE_REDUCTIONS.first_match(f64::from(property.price_reductions)) {
            factors.push(ScoreFactor::from_award(award, FactorCategory::Urgency));
        }
        if WINTER_MONTHS.contains(&today.month()) {
            factors.push(ScoreFactor::from_award(&WINTER_AWARD, FactorCategory::Urgency));
        }

        let contact = property.owner_contact;
        for (available, award) in [
            (contact.has_phone, PHONE_AWARD),
            (contact.has_email, EMAIL_AWARD),
            (contact.has_mailing_address, MAILING_AWARD),
        ] {
            if available {
                factors.push(ScoreFactor::from_award(&award, FactorCategory::Contact));
            }
        }

        let (buckets, score) = policy::tally(&factors, self.config.bucket_policy);
        let tier = PriorityTier::from_score(score);
        let recommendation = Recommendation::classify(score, financials.roi);

        debug!(
            property_id = %property.id,
            score,
            tier = tier.label(),
            "scored lead"
        );

        ScoreResult {
            property_id: property.id.clone(),
            score,
            tier,
            action: tier.action().to_string(),
            factors,
            insights,
            recommendation,
            financials,
            buckets,
        }
    }
}
