use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use crate::leads::domain::PropertyRecord;

/// Acquisition economics for one lead under the 70% rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub max_offer: f64,
    pub estimated_repairs: f64,
    pub gap_percent: f64,
    pub roi: f64,
    pub net_profit: f64,
    pub total_investment: f64,
}

/// ARV used for scoring: the known estimate, else a markup on list price.
pub fn effective_arv(property: &PropertyRecord, config: &ScoringConfig) -> f64 {
    match property.arv {
        Some(arv) if arv > 0 => f64::from(arv),
        _ => (f64::from(property.list_price) * config.arv_fallback_multiplier).trunc(),
    }
}

pub fn analyze(
    property: &PropertyRecord,
    estimated_repairs: f64,
    config: &ScoringConfig,
) -> FinancialAnalysis {
    let arv = effective_arv(property, config);
    let list_price = f64::from(property.list_price);

    let max_offer = arv * config.max_offer_ratio - estimated_repairs;
    let gap = max_offer - list_price;
    let gap_percent = if arv > 0.0 { gap / arv * 100.0 } else { 0.0 };

    let total_investment = list_price + estimated_repairs + arv * config.carrying_cost_ratio;
    let net_profit = arv - total_investment;
    let roi = if total_investment > 0.0 {
        net_profit / total_investment * 100.0
    } else {
        0.0
    };

    FinancialAnalysis {
        max_offer,
        estimated_repairs,
        gap_percent,
        roi,
        net_profit,
        total_investment,
    }
}
