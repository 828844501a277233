//! After-repair value model: comparable price per square foot adjusted for
//! layout, age and market appreciation.

use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::capabilities::{Clock, RandomSource};
use super::domain::PropertyRecord;
use super::market::MarketArea;
use super::scoring::rules::ARV_AGE_MULTIPLIERS;

const BASELINE_BEDS: f64 = 3.0;
const BASELINE_BATHS: f64 = 1.5;
const PER_BED_ADJUSTMENT: f64 = 10_000.0;
const PER_BATH_ADJUSTMENT: f64 = 7_500.0;
const BOUND_SPREAD: f64 = 0.10;
const CONFIDENCE_RANGE: (i64, i64) = (75, 95);

/// Inputs behind a predicted ARV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArvAdjustments {
    /// Market price per square foot for the reference home.
    pub market_price_per_sqft: f64,
    pub base_arv: f64,
    pub bed_adjustment: f64,
    pub bath_adjustment: f64,
    pub age_multiplier: f64,
    pub appreciation_factor: f64,
}

/// Dollar figures are truncated to whole dollars; the bounds and price per
/// square foot derive from the untruncated prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArvPrediction {
    pub city: String,
    pub predicted_arv: f64,
    pub low_estimate: f64,
    pub high_estimate: f64,
    /// Placeholder in `75..=95` until comparable sales are sourced; not a
    /// statistical confidence.
    pub confidence: u8,
    /// Predicted ARV per square foot of living area.
    pub price_per_sqft: f64,
    pub appreciation_rate: f64,
    pub adjustments: ArvAdjustments,
}

pub struct ArvPredictor {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl ArvPredictor {
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self { clock, random }
    }

    pub fn predict(&self, property: &PropertyRecord, market: &MarketArea) -> ArvPrediction {
        let market_price_per_sqft = market.price_per_sqft();
        let base_arv = f64::from(property.sqft) * market_price_per_sqft;
        let bed_adjustment = (f64::from(property.beds) - BASELINE_BEDS) * PER_BED_ADJUSTMENT;
        let bath_adjustment =
            (f64::from(property.baths) - BASELINE_BATHS).max(0.0) * PER_BATH_ADJUSTMENT;

        // Raw age: an unrecorded year lands in the oldest bracket.
        let age = self.clock.today().year() - i32::from(property.year_built);
        let age_multiplier = ARV_AGE_MULTIPLIERS
            .first_match(f64::from(age))
            .copied()
            .unwrap_or(1.0);
        let appreciation_factor = 1.0 + market.appreciation / 100.0;

        let predicted_arv =
            (base_arv + bed_adjustment + bath_adjustment) * age_multiplier * appreciation_factor;
        let price_per_sqft = if property.sqft > 0 {
            (predicted_arv / f64::from(property.sqft)).trunc()
        } else {
            0.0
        };
        let confidence = self
            .random
            .int_in(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1)
            .clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1) as u8;

        ArvPrediction {
            city: market.city.clone(),
            predicted_arv: predicted_arv.trunc(),
            low_estimate: (predicted_arv * (1.0 - BOUND_SPREAD)).trunc(),
            high_estimate: (predicted_arv * (1.0 + BOUND_SPREAD)).trunc(),
            confidence,
            price_per_sqft,
            appreciation_rate: market.appreciation,
            adjustments: ArvAdjustments {
                market_price_per_sqft,
                base_arv,
                bed_adjustment,
                bath_adjustment,
                age_multiplier,
                appreciation_factor,
            },
        }
    }
}
