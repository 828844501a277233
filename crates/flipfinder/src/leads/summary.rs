use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::PipelineStage;
use super::repository::LeadRecord;
use super::scoring::PriorityTier;

const TOP_CITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: PriorityTier,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: PipelineStage,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Dashboard rollup over every tracked lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_leads: usize,
    pub hot_leads: usize,
    /// Sum of list prices.
    pub pipeline_value: u64,
    pub average_score: f64,
    pub average_roi: f64,
    pub tiers: Vec<TierCount>,
    pub stages: Vec<StageCount>,
    pub top_cities: Vec<CityCount>,
}

impl PipelineSummary {
    pub fn from_records(records: &[LeadRecord]) -> Self {
        let total_leads = records.len();

        let tiers: Vec<TierCount> = PriorityTier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                count: records
                    .iter()
                    .filter(|record| record.score.tier == tier)
                    .count(),
            })
            .collect();

        let stages = PipelineStage::ordered()
            .into_iter()
            .map(|stage| StageCount {
                stage,
                label: stage.label(),
                count: records.iter().filter(|record| record.stage == stage).count(),
            })
            .collect();

        let mut by_city: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            let city = record.property.city.trim();
            if !city.is_empty() {
                *by_city.entry(city).or_default() += 1;
            }
        }
        let mut top_cities: Vec<CityCount> = by_city
            .into_iter()
            .map(|(city, count)| CityCount {
                city: city.to_string(),
                count,
            })
            .collect();
        // BTreeMap order keeps ties alphabetical under the stable sort.
        top_cities.sort_by(|a, b| b.count.cmp(&a.count));
        top_cities.truncate(TOP_CITY_LIMIT);

        let (average_score, average_roi) = if total_leads == 0 {
            (0.0, 0.0)
        } else {
            let scores: f64 = records.iter().map(|r| f64::from(r.score.score)).sum();
            let rois: f64 = records.iter().map(|r| r.score.financials.roi).sum();
            (scores / total_leads as f64, rois / total_leads as f64)
        };

        Self {
            total_leads,
            hot_leads: tiers
                .iter()
                .find(|entry| entry.tier == PriorityTier::Hot)
                .map(|entry| entry.count)
                .unwrap_or(0),
            pipeline_value: records
                .iter()
                .map(|record| u64::from(record.property.list_price))
                .sum(),
            average_score,
            average_roi,
            tiers,
            stages,
            top_cities,
        }
    }
}
