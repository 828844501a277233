//! Area desirability scoring.
//!
//! Quality metrics are not sourced from real data yet; [`SampledMetrics`] draws
//! plausible values. Swap the [`MetricsSource`] to plug in real feeds without
//! touching the scoring formula.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::capabilities::RandomSource;
use super::market::MarketArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationTrend {
    Growing,
    Stable,
    Declining,
}

impl PopulationTrend {
    pub const fn ordered() -> [Self; 3] {
        [Self::Growing, Self::Stable, Self::Declining]
    }

    pub const fn bonus(self) -> f64 {
        match self {
            Self::Growing => 10.0,
            Self::Stable => 5.0,
            Self::Declining => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Growing => "Growing",
            Self::Stable => "Stable",
            Self::Declining => "Declining",
        }
    }
}

/// Quality-of-life inputs for one market area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodMetrics {
    /// 1-10.
    pub school_rating: u8,
    /// 1-10, higher is safer.
    pub safety_rating: u8,
    /// 0-100.
    pub walkability: u8,
    /// Annual job growth, percent.
    pub job_growth: f64,
    pub population_trend: PopulationTrend,
}

pub trait MetricsSource: Send + Sync {
    fn metrics_for(&self, area: &MarketArea) -> NeighborhoodMetrics;
}

/// Draws metrics uniformly: schools 4-10, safety 3-9, walkability 20-85,
/// job growth 1.5-8.5% to one decimal.
pub struct SampledMetrics {
    random: Arc<dyn RandomSource>,
}

impl SampledMetrics {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl MetricsSource for SampledMetrics {
    fn metrics_for(&self, _area: &MarketArea) -> NeighborhoodMetrics {
        let trends = PopulationTrend::ordered();
        NeighborhoodMetrics {
            school_rating: self.random.int_in(4, 10) as u8,
            safety_rating: self.random.int_in(3, 9) as u8,
            walkability: self.random.int_in(20, 85) as u8,
            job_growth: (self.random.float_in(1.5, 8.5) * 10.0).round() / 10.0,
            population_trend: trends[self.random.pick(trends.len())],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NeighborhoodGrade {
    A,
    B,
    C,
    D,
}

impl NeighborhoodGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Self::A,
            60..=74 => Self::B,
            45..=59 => Self::C,
            _ => Self::D,
        }
    }

    pub const fn outlook(self) -> &'static str {
        match self {
            Self::A => "Excellent investment area",
            Self::B => "Good investment potential",
            Self::C => "Moderate risk/reward",
            Self::D => "Higher risk area",
        }
    }
}

impl fmt::Display for NeighborhoodGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodAssessment {
    pub city: String,
    pub score: u8,
    pub grade: NeighborhoodGrade,
    pub outlook: String,
    pub metrics: NeighborhoodMetrics,
    pub appreciation: f64,
    pub median_price: u32,
}

pub struct NeighborhoodAnalyzer {
    source: Arc<dyn MetricsSource>,
}

impl NeighborhoodAnalyzer {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self { source }
    }

    pub fn sampled(random: Arc<dyn RandomSource>) -> Self {
        Self::new(Arc::new(SampledMetrics::new(random)))
    }

    pub fn analyze(&self, area: &MarketArea) -> NeighborhoodAssessment {
        let metrics = self.source.metrics_for(area);
        let score = neighborhood_score(&metrics, area.appreciation);
        let grade = NeighborhoodGrade::from_score(score);

        NeighborhoodAssessment {
            city: area.city.clone(),
            score,
            grade,
            outlook: grade.outlook().to_string(),
            metrics,
            appreciation: area.appreciation,
            median_price: area.median_price,
        }
    }
}

/// `2*school + 2*safety + walkability/10 + 2*job_growth + appreciation/2 + trend`,
/// truncated and clamped to `0..=100`.
pub fn neighborhood_score(metrics: &NeighborhoodMetrics, appreciation: f64) -> u8 {
    let raw = 2.0 * f64::from(metrics.school_rating)
        + 2.0 * f64::from(metrics.safety_rating)
        + f64::from(metrics.walkability) / 10.0
        + 2.0 * metrics.job_growth
        + appreciation / 2.0
        + metrics.population_trend.bonus();

    raw.trunc().clamp(0.0, 100.0) as u8
}
