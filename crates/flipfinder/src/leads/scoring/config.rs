use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tunable constants of the acquisition rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub bucket_policy: BucketPolicy,
    /// Share of ARV an investor may commit before repairs (the 70% rule).
    pub max_offer_ratio: f64,
    /// Combined holding and selling cost, as a share of ARV.
    pub carrying_cost_ratio: f64,
    /// ARV assumed from list price when no estimate is known.
    pub arv_fallback_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bucket_policy: BucketPolicy::default(),
            max_offer_ratio: 0.70,
            carrying_cost_ratio: 0.13,
            arv_fallback_multiplier: 1.2,
        }
    }
}

impl ScoringConfig {
    pub fn with_bucket_policy(mut self, policy: BucketPolicy) -> Self {
        self.bucket_policy = policy;
        self
    }
}

/// How per-category ceilings feed the total score.
///
/// `Advisory` reports ceilings but sums raw subtotals, so only the grand total
/// is clamped. `Enforced` sums the capped subtotals instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPolicy {
    #[default]
    Advisory,
    Enforced,
}

impl BucketPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Enforced => "enforced",
        }
    }
}

impl fmt::Display for BucketPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BucketPolicy {
    type Err = UnknownBucketPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "enforced" => Ok(Self::Enforced),
            _ => Err(UnknownBucketPolicy(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bucket policy '{0}' (expected 'advisory' or 'enforced')")]
pub struct UnknownBucketPolicy(pub String);
