use serde::{Deserialize, Serialize};

use super::config::BucketPolicy;
use super::rules::BUCKET_CEILINGS;
use super::{BucketSubtotal, FactorCategory, ScoreFactor};

/// Outreach priority derived from the clamped total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    Hot,
    Warm,
    Nurture,
    Monitor,
}

impl PriorityTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Hot, Self::Warm, Self::Nurture, Self::Monitor]
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Self::Hot,
            55..=74 => Self::Warm,
            35..=54 => Self::Nurture,
            _ => Self::Monitor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Warm => "WARM",
            Self::Nurture => "NURTURE",
            Self::Monitor => "MONITOR",
        }
    }

    pub const fn action(self) -> &'static str {
        match self {
            Self::Hot => "Call today - drop everything",
            Self::Warm => "Contact within 48 hours",
            Self::Nurture => "Add to drip campaign",
            Self::Monitor => "Watch for price drops",
        }
    }
}

/// Coarser verdict layered over the tier, combining score with ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    GoodOpportunity,
    NeedsWork,
    Pass,
}

impl Recommendation {
    pub fn classify(score: u8, roi: f64) -> Self {
        if score >= 75 && roi >= 20.0 {
            Self::StrongBuy
        } else if score >= 55 && roi >= 15.0 {
            Self::GoodOpportunity
        } else if score >= 35 {
            Self::NeedsWork
        } else {
            Self::Pass
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY - all signals align for profit",
            Self::GoodOpportunity => "GOOD OPPORTUNITY - worth pursuing",
            Self::NeedsWork => "NEEDS WORK - negotiate hard or wait",
            Self::Pass => "PASS - numbers don't work at current price",
        }
    }
}

/// Groups factor points per category and folds them into the clamped total.
pub(crate) fn tally(factors: &[ScoreFactor], policy: BucketPolicy) -> (Vec<BucketSubtotal>, u8) {
    let buckets: Vec<BucketSubtotal> = BUCKET_CEILINGS
        .iter()
        .map(|(category, ceiling)| {
            let raw = subtotal(factors, *category);
            BucketSubtotal {
                category: *category,
                raw,
                capped: raw.min(*ceiling),
                ceiling: *ceiling,
            }
        })
        .collect();

    let sum: i32 = buckets
        .iter()
        .map(|bucket| match policy {
            BucketPolicy::Advisory => i32::from(bucket.raw),
            BucketPolicy::Enforced => i32::from(bucket.capped),
        })
        .sum();

    (buckets, sum.clamp(0, 100) as u8)
}

fn subtotal(factors: &[ScoreFactor], category: FactorCategory) -> i16 {
    factors
        .iter()
        .filter(|factor| factor.category == category)
        .map(|factor| factor.points)
        .sum()
}
