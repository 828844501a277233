//! Ordered threshold tables shared by every bucketed rule in the engine.
//!
//! A table is evaluated top to bottom and the first admitting row wins, so
//! rows must be ordered from most to least restrictive.

use super::FactorCategory;
use crate::leads::domain::DistressSignal;

/// Comparison a value must satisfy for a rule row to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    AtLeast(f64),
    Above(f64),
    AtMost(f64),
    Always,
}

impl Threshold {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Threshold::AtLeast(bound) => value >= bound,
            Threshold::Above(bound) => value > bound,
            Threshold::AtMost(bound) => value <= bound,
            Threshold::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule<T: 'static> {
    pub threshold: Threshold,
    pub outcome: T,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    rules: &'static [Rule<T>],
}

impl<T> RuleTable<T> {
    pub const fn new(rules: &'static [Rule<T>]) -> Self {
        Self { rules }
    }

    pub fn first_match(&self, value: f64) -> Option<&'static T> {
        self.rules
            .iter()
            .find(|rule| rule.threshold.admits(value))
            .map(|rule| &rule.outcome)
    }

    pub fn rules(&self) -> &'static [Rule<T>] {
        self.rules
    }
}

/// Points granted by a scoring row, with the factor label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub points: i16,
    pub label: &'static str,
}

macro_rules! award_table {
    ($($threshold:expr => $points:expr, $label:expr;)+) => {
        RuleTable {
            rules: &[$(Rule {
                threshold: $threshold,
                outcome: Award {
                    points: $points,
                    label: $label,
                },
            }),+],
        }
    };
}

/// Margin between max offer and list price, as a percent of ARV.
pub const GAP_PERCENT: RuleTable<Award> = award_table! {
    Threshold::AtLeast(15.0) => 25, "Excellent price gap (15%+)";
    Threshold::AtLeast(10.0) => 20, "Great price gap (10%+)";
    Threshold::AtLeast(5.0) => 15, "Good price gap (5%+)";
    Threshold::AtLeast(0.0) => 10, "At max offer";
    Threshold::AtLeast(-10.0) => 5, "Negotiable";
};

pub const RETURN_ON_INVESTMENT: RuleTable<Award> = award_table! {
    Threshold::AtLeast(30.0) => 15, "Excellent ROI (30%+)";
    Threshold::AtLeast(20.0) => 12, "Strong ROI (20%+)";
    Threshold::AtLeast(15.0) => 8, "Good ROI (15%+)";
    Threshold::AtLeast(10.0) => 5, "Fair ROI (10%+)";
};

pub const DAYS_ON_MARKET: RuleTable<Award> = award_table! {
    Threshold::AtLeast(90.0) => 8, "Stale listing (90+ days)";
    Threshold::AtLeast(60.0) => 5, "Getting stale (60+ days)";
};

pub const PRICE_REDUCTIONS: RuleTable<Award> = award_table! {
    Threshold::AtLeast(2.0) => 8, "Multiple price drops";
    Threshold::AtLeast(1.0) => 5, "Price reduced";
};

/// Distinct distress tags on one lead; the higher tier wins.
pub const SIGNAL_COUNT: RuleTable<Award> = award_table! {
    Threshold::AtLeast(5.0) => 8, "5+ distress signals";
    Threshold::AtLeast(3.0) => 5, "Multiple distress signals";
};

/// Rehab budget per square foot for one age bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairBracket {
    pub cost_per_sqft: f64,
    pub insight: &'static str,
}

/// Keyed on property age in years.
pub const REPAIR_BRACKETS: RuleTable<RepairBracket> = RuleTable {
    rules: &[
        Rule {
            threshold: Threshold::Above(50.0),
            outcome: RepairBracket {
                cost_per_sqft: 65.0,
                insight: "Older home - budget for major systems",
            },
        },
        Rule {
            threshold: Threshold::Above(30.0),
            outcome: RepairBracket {
                cost_per_sqft: 45.0,
                insight: "Medium-age home - updates likely",
            },
        },
        Rule {
            threshold: Threshold::Above(15.0),
            outcome: RepairBracket {
                cost_per_sqft: 30.0,
                insight: "Newer construction - mostly cosmetic",
            },
        },
        Rule {
            threshold: Threshold::Always,
            outcome: RepairBracket {
                cost_per_sqft: 20.0,
                insight: "Very new - minimal repairs expected",
            },
        },
    ],
};

/// ARV multiplier keyed on property age in years.
pub const ARV_AGE_MULTIPLIERS: RuleTable<f64> = RuleTable {
    rules: &[
        Rule {
            threshold: Threshold::AtMost(10.0),
            outcome: 1.15,
        },
        Rule {
            threshold: Threshold::AtMost(25.0),
            outcome: 1.05,
        },
        Rule {
            threshold: Threshold::AtMost(50.0),
            outcome: 1.0,
        },
        Rule {
            threshold: Threshold::Always,
            outcome: 0.92,
        },
    ],
};

/// Motivation points per distress tag, in reporting order, with the insight
/// surfaced when the tag is present.
pub const SIGNAL_AWARDS: [(DistressSignal, Award, &str); 8] = [
    (
        DistressSignal::Foreclosure,
        Award {
            points: 15,
            label: "Active foreclosure",
        },
        "URGENT - facing a sale deadline",
    ),
    (
        DistressSignal::PreForeclosure,
        Award {
            points: 12,
            label: "Pre-foreclosure",
        },
        "Behind on payments - motivated to sell before the auction",
    ),
    (
        DistressSignal::ProbateEstate,
        Award {
            points: 12,
            label: "Inherited/estate",
        },
        "Inherited property - heirs often prefer a quick sale",
    ),
    (
        DistressSignal::TaxLien,
        Award {
            points: 10,
            label: "Tax lien",
        },
        "Tax debt outstanding - a cash offer solves a problem",
    ),
    (
        DistressSignal::Divorce,
        Award {
            points: 10,
            label: "Divorce",
        },
        "Divorce sale - both parties want a clean exit",
    ),
    (
        DistressSignal::Vacant,
        Award {
            points: 8,
            label: "Vacant property",
        },
        "Vacant - owner is carrying costs with no occupant",
    ),
    (
        DistressSignal::TiredLandlord,
        Award {
            points: 8,
            label: "Tired landlord",
        },
        "Tired landlord - open to offloading the rental",
    ),
    (
        DistressSignal::AbsenteeOwner,
        Award {
            points: 6,
            label: "Absentee owner",
        },
        "Absentee owner - little attachment to the property",
    ),
];

pub const LONG_OWNERSHIP_YEARS: u8 = 15;
pub const LONG_OWNERSHIP_AWARD: Award = Award {
    points: 5,
    label: "Long ownership (15+ yrs)",
};

pub const HIGH_EQUITY_PERCENT: u8 = 70;
pub const HIGH_EQUITY_AWARD: Award = Award {
    points: 6,
    label: "High equity (70%+)",
};

pub const FREE_AND_CLEAR_PERCENT: u8 = 95;
pub const FREE_AND_CLEAR_AWARD: Award = Award {
    points: 5,
    label: "Free & clear",
};

pub const PHONE_AWARD: Award = Award {
    points: 5,
    label: "Phone available",
};
pub const EMAIL_AWARD: Award = Award {
    points: 3,
    label: "Email available",
};
pub const MAILING_AWARD: Award = Award {
    points: 2,
    label: "Mailing address",
};

/// Months (1-based) when sellers list less and motivated owners stand out.
pub const WINTER_MONTHS: [u32; 4] = [11, 12, 1, 2];
pub const WINTER_AWARD: Award = Award {
    points: 3,
    label: "Winter season",
};

/// Per-bucket ceilings: profit, motivation, urgency, contact.
pub const BUCKET_CEILINGS: [(FactorCategory, i16); 4] = [
    (FactorCategory::Profit, 40),
    (FactorCategory::Motivation, 35),
    (FactorCategory::Urgency, 15),
    (FactorCategory::Contact, 10),
];
