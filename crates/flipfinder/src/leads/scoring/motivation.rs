use super::rules::{
    Award, FREE_AND_CLEAR_AWARD, FREE_AND_CLEAR_PERCENT, HIGH_EQUITY_AWARD, HIGH_EQUITY_PERCENT,
    LONG_OWNERSHIP_AWARD, LONG_OWNERSHIP_YEARS, SIGNAL_AWARDS, SIGNAL_COUNT,
};
use crate::leads::domain::DistressSignals;

/// One fired motivation rule and the insight it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotivationContribution {
    pub award: Award,
    pub insight: &'static str,
}

impl MotivationContribution {
    pub fn points(&self) -> i16 {
        self.award.points
    }
}

/// Table lookup over distress tags, tenure and equity.
///
/// The result is uncapped; bucket ceilings are applied by the scoring policy.
pub fn motivation_contributions(
    signals: &DistressSignals,
    ownership_years: u8,
    equity_percent: u8,
) -> Vec<MotivationContribution> {
    let mut contributions: Vec<MotivationContribution> = SIGNAL_AWARDS
        .iter()
        .filter(|(signal, _, _)| signals.contains(*signal))
        .map(|(_, award, insight)| MotivationContribution {
            award: *award,
            insight: *insight,
        })
        .collect();

    if ownership_years >= LONG_OWNERSHIP_YEARS {
        contributions.push(MotivationContribution {
            award: LONG_OWNERSHIP_AWARD,
            insight: "Long-term owner - likely sitting on equity",
        });
    }

    if equity_percent >= HIGH_EQUITY_PERCENT {
        contributions.push(MotivationContribution {
            award: HIGH_EQUITY_AWARD,
            insight: "High equity - room to negotiate",
        });
    }

    if equity_percent >= FREE_AND_CLEAR_PERCENT {
        contributions.push(MotivationContribution {
            award: FREE_AND_CLEAR_AWARD,
            insight: "Free and clear - no lender to satisfy",
        });
    }

    if let Some(award) = SIGNAL_COUNT.first_match(signals.len() as f64) {
        contributions.push(MotivationContribution {
            award: *award,
            insight: "Stacked distress signals - highly motivated seller",
        });
    }

    contributions
}
