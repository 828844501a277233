use serde::{Deserialize, Serialize};

/// Holding period assumed when the caller does not give one.
pub const DEFAULT_HOLDING_MONTHS: u8 = 4;
const MAX_HOLDING_MONTHS: u8 = 12;

const MONTHLY_HOLDING_RATE: f64 = 0.01;
const SELLING_COST_RATE: f64 = 0.09;
const MAX_OFFER_RATIO: f64 = 0.70;

/// Inputs to the standalone deal calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealInputs {
    pub purchase_price: f64,
    pub arv: f64,
    pub repairs: f64,
    #[serde(default = "default_holding_months")]
    pub holding_months: u8,
}

fn default_holding_months() -> u8 {
    DEFAULT_HOLDING_MONTHS
}

/// Flip economics for a negotiated purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub holding_months: u8,
    pub holding_costs: f64,
    pub selling_costs: f64,
    pub total_investment: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub max_offer: f64,
    pub verdict: DealVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealVerdict {
    GoodDeal,
    DecentDeal,
    Marginal,
    Pass,
}

impl DealVerdict {
    pub fn classify(roi: f64, net_profit: f64) -> Self {
        if roi >= 20.0 && net_profit >= 20_000.0 {
            Self::GoodDeal
        } else if roi >= 15.0 {
            Self::DecentDeal
        } else if roi >= 10.0 {
            Self::Marginal
        } else {
            Self::Pass
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GoodDeal => "GOOD DEAL",
            Self::DecentDeal => "DECENT DEAL",
            Self::Marginal => "MARGINAL",
            Self::Pass => "PASS",
        }
    }
}

/// Holding costs run 1% of ARV per month and selling costs 9% of ARV.
/// Holding months are clamped to `1..=12`.
pub fn estimate_deal_economics(
    purchase_price: f64,
    arv: f64,
    repairs: f64,
    holding_months: u8,
) -> DealAnalysis {
    let holding_months = holding_months.clamp(1, MAX_HOLDING_MONTHS);
    let holding_costs = arv * MONTHLY_HOLDING_RATE * f64::from(holding_months);
    let selling_costs = arv * SELLING_COST_RATE;
    let total_investment = purchase_price + repairs + holding_costs + selling_costs;
    let net_profit = arv - total_investment;
    let roi = if total_investment > 0.0 {
        net_profit / total_investment * 100.0
    } else {
        0.0
    };

    DealAnalysis {
        holding_months,
        holding_costs,
        selling_costs,
        total_investment,
        net_profit,
        roi,
        max_offer: arv * MAX_OFFER_RATIO - repairs,
        verdict: DealVerdict::classify(roi, net_profit),
    }
}

impl DealInputs {
    pub fn analyze(&self) -> DealAnalysis {
        estimate_deal_economics(self.purchase_price, self.arv, self.repairs, self.holding_months)
    }
}
