use super::common::*;
use crate::leads::capabilities::SeededRandom;
use crate::leads::demo::generate_demo_leads;
use crate::leads::domain::{DistressSignal, DistressSignals, PropertyRecord};
use crate::leads::market::MarketCatalog;
use crate::leads::scoring::{
    FactorCategory, PriorityEngine, PriorityTier, Recommendation, ScoringConfig,
};

#[test]
fn engine_saturates_every_bucket_for_hot_lead() {
    let result = engine().score(&hot_lead());

    assert_eq!(result.score, 100);
    assert_eq!(result.tier, PriorityTier::Hot);
    assert_eq!(result.action, "Call today - drop everything");
    assert_eq!(result.recommendation, Recommendation::StrongBuy);

    let financials = result.financials;
    assert!(approx_eq(financials.estimated_repairs, 30_000.0));
    assert!(approx_eq(financials.max_offer, 75_000.0));
    assert!(approx_eq(financials.total_investment, 104_500.0));
    assert!(approx_eq(financials.net_profit, 45_500.0));
    assert!((financials.gap_percent - 13.333).abs() < 0.01);
    assert!((financials.roi - 43.54).abs() < 0.01);

    let profit = result.bucket(FactorCategory::Profit).expect("profit bucket");
    assert_eq!((profit.raw, profit.capped), (35, 35));
    let urgency = result.bucket(FactorCategory::Urgency).expect("urgency bucket");
    assert_eq!((urgency.raw, urgency.capped), (16, 15));
    let contact = result.bucket(FactorCategory::Contact).expect("contact bucket");
    assert_eq!(contact.raw, 10);
}

#[test]
fn motivation_bucket_reports_raw_and_capped_subtotals() {
    let property = PropertyRecord {
        ownership_years: 4,
        equity_percent: 20,
        ..hot_lead()
    };

    let result = engine().score(&property);
    let motivation = result
        .bucket(FactorCategory::Motivation)
        .expect("motivation bucket");

    assert_eq!(motivation.raw, 15 + 12 + 12 + 5);
    assert_eq!(motivation.capped, 35);
    assert_eq!(motivation.ceiling, 35);
}

#[test]
fn enforced_policy_caps_each_bucket_before_summing() {
    let advisory = engine().score(&hot_lead());
    let enforced = enforced_engine().score(&hot_lead());

    assert_eq!(advisory.score, 100);
    assert_eq!(enforced.score, 35 + 35 + 15 + 10);
    assert_eq!(advisory.factors, enforced.factors);
}

#[test]
fn bare_lead_lands_in_monitor_tier() {
    let result = engine().score(&clean_lead());

    assert_eq!(result.score, 0);
    assert_eq!(result.tier, PriorityTier::Monitor);
    assert_eq!(result.recommendation, Recommendation::Pass);
    assert!(result.factors.is_empty());
    // Unknown year is treated as fifty years old.
    assert_eq!(
        result.insights,
        vec!["Medium-age home - updates likely".to_string()]
    );
}

#[test]
fn winter_months_add_seasonal_urgency() {
    let engine = PriorityEngine::new(ScoringConfig::default(), january_clock());
    let result = engine.score(&clean_lead());

    assert_eq!(result.score, 3);
    assert_eq!(result.tier, PriorityTier::Monitor);
    assert!(result
        .factors
        .iter()
        .any(|factor| factor.label == "Winter season" && factor.category == FactorCategory::Urgency));
}

#[test]
fn scoring_is_repeatable_with_fixed_clock() {
    let engine = engine();
    let lead = hot_lead();
    assert_eq!(engine.score(&lead), engine.score(&lead));
}

#[test]
fn lower_list_price_never_reduces_profit_subtotal() {
    let engine = engine();
    let mut previous = i16::MIN;

    for list_price in (20_000..=140_000).rev().step_by(5_000) {
        let result = engine.score(&lead_with("mono", "Flint", list_price));
        let profit = result
            .bucket(FactorCategory::Profit)
            .expect("profit bucket")
            .raw;
        assert!(
            profit >= previous,
            "profit fell from {previous} to {profit} at list price {list_price}"
        );
        previous = profit;
    }
    assert_eq!(previous, 40);
}

#[test]
fn deep_discount_is_flagged_as_slam_dunk() {
    let result = engine().score(&lead_with("deal", "Flint", 40_000));

    assert!(result.financials.gap_percent >= 15.0);
    assert!(result
        .insights
        .iter()
        .any(|insight| insight.starts_with("SLAM DUNK")));
    assert_eq!(result.factors[0].label, "Excellent price gap (15%+)");
}

#[test]
fn missing_arv_falls_back_to_list_price_markup() {
    let property = PropertyRecord {
        arv: Some(0),
        ..lead_with("no-arv", "Flint", 100_000)
    };
    let result = engine().score(&property);

    // 120,000 * 0.7 - 30,000 repairs
    assert!(approx_eq(result.financials.max_offer, 54_000.0));
}

#[test]
fn foreclosure_adds_urgent_insight() {
    let property = PropertyRecord {
        distress_signals: DistressSignals::from([DistressSignal::Foreclosure]),
        ..clean_lead()
    };
    let result = engine().score(&property);

    assert!(result
        .insights
        .iter()
        .any(|insight| insight.starts_with("URGENT")));
    assert_eq!(result.score, 15);
}

#[test]
fn generated_leads_score_within_bounds_and_tier() {
    let leads = generate_demo_leads(150, &SeededRandom::new(2024), &MarketCatalog::michigan());
    let engine = engine();

    for lead in leads {
        let result = engine.score(&lead.property);
        assert!(result.score <= 100);
        assert_eq!(result.tier, PriorityTier::from_score(result.score));
    }
}
