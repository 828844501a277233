//! Synthetic Michigan leads for demos and load testing.

use super::capabilities::RandomSource;
use super::domain::{
    DistressSignal, DistressSignals, OwnerContact, PipelineStage, PropertyCategory, PropertyId,
    PropertyRecord,
};
use super::market::{MarketArea, MarketCatalog};

const STREET_NAMES: [&str; 15] = [
    "Main St",
    "Oak Ave",
    "Maple Dr",
    "Washington Blvd",
    "Jefferson Ave",
    "Lincoln Rd",
    "Park Place",
    "Cedar Lane",
    "Elm St",
    "Pine Ave",
    "Highland Dr",
    "Lake Shore Dr",
    "River Rd",
    "Forest Ave",
    "Sunset Blvd",
];

const BEDS: [u8; 4] = [2, 3, 4, 5];
const BED_WEIGHTS: [u32; 4] = [15, 45, 30, 10];
const BATHS: [f32; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];
const BATH_WEIGHTS: [u32; 5] = [10, 20, 40, 20, 10];
const SIGNAL_COUNT_WEIGHTS: [u32; 6] = [20, 25, 25, 15, 10, 5];
const PRICE_REDUCTION_WEIGHTS: [u32; 4] = [50, 30, 15, 5];
const STAGE_WEIGHTS: [u32; 7] = [40, 20, 15, 10, 8, 5, 2];

const PHONE_RATE: f64 = 0.7;
const EMAIL_RATE: f64 = 0.5;

/// A generated lead plus the pipeline stage it should be filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoLead {
    pub property: PropertyRecord,
    pub stage: PipelineStage,
}

pub fn generate_demo_leads(
    count: usize,
    random: &dyn RandomSource,
    catalog: &MarketCatalog,
) -> Vec<DemoLead> {
    let mut areas: Vec<&MarketArea> = catalog.areas().collect();
    if areas.is_empty() {
        areas.push(catalog.fallback());
    }

    (1..=count)
        .map(|ordinal| {
            let area = areas[random.pick(areas.len())];
            DemoLead {
                property: demo_property(ordinal, area, random),
                stage: PipelineStage::ordered()[random.weighted(&STAGE_WEIGHTS)],
            }
        })
        .collect()
}

fn demo_property(ordinal: usize, area: &MarketArea, random: &dyn RandomSource) -> PropertyRecord {
    let beds = BEDS[random.weighted(&BED_WEIGHTS)];
    let baths = BATHS[random.weighted(&BATH_WEIGHTS)];
    let sqft = random.int_in(800, 3500) as u32;
    let year_built = random.int_in(1920, 2015) as u16;
    let lot_size = (random.float_in(0.1, 0.8) * 100.0).round() as f32 / 100.0;

    let price_variance = random.float_in(0.5, 1.5);
    let list_price =
        (f64::from(area.median_price) * price_variance * f64::from(sqft) / MarketArea::REFERENCE_SQFT)
            as u32;

    let distress_signals = sample_signals(random.weighted(&SIGNAL_COUNT_WEIGHTS), random);

    let ownership_years = random.int_in(1, 30) as u8;
    let equity_percent = match ownership_years {
        16.. => random.int_in(70, 100),
        8..=15 => random.int_in(40, 80),
        _ => random.int_in(10, 50),
    } as u8;

    let facing_foreclosure = distress_signals.contains(DistressSignal::Foreclosure)
        || distress_signals.contains(DistressSignal::PreForeclosure);
    let days_on_market = if facing_foreclosure {
        random.int_in(60, 180)
    } else {
        random.int_in(5, 120)
    } as u32;

    let categories = PropertyCategory::ordered();
    let list = f64::from(list_price);

    PropertyRecord {
        id: PropertyId(format!("prop_{ordinal:04}")),
        address: format!(
            "{} {}",
            random.int_in(100, 9999),
            STREET_NAMES[random.pick(STREET_NAMES.len())]
        ),
        city: area.city.clone(),
        sqft,
        beds,
        baths,
        year_built,
        lot_size,
        property_type: categories[random.pick(categories.len())],
        list_price,
        estimated_value: (list * random.float_in(0.95, 1.1)) as u32,
        arv: Some((list * random.float_in(1.15, 1.4)) as u32),
        mortgage_balance: (list * f64::from(100 - equity_percent) / 100.0) as u32,
        equity_percent,
        days_on_market,
        price_reductions: random.weighted(&PRICE_REDUCTION_WEIGHTS) as u8,
        ownership_years,
        distress_signals,
        owner_contact: OwnerContact {
            has_phone: random.chance(PHONE_RATE),
            has_email: random.chance(EMAIL_RATE),
            has_mailing_address: true,
        },
    }
}

/// Draws `count` distinct tags.
fn sample_signals(count: usize, random: &dyn RandomSource) -> DistressSignals {
    let mut pool = DistressSignal::ordered().to_vec();
    let mut signals = DistressSignals::new();
    for _ in 0..count.min(pool.len()) {
        signals.insert(pool.swap_remove(random.pick(pool.len())));
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::capabilities::SeededRandom;

    #[test]
    fn same_seed_generates_same_leads() {
        let catalog = MarketCatalog::michigan();
        let first = generate_demo_leads(12, &SeededRandom::new(42), &catalog);
        let second = generate_demo_leads(12, &SeededRandom::new(42), &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn generated_leads_stay_within_documented_ranges() {
        let catalog = MarketCatalog::michigan();
        let leads = generate_demo_leads(200, &SeededRandom::new(7), &catalog);

        assert_eq!(leads.len(), 200);
        assert_eq!(leads[0].property.id.as_str(), "prop_0001");
        for lead in &leads {
            let property = &lead.property;
            assert!((800..=3500).contains(&property.sqft));
            assert!((1920..=2015).contains(&property.year_built));
            assert!((2..=5).contains(&property.beds));
            assert!(property.distress_signals.len() <= 5);
            assert!(property.equity_percent <= 100);
            assert!(property.owner_contact.has_mailing_address);
            assert!(catalog.contains(&property.city));
            if property.ownership_years > 15 {
                assert!(property.equity_percent >= 70);
            }
            if property.distress_signals.contains(DistressSignal::Foreclosure) {
                assert!(property.days_on_market >= 60);
            }
        }
    }
}
