use super::rules::{RepairBracket, REPAIR_BRACKETS};

/// Construction years at or below this are treated as unknown.
pub const UNKNOWN_YEAR_CUTOFF: u16 = 1800;
/// Age assumed when the construction year is unknown.
pub const UNKNOWN_AGE_YEARS: i32 = 50;

const FLOOR_BRACKET: RepairBracket = RepairBracket {
    cost_per_sqft: 20.0,
    insight: "Very new - minimal repairs expected",
};

/// Rehab budget derived from property age and living area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairEstimate {
    pub age_years: i32,
    pub cost_per_sqft: f64,
    pub total: f64,
    pub insight: &'static str,
}

/// Years since construction as of `current_year`, with the unknown-year sentinel applied.
pub fn property_age(year_built: u16, current_year: i32) -> i32 {
    if year_built <= UNKNOWN_YEAR_CUTOFF {
        UNKNOWN_AGE_YEARS
    } else {
        current_year - i32::from(year_built)
    }
}

pub fn estimate_repairs(sqft: u32, year_built: u16, current_year: i32) -> RepairEstimate {
    let age_years = property_age(year_built, current_year);
    let bracket = REPAIR_BRACKETS
        .first_match(f64::from(age_years))
        .copied()
        .unwrap_or(FLOOR_BRACKET);

    RepairEstimate {
        age_years,
        cost_per_sqft: bracket.cost_per_sqft,
        total: bracket.cost_per_sqft * f64::from(sqft),
        insight: bracket.insight,
    }
}
