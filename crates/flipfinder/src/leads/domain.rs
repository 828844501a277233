use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tracked properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a lead as captured from listings, skip traces, and public records.
///
/// Missing fields deserialize to the documented defaults: 1,500 sqft, 3 beds,
/// 2 baths, built 1970, five years of ownership, everything else zero or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub address: String,
    /// Market-area key used for comparable pricing.
    pub city: String,
    pub sqft: u32,
    pub beds: u8,
    pub baths: f32,
    pub year_built: u16,
    /// Lot size in acres.
    pub lot_size: f32,
    pub property_type: PropertyCategory,
    pub list_price: u32,
    pub estimated_value: u32,
    /// Known after-repair value; absent or zero falls back to a list price markup.
    pub arv: Option<u32>,
    pub mortgage_balance: u32,
    pub equity_percent: u8,
    pub days_on_market: u32,
    pub price_reductions: u8,
    pub ownership_years: u8,
    pub distress_signals: DistressSignals,
    pub owner_contact: OwnerContact,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            id: PropertyId::default(),
            address: String::new(),
            city: String::new(),
            sqft: 1500,
            beds: 3,
            baths: 2.0,
            year_built: 1970,
            lot_size: 0.0,
            property_type: PropertyCategory::default(),
            list_price: 0,
            estimated_value: 0,
            arv: None,
            mortgage_balance: 0,
            equity_percent: 0,
            days_on_market: 0,
            price_reductions: 0,
            ownership_years: 5,
            distress_signals: DistressSignals::default(),
            owner_contact: OwnerContact::default(),
        }
    }
}

/// Which channels are available to reach the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerContact {
    pub has_phone: bool,
    pub has_email: bool,
    pub has_mailing_address: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCategory {
    #[default]
    #[serde(rename = "Single Family")]
    SingleFamily,
    #[serde(rename = "Multi-Family")]
    MultiFamily,
    Condo,
    Townhouse,
    Duplex,
}

impl PropertyCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::SingleFamily,
            Self::MultiFamily,
            Self::Condo,
            Self::Townhouse,
            Self::Duplex,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "Single Family",
            Self::MultiFamily => "Multi-Family",
            Self::Condo => "Condo",
            Self::Townhouse => "Townhouse",
            Self::Duplex => "Duplex",
        }
    }
}

impl FromStr for PropertyCategory {
    type Err = UnknownPropertyCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(value);
        if wanted.is_empty() {
            return Ok(Self::default());
        }
        Self::ordered()
            .into_iter()
            .find(|category| normalize_tag(category.label()) == wanted)
            .ok_or_else(|| UnknownPropertyCategory(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized property type '{0}'")]
pub struct UnknownPropertyCategory(pub String);

/// Categorical indicator of seller motivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DistressSignal {
    PreForeclosure,
    Foreclosure,
    Auction,
    TaxLien,
    Vacant,
    AbsenteeOwner,
    ProbateEstate,
    HighEquity,
    Divorce,
    CodeViolations,
    TiredLandlord,
}

impl DistressSignal {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::PreForeclosure,
            Self::Foreclosure,
            Self::Auction,
            Self::TaxLien,
            Self::Vacant,
            Self::AbsenteeOwner,
            Self::ProbateEstate,
            Self::HighEquity,
            Self::Divorce,
            Self::CodeViolations,
            Self::TiredLandlord,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PreForeclosure => "Pre-Foreclosure",
            Self::Foreclosure => "Foreclosure",
            Self::Auction => "Auction",
            Self::TaxLien => "Tax Lien",
            Self::Vacant => "Vacant",
            Self::AbsenteeOwner => "Absentee Owner",
            Self::ProbateEstate => "Probate/Estate",
            Self::HighEquity => "High Equity",
            Self::Divorce => "Divorce",
            Self::CodeViolations => "Code Violations",
            Self::TiredLandlord => "Tired Landlord",
        }
    }
}

impl fmt::Display for DistressSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistressSignal {
    type Err = UnknownDistressSignal;

    /// Accepts the display label in any case or punctuation, so
    /// `Probate/Estate`, `probate_estate` and `PROBATE ESTATE` all resolve.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(value);
        Self::ordered()
            .into_iter()
            .find(|signal| normalize_tag(signal.label()) == wanted)
            .ok_or_else(|| UnknownDistressSignal(value.trim().to_string()))
    }
}

impl Serialize for DistressSignal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DistressSignal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized distress signal '{0}'")]
pub struct UnknownDistressSignal(pub String);

/// Set of distress tags attached to a lead.
///
/// Serializes as a list of labels; deserializes from either a list or the
/// comma-joined form used by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistressSignals(BTreeSet<DistressSignal>);

impl DistressSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, signal: DistressSignal) -> bool {
        self.0.contains(&signal)
    }

    pub fn insert(&mut self, signal: DistressSignal) -> bool {
        self.0.insert(signal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DistressSignal> + '_ {
        self.0.iter().copied()
    }

    /// Storage form, e.g. `Foreclosure,Tax Lien`.
    pub fn to_joined(&self) -> String {
        self.iter()
            .map(DistressSignal::label)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for DistressSignals {
    type Err = UnknownDistressSignal;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<DistressSignal>)
            .collect()
    }
}

impl FromIterator<DistressSignal> for DistressSignals {
    fn from_iter<I: IntoIterator<Item = DistressSignal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[DistressSignal; N]> for DistressSignals {
    fn from(signals: [DistressSignal; N]) -> Self {
        signals.into_iter().collect()
    }
}

impl Serialize for DistressSignals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for signal in self.iter() {
            seq.serialize_element(&signal)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for DistressSignals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<DistressSignal>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Joined(joined) => joined.parse().map_err(de::Error::custom),
            Raw::List(list) => Ok(list.into_iter().collect()),
        }
    }
}

/// Acquisition pipeline position for a tracked lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    NewLead,
    Contacted,
    Qualified,
    OfferMade,
    UnderContract,
    Closed,
    DeadLost,
}

impl PipelineStage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::NewLead,
            Self::Contacted,
            Self::Qualified,
            Self::OfferMade,
            Self::UnderContract,
            Self::Closed,
            Self::DeadLost,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewLead => "New Lead",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::OfferMade => "Offer Made",
            Self::UnderContract => "Under Contract",
            Self::Closed => "Closed",
            Self::DeadLost => "Dead/Lost",
        }
    }
}

impl FromStr for PipelineStage {
    type Err = UnknownPipelineStage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(value);
        Self::ordered()
            .into_iter()
            .find(|stage| normalize_tag(stage.label()) == wanted)
            .ok_or_else(|| UnknownPipelineStage(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized pipeline stage '{0}'")]
pub struct UnknownPipelineStage(pub String);

fn normalize_tag(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
