use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::domain::{
    DistressSignals, OwnerContact, PropertyCategory, PropertyId, PropertyRecord,
    UnknownDistressSignal, UnknownPropertyCategory,
};

/// Reads leads from a CSV file on disk.
pub fn import_leads_from_path(path: &Path) -> Result<Vec<PropertyRecord>, LeadImportError> {
    let file = File::open(path)?;
    import_leads(file)
}

/// Parses leads from CSV using the storage column names.
///
/// Empty or missing cells fall back to the [`PropertyRecord`] defaults. Owner
/// contact columns count as present when they hold anything other than a
/// negative flag, so both phone numbers and `true`/`false` work.
pub fn import_leads<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut leads = Vec::new();

    for (index, record) in csv_reader.deserialize::<ImportRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        leads.push(row.into_property(index + 2)?);
    }

    Ok(leads)
}

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },
    UnknownSignal {
        line: usize,
        source: UnknownDistressSignal,
    },
    UnknownCategory {
        line: usize,
        source: UnknownPropertyCategory,
    },
}

impl fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead file: {err}"),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {err}"),
            LeadImportError::InvalidField {
                line,
                column,
                value,
            } => write!(f, "line {line}: '{value}' is not a valid {column}"),
            LeadImportError::UnknownSignal { line, source } => write!(f, "line {line}: {source}"),
            LeadImportError::UnknownCategory { line, source } => {
                write!(f, "line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::InvalidField { .. } => None,
            LeadImportError::UnknownSignal { source, .. } => Some(source),
            LeadImportError::UnknownCategory { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    beds: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    baths: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    sqft: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    year_built: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    lot_size: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    list_price: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    estimated_value: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    arv: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    mortgage_balance: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    equity_percent: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    days_on_market: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    price_reductions: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    ownership_years: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    distress_signals: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    owner_phone: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    owner_email: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    owner_mailing: Option<String>,
}

impl ImportRow {
    fn into_property(self, line: usize) -> Result<PropertyRecord, LeadImportError> {
        let defaults = PropertyRecord::default();

        let property_type = match self.property_type.as_deref() {
            Some(raw) => raw
                .parse::<PropertyCategory>()
                .map_err(|source| LeadImportError::UnknownCategory { line, source })?,
            None => defaults.property_type,
        };
        let distress_signals = match self.distress_signals.as_deref() {
            Some(raw) => raw
                .parse::<DistressSignals>()
                .map_err(|source| LeadImportError::UnknownSignal { line, source })?,
            None => DistressSignals::new(),
        };
        let arv = parse_field::<u32>(line, "arv", self.arv.as_deref())?.filter(|arv| *arv > 0);

        Ok(PropertyRecord {
            id: PropertyId(self.id.unwrap_or_default()),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            sqft: parse_field(line, "sqft", self.sqft.as_deref())?.unwrap_or(defaults.sqft),
            beds: parse_field(line, "beds", self.beds.as_deref())?.unwrap_or(defaults.beds),
            baths: parse_field(line, "baths", self.baths.as_deref())?.unwrap_or(defaults.baths),
            year_built: parse_field(line, "year_built", self.year_built.as_deref())?
                .unwrap_or(defaults.year_built),
            lot_size: parse_field(line, "lot_size", self.lot_size.as_deref())?
                .unwrap_or(defaults.lot_size),
            property_type,
            list_price: parse_field(line, "list_price", self.list_price.as_deref())?
                .unwrap_or(defaults.list_price),
            estimated_value: parse_field(line, "estimated_value", self.estimated_value.as_deref())?
                .unwrap_or(defaults.estimated_value),
            arv,
            mortgage_balance: parse_field(line, "mortgage_balance", self.mortgage_balance.as_deref())?
                .unwrap_or(defaults.mortgage_balance),
            equity_percent: parse_field(line, "equity_percent", self.equity_percent.as_deref())?
                .unwrap_or(defaults.equity_percent),
            days_on_market: parse_field(line, "days_on_market", self.days_on_market.as_deref())?
                .unwrap_or(defaults.days_on_market),
            price_reductions: parse_field(line, "price_reductions", self.price_reductions.as_deref())?
                .unwrap_or(defaults.price_reductions),
            ownership_years: parse_field(line, "ownership_years", self.ownership_years.as_deref())?
                .unwrap_or(defaults.ownership_years),
            distress_signals,
            owner_contact: OwnerContact {
                has_phone: contact_present(self.owner_phone.as_deref()),
                has_email: contact_present(self.owner_email.as_deref()),
                has_mailing_address: contact_present(self.owner_mailing.as_deref()),
            },
        })
    }
}

fn parse_field<T: FromStr>(
    line: usize,
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, LeadImportError> {
    value
        .map(|raw| {
            raw.replace(['$', ','], "")
                .parse::<T>()
                .map_err(|_| LeadImportError::InvalidField {
                    line,
                    column,
                    value: raw.to_string(),
                })
        })
        .transpose()
}

fn contact_present(value: Option<&str>) -> bool {
    match value {
        Some(raw) => !matches!(
            raw.to_ascii_lowercase().as_str(),
            "false" | "no" | "n" | "0"
        ),
        None => false,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
