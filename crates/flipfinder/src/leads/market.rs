use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reference pricing for one market area, keyed by city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketArea {
    pub city: String,
    /// Median price for a 1,500 sqft reference home.
    pub median_price: u32,
    /// Annual appreciation, in percent.
    pub appreciation: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl MarketArea {
    /// Floor area the median price is quoted for.
    pub const REFERENCE_SQFT: f64 = 1500.0;

    /// Fallback used when a lead's city has no comparable data.
    pub fn statewide_default() -> Self {
        Self {
            city: STATEWIDE_LABEL.to_string(),
            median_price: 150_000,
            appreciation: 8.0,
            latitude: 42.7325,
            longitude: -84.5555,
        }
    }

    pub fn price_per_sqft(&self) -> f64 {
        f64::from(self.median_price) / Self::REFERENCE_SQFT
    }
}

const STATEWIDE_LABEL: &str = "Michigan (statewide)";

const MICHIGAN_MARKETS: [(&str, u32, f64, f64, f64); 20] = [
    ("Detroit", 85_000, 8.5, 42.3314, -83.0458),
    ("Grand Rapids", 285_000, 12.3, 42.9634, -85.6681),
    ("Warren", 165_000, 9.2, 42.5145, -83.0147),
    ("Sterling Heights", 235_000, 7.8, 42.5803, -83.0302),
    ("Ann Arbor", 425_000, 6.5, 42.2808, -83.7430),
    ("Lansing", 145_000, 11.2, 42.7325, -84.5555),
    ("Flint", 55_000, 15.8, 43.0125, -83.6875),
    ("Dearborn", 175_000, 8.9, 42.3223, -83.1763),
    ("Livonia", 265_000, 7.2, 42.3684, -83.3527),
    ("Troy", 385_000, 5.8, 42.6064, -83.1498),
    ("Westland", 155_000, 10.5, 42.3242, -83.4002),
    ("Farmington Hills", 325_000, 6.9, 42.4989, -83.3677),
    ("Kalamazoo", 175_000, 9.8, 42.2917, -85.5872),
    ("Wyoming", 245_000, 11.5, 42.9134, -85.7053),
    ("Southfield", 125_000, 12.8, 42.4734, -83.2219),
    ("Pontiac", 95_000, 14.2, 42.6389, -83.2910),
    ("Taylor", 125_000, 9.5, 42.2409, -83.2697),
    ("Royal Oak", 315_000, 7.5, 42.4895, -83.1446),
    ("Novi", 445_000, 5.2, 42.4801, -83.4755),
    ("Saginaw", 45_000, 18.5, 43.4195, -83.9508),
];

/// Read-only lookup table of market areas.
///
/// Built once and shared; never mutated while scoring. Reloading means
/// building a new catalog and swapping the `Arc`.
#[derive(Debug, Clone)]
pub struct MarketCatalog {
    areas: BTreeMap<String, MarketArea>,
    fallback: MarketArea,
}

impl MarketCatalog {
    /// The twenty Michigan metros the acquisition team works.
    pub fn michigan() -> Self {
        let areas = MICHIGAN_MARKETS
            .iter()
            .map(|(city, median_price, appreciation, latitude, longitude)| MarketArea {
                city: (*city).to_string(),
                median_price: *median_price,
                appreciation: *appreciation,
                latitude: *latitude,
                longitude: *longitude,
            })
            .map(|area| (market_key(&area.city), area))
            .collect();

        Self {
            areas,
            fallback: MarketArea::statewide_default(),
        }
    }

    /// Loads `city,median_price,appreciation,lat,lng` rows.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, MarketCatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut areas = BTreeMap::new();

        for record in csv_reader.deserialize::<MarketRow>() {
            let row = record?;
            let key = market_key(&row.city);
            if key.is_empty() {
                return Err(MarketCatalogError::MissingCity);
            }
            if areas.contains_key(&key) {
                return Err(MarketCatalogError::DuplicateCity(row.city));
            }
            areas.insert(
                key,
                MarketArea {
                    city: row.city,
                    median_price: row.median_price,
                    appreciation: row.appreciation,
                    latitude: row.lat,
                    longitude: row.lng,
                },
            );
        }

        Ok(Self {
            areas,
            fallback: MarketArea::statewide_default(),
        })
    }

    /// Case-insensitive lookup that falls back to the statewide default.
    pub fn lookup(&self, city: &str) -> &MarketArea {
        match self.get(city) {
            Some(area) => area,
            None => {
                warn!(city, "no market data for city; using statewide default");
                &self.fallback
            }
        }
    }

    pub fn get(&self, city: &str) -> Option<&MarketArea> {
        self.areas.get(&market_key(city))
    }

    pub fn contains(&self, city: &str) -> bool {
        self.get(city).is_some()
    }

    pub fn areas(&self) -> impl Iterator<Item = &MarketArea> {
        self.areas.values()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn fallback(&self) -> &MarketArea {
        &self.fallback
    }
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::michigan()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketCatalogError {
    #[error("failed to read market table: {0}")]
    Csv(#[from] csv::Error),
    #[error("market table row is missing a city")]
    MissingCity,
    #[error("market table lists '{0}' more than once")]
    DuplicateCity(String),
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    city: String,
    median_price: u32,
    appreciation: f64,
    lat: f64,
    lng: f64,
}

fn market_key(city: &str) -> String {
    city.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let catalog = MarketCatalog::michigan();
        let area = catalog.lookup("  grand rapids ");
        assert_eq!(area.city, "Grand Rapids");
        assert_eq!(area.median_price, 285_000);
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn unknown_city_resolves_to_statewide_default() {
        let catalog = MarketCatalog::michigan();
        let area = catalog.lookup("Atlantis");
        assert_eq!(area.median_price, 150_000);
        assert_eq!(area.appreciation, 8.0);
        assert!(!catalog.contains("Atlantis"));
    }

    #[test]
    fn loads_overrides_from_csv() {
        let csv = "city,median_price,appreciation,lat,lng\n\
                   Marquette,190000,6.1,46.5436,-87.3954\n\
                   Holland,310000,7.4,42.7875,-86.1089\n";
        let catalog = MarketCatalog::from_csv(csv.as_bytes()).expect("csv parses");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("marquette").median_price, 190_000);
        assert!(!catalog.contains("Detroit"));
    }

    #[test]
    fn rejects_duplicate_cities() {
        let csv = "city,median_price,appreciation,lat,lng\n\
                   Flint,55000,15.8,43.0,-83.6\n\
                   FLINT,60000,15.0,43.0,-83.6\n";
        match MarketCatalog::from_csv(csv.as_bytes()) {
            Err(MarketCatalogError::DuplicateCity(city)) => assert_eq!(city, "FLINT"),
            other => panic!("expected duplicate city error, got {other:?}"),
        }
    }
}
