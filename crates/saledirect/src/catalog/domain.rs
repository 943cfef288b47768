use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Australian state and territory codes used across listings and compliance tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AustralianState {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl AustralianState {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Nsw,
            Self::Vic,
            Self::Qld,
            Self::Wa,
            Self::Sa,
            Self::Tas,
            Self::Act,
            Self::Nt,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Nsw => "NSW",
            Self::Vic => "VIC",
            Self::Qld => "QLD",
            Self::Wa => "WA",
            Self::Sa => "SA",
            Self::Tas => "TAS",
            Self::Act => "ACT",
            Self::Nt => "NT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nsw => "New South Wales",
            Self::Vic => "Victoria",
            Self::Qld => "Queensland",
            Self::Wa => "Western Australia",
            Self::Sa => "South Australia",
            Self::Tas => "Tasmania",
            Self::Act => "Australian Capital Territory",
            Self::Nt => "Northern Territory",
        }
    }
}

impl fmt::Display for AustralianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AustralianState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NSW" => Ok(Self::Nsw),
            "VIC" => Ok(Self::Vic),
            "QLD" => Ok(Self::Qld),
            "WA" => Ok(Self::Wa),
            "SA" => Ok(Self::Sa),
            "TAS" => Ok(Self::Tas),
            "ACT" => Ok(Self::Act),
            "NT" => Ok(Self::Nt),
            other => Err(format!("unknown state code '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Townhouse,
    Land,
    Commercial,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Apartment => "Apartment",
            Self::Townhouse => "Townhouse",
            Self::Land => "Land",
            Self::Commercial => "Commercial",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Self::House),
            "apartment" => Ok(Self::Apartment),
            "townhouse" => Ok(Self::Townhouse),
            "land" => Ok(Self::Land),
            "commercial" => Ok(Self::Commercial),
            other => Err(format!("unknown property type '{other}'")),
        }
    }
}

/// Identifier wrapper for catalogued properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suburb: String,
    pub state: AustralianState,
    pub postcode: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.suburb, self.state, self.postcode
        )
    }
}

/// Immutable description of a property available for sale.
///
/// Prices are whole AUD. A `land_size` of zero means "not applicable"
/// (apartments and similar strata titles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub title: String,
    pub price: u64,
    pub address: Address,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub car_spaces: u32,
    pub land_size: u32,
    pub property_type: PropertyType,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub views: u32,
    pub listing_date: NaiveDate,
    pub description: String,
}

impl PropertyRecord {
    /// First image in the gallery, used as the card thumbnail.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Ordered collection of records validated against the catalog invariants:
/// every price is positive and every identifier is unique.
#[derive(Debug, Clone)]
pub struct PropertyCatalog {
    records: Vec<PropertyRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("property {0} has a zero price")]
    ZeroPrice(PropertyId),
    #[error("duplicate property id {0}")]
    DuplicateId(PropertyId),
}

impl PropertyCatalog {
    pub fn new(records: Vec<PropertyRecord>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if record.price == 0 {
                return Err(CatalogError::ZeroPrice(record.id.clone()));
            }
            if !seen.insert(&record.id) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
