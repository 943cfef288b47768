use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{AustralianState, PropertyRecord, PropertyType};

/// Optional-field query constraining a property search. Absent fields impose
/// no constraint; present fields combine as a conjunction.
///
/// `min_price > max_price` is not rejected: both bounds apply independently
/// and the result is simply empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub state: Option<AustralianState>,
    #[serde(default)]
    pub min_price: Option<u64>,
    #[serde(default)]
    pub max_price: Option<u64>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub min_bedrooms: Option<u32>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.state.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.property_type.is_none()
            && self.min_bedrooms.is_none()
    }

    /// Conjunctive match of every present predicate against one record.
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let title = record.title.to_lowercase();
            let address_line = record.address.to_string().to_lowercase();
            let suburb = record.address.suburb.to_lowercase();
            if !title.contains(&needle)
                && !address_line.contains(&needle)
                && !suburb.contains(&needle)
            {
                return false;
            }
        }

        if let Some(state) = self.state {
            if record.address.state != state {
                return false;
            }
        }

        if let Some(min_price) = self.min_price {
            if record.price < min_price {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if record.price > max_price {
                return false;
            }
        }

        if let Some(property_type) = self.property_type {
            if record.property_type != property_type {
                return false;
            }
        }

        if let Some(min_bedrooms) = self.min_bedrooms {
            if record.bedrooms < min_bedrooms {
                return false;
            }
        }

        true
    }
}

/// Stable subsequence selection: output records keep the input order.
pub fn filter(records: &[PropertyRecord], spec: &FilterSpec) -> Vec<PropertyRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

/// Result ordering offered alongside the filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Newest,
    PriceAsc,
    PriceDesc,
    ViewsDesc,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::ViewsDesc => "Most Viewed",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "views_desc" => Ok(Self::ViewsDesc),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Total ordering per key. The underlying sort is stable, so records that
/// compare equal keep their input order and re-sorting is a no-op.
pub fn sort(records: &[PropertyRecord], key: SortKey) -> Vec<PropertyRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Newest => sorted.sort_by(|a, b| b.listing_date.cmp(&a.listing_date)),
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::ViewsDesc => sorted.sort_by(|a, b| b.views.cmp(&a.views)),
    }
    sorted
}
