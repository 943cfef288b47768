use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::domain::{Address, AustralianState, PropertyCatalog, PropertyId, PropertyRecord, PropertyType};

/// Error raised by a property data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("property source unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous supplier of property records, the seam behind the search
/// engine. Implementations may suspend (network, disk) and must be safe to
/// call concurrently.
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<PropertyRecord>, SourceError>;
}

const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(500);

/// Demo data source serving the six sample listings after a simulated
/// network delay, standing in for a real listings backend.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    catalog: PropertyCatalog,
    delay: Duration,
}

impl SampleCatalog {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SIMULATED_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            catalog: sample_catalog(),
            delay,
        }
    }

    /// No artificial latency. Intended for tests and CLI output.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertySource for SampleCatalog {
    async fn fetch_all(&self) -> Result<Vec<PropertyRecord>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.catalog.records().to_vec())
    }
}

/// The six demo listings, one per populated state, validated against the
/// catalog invariants.
pub fn sample_catalog() -> PropertyCatalog {
    PropertyCatalog::new(sample_records()).expect("sample data upholds catalog invariants")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid sample listing date")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sample_records() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord {
            id: PropertyId("1".to_string()),
            title: "Modern Family Home with Pool".to_string(),
            price: 850_000,
            address: Address {
                street: "123 Sunset Drive".to_string(),
                suburb: "Bondi Beach".to_string(),
                state: AustralianState::Nsw,
                postcode: "2026".to_string(),
            },
            bedrooms: 4,
            bathrooms: 3.0,
            car_spaces: 2,
            land_size: 650,
            property_type: PropertyType::House,
            features: strings(&["Pool", "Garden", "Modern Kitchen", "Air Conditioning"]),
            images: strings(&[
                "https://images.pexels.com/photos/1396122/pexels-photo-1396122.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 245,
            listing_date: date(2024, 1, 15),
            description: "Beautiful modern family home featuring a sparkling pool, landscaped gardens, and contemporary finishes throughout.".to_string(),
        },
        PropertyRecord {
            id: PropertyId("2".to_string()),
            title: "Luxury Apartment with City Views".to_string(),
            price: 1_200_000,
            address: Address {
                street: "45 Collins Street".to_string(),
                suburb: "Melbourne".to_string(),
                state: AustralianState::Vic,
                postcode: "3000".to_string(),
            },
            bedrooms: 3,
            bathrooms: 2.0,
            car_spaces: 2,
            land_size: 0,
            property_type: PropertyType::Apartment,
            features: strings(&["City Views", "Balcony", "Gym", "Concierge"]),
            images: strings(&[
                "https://images.pexels.com/photos/1643383/pexels-photo-1643383.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 189,
            listing_date: date(2024, 1, 12),
            description: "Stunning luxury apartment with panoramic city views, premium finishes, and access to world-class amenities.".to_string(),
        },
        PropertyRecord {
            id: PropertyId("3".to_string()),
            title: "Charming Queenslander with Character".to_string(),
            price: 675_000,
            address: Address {
                street: "78 Maple Street".to_string(),
                suburb: "Paddington".to_string(),
                state: AustralianState::Qld,
                postcode: "4064".to_string(),
            },
            bedrooms: 3,
            bathrooms: 2.0,
            car_spaces: 1,
            land_size: 405,
            property_type: PropertyType::House,
            features: strings(&["Character Home", "Polished Floors", "Verandah", "Garden"]),
            images: strings(&[
                "https://images.pexels.com/photos/1029599/pexels-photo-1029599.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 156,
            listing_date: date(2024, 1, 10),
            description: "Classic Queenslander home with original character features, polished timber floors, and wraparound verandah.".to_string(),
        },
        PropertyRecord {
            id: PropertyId("4".to_string()),
            title: "Waterfront Apartment with Marina Views".to_string(),
            price: 950_000,
            address: Address {
                street: "12 Marina Boulevard".to_string(),
                suburb: "Perth".to_string(),
                state: AustralianState::Wa,
                postcode: "6000".to_string(),
            },
            bedrooms: 2,
            bathrooms: 2.0,
            car_spaces: 1,
            land_size: 0,
            property_type: PropertyType::Apartment,
            features: strings(&["Water Views", "Marina Access", "Modern Kitchen", "Balcony"]),
            images: strings(&[
                "https://images.pexels.com/photos/2102587/pexels-photo-2102587.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 312,
            listing_date: date(2024, 1, 8),
            description: "Spectacular waterfront apartment with direct marina views and premium finishes throughout.".to_string(),
        },
        PropertyRecord {
            id: PropertyId("5".to_string()),
            title: "Heritage Cottage in Historic District".to_string(),
            price: 720_000,
            address: Address {
                street: "34 Heritage Lane".to_string(),
                suburb: "Adelaide".to_string(),
                state: AustralianState::Sa,
                postcode: "5000".to_string(),
            },
            bedrooms: 3,
            bathrooms: 1.0,
            car_spaces: 1,
            land_size: 320,
            property_type: PropertyType::House,
            features: strings(&["Heritage Listed", "Original Features", "Courtyard", "Period Details"]),
            images: strings(&[
                "https://images.pexels.com/photos/1438832/pexels-photo-1438832.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 198,
            listing_date: date(2024, 1, 5),
            description: "Beautifully preserved heritage cottage with original features and charming courtyard garden.".to_string(),
        },
        PropertyRecord {
            id: PropertyId("6".to_string()),
            title: "Mountain View Retreat".to_string(),
            price: 580_000,
            address: Address {
                street: "89 Mountain Road".to_string(),
                suburb: "Hobart".to_string(),
                state: AustralianState::Tas,
                postcode: "7000".to_string(),
            },
            bedrooms: 4,
            bathrooms: 2.0,
            car_spaces: 2,
            land_size: 800,
            property_type: PropertyType::House,
            features: strings(&["Mountain Views", "Large Block", "Workshop", "Established Gardens"]),
            images: strings(&[
                "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg?auto=compress&cs=tinysrgb&w=800",
            ]),
            views: 167,
            listing_date: date(2024, 1, 3),
            description: "Peaceful mountain retreat with stunning views, large block, and established gardens perfect for families.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_has_one_listing_per_populated_state() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 6);

        let states: Vec<AustralianState> = catalog
            .records()
            .iter()
            .map(|record| record.address.state)
            .collect();
        assert_eq!(
            states,
            vec![
                AustralianState::Nsw,
                AustralianState::Vic,
                AustralianState::Qld,
                AustralianState::Wa,
                AustralianState::Sa,
                AustralianState::Tas,
            ]
        );
    }

    #[tokio::test]
    async fn instant_source_serves_records_without_delay() {
        let source = SampleCatalog::instant();
        let records = source.fetch_all().await.expect("sample source never fails");
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].primary_image().map(str::is_empty), Some(false));
    }
}
