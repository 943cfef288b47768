use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{AustralianState, PropertyType};

/// How the asking price is presented to buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    Fixed,
    Negotiable,
    Auction,
}

impl PriceType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Negotiable => "Negotiable",
            Self::Auction => "Auction",
        }
    }
}

/// Mutable accumulator for a listing being authored through the wizard.
///
/// Created empty, mutated in place by stage input handlers, and never
/// replaced across navigation, so values entered on one stage survive
/// moving backwards and forwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    // Basic info
    pub title: String,
    pub description: String,
    pub property_type: Option<PropertyType>,

    // Location
    pub street: String,
    pub suburb: String,
    pub state: Option<AustralianState>,
    pub postcode: String,

    // Physical details
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub car_spaces: Option<u32>,
    pub land_size: Option<u32>,
    pub building_size: Option<u32>,

    // Pricing
    pub price: Option<u64>,
    pub price_type: PriceType,

    // Photos and features
    pub features: BTreeSet<String>,
    pub images: Vec<String>,

    // Legal compliance flags
    pub building_inspection_done: bool,
    pub pest_inspection_done: bool,
    pub has_pool: bool,
    pub pool_compliant: bool,
}

impl ListingDraft {
    /// Write one field directly into the draft. Type coercion happens at
    /// the serde layer; no further validation is applied here.
    pub fn apply(&mut self, update: DraftField) {
        match update {
            DraftField::Title(value) => self.title = value,
            DraftField::Description(value) => self.description = value,
            DraftField::PropertyType(value) => self.property_type = Some(value),
            DraftField::Street(value) => self.street = value,
            DraftField::Suburb(value) => self.suburb = value,
            DraftField::State(value) => self.state = Some(value),
            DraftField::Postcode(value) => self.postcode = value,
            DraftField::Bedrooms(value) => self.bedrooms = Some(value),
            DraftField::Bathrooms(value) => self.bathrooms = Some(value),
            DraftField::CarSpaces(value) => self.car_spaces = Some(value),
            DraftField::LandSize(value) => self.land_size = Some(value),
            DraftField::BuildingSize(value) => self.building_size = Some(value),
            DraftField::Price(value) => self.price = Some(value),
            DraftField::PriceType(value) => self.price_type = value,
            DraftField::AddImage(value) => self.images.push(value),
            DraftField::BuildingInspectionDone(value) => self.building_inspection_done = value,
            DraftField::PestInspectionDone(value) => self.pest_inspection_done = value,
            DraftField::HasPool(value) => self.has_pool = value,
            DraftField::PoolCompliant(value) => self.pool_compliant = value,
        }
    }

    /// Idempotent: adding a tag that is already present is a no-op.
    pub fn add_feature(&mut self, tag: impl Into<String>) {
        self.features.insert(tag.into());
    }

    /// Idempotent: removing an absent tag is a no-op.
    pub fn remove_feature(&mut self, tag: &str) {
        self.features.remove(tag);
    }
}

/// A single-field draft update, the typed rendition of the original
/// `updateField(name, value)` surface consumed by the stage forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DraftField {
    Title(String),
    Description(String),
    PropertyType(PropertyType),
    Street(String),
    Suburb(String),
    State(AustralianState),
    Postcode(String),
    Bedrooms(u32),
    Bathrooms(f32),
    CarSpaces(u32),
    LandSize(u32),
    BuildingSize(u32),
    Price(u64),
    PriceType(PriceType),
    AddImage(String),
    BuildingInspectionDone(bool),
    PestInspectionDone(bool),
    HasPool(bool),
    PoolCompliant(bool),
}
