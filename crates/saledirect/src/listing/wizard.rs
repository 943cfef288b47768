use serde::{Deserialize, Serialize};

use super::draft::{DraftField, ListingDraft};

/// The five fixed steps of the listing-creation flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    BasicInfo,
    PropertyDetails,
    LocationPricing,
    PhotosFeatures,
    LegalCompliance,
}

impl WizardStage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BasicInfo,
            Self::PropertyDetails,
            Self::LocationPricing,
            Self::PhotosFeatures,
            Self::LegalCompliance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::PropertyDetails => "Property Details",
            Self::LocationPricing => "Location & Pricing",
            Self::PhotosFeatures => "Photos & Features",
            Self::LegalCompliance => "Legal Compliance",
        }
    }

    /// 1-based position shown as "Step N of 5".
    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::PropertyDetails => 2,
            Self::LocationPricing => 3,
            Self::PhotosFeatures => 4,
            Self::LegalCompliance => 5,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::LegalCompliance)
    }

    const fn following(self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::PropertyDetails),
            Self::PropertyDetails => Some(Self::LocationPricing),
            Self::LocationPricing => Some(Self::PhotosFeatures),
            Self::PhotosFeatures => Some(Self::LegalCompliance),
            Self::LegalCompliance => None,
        }
    }

    const fn preceding(self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::PropertyDetails => Some(Self::BasicInfo),
            Self::LocationPricing => Some(Self::PropertyDetails),
            Self::PhotosFeatures => Some(Self::LocationPricing),
            Self::LegalCompliance => Some(Self::PhotosFeatures),
        }
    }
}

/// Whether `next()` requires the current stage's mandatory fields before
/// advancing. The original flow never gated advancement (flagged as a
/// defect there), so `Lenient` reproduces that behavior while `Enforced`
/// is the default here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageGate {
    Enforced,
    Lenient,
}

/// Mandatory per-stage inputs checked by the enforced gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    PropertyType,
    Description,
    Bedrooms,
    Bathrooms,
    Street,
    Suburb,
    State,
    Postcode,
    Price,
}

impl RequiredField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PropertyType => "property type",
            Self::Description => "description",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::Street => "street address",
            Self::Suburb => "suburb",
            Self::State => "state",
            Self::Postcode => "postcode",
            Self::Price => "asking price",
        }
    }
}

fn field_list(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("stage \"{}\" is incomplete: missing {}", .stage.label(), field_list(.missing))]
    IncompleteStage {
        stage: WizardStage,
        missing: Vec<RequiredField>,
    },
    #[error("listing can only be submitted from the final stage (currently at \"{}\")", .stage.label())]
    SubmitOutsideTerminalStage { stage: WizardStage },
}

/// Validity snapshot for one stage, exposed to progress indicators.
#[derive(Debug, Clone, Serialize)]
pub struct StageValidity {
    pub stage: WizardStage,
    pub stage_label: &'static str,
    pub number: u8,
    pub complete: bool,
    pub missing: Vec<RequiredField>,
}

/// Single-session linear data-collection state machine over a
/// [`ListingDraft`].
///
/// Navigation is bounds-clamped: `previous()` at the first stage and
/// `next()` at the last stage are no-ops, never errors. Only `submit()`
/// outside the final stage and (under the enforced gate) advancing past an
/// incomplete stage are rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ListingWizard {
    stage: WizardStage,
    draft: ListingDraft,
    gate: StageGate,
}

impl Default for ListingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingWizard {
    pub fn new() -> Self {
        Self::with_gate(StageGate::Enforced)
    }

    /// Source-compatible variant that lets callers advance past stages
    /// with empty required fields.
    pub fn lenient() -> Self {
        Self::with_gate(StageGate::Lenient)
    }

    pub fn with_gate(gate: StageGate) -> Self {
        Self {
            stage: WizardStage::BasicInfo,
            draft: ListingDraft::default(),
            gate,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    pub fn gate(&self) -> StageGate {
        self.gate
    }

    /// Required fields of `stage` not yet filled in on the draft.
    pub fn missing_fields(&self, stage: WizardStage) -> Vec<RequiredField> {
        let draft = &self.draft;
        let mut missing = Vec::new();

        match stage {
            WizardStage::BasicInfo => {
                if draft.title.trim().is_empty() {
                    missing.push(RequiredField::Title);
                }
                if draft.property_type.is_none() {
                    missing.push(RequiredField::PropertyType);
                }
                if draft.description.trim().is_empty() {
                    missing.push(RequiredField::Description);
                }
            }
            WizardStage::PropertyDetails => {
                if draft.bedrooms.is_none() {
                    missing.push(RequiredField::Bedrooms);
                }
                if draft.bathrooms.is_none() {
                    missing.push(RequiredField::Bathrooms);
                }
            }
            WizardStage::LocationPricing => {
                if draft.street.trim().is_empty() {
                    missing.push(RequiredField::Street);
                }
                if draft.suburb.trim().is_empty() {
                    missing.push(RequiredField::Suburb);
                }
                if draft.state.is_none() {
                    missing.push(RequiredField::State);
                }
                if draft.postcode.trim().is_empty() {
                    missing.push(RequiredField::Postcode);
                }
                if draft.price.is_none() {
                    missing.push(RequiredField::Price);
                }
            }
            WizardStage::PhotosFeatures | WizardStage::LegalCompliance => {}
        }

        missing
    }

    pub fn stage_complete(&self, stage: WizardStage) -> bool {
        self.missing_fields(stage).is_empty()
    }

    pub fn stage_validity(&self) -> Vec<StageValidity> {
        WizardStage::ordered()
            .into_iter()
            .map(|stage| {
                let missing = self.missing_fields(stage);
                StageValidity {
                    stage,
                    stage_label: stage.label(),
                    number: stage.number(),
                    complete: missing.is_empty(),
                    missing,
                }
            })
            .collect()
    }

    /// Advance one stage. Clamped at the final stage; under the enforced
    /// gate an incomplete current stage refuses to advance.
    pub fn next(&mut self) -> Result<WizardStage, WizardError> {
        let Some(target) = self.stage.following() else {
            return Ok(self.stage);
        };

        if self.gate == StageGate::Enforced {
            let missing = self.missing_fields(self.stage);
            if !missing.is_empty() {
                return Err(WizardError::IncompleteStage {
                    stage: self.stage,
                    missing,
                });
            }
        }

        self.stage = target;
        Ok(self.stage)
    }

    /// Step back one stage. Clamped at the first stage. The draft is left
    /// untouched, so entered values survive backward navigation.
    pub fn previous(&mut self) -> WizardStage {
        if let Some(target) = self.stage.preceding() {
            self.stage = target;
        }
        self.stage
    }

    /// Field updates are accepted in any stage.
    pub fn apply(&mut self, update: DraftField) {
        self.draft.apply(update);
    }

    pub fn add_feature(&mut self, tag: impl Into<String>) {
        self.draft.add_feature(tag);
    }

    pub fn remove_feature(&mut self, tag: &str) {
        self.draft.remove_feature(tag);
    }

    /// Finish the session, handing the completed draft to the caller.
    /// Only valid at the final stage; anywhere earlier is rejected rather
    /// than silently ignored.
    pub fn submit(self) -> Result<ListingDraft, WizardError> {
        if !self.stage.is_final() {
            return Err(WizardError::SubmitOutsideTerminalStage { stage: self.stage });
        }
        Ok(self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PropertyType;

    fn complete_stage_one(wizard: &mut ListingWizard) {
        wizard.apply(DraftField::Title("Test House".to_string()));
        wizard.apply(DraftField::PropertyType(PropertyType::House));
        wizard.apply(DraftField::Description("A test listing".to_string()));
    }

    #[test]
    fn previous_at_first_stage_is_clamped() {
        let mut wizard = ListingWizard::new();
        assert_eq!(wizard.previous(), WizardStage::BasicInfo);
        assert_eq!(wizard.stage(), WizardStage::BasicInfo);
    }

    #[test]
    fn next_at_final_stage_is_clamped() {
        let mut wizard = ListingWizard::lenient();
        for _ in 0..10 {
            wizard.next().expect("lenient next never fails");
        }
        assert_eq!(wizard.stage(), WizardStage::LegalCompliance);
    }

    #[test]
    fn enforced_gate_refuses_incomplete_stage() {
        let mut wizard = ListingWizard::new();
        match wizard.next() {
            Err(WizardError::IncompleteStage { stage, missing }) => {
                assert_eq!(stage, WizardStage::BasicInfo);
                assert_eq!(
                    missing,
                    vec![
                        RequiredField::Title,
                        RequiredField::PropertyType,
                        RequiredField::Description,
                    ]
                );
            }
            other => panic!("expected incomplete stage, got {other:?}"),
        }
        assert_eq!(wizard.stage(), WizardStage::BasicInfo);
    }

    #[test]
    fn lenient_gate_reproduces_source_behavior() {
        let mut wizard = ListingWizard::lenient();
        wizard.next().expect("ungated advance");
        assert_eq!(wizard.stage(), WizardStage::PropertyDetails);
    }

    #[test]
    fn values_survive_backward_navigation() {
        let mut wizard = ListingWizard::new();
        complete_stage_one(&mut wizard);
        wizard.next().expect("stage one complete");
        wizard.apply(DraftField::Bedrooms(3));
        wizard.previous();

        assert_eq!(wizard.stage(), WizardStage::BasicInfo);
        assert_eq!(wizard.draft().title, "Test House");
        assert_eq!(wizard.draft().property_type, Some(PropertyType::House));
        assert_eq!(wizard.draft().bedrooms, Some(3));
    }

    #[test]
    fn submit_outside_final_stage_is_rejected() {
        let wizard = ListingWizard::new();
        match wizard.submit() {
            Err(WizardError::SubmitOutsideTerminalStage { stage }) => {
                assert_eq!(stage, WizardStage::BasicInfo);
            }
            other => panic!("expected submit rejection, got {other:?}"),
        }
    }

    #[test]
    fn stage_validity_tracks_the_draft() {
        let mut wizard = ListingWizard::new();
        assert!(!wizard.stage_complete(WizardStage::BasicInfo));
        complete_stage_one(&mut wizard);
        assert!(wizard.stage_complete(WizardStage::BasicInfo));

        let validity = wizard.stage_validity();
        assert_eq!(validity.len(), 5);
        assert!(validity[0].complete);
        assert!(!validity[1].complete);
        assert!(validity[3].complete);
    }
}
