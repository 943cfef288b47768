//! Listing creation: the five-stage wizard, its draft accumulator, and the
//! HTTP session surface that drives one wizard per seller session.

pub mod draft;
pub mod router;
pub mod sessions;
pub mod submission;
pub mod wizard;

pub use draft::{DraftField, ListingDraft, PriceType};
pub use router::{wizard_router, WizardSessionView};
pub use sessions::{SessionError, WizardSessionId, WizardSessionStore};
pub use submission::{ListingReceipt, ListingSink, SinkError};
pub use wizard::{
    ListingWizard, RequiredField, StageGate, StageValidity, WizardError, WizardStage,
};
