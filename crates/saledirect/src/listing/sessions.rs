use std::fmt;

use serde::{Deserialize, Serialize};

use super::wizard::ListingWizard;

/// Identifier wrapper for wizard sessions handed out by a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WizardSessionId(pub String);

impl fmt::Display for WizardSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error enumeration for session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for in-progress wizard sessions so the router can
/// be exercised against in-memory infrastructure.
pub trait WizardSessionStore: Send + Sync {
    fn create(&self, wizard: ListingWizard) -> Result<WizardSessionId, SessionError>;
    fn fetch(&self, id: &WizardSessionId) -> Result<Option<ListingWizard>, SessionError>;
    fn update(&self, id: &WizardSessionId, wizard: ListingWizard) -> Result<(), SessionError>;
    fn remove(&self, id: &WizardSessionId) -> Result<Option<ListingWizard>, SessionError>;
}
