use serde::{Deserialize, Serialize};

use super::draft::ListingDraft;

/// Receipt returned by a listing sink once a draft has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReceipt {
    pub listing_id: String,
}

/// Error raised by a listing submission sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("listing sink unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam accepting finished drafts. What happens to them afterwards
/// (persistence, syndication) is the sink's concern, not the wizard's.
pub trait ListingSink: Send + Sync {
    fn accept(&self, draft: ListingDraft) -> Result<ListingReceipt, SinkError>;
}
