use metrics_exporter_prometheus::PrometheusHandle;
use saledirect::listing::{
    ListingDraft, ListingReceipt, ListingSink, ListingWizard, SessionError, SinkError,
    WizardSessionId, WizardSessionStore,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local wizard session store. Sessions only live as long as the
/// service; abandoning one is just never touching it again.
#[derive(Default)]
pub(crate) struct InMemorySessionStore {
    sessions: Mutex<HashMap<WizardSessionId, ListingWizard>>,
    counter: AtomicU64,
}

impl WizardSessionStore for InMemorySessionStore {
    fn create(&self, wizard: ListingWizard) -> Result<WizardSessionId, SessionError> {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let id = WizardSessionId(format!("draft-{serial:06}"));
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(id.clone(), wizard);
        Ok(id)
    }

    fn fetch(&self, id: &WizardSessionId) -> Result<Option<ListingWizard>, SessionError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, id: &WizardSessionId, wizard: ListingWizard) -> Result<(), SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(id.clone(), wizard);
        Ok(())
    }

    fn remove(&self, id: &WizardSessionId) -> Result<Option<ListingWizard>, SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.remove(id))
    }
}

/// Listing sink that keeps accepted drafts in memory, standing in for the
/// real publication pipeline.
#[derive(Default)]
pub(crate) struct InMemoryListingSink {
    accepted: Mutex<Vec<ListingDraft>>,
    counter: AtomicU64,
}

impl ListingSink for InMemoryListingSink {
    fn accept(&self, draft: ListingDraft) -> Result<ListingReceipt, SinkError> {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut guard = self.accepted.lock().expect("sink mutex poisoned");
        guard.push(draft);
        Ok(ListingReceipt {
            listing_id: format!("listing-{serial:06}"),
        })
    }
}

impl InMemoryListingSink {
    pub(crate) fn accepted(&self) -> Vec<ListingDraft> {
        self.accepted.lock().expect("sink mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_sequential() {
        let store = InMemorySessionStore::default();
        let first = store
            .create(ListingWizard::new())
            .expect("in-memory create never fails");
        let second = store
            .create(ListingWizard::new())
            .expect("in-memory create never fails");
        assert_eq!(first.0, "draft-000001");
        assert_eq!(second.0, "draft-000002");
    }

    #[test]
    fn removed_sessions_are_gone() {
        let store = InMemorySessionStore::default();
        let id = store
            .create(ListingWizard::new())
            .expect("in-memory create never fails");
        store.remove(&id).expect("remove reachable");
        let fetched = store.fetch(&id).expect("fetch reachable");
        assert!(fetched.is_none());
    }

    #[test]
    fn sink_hands_out_receipts_and_keeps_drafts() {
        let sink = InMemoryListingSink::default();
        let receipt = sink
            .accept(ListingDraft::default())
            .expect("in-memory accept never fails");
        assert_eq!(receipt.listing_id, "listing-000001");
        assert_eq!(sink.accepted().len(), 1);
    }
}
