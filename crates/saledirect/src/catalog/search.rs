use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::PropertyRecord;
use super::filter::{filter, FilterSpec};
use super::source::{PropertySource, SourceError};

/// Monotonically increasing per-engine sequence number identifying one
/// search request. Higher tokens were issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SearchToken(u64);

impl SearchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A resolved search, tagged with the token it was issued under.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReply {
    pub token: SearchToken,
    pub results: Vec<PropertyRecord>,
}

/// Filtering front-end over a [`PropertySource`].
///
/// Searches suspend on the source (which simulates network latency in the
/// demo), so replies can resolve out of issue order. Callers that only want
/// the most recent results pass each reply through [`SearchEngine::apply`],
/// which discards anything older than the newest reply already applied.
/// In-flight searches are never cancelled; their replies just lose the
/// apply-time comparison.
pub struct SearchEngine<S> {
    source: Arc<S>,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl<S: PropertySource> SearchEngine<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Fetch the collection and select the matching subsequence.
    pub async fn search(&self, spec: &FilterSpec) -> Result<SearchReply, SourceError> {
        let token = SearchToken(self.issued.fetch_add(1, Ordering::Relaxed) + 1);
        let records = self.source.fetch_all().await?;
        let results = filter(&records, spec);
        debug!(token = token.0, matched = results.len(), "search resolved");
        Ok(SearchReply { token, results })
    }

    /// Surface a reply's results unless a newer reply has already been
    /// applied, in which case the reply is stale and dropped.
    pub fn apply(&self, reply: SearchReply) -> Option<Vec<PropertyRecord>> {
        let newest_seen = self.applied.fetch_max(reply.token.0, Ordering::AcqRel);
        if newest_seen >= reply.token.0 {
            debug!(token = reply.token.0, "discarding stale search reply");
            None
        } else {
            Some(reply.results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::AustralianState;
    use crate::catalog::source::SampleCatalog;

    fn engine() -> SearchEngine<SampleCatalog> {
        SearchEngine::new(Arc::new(SampleCatalog::instant()))
    }

    #[tokio::test]
    async fn tokens_increase_per_request() {
        let engine = engine();
        let first = engine.search(&FilterSpec::default()).await.expect("search");
        let second = engine.search(&FilterSpec::default()).await.expect("search");
        assert!(second.token > first.token);
    }

    #[tokio::test]
    async fn newer_reply_wins_regardless_of_apply_order() {
        let engine = engine();
        let older = engine
            .search(&FilterSpec {
                state: Some(AustralianState::Qld),
                ..FilterSpec::default()
            })
            .await
            .expect("search");
        let newer = engine.search(&FilterSpec::default()).await.expect("search");

        let applied = engine.apply(newer).expect("newest reply applies");
        assert_eq!(applied.len(), 6);
        assert!(engine.apply(older).is_none());
    }

    #[tokio::test]
    async fn reply_applies_when_it_is_still_the_newest() {
        let engine = engine();
        let reply = engine
            .search(&FilterSpec {
                state: Some(AustralianState::Qld),
                ..FilterSpec::default()
            })
            .await
            .expect("search");
        let results = engine.apply(reply).expect("sole reply applies");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].address.suburb, "Paddington");
    }
}
