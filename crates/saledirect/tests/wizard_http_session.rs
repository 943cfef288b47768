//! Integration specifications for the wizard session router: sessions are
//! created, driven field by field, and submitted entirely over HTTP against
//! in-memory infrastructure.

mod common {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use saledirect::listing::{
        ListingDraft, ListingReceipt, ListingSink, ListingWizard, SessionError, SinkError,
        WizardSessionId, WizardSessionStore,
    };

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        sessions: Mutex<HashMap<WizardSessionId, ListingWizard>>,
        counter: AtomicU64,
    }

    impl WizardSessionStore for MemoryStore {
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

    #[derive(Default)]
    pub(crate) struct MemorySink {
        accepted: Mutex<Vec<ListingDraft>>,
        counter: AtomicU64,
    }

    impl ListingSink for MemorySink {
        fn accept(&self, draft: ListingDraft) -> Result<ListingReceipt, SinkError> {
            let serial = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            let mut guard = self.accepted.lock().expect("sink mutex poisoned");
            guard.push(draft);
            Ok(ListingReceipt {
                listing_id: format!("listing-{serial:06}"),
            })
        }
    }

    impl MemorySink {
        pub(crate) fn accepted(&self) -> Vec<ListingDraft> {
            self.accepted.lock().expect("sink mutex poisoned").clone()
        }
    }

    pub(crate) fn build_router() -> (axum::Router, Arc<MemoryStore>, Arc<MemorySink>) {
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(MemorySink::default());
        let router = saledirect::listing::wizard_router(store.clone(), sink.clone());
        (router, store, sink)
    }
}

mod sessions {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use saledirect::listing::WizardSessionStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn dispatch(
        router: &axum::Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value).expect("serialize request body"))
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, payload)
    }

    #[tokio::test]
    async fn create_session_returns_a_fresh_first_stage_view() {
        let (router, _, _) = build_router();
        let (status, payload) = dispatch(&router, "POST", "/api/v1/listings/wizard", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            payload.get("session_id").and_then(Value::as_str),
            Some("draft-000001")
        );
        assert_eq!(payload.get("step").and_then(Value::as_u64), Some(1));
        assert_eq!(
            payload.get("stage").and_then(Value::as_str),
            Some("basic_info")
        );
        assert_eq!(
            payload
                .get("stages")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(5)
        );
    }

    #[tokio::test]
    async fn unknown_session_is_a_not_found() {
        let (router, _, _) = build_router();
        let (status, payload) =
            dispatch(&router, "GET", "/api/v1/listings/wizard/draft-999999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(payload.get("error").is_some());
    }

    #[tokio::test]
    async fn advancing_an_incomplete_stage_is_unprocessable() {
        let (router, _, _) = build_router();
        let (_, created) = dispatch(&router, "POST", "/api/v1/listings/wizard", None).await;
        let id = created
            .get("session_id")
            .and_then(Value::as_str)
            .expect("session id")
            .to_string();

        let (status, payload) = dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/next"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let missing = payload
            .get("missing")
            .and_then(Value::as_array)
            .expect("missing fields listed");
        assert_eq!(missing.len(), 3);
    }

    #[tokio::test]
    async fn early_submit_is_a_conflict_and_keeps_the_session() {
        let (router, store, _) = build_router();
        let (_, created) = dispatch(&router, "POST", "/api/v1/listings/wizard", None).await;
        let id = created
            .get("session_id")
            .and_then(Value::as_str)
            .expect("session id")
            .to_string();

        let (status, payload) = dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/submit"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .expect("error message")
            .contains("final stage"));

        let session = store
            .fetch(&saledirect::listing::WizardSessionId(id))
            .expect("store reachable");
        assert!(session.is_some());
    }

    #[tokio::test]
    async fn a_session_can_be_driven_to_submission_over_http() {
        let (router, store, sink) = build_router();
        let (_, created) = dispatch(&router, "POST", "/api/v1/listings/wizard", None).await;
        let id = created
            .get("session_id")
            .and_then(Value::as_str)
            .expect("session id")
            .to_string();
        let fields_uri = format!("/api/v1/listings/wizard/{id}/fields");
        let next_uri = format!("/api/v1/listings/wizard/{id}/next");

        for update in [
            json!({ "field": "title", "value": "Test House" }),
            json!({ "field": "property_type", "value": "house" }),
            json!({ "field": "description", "value": "Sunny corner block" }),
        ] {
            let (status, _) = dispatch(&router, "POST", &fields_uri, Some(update)).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, view) = dispatch(&router, "POST", &next_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view.get("step").and_then(Value::as_u64), Some(2));

        for update in [
            json!({ "field": "bedrooms", "value": 3 }),
            json!({ "field": "bathrooms", "value": 2.0 }),
        ] {
            let (status, _) = dispatch(&router, "POST", &fields_uri, Some(update)).await;
            assert_eq!(status, StatusCode::OK);
        }
        dispatch(&router, "POST", &next_uri, None).await;

        for update in [
            json!({ "field": "street", "value": "78 Maple Street" }),
            json!({ "field": "suburb", "value": "Paddington" }),
            json!({ "field": "state", "value": "QLD" }),
            json!({ "field": "postcode", "value": "4064" }),
            json!({ "field": "price", "value": 675000 }),
        ] {
            let (status, _) = dispatch(&router, "POST", &fields_uri, Some(update)).await;
            assert_eq!(status, StatusCode::OK);
        }
        dispatch(&router, "POST", &next_uri, None).await;

        let (status, view) = dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/features"),
            Some(json!({ "op": "add", "tag": "Verandah" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            view.get("draft")
                .and_then(|draft| draft.get("features"))
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(1)
        );

        dispatch(&router, "POST", &next_uri, None).await;

        let (status, receipt) = dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/submit"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            receipt.get("listing_id").and_then(Value::as_str),
            Some("listing-000001")
        );
        // No inspections were recorded, so the QLD cross-check flags both.
        assert_eq!(
            receipt
                .get("compliance_alerts")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(2)
        );

        let accepted = sink.accepted();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].title, "Test House");

        let gone = store
            .fetch(&saledirect::listing::WizardSessionId(id))
            .expect("store reachable");
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn field_values_survive_backward_navigation_over_http() {
        let (router, _, _) = build_router();
        let (_, created) = dispatch(
            &router,
            "POST",
            "/api/v1/listings/wizard",
            Some(json!({ "gate": "lenient" })),
        )
        .await;
        let id = created
            .get("session_id")
            .and_then(Value::as_str)
            .expect("session id")
            .to_string();

        dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/fields"),
            Some(json!({ "field": "title", "value": "Test House" })),
        )
        .await;
        dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/next"),
            None,
        )
        .await;
        dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/fields"),
            Some(json!({ "field": "bedrooms", "value": 3 })),
        )
        .await;
        let (status, view) = dispatch(
            &router,
            "POST",
            &format!("/api/v1/listings/wizard/{id}/previous"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(view.get("step").and_then(Value::as_u64), Some(1));
        let draft = view.get("draft").expect("draft in view");
        assert_eq!(
            draft.get("title").and_then(Value::as_str),
            Some("Test House")
        );
        assert_eq!(draft.get("bedrooms").and_then(Value::as_u64), Some(3));
    }
}
