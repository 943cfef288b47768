use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::compliance::{compliance_alerts, ComplianceAlert};

use super::draft::{DraftField, ListingDraft};
use super::sessions::{SessionError, WizardSessionId, WizardSessionStore};
use super::submission::ListingSink;
use super::wizard::{ListingWizard, StageGate, StageValidity, WizardError, WizardStage};

/// Shared handler state: the session store plus the submission sink.
pub struct WizardRoutes<St, Si> {
    store: Arc<St>,
    sink: Arc<Si>,
}

impl<St, Si> Clone for WizardRoutes<St, Si> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            sink: self.sink.clone(),
        }
    }
}

/// Router builder exposing the wizard as per-session HTTP endpoints.
pub fn wizard_router<St, Si>(store: Arc<St>, sink: Arc<Si>) -> Router
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings/wizard",
            post(create_session_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id",
            get(session_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id/next",
            post(next_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id/previous",
            post(previous_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id/fields",
            post(update_field_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id/features",
            post(feature_handler::<St, Si>),
        )
        .route(
            "/api/v1/listings/wizard/:session_id/submit",
            post(submit_handler::<St, Si>),
        )
        .with_state(WizardRoutes { store, sink })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateSessionRequest {
    #[serde(default)]
    pub(crate) gate: Option<StageGate>,
}

/// Snapshot of one wizard session returned by every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct WizardSessionView {
    pub session_id: WizardSessionId,
    pub stage: WizardStage,
    pub stage_label: &'static str,
    pub step: u8,
    pub draft: ListingDraft,
    pub stages: Vec<StageValidity>,
}

impl WizardSessionView {
    fn new(session_id: WizardSessionId, wizard: &ListingWizard) -> Self {
        Self {
            session_id,
            stage: wizard.stage(),
            stage_label: wizard.stage().label(),
            step: wizard.stage().number(),
            draft: wizard.draft().clone(),
            stages: wizard.stage_validity(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FeatureOp {
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureRequest {
    pub(crate) op: FeatureOp,
    pub(crate) tag: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionView {
    pub(crate) listing_id: String,
    pub(crate) compliance_alerts: Vec<ComplianceAlert>,
}

fn store_failure(error: SessionError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

fn session_missing(id: &WizardSessionId) -> Response {
    let payload = json!({
        "session_id": id.0,
        "error": "wizard session not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

pub(crate) async fn create_session_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    payload: Option<axum::Json<CreateSessionRequest>>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let gate = payload
        .and_then(|axum::Json(request)| request.gate)
        .unwrap_or(StageGate::Enforced);
    let wizard = ListingWizard::with_gate(gate);

    match routes.store.create(wizard.clone()) {
        Ok(session_id) => {
            info!(%session_id, "wizard session opened");
            let view = WizardSessionView::new(session_id, &wizard);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn session_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    match routes.store.fetch(&id) {
        Ok(Some(wizard)) => {
            let view = WizardSessionView::new(id, &wizard);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Ok(None) => session_missing(&id),
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn next_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    let mut wizard = match routes.store.fetch(&id) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => return session_missing(&id),
        Err(error) => return store_failure(error),
    };

    match wizard.next() {
        Ok(_) => {}
        Err(WizardError::IncompleteStage { stage, missing }) => {
            let payload = json!({
                "error": WizardError::IncompleteStage {
                    stage,
                    missing: missing.clone(),
                }
                .to_string(),
                "stage": stage,
                "missing": missing,
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    }

    match routes.store.update(&id, wizard.clone()) {
        Ok(()) => {
            let view = WizardSessionView::new(id, &wizard);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn previous_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    let mut wizard = match routes.store.fetch(&id) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => return session_missing(&id),
        Err(error) => return store_failure(error),
    };

    wizard.previous();

    match routes.store.update(&id, wizard.clone()) {
        Ok(()) => {
            let view = WizardSessionView::new(id, &wizard);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn update_field_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
    axum::Json(update): axum::Json<DraftField>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    let mut wizard = match routes.store.fetch(&id) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => return session_missing(&id),
        Err(error) => return store_failure(error),
    };

    wizard.apply(update);

    match routes.store.update(&id, wizard.clone()) {
        Ok(()) => {
            let view = WizardSessionView::new(id, &wizard);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn feature_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<FeatureRequest>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    let mut wizard = match routes.store.fetch(&id) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => return session_missing(&id),
        Err(error) => return store_failure(error),
    };

    match request.op {
        FeatureOp::Add => wizard.add_feature(request.tag),
        FeatureOp::Remove => wizard.remove_feature(&request.tag),
    }

    match routes.store.update(&id, wizard.clone()) {
        Ok(()) => {
            let view = WizardSessionView::new(id, &wizard);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn submit_handler<St, Si>(
    State(routes): State<WizardRoutes<St, Si>>,
    Path(session_id): Path<String>,
) -> Response
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    let id = WizardSessionId(session_id);
    let wizard = match routes.store.fetch(&id) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => return session_missing(&id),
        Err(error) => return store_failure(error),
    };

    let draft = match wizard.submit() {
        Ok(draft) => draft,
        Err(error @ WizardError::SubmitOutsideTerminalStage { .. }) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::CONFLICT, axum::Json(payload)).into_response();
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let alerts = compliance_alerts(&draft);
    let receipt = match routes.sink.accept(draft) {
        Ok(receipt) => receipt,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    // The sink owns the draft now; the session only goes away once the
    // hand-off has succeeded.
    if let Err(error) = routes.store.remove(&id) {
        return store_failure(error);
    }

    info!(%id, listing_id = %receipt.listing_id, "wizard session submitted");
    let view = SubmissionView {
        listing_id: receipt.listing_id,
        compliance_alerts: alerts,
    };
    (StatusCode::CREATED, axum::Json(view)).into_response()
}
