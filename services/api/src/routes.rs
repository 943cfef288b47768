use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use saledirect::catalog::{
    sort, AustralianState, FilterSpec, PropertyRecord, SampleCatalog, SearchEngine, SearchToken,
    SortKey,
};
use saledirect::compliance::StateCompliance;
use saledirect::error::AppError;
use saledirect::listing::{wizard_router, ListingSink, WizardSessionStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) type SharedSearchEngine = Arc<SearchEngine<SampleCatalog>>;

#[derive(Debug, Deserialize)]
pub(crate) struct PropertySearchRequest {
    #[serde(flatten)]
    pub(crate) spec: FilterSpec,
    #[serde(default)]
    pub(crate) sort: Option<SortKey>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PropertySearchResponse {
    pub(crate) token: SearchToken,
    pub(crate) count: usize,
    pub(crate) results: Vec<PropertyRecord>,
}

pub(crate) fn with_marketplace_routes<St, Si>(
    engine: SharedSearchEngine,
    store: Arc<St>,
    sink: Arc<Si>,
) -> axum::Router
where
    St: WizardSessionStore + 'static,
    Si: ListingSink + 'static,
{
    wizard_router(store, sink)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/properties/search",
            axum::routing::post(property_search_endpoint),
        )
        .route(
            "/api/v1/compliance/:state",
            axum::routing::get(compliance_endpoint),
        )
        .layer(Extension(engine))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn property_search_endpoint(
    Extension(engine): Extension<SharedSearchEngine>,
    Json(payload): Json<PropertySearchRequest>,
) -> Result<Json<PropertySearchResponse>, AppError> {
    let reply = engine.search(&payload.spec).await?;
    let results = match payload.sort {
        Some(key) => sort(&reply.results, key),
        None => reply.results,
    };

    Ok(Json(PropertySearchResponse {
        token: reply.token,
        count: results.len(),
        results,
    }))
}

pub(crate) async fn compliance_endpoint(Path(state): Path<String>) -> impl IntoResponse {
    match state.parse::<AustralianState>() {
        Ok(state) => {
            let table = StateCompliance::for_state(state);
            (StatusCode::OK, Json(json!(table))).into_response()
        }
        Err(message) => {
            let payload = json!({ "error": message });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SharedSearchEngine {
        Arc::new(SearchEngine::new(Arc::new(SampleCatalog::instant())))
    }

    #[tokio::test]
    async fn search_endpoint_returns_token_and_count() {
        let request = PropertySearchRequest {
            spec: FilterSpec {
                state: Some(AustralianState::Qld),
                ..FilterSpec::default()
            },
            sort: None,
        };

        let Json(body) = property_search_endpoint(Extension(engine()), Json(request))
            .await
            .expect("sample search succeeds");

        assert_eq!(body.count, 1);
        assert_eq!(body.results[0].address.suburb, "Paddington");
        assert_eq!(body.token.value(), 1);
    }

    #[tokio::test]
    async fn search_endpoint_applies_requested_sort() {
        let request = PropertySearchRequest {
            spec: FilterSpec::default(),
            sort: Some(SortKey::PriceDesc),
        };

        let Json(body) = property_search_endpoint(Extension(engine()), Json(request))
            .await
            .expect("sample search succeeds");

        assert_eq!(body.count, 6);
        assert_eq!(body.results[0].price, 1_200_000);
        assert_eq!(body.results[5].price, 580_000);
    }

    #[tokio::test]
    async fn search_request_accepts_flattened_filter_fields() {
        let request: PropertySearchRequest = serde_json::from_value(json!({
            "min_price": 700000,
            "max_price": 900000,
            "sort": "price_asc",
        }))
        .expect("flattened request parses");

        assert_eq!(request.spec.min_price, Some(700_000));
        assert_eq!(request.sort, Some(SortKey::PriceAsc));
    }

    #[tokio::test]
    async fn compliance_endpoint_rejects_unknown_states() {
        let response = compliance_endpoint(Path("ZZ".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn compliance_endpoint_serves_the_state_table() {
        let response = compliance_endpoint(Path("qld".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
