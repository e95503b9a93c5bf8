mod detail;
mod listing;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use guia_core::{AppConfig, Environment};
use guia_graphql::GraphqlClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};
use crate::session::SessionStore;

/// Backend descriptions are rendered as raw HTML; this keeps any markup
/// they carry from running script or embedding frames.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; img-src * data:; \
     style-src 'self' 'unsafe-inline'; script-src 'none'; object-src 'none'; \
     frame-src 'none'; base-uri 'none'; form-action 'self'";

const STYLESHEET: &str = include_str!("../../static/app.css");

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<GraphqlClient>,
    pub sessions: SessionStore,
    /// Adds `Secure` to the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn from_config(client: Arc<GraphqlClient>, config: &AppConfig) -> Self {
        Self {
            sessions: SessionStore::new(
                Arc::clone(&client),
                Duration::from_secs(config.session_idle_secs),
                config.max_sessions,
            ),
            client,
            secure_cookies: config.env == Environment::Production,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    upstream: &'static str,
    sessions: u64,
}

fn page_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/", get(listing::listing_page))
        .route("/more", post(listing::load_more))
        .route("/comercio/{slug}", get(detail::detail_page))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/static/app.css", get(stylesheet))
        .route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(page_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CONTENT_SECURITY_POLICY),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let sessions = state.sessions.active_sessions();

    match state.client.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    upstream: "ok",
                    sessions,
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: GraphQL endpoint unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        upstream: "unavailable",
                        sessions,
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
