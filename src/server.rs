//! HTTP API in front of the enrichment pipeline.
//!
//! Exposes:
//!
//! - `GET /`: service name, version and endpoint list
//! - `POST /enrich`: run the full pipeline for an [`EnrichmentRequest`]
//! - `POST /test-linkedin`: run only the profile search, with `name` and
//!   `company` from the query string or a JSON body
//!
//! Every request runs in its own spawned task under a span carrying a
//! fresh request id. Handlers share nothing but the immutable [`Enricher`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use enrich_web::{HttpFetch, PageRenderer};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{EnrichError, Result};
use crate::pipeline::Enricher;
use crate::types::EnrichmentRequest;

/// Routes advertised by `GET /`.
const ENDPOINTS: &[&str] = &["GET /", "POST /enrich", "POST /test-linkedin"];

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// `GET /` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Available routes.
    pub endpoints: Vec<String>,
}

/// `POST /test-linkedin` parameters, as query string or JSON body.
///
/// Query-string values take precedence over body values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSearchRequest {
    /// Person's name. Required from one of the two sources.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional company to narrow the search.
    #[serde(default)]
    pub company: Option<String>,
}

/// Error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable cause.
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

struct AppState<R, F> {
    enricher: Arc<Enricher<R, F>>,
}

impl<R, F> Clone for AppState<R, F> {
    fn clone(&self) -> Self {
        Self {
            enricher: Arc::clone(&self.enricher),
        }
    }
}

// ---------------------------------------------------------------------------
// EnrichServer
// ---------------------------------------------------------------------------

/// The running HTTP API.
pub struct EnrichServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl EnrichServer {
    /// Bind `{config.host}:{config.port}` (port `0` picks a free port) and
    /// serve in a background task.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Server`] if the listener cannot bind.
    pub async fn start<R, F>(enricher: Arc<Enricher<R, F>>, config: &ServerConfig) -> Result<Self>
    where
        R: PageRenderer + 'static,
        F: HttpFetch + 'static,
    {
        let app = router(enricher);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| EnrichError::Server(format!("bind {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| EnrichError::Server(format!("failed to get local addr: {e}")))?;

        info!("enrichment API listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("enrichment API error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the server task to end.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Server`] if the task panicked.
    pub async fn wait(mut self) -> Result<()> {
        (&mut self.handle)
            .await
            .map_err(|e| EnrichError::Server(format!("server task failed: {e}")))
    }
}

impl Drop for EnrichServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Build the API router over `enricher`.
pub fn router<R, F>(enricher: Arc<Enricher<R, F>>) -> Router
where
    R: PageRenderer + 'static,
    F: HttpFetch + 'static,
{
    Router::new()
        .route("/", get(handle_index))
        .route("/enrich", post(handle_enrich::<R, F>))
        .route("/test-linkedin", post(handle_profile_search::<R, F>))
        .with_state(AppState { enricher })
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /`: describe the service.
async fn handle_index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        endpoints: ENDPOINTS.iter().map(|e| (*e).to_owned()).collect(),
    })
}

/// `POST /enrich`: run the full pipeline.
async fn handle_enrich<R, F>(
    State(state): State<AppState<R, F>>,
    Json(request): Json<EnrichmentRequest>,
) -> Response
where
    R: PageRenderer + 'static,
    F: HttpFetch + 'static,
{
    let span = info_span!("enrich", request_id = %Uuid::new_v4());
    let enricher = state.enricher;
    let task = tokio::spawn(
        async move {
            info!(
                name = request.trimmed_name(),
                company = ?request.trimmed_company(),
                "enrichment started"
            );
            enricher.enrich(&request).await
        }
        .instrument(span),
    );

    match task.await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "enrichment task did not complete");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                EnrichError::Internal(format!("enrichment failed: {e}")).to_string(),
            )
        }
    }
}

/// `POST /test-linkedin`: run only the profile search.
async fn handle_profile_search<R, F>(
    State(state): State<AppState<R, F>>,
    Query(params): Query<ProfileSearchRequest>,
    body: Option<Json<ProfileSearchRequest>>,
) -> Response
where
    R: PageRenderer + 'static,
    F: HttpFetch + 'static,
{
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let name = params
        .name
        .or(body.name)
        .map(|n| n.trim().to_owned())
        .unwrap_or_default();
    if name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "name must not be empty");
    }
    let company = params
        .company
        .or(body.company)
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty());

    let span = info_span!("test_linkedin", request_id = %Uuid::new_v4());
    let enricher = state.enricher;
    let task = tokio::spawn(
        async move { enricher.search_profiles(&name, company.as_deref()).await }.instrument(span),
    );

    match task.await {
        Ok(search) => Json(search).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "profile search task did not complete");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                EnrichError::Internal(format!("profile search failed: {e}")).to_string(),
            )
        }
    }
}
