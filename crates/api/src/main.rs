use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amfi_nav_core::domain::nav::{NavRecord, SchemeName};
use amfi_nav_core::feed::{AmfiFeedClient, FetchError, NavFeedSource};
use amfi_nav_core::filter::{filter_records, FilterOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = amfi_nav_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let feed = match AmfiFeedClient::from_settings(&settings) {
        Ok(feed) => feed,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            return Err(e);
        }
    };

    let app = router(Arc::new(feed));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    feed: Arc<dyn NavFeedSource>,
}

fn router(feed: Arc<dyn NavFeedSource>) -> Router {
    Router::new()
        .route("/", get(describe_api))
        .route("/healthz", get(healthz))
        .route("/api/nav", get(get_nav))
        .route("/api/nav/:isin", get(get_nav_by_isin))
        .route("/api/names", get(get_scheme_names))
        .with_state(AppState { feed })
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn describe_api() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "AMFI NAV API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "getAll": "/api/nav",
            "getById": "/api/nav/:isin",
            "getAllNames": "/api/names",
        },
        "filters": {
            "id": "?id=ISIN1,ISIN2,ISIN3 (comma-separated)",
            "type": "?type=direct|regular",
            "date": "?date=DD-MMM-YYYY",
        },
    }))
}

/// Raw query surface of the list endpoints. Unknown params are ignored and
/// value validation is deferred to `FilterOptions::from_query`.
#[derive(Debug, Default, Deserialize)]
struct NavQuery {
    id: Option<String>,
    #[serde(rename = "type")]
    scheme_type: Option<String>,
    date: Option<String>,
}

impl NavQuery {
    fn into_filters(self) -> FilterOptions {
        FilterOptions::from_query(
            self.id.as_deref(),
            self.scheme_type.as_deref(),
            self.date.as_deref(),
        )
    }
}

/// Success envelope; `data` is a list or a single record depending on the
/// endpoint. Clients branch on the `success` discriminant.
#[derive(Debug, Serialize)]
struct ApiSuccess<T> {
    success: bool,
    count: usize,
    data: T,
}

fn ok<T: Serialize>(count: usize, data: T) -> Json<ApiSuccess<T>> {
    Json(ApiSuccess {
        success: true,
        count,
        data,
    })
}

#[derive(Debug)]
enum ApiError {
    Fetch(FetchError),
    IsinNotFound,
    MissingIsin,
}

#[derive(Debug, Serialize)]
struct ApiFailure {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Fetch(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::IsinNotFound => (StatusCode::NOT_FOUND, "ISIN not found".to_string()),
            ApiError::MissingIsin => (
                StatusCode::BAD_REQUEST,
                "ISIN parameter is required".to_string(),
            ),
        };

        let body = ApiFailure {
            success: false,
            error,
        };
        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::Fetch(err)
    }
}

async fn get_nav(
    State(state): State<AppState>,
    Query(query): Query<NavQuery>,
) -> Result<Json<ApiSuccess<Vec<NavRecord>>>, ApiError> {
    let filters = query.into_filters();
    let data = state.feed.fetch_nav_data().await?;
    let data = filter_records(&data, &filters);
    Ok(ok(data.len(), data))
}

async fn get_nav_by_isin(
    State(state): State<AppState>,
    Path(isin): Path<String>,
) -> Result<Json<ApiSuccess<NavRecord>>, ApiError> {
    if isin.is_empty() {
        return Err(ApiError::MissingIsin);
    }

    let data = state.feed.fetch_nav_data().await?;
    let record = data
        .into_iter()
        .find(|record| record.has_isin(&isin))
        .ok_or(ApiError::IsinNotFound)?;

    Ok(ok(1, record))
}

async fn get_scheme_names(
    State(state): State<AppState>,
    Query(query): Query<NavQuery>,
) -> Result<Json<ApiSuccess<Vec<SchemeName>>>, ApiError> {
    let filters = query.into_filters();
    let data = state.feed.fetch_nav_data().await?;
    let names: Vec<SchemeName> = filter_records(&data, &filters)
        .iter()
        .map(SchemeName::from)
        .collect();
    Ok(ok(names.len(), names))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &amfi_nav_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
