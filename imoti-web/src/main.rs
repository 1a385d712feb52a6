use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use imoti_core::{ListingSource, ReportRenderer, SampleListings, TextReport};
use imoti_mt::{
    GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator, MtError,
    TranslationOptions, assemble_city_index, normalize,
};

#[derive(Serialize, Deserialize)]
pub struct ReportRequest {
    pub listings: Value,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default = "default_target_locale")]
    pub target_locale: String,
    /// Use the identity mock translator instead of Google Translate
    #[serde(default)]
    pub mock: bool,
}

fn default_source_locale() -> String {
    "bg".to_string()
}

fn default_target_locale() -> String {
    "en".to_string()
}

#[derive(Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
    pub translated: Value,
    pub cities: usize,
    pub listings: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    /// None when no API key is configured; mock requests still work
    pub translator: Option<Arc<GoogleTranslateProvider>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    // Initialize Google Translate provider if a key is configured
    let translator = match GoogleTranslateProvider::from_env() {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            warn!("Google Translate unavailable: {} (mock requests only)", e);
            None
        }
    };
    let state = AppState { translator };

    info!("🏠 Starting imoti listing translation web server");

    // Build router
    let app = Router::new()
        .route("/", get(serve_index))
        .route("/api/sample", get(sample_listings))
        .route("/api/report", post(build_report))
        .nest_service("/static", ServeDir::new("imoti-web/src/static"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("🚀 Server running at http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("static/index.html"),
    )
}

async fn sample_listings() -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let tree = SampleListings.fetch_listings().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to load sample listings: {}", e),
            }),
        )
    })?;
    Ok(Json(tree))
}

async fn build_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Building report {} → {} (mock: {})",
        &request.source_locale, &request.target_locale, request.mock
    );

    let translator: Arc<dyn MachineTranslator> = if request.mock {
        Arc::new(MockTranslator::new(MockMode::NoOp))
    } else {
        match &state.translator {
            Some(provider) => provider.clone(),
            None => {
                return Err((
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse {
                        error: "GOOGLE_TRANSLATE_API_KEY not configured; \
                                set \"mock\": true to preview without the API"
                            .to_string(),
                    }),
                ));
            }
        }
    };

    let opts = TranslationOptions::new(&request.source_locale, &request.target_locale);

    let translated = normalize(&request.listings, translator.as_ref(), &opts)
        .await
        .map_err(mt_error_response)?;

    let index = assemble_city_index(&translated, translator.as_ref(), &opts)
        .await
        .map_err(mt_error_response)?;

    let report = String::from_utf8(TextReport.render(&index)).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Report rendering produced invalid UTF-8: {}", e),
            }),
        )
    })?;

    info!(
        "Report ready: {} listings in {} cities",
        index.record_count(),
        index.len()
    );

    Ok(Json(ReportResponse {
        report,
        translated,
        cities: index.len(),
        listings: index.record_count(),
    }))
}

fn mt_error_response(e: MtError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        // Provider failures degrade inside the pipeline, so an error
        // here means the input itself was unusable
        MtError::RecursionLimitExceeded(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
