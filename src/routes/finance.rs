use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Router,
    Json,
    http::Method,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use crate::{
    AppState,
    error::AppError,
    models::IngestionResult,
    services::{
        excel::{export_url, load_file_from_url, read_workbook},
        finance_store::FinanceStore,
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes(max_file_size: usize) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route(
            "/api/upload",
            post(upload_workbook).layer(DefaultBodyLimit::max(max_file_size)),
        )
        .route("/api/sync-google", post(sync_google))
        .route("/api/dashboard", get(dashboard))
        .route("/api/settings", get(get_settings).post(update_settings))
        .layer(cors)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    success: bool,
    revenue_entries: usize,
    expense_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    sheet_url: String,
    last_ingested_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    sheet_url: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    success: bool,
}

async fn upload_workbook(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let mut file_data: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read uploaded file: {}", e)))?;
            file_data = Some(data);
            break;
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))?;
    tracing::info!("Received upload of {}KB", file_data.len() / 1024);

    ingest_and_store(&state, file_data).map(Json)
}

async fn sync_google(State(state): State<Arc<AppState>>) -> Result<Json<IngestResponse>, AppError> {
    let sheet_url = state.store.sheet_url()?;
    let url = export_url(&sheet_url)?;

    tracing::info!("Downloading workbook from {}", url);
    let download_start = std::time::Instant::now();
    let timeout = Duration::from_secs(state.config.fetch_timeout_secs);
    let file_data = load_file_from_url(&url, timeout).await?;
    tracing::info!(
        "File downloaded, size: {}KB, took: {:?}",
        file_data.len() / 1024,
        download_start.elapsed()
    );

    ingest_and_store(&state, file_data).map(Json)
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<IngestionResult>, AppError> {
    Ok(Json(state.store.snapshot()?))
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(SettingsResponse {
        sheet_url: state.store.sheet_url()?,
        last_ingested_at: state.store.last_ingested_at()?,
    }))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(request) = payload?;
    state.store.set_sheet_url(request.sheet_url.trim())?;
    Ok(Json(SuccessResponse { success: true }))
}

fn ingest_and_store(state: &AppState, file_data: Bytes) -> Result<IngestResponse, AppError> {
    let workbook = read_workbook(file_data)?;
    let result = state.ingestor.ingest(&workbook);
    state.store.replace_all(&result)?;

    Ok(IngestResponse {
        success: true,
        revenue_entries: result.revenue_entries.len(),
        expense_entries: result.expense_entries.len(),
    })
}
