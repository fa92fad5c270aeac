use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use crate::error::AppError;

const EXPORT_SUFFIX: &str = "/export?format=xlsx";

static SHEET_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/d/([a-zA-Z0-9-_]+)").expect("sheet id pattern is valid")
});

/// Turns a shared Google Sheets link into its xlsx export URL.
pub fn export_url(link: &str) -> Result<String, AppError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(AppError::InvalidInput("Sheet URL is not configured".to_string()));
    }
    if link.contains(EXPORT_SUFFIX) {
        return Ok(link.to_string());
    }

    let sheet_id = SHEET_ID
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid sheet URL: {}", link)))?;

    Ok(format!("https://docs.google.com/spreadsheets/d/{}{}", sheet_id, EXPORT_SUFFIX))
}

pub async fn load_file_from_url(url: &str, timeout: Duration) -> Result<Bytes, AppError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::FetchError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::FetchError(format!(
            "Failed to download spreadsheet (status {}). Check the link and its sharing permissions",
            response.status()
        )));
    }

    response
        .bytes()
        .await
        .map_err(|e| AppError::FetchError(format!("Failed to read response bytes: {}", e)))
}
