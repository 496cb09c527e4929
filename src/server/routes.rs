use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::checker::{CheckResult, CheckSummary};
use crate::error::CheckerError;
use crate::report::{aggregate, default_export_filename, render_csv, Report};
use crate::server::AppState;

/// Body accepted by `POST /api/check`: an address array or the single-address
/// variant.
#[derive(Debug, Default, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub records: CheckResult,
    pub summary: CheckSummary,
    pub report: Report,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(CheckerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error,
                    details: None,
                }),
            )
                .into_response(),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to fetch data from provider".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response(),
        }
    }
}

impl From<CheckerError> for ApiError {
    fn from(e: CheckerError) -> Self {
        ApiError::Internal(e)
    }
}

pub async fn healthz() -> impl IntoResponse {
    "ok"
}

pub async fn check(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let addresses = extract_addresses(req)?;
    let records = state.checker.check_addresses(&addresses).await;
    let summary = CheckSummary::of(&records);
    let report = aggregate(&records);
    Ok(Json(CheckResponse {
        records,
        summary,
        report,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Comma-separated address list.
    pub addresses: String,
}

pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let addresses: Vec<String> = query.addresses.split(',').map(str::to_string).collect();
    if addresses.iter().all(|a| a.trim().is_empty()) {
        return Err(ApiError::BadRequest("No addresses provided".to_string()));
    }

    let records = state.checker.check_addresses(&addresses).await;
    let report = aggregate(&records);
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", default_export_filename()),
        ),
    ];
    Ok((headers, render_csv(&report)).into_response())
}

fn extract_addresses(req: CheckRequest) -> Result<Vec<String>, ApiError> {
    if let Some(addresses) = req.addresses {
        if addresses.is_empty() {
            return Err(ApiError::BadRequest("Addresses array is empty".to_string()));
        }
        return Ok(addresses);
    }
    if let Some(address) = req.address {
        return Ok(vec![address]);
    }
    Err(ApiError::BadRequest("No addresses provided".to_string()))
}
