//! Request handlers and error mapping.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::chart::{ChartEdit, MedicalChart, UserId};
use crate::service::{ChartService, ServiceError, Session};

/// Error response: `{ "error": message }` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::MissingField(_) => StatusCode::BAD_REQUEST,
            ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Advice(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Parse a JSON body, treating an empty body as the default value.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

// --- Request / response bodies ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChartRequest {
    pub user_id: Option<String>,
    pub user_input: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub user_id: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub medical_chart: MedicalChart,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// --- Handlers ---

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

pub async fn open_session(State(service): State<ChartService>, body: Bytes) -> ApiResult<Session> {
    let req: SessionRequest = parse_body(&body)?;
    let session = service.open_session(req.user_id.as_deref()).await?;
    Ok(Json(session))
}

pub async fn update_chart(
    State(service): State<ChartService>,
    body: Bytes,
) -> ApiResult<ChartResponse> {
    let req: UpdateChartRequest = parse_body(&body)?;
    let chart = service
        .update_chart(
            req.user_id.as_deref().unwrap_or_default(),
            req.user_input.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(ChartResponse {
        medical_chart: chart,
    }))
}

pub async fn advice(State(service): State<ChartService>, body: Bytes) -> ApiResult<AdviceResponse> {
    let req: AdviceRequest = parse_body(&body)?;
    let advice = service
        .advice(
            req.user_id.as_deref().unwrap_or_default(),
            req.question.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(AdviceResponse { advice }))
}

pub async fn get_chart(
    State(service): State<ChartService>,
    Path(user_id): Path<UserId>,
) -> ApiResult<ChartResponse> {
    let chart = service.chart(user_id.as_str()).await?;
    Ok(Json(ChartResponse {
        medical_chart: chart,
    }))
}

pub async fn edit_chart(
    State(service): State<ChartService>,
    Path(user_id): Path<UserId>,
    body: Bytes,
) -> ApiResult<ChartResponse> {
    let edit: ChartEdit = parse_body(&body)?;
    let chart = service.edit_chart(user_id.as_str(), &edit).await?;
    Ok(Json(ChartResponse {
        medical_chart: chart,
    }))
}
