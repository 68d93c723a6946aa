//! HTTP request handlers for the payslip parser API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::parser::{parse_payslip_text, parse_schedule};
use crate::render::archive_file_name;

use super::request::{ArchiveNameRequest, PayslipRequest, ScheduleRequest};
use super::response::{ApiError, ApiErrorResponse, ArchiveNameResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/schedule", post(schedule_handler))
        .route("/archive-name", post(archive_name_handler))
        .with_state(state)
}

/// Handler for POST /payslip.
///
/// Parses the payslip text and returns the document.
async fn payslip_handler(payload: Result<Json<PayslipRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match parse_payslip_text(&request.document_id, &request.text, request.header_only) {
        Ok(document) => {
            info!(
                correlation_id = %correlation_id,
                document_id = %document.document_id,
                header_only = request.header_only,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip parsed successfully"
            );
            json_response(StatusCode::OK, document)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payslip parse failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /schedule.
///
/// Parses schedule tokens and returns the shifts found.
async fn schedule_handler(payload: Result<Json<ScheduleRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let token_count = request.tokens.len();
    match parse_schedule(request.tokens, request.anchor_date) {
        Ok(shifts) => {
            info!(
                correlation_id = %correlation_id,
                tokens = token_count,
                shifts = shifts.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Schedule parsed successfully"
            );
            json_response(StatusCode::OK, shifts)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Schedule parse failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /archive-name.
///
/// Reads the payslip header and returns the archive file name for it.
async fn archive_name_handler(
    State(state): State<AppState>,
    payload: Result<Json<ArchiveNameRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing archive-name request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match parse_payslip_text(&request.document_id, &request.text, true) {
        Ok(document) => {
            let file_name = archive_file_name(
                &state.config().archive().file_prefix,
                document.pay_period.payment_date,
                &request.extension,
            );
            info!(
                correlation_id = %correlation_id,
                document_id = %document.document_id,
                file_name = %file_name,
                duration_us = start_time.elapsed().as_micros(),
                "Archive name resolved"
            );
            json_response(StatusCode::OK, ArchiveNameResponse { file_name })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Archive name lookup failed"
            );
            error_response(err.into())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{PayslipDocument, Shift};
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    const STANDARD: &str = include_str!("../../tests/fixtures/payslip_standard.txt");

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/payslip.yaml").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_payslip_valid_request_returns_200() {
        let request = PayslipRequest {
            document_id: "payslip_standard.txt".to_string(),
            text: STANDARD.to_string(),
            header_only: false,
        };
        let response = post_json("/payslip", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let document: PayslipDocument = body_json(response).await;
        assert_eq!(document.employee.employee_number, "1234567");
        assert_eq!(document.summary().unwrap().net_pay, 32.32);
    }

    #[tokio::test]
    async fn test_payslip_header_only_has_no_details() {
        let request = PayslipRequest {
            document_id: "payslip_standard.txt".to_string(),
            text: STANDARD.to_string(),
            header_only: true,
        };
        let response = post_json("/payslip", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document: PayslipDocument = body_json(response).await;
        assert!(document.is_header_only());
    }

    #[tokio::test]
    async fn test_payslip_malformed_json_returns_400() {
        let response = post_json("/payslip", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_payslip_missing_text_returns_400() {
        let response = post_json("/payslip", r#"{"document_id": "a.txt"}"#.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("text"));
    }

    #[tokio::test]
    async fn test_payslip_truncated_text_returns_422() {
        let text: String = STANDARD.lines().take(12).collect::<Vec<_>>().join("\n");
        let request = PayslipRequest {
            document_id: "short.txt".to_string(),
            text,
            header_only: false,
        };
        let response = post_json("/payslip", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "EXHAUSTED_INPUT");
        assert!(error.message.contains("short.txt"));
    }

    #[tokio::test]
    async fn test_payslip_bad_amount_returns_422() {
        let text = STANDARD.replacen("\n35.00\n", "\n35.00 USD\n", 1);
        let request = PayslipRequest {
            document_id: "usd.txt".to_string(),
            text,
            header_only: false,
        };
        let response = post_json("/payslip", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "NUMERIC_FORMAT");
    }

    #[tokio::test]
    async fn test_schedule_returns_shifts() {
        let request = ScheduleRequest {
            tokens: [
                "Sat",
                "25",
                "Today",
                "12:00 PM-4:30 PM [4.50]",
                "12:00 PM-4:30 PM [4.50]",
                "0660/03/00054/E-Commerce/E-Commerce Clerk",
                "Sun",
                "26",
                "1:00 PM-7:30 PM [6.50]",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            anchor_date: NaiveDate::from_ymd_opt(2023, 9, 25).unwrap(),
        };
        let response = post_json("/schedule", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let shifts: Vec<Shift> = body_json(response).await;
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].duration_minutes, 270);
        assert_eq!(shifts[1].duration_minutes, 390);
    }

    #[tokio::test]
    async fn test_schedule_bad_day_number_returns_422() {
        let body = r#"{"tokens": ["Sat", "xx"], "anchor_date": "2023-09-25"}"#;
        let response = post_json("/schedule", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "NUMERIC_FORMAT");
    }

    #[tokio::test]
    async fn test_archive_name_uses_payment_date() {
        let request = ArchiveNameRequest {
            document_id: "payslip_standard.txt".to_string(),
            text: STANDARD.to_string(),
            extension: "pdf".to_string(),
        };
        let response = post_json("/archive-name", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: ArchiveNameResponse = body_json(response).await;
        assert_eq!(body.file_name, "Payslip-2023-09-21.pdf");
    }

    #[tokio::test]
    async fn test_archive_name_bad_payment_date_returns_422() {
        let text = STANDARD.replacen("09/21/23", "21/09/23", 1);
        let body = serde_json::json!({ "document_id": "bad.txt", "text": text });
        let response = post_json("/archive-name", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "DATE_FORMAT");
    }
}
