use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use seatwise_infra::{BookingError, StoreError};

pub fn booking_error_to_response(err: BookingError) -> axum::response::Response {
    match err {
        BookingError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        BookingError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Event not found"),
        BookingError::InsufficientSeats { available } => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_seats",
            format!("Only {available} seat(s) available"),
        ),
        BookingError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        BookingError::Timeout => json_error(StatusCode::GATEWAY_TIMEOUT, "timeout", "booking timed out"),
        BookingError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Event not found"),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
