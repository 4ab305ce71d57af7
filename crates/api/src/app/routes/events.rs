use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};

use seatwise_booking::BookSeats;
use seatwise_core::EventId;
use seatwise_infra::EventStore;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_event).get(list_events))
        .route("/month/:year/:month", get(list_events_for_month))
        .route("/:id", get(get_event).delete(delete_event))
        .route("/:id/book", put(book_seats))
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateEventRequest>,
) -> axum::response::Response {
    match services.engine().create_event(body.into()) {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => errors::booking_error_to_response(e),
    }
}

pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list_all() {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_events_for_month(
    Extension(services): Extension<Arc<AppServices>>,
    Path((year, month)): Path<(i32, u32)>,
) -> axum::response::Response {
    let Some((start, end)) = month_bounds(year, month) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_month",
            "month must be a valid calendar month",
        );
    };

    match services.store().list_by_date_range(start, end) {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(event_id) = id.parse::<EventId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid event id");
    };

    match services.store().get(event_id) {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn book_seats(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BookSeatsRequest>,
) -> axum::response::Response {
    let Ok(event_id) = id.parse::<EventId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid event id");
    };

    let cmd: BookSeats = body.into();
    match services.engine().book(event_id, &cmd) {
        // Full snapshot (bookings included) so the client can render the
        // new state without a second fetch.
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::booking_error_to_response(e),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(event_id) = id.parse::<EventId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid event id");
    };

    match services.store().delete(event_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Event deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Half-open UTC bounds of a calendar month: `[first, first-of-next)`.
fn month_bounds(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc.with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0).single()?;

    Some((start, end))
}
