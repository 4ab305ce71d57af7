//! End-to-end tests against the router, no network involved.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    seatwise_api::app::build_app()
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_body(title: &str, date: &str, total_seats: u32) -> Value {
    json!({
        "title": title,
        "venue": "Main Hall",
        "description": "desc",
        "date": date,
        "totalSeats": total_seats,
    })
}

async fn create_event(app: &axum::Router, title: &str, date: &str, total_seats: u32) -> Value {
    let response = send(app, "POST", "/events", Some(create_body(title, date, total_seats))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn health_is_ok() {
    let response = send(&app(), "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn created_event_defaults_availability_and_is_readable() {
    let app = app();
    let created = create_event(&app, "Expo", "2026-05-02T18:00:00Z", 30).await;

    assert_eq!(created["availableSeats"], 30);
    assert_eq!(created["totalSeats"], 30);
    assert_eq!(created["bookings"], json!([]));

    let id = created["id"].as_str().unwrap();
    let response = send(&app, "GET", &format!("/events/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Expo");
}

#[tokio::test]
async fn creation_rejects_availability_above_total() {
    let mut body = create_body("Expo", "2026-05-02T18:00:00Z", 10);
    body["availableSeats"] = json!(11);

    let response = send(&app(), "POST", "/events", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "validation_error");
}

#[tokio::test]
async fn booking_returns_the_updated_event_then_rejects_overdraw() {
    let app = app();
    let created = create_event(&app, "Gig", "2026-06-10T20:00:00Z", 3).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = send(
        &app,
        "PUT",
        &format!("/events/{id}/book"),
        Some(json!({
            "numberOfTickets": 2,
            "userName": "Alice",
            "userEmail": "alice@x.com",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response).await;
    assert_eq!(updated["availableSeats"], 1);
    assert_eq!(updated["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(updated["bookings"][0]["userName"], "Alice");

    let response = send(
        &app,
        "PUT",
        &format!("/events/{id}/book"),
        Some(json!({
            "numberOfTickets": 2,
            "userName": "Bob",
            "userEmail": "bob@x.com",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "insufficient_seats");
    assert_eq!(body["message"], "Only 1 seat(s) available");
}

#[tokio::test]
async fn booking_without_ticket_count_books_one_seat() {
    let app = app();
    let created = create_event(&app, "Talk", "2026-06-10T20:00:00Z", 5).await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/events/{id}/book"),
        Some(json!({ "userName": "A", "userEmail": "a@x.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["availableSeats"], 4);
}

#[tokio::test]
async fn unknown_and_malformed_ids_map_to_404_and_400() {
    let app = app();

    let missing = uuid::Uuid::now_v7();
    let response = send(&app, "GET", &format!("/events/{missing}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/events/not-a-uuid", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_id");
}

#[tokio::test]
async fn month_listing_filters_and_sorts() {
    let app = app();
    create_event(&app, "May late", "2026-05-20T10:00:00Z", 10).await;
    create_event(&app, "May early", "2026-05-03T10:00:00Z", 10).await;
    create_event(&app, "June", "2026-06-01T10:00:00Z", 10).await;

    let response = send(&app, "GET", "/events/month/2026/5", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = json_body(response).await;
    let titles: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["May early", "May late"]);

    let response = send(&app, "GET", "/events/month/2026/13", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_the_event() {
    let app = app();
    let created = create_event(&app, "Gone", "2026-07-01T10:00:00Z", 10).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = send(&app, "DELETE", &format!("/events/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Event deleted successfully"
    );

    let response = send(&app, "GET", &format!("/events/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/events/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
