use chrono::{DateTime, Utc};
use serde::Deserialize;

use seatwise_booking::{BookSeats, NewEvent};

// -------------------------
// Request DTOs
// -------------------------
//
// Field names are camelCase on the wire, matching the web client. Response
// bodies are the `Event` snapshot itself, which serializes the same way.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub venue: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    pub total_seats: u32,
    pub available_seats: Option<u32>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(value: CreateEventRequest) -> Self {
        NewEvent {
            title: value.title,
            venue: value.venue,
            description: value.description,
            date: value.date,
            total_seats: value.total_seats,
            available_seats: value.available_seats,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatsRequest {
    /// Missing on the wire means one ticket, as the original client sends.
    pub number_of_tickets: Option<u32>,
    pub user_name: String,
    pub user_email: String,
}

impl From<BookSeatsRequest> for BookSeats {
    fn from(value: BookSeatsRequest) -> Self {
        BookSeats {
            number_of_tickets: value.number_of_tickets.unwrap_or(1),
            user_name: value.user_name,
            user_email: value.user_email,
        }
    }
}
