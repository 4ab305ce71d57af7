use chrono::{DateTime, Utc};
use serde::Serialize;

use seatwise_core::{DomainError, DomainResult, EventId};

/// One successful seat reservation against an event.
///
/// Booking records are created only through [`Event::apply_booking`] and are
/// never mutated or removed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub user_name: String,
    pub user_email: String,
    pub number_of_tickets: u32,
    pub booked_at: DateTime<Utc>,
}

/// Command: create a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub venue: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub total_seats: u32,
    /// Initial availability; defaults to `total_seats` when absent.
    pub available_seats: Option<u32>,
}

/// Command: reserve seats on an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSeats {
    pub number_of_tickets: u32,
    pub user_name: String,
    pub user_email: String,
}

impl BookSeats {
    /// Deterministic input validation, independent of any event state.
    pub fn validate(&self) -> DomainResult<()> {
        if self.number_of_tickets < 1 {
            return Err(DomainError::validation("numberOfTickets must be at least 1"));
        }
        if self.user_name.trim().is_empty() {
            return Err(DomainError::validation("userName must not be empty"));
        }
        if self.user_email.trim().is_empty() {
            return Err(DomainError::validation("userEmail must not be empty"));
        }
        Ok(())
    }
}

/// Aggregate root: a bookable event with a finite seat inventory.
///
/// Fields are private so the seat counters can only change through
/// [`Event::apply_booking`]. Everything else is an immutable snapshot
/// readable via accessors (and serde, for the API representation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: EventId,
    title: String,
    venue: String,
    description: String,
    date: DateTime<Utc>,
    total_seats: u32,
    available_seats: u32,
    bookings: Vec<Booking>,
    created_at: DateTime<Utc>,
}

impl Event {
    /// Validate and build a new event.
    ///
    /// `available_seats` defaults to `total_seats` when not supplied; a
    /// supplied value greater than `total_seats` is rejected outright.
    pub fn create(cmd: NewEvent, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let title = cmd.title.trim().to_string();
        let venue = cmd.venue.trim().to_string();

        if title.is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if venue.is_empty() {
            return Err(DomainError::validation("venue must not be empty"));
        }
        if cmd.total_seats < 1 {
            return Err(DomainError::validation("totalSeats must be at least 1"));
        }

        let available_seats = cmd.available_seats.unwrap_or(cmd.total_seats);
        if available_seats > cmd.total_seats {
            return Err(DomainError::validation(
                "availableSeats must not exceed totalSeats",
            ));
        }

        Ok(Self {
            id: EventId::new(),
            title,
            venue,
            description: cmd.description.trim().to_string(),
            date: cmd.date,
            total_seats: cmd.total_seats,
            available_seats,
            bookings: Vec::new(),
            created_at,
        })
    }

    /// The single mutation path for seat state: validate, check availability,
    /// then decrement and append as one step.
    ///
    /// On any failure the event is left untouched; the insufficient-seats
    /// rejection carries the availability observed at the check.
    pub fn apply_booking(&mut self, cmd: &BookSeats, booked_at: DateTime<Utc>) -> DomainResult<()> {
        cmd.validate()?;

        if cmd.number_of_tickets > self.available_seats {
            return Err(DomainError::insufficient_seats(self.available_seats));
        }

        self.available_seats -= cmd.number_of_tickets;
        self.bookings.push(Booking {
            user_name: cmd.user_name.clone(),
            user_email: cmd.user_email.clone(),
            number_of_tickets: cmd.number_of_tickets,
            booked_at,
        });

        Ok(())
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Seats consumed so far; by construction always equals
    /// `total_seats - available_seats`.
    pub fn seats_booked(&self) -> u32 {
        self.bookings.iter().map(|b| b.number_of_tickets).sum()
    }

    pub fn is_fully_booked(&self) -> bool {
        self.available_seats == 0
    }
}
