//! Remote booking API collaborator
//!
//! The form core only talks to the API through [`BookingApi`], so tests and
//! the HTTP layer can swap in their own implementation.

pub mod client;
pub mod error;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Booking, Service, Venue};

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};

/// Request/response data client for the booking backend
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Fetch all venues
    async fn venues(&self) -> ClientResult<Vec<Venue>>;

    /// Fetch all add-on services
    async fn services(&self) -> ClientResult<Vec<Service>>;

    /// Fetch availability for a venue on a date.
    ///
    /// The payload is returned undecoded: the backend may answer with a list of
    /// records, a single record or a bare boolean, and interpreting the shape is
    /// the availability checker's job.
    async fn availability(&self, venue_id: &str, date: NaiveDate) -> ClientResult<serde_json::Value>;

    /// Create a booking, returning the stored record
    async fn create_booking(&self, booking: &Booking) -> ClientResult<Booking>;

    /// Fetch all bookings
    async fn bookings(&self) -> ClientResult<Vec<Booking>>;
}
