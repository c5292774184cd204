//! JSON routes for the booking form
//!
//! Each request replays the posted form snapshot into a fresh
//! [`BookingForm`]; nothing is kept between requests.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::availability::{check_availability, AvailabilityOutcome};
use super::catalog::Catalog;
use super::requests::{AvailabilityRequest, BookingFormRequest};
use super::responses::{AvailabilityResponse, QuoteResponse};
use super::submission::{generate_booking_code, submit_booking};
use crate::error::Result;
use crate::models::{Booking, Service, Venue};
use crate::AppState;

/// Booking routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/venues", get(list_venues))
        .route("/api/services", get(list_services))
        .route("/api/bookings/quote", post(quote))
        .route("/api/bookings/availability", post(availability))
        .route("/api/bookings", post(create_booking))
}

async fn load_catalog(state: &AppState) -> Result<Catalog> {
    Ok(Catalog::load(state.api.as_ref(), &state.cache).await?)
}

/// Venue listing
async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<Venue>>> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(catalog.venues().to_vec()))
}

/// Service listing
async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(catalog.services().to_vec()))
}

/// Price a form snapshot and report its synchronous errors
async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingFormRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let catalog = load_catalog(&state).await?;
    let (form, _ticket) = request.into_form(catalog, state.rules.clone());
    Ok(Json(QuoteResponse::from(&form)))
}

/// Check a venue/date pair against the booking API
async fn availability(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>> {
    let Json(request) = payload?;
    let venue_id = request.venue_id.filter(|v| !v.trim().is_empty());
    let status = match (venue_id, request.event_date) {
        (Some(venue_id), Some(date)) => check_availability(state.api.as_ref(), &venue_id, date).await,
        _ => AvailabilityOutcome::Skipped,
    };
    Ok(Json(AvailabilityResponse { status }))
}

/// Validate (including availability) and submit a booking
async fn create_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingFormRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>)> {
    let Json(request) = payload?;
    let catalog = load_catalog(&state).await?;
    let (mut form, ticket) = request.into_form(catalog, state.rules.clone());

    if let Some(ticket) = ticket {
        let resolution = ticket.run(state.api.as_ref()).await;
        form.apply_availability(resolution);
    }

    let booking_code = generate_booking_code(&mut rand::thread_rng());
    let booking = submit_booking(&form, state.api.as_ref(), booking_code).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
