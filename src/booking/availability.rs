//! Asynchronous venue availability check with request sequencing
//!
//! Every venue/date change issues a new [`AvailabilityTicket`]. A resolved
//! ticket is applied to the [`AvailabilityGate`] only if no newer ticket has
//! been issued since, so a slow response can never override the outcome of a
//! later request (last issued wins, not last arrived).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::FormError;
use crate::api::BookingApi;
use crate::models::AvailabilityRecord;

/// Outcome of one availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailabilityOutcome {
    Available,
    Unavailable,
    /// Malformed response or transport failure
    ApiError,
    /// Venue or date not set; nothing to verify
    Skipped,
}

impl AvailabilityOutcome {
    pub fn error(self) -> Option<FormError> {
        match self {
            AvailabilityOutcome::Unavailable => Some(FormError::Unavailable),
            AvailabilityOutcome::ApiError => Some(FormError::ApiError),
            AvailabilityOutcome::Available | AvailabilityOutcome::Skipped => None,
        }
    }
}

/// Interpret an availability payload for the queried venue and date.
///
/// Only a list is an expected shape; anything else (a bare boolean, a single
/// object) is an `ApiError`. List elements that are not records are skipped.
pub fn interpret_response(
    payload: &serde_json::Value,
    venue_id: &str,
    date: NaiveDate,
) -> AvailabilityOutcome {
    let Some(elements) = payload.as_array() else {
        warn!("Availability response is not a list: {}", payload);
        return AvailabilityOutcome::ApiError;
    };

    let date = date.format("%Y-%m-%d").to_string();
    let found = elements
        .iter()
        .filter_map(|element| match AvailabilityRecord::deserialize(element) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed availability record {}: {}", element, e);
                None
            }
        })
        .find(|r| r.matches(venue_id, &date));

    match found {
        Some(record) if record.available => AvailabilityOutcome::Available,
        _ => AvailabilityOutcome::Unavailable,
    }
}

/// Query the API and interpret the result. Never fails: transport errors
/// resolve to [`AvailabilityOutcome::ApiError`].
pub async fn check_availability<A: BookingApi + ?Sized>(
    api: &A,
    venue_id: &str,
    date: NaiveDate,
) -> AvailabilityOutcome {
    match api.availability(venue_id, date).await {
        Ok(payload) => interpret_response(&payload, venue_id, date),
        Err(e) => {
            warn!("Availability check failed for venue {} on {}: {}", venue_id, date, e);
            AvailabilityOutcome::ApiError
        }
    }
}

/// One issued availability request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityTicket {
    token: u64,
    venue_id: String,
    date: NaiveDate,
}

impl AvailabilityTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Run the remote check for this ticket
    pub async fn run<A: BookingApi + ?Sized>(self, api: &A) -> AvailabilityResolution {
        let outcome = check_availability(api, &self.venue_id, self.date).await;
        AvailabilityResolution {
            token: self.token,
            outcome,
        }
    }
}

/// A ticket's result, waiting to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityResolution {
    pub token: u64,
    pub outcome: AvailabilityOutcome,
}

/// Availability state of the form's date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
    /// A check is in flight; the field is neither valid nor invalid
    Pending { token: u64 },
    Resolved(AvailabilityOutcome),
}

/// Tracks the latest issued ticket and its resolved outcome
#[derive(Debug, Clone)]
pub struct AvailabilityGate {
    issued: u64,
    state: AvailabilityState,
}

impl Default for AvailabilityGate {
    fn default() -> Self {
        Self {
            issued: 0,
            state: AvailabilityState::Resolved(AvailabilityOutcome::Skipped),
        }
    }
}

impl AvailabilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AvailabilityState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AvailabilityState::Pending { .. })
    }

    /// Issue a ticket for the current venue/date.
    ///
    /// Always supersedes any in-flight ticket. With either input missing there
    /// is nothing to verify: the gate resolves to `Skipped` and no ticket is
    /// returned.
    pub fn issue(&mut self, venue_id: Option<&str>, date: Option<NaiveDate>) -> Option<AvailabilityTicket> {
        self.issued += 1;
        match (venue_id.filter(|v| !v.trim().is_empty()), date) {
            (Some(venue_id), Some(date)) => {
                self.state = AvailabilityState::Pending { token: self.issued };
                Some(AvailabilityTicket {
                    token: self.issued,
                    venue_id: venue_id.to_string(),
                    date,
                })
            }
            _ => {
                self.state = AvailabilityState::Resolved(AvailabilityOutcome::Skipped);
                None
            }
        }
    }

    /// Apply a resolution; stale ones are discarded and `false` is returned
    pub fn apply(&mut self, resolution: AvailabilityResolution) -> bool {
        match self.state {
            AvailabilityState::Pending { token } if token == resolution.token => {
                self.state = AvailabilityState::Resolved(resolution.outcome);
                true
            }
            _ => {
                debug!(
                    "Discarding stale availability result (token {}, latest {})",
                    resolution.token, self.issued
                );
                false
            }
        }
    }
}
