//! Booking assembly and submission

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::{error, info};

use super::form::{BookingForm, FormStatus};
use super::validation::FormError;
use crate::api::{BookingApi, ClientError};
use crate::models::{Booking, BookingStatus};

/// Submission error types
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Availability check still in flight
    #[error("Form is still being validated")]
    NotReady,

    #[error("Form is invalid ({} errors)", .0.len())]
    Invalid(Vec<FormError>),

    #[error("Booking API error: {0}")]
    Api(#[from] ClientError),
}

/// Random 6-digit booking code, uniform over 100000..=999999.
///
/// Not checked for uniqueness against existing bookings.
pub fn generate_booking_code<R: Rng>(rng: &mut R) -> String {
    rng.gen_range(100_000..=999_999u32).to_string()
}

/// Build the booking record from a valid form
pub fn build_booking(
    form: &BookingForm,
    booking_code: String,
    created_at: DateTime<Utc>,
) -> Result<Booking, SubmitError> {
    match form.status() {
        FormStatus::Valid => {}
        FormStatus::Pending => return Err(SubmitError::NotReady),
        FormStatus::Invalid(errors) => return Err(SubmitError::Invalid(errors)),
    }

    // A valid form has every field set; a gap here means the checks above drifted.
    let incomplete = || SubmitError::Invalid(form.field_errors());
    let (start_time, end_time) = form.window().bounds().ok_or_else(incomplete)?;
    let services = form
        .services()
        .iter()
        .map(|entry| entry.to_selection())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(incomplete)?;

    Ok(Booking {
        id: None,
        booking_code,
        company_name: form.company_name().trim().to_string(),
        company_email: form.company_email().trim().to_string(),
        contact_phone: form.contact_phone().trim().to_string(),
        venue_id: form.venue_id().ok_or_else(incomplete)?.to_string(),
        event_date: form.event_date().ok_or_else(incomplete)?,
        start_time,
        end_time,
        total_people: form.total_people().ok_or_else(incomplete)?,
        services,
        total_amount: form.quote().total,
        status: BookingStatus::Confirmed,
        created_at,
    })
}

/// Assemble and post the booking under `booking_code`.
///
/// The form is only read, so a failed submit can be retried as-is.
pub async fn submit_booking<A: BookingApi + ?Sized>(
    form: &BookingForm,
    api: &A,
    booking_code: String,
) -> Result<Booking, SubmitError> {
    let booking = build_booking(form, booking_code, Utc::now())?;

    match api.create_booking(&booking).await {
        Ok(created) => {
            info!(
                "Booking {} created for venue {} on {}",
                created.booking_code, created.venue_id, created.event_date
            );
            Ok(created)
        }
        Err(e) => {
            error!("Booking submission failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_booking_code_is_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let code = generate_booking_code(&mut rng);
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_submit_error_display() {
        let err = SubmitError::Invalid(vec![FormError::Unavailable, FormError::ApiError]);
        assert!(err.to_string().contains("2 errors"));
        assert!(SubmitError::NotReady.to_string().contains("validated"));
    }
}
