//! Response DTOs for booking API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::availability::AvailabilityOutcome;
use super::calculators::PricingQuote;
use super::form::BookingForm;
use super::validation::FormError;

/// Priced service row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowQuoteResponse {
    pub index: usize,
    pub service_id: Option<String>,
    pub quantity: Option<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub sub_total: Decimal,
}

/// Response for a form quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: PricingQuote,
    pub services: Vec<RowQuoteResponse>,
    pub time_error: bool,
    /// Synchronous errors only; availability is checked separately
    pub errors: Vec<FormError>,
}

impl From<&BookingForm> for QuoteResponse {
    fn from(form: &BookingForm) -> Self {
        Self {
            quote: form.quote(),
            services: form
                .services()
                .iter()
                .enumerate()
                .map(|(index, entry)| RowQuoteResponse {
                    index,
                    service_id: entry.service_id().map(str::to_string),
                    quantity: entry.quantity(),
                    sub_total: entry.sub_total(),
                })
                .collect(),
            time_error: form.has_time_error(),
            errors: form.field_errors(),
        }
    }
}

/// Response for an availability check
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub status: AvailabilityOutcome,
}

/// Generic booking error response
#[derive(Debug, Serialize)]
pub struct BookingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormError>,
}
