//! Form error taxonomy and synchronous field rules

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;
use validator::ValidateEmail;

use super::calculators::PricingPolicy;

/// Tunable form rules
#[derive(Debug, Clone, PartialEq)]
pub struct FormRules {
    pub pricing: PricingPolicy,
    pub company_name_min_len: usize,
    pub min_service_quantity: u32,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            company_name_min_len: 5,
            min_service_quantity: 0,
        }
    }
}

/// A form field, including the fields of each service row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CompanyName,
    CompanyEmail,
    ContactPhone,
    VenueId,
    EventDate,
    StartTime,
    EndTime,
    TotalPeople,
    Services,
    ServiceId(usize),
    Quantity(usize),
    ServiceStartTime(usize),
    ServiceEndTime(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::CompanyName => f.write_str("companyName"),
            Field::CompanyEmail => f.write_str("companyEmail"),
            Field::ContactPhone => f.write_str("contactPhone"),
            Field::VenueId => f.write_str("venueId"),
            Field::EventDate => f.write_str("eventDate"),
            Field::StartTime => f.write_str("startTime"),
            Field::EndTime => f.write_str("endTime"),
            Field::TotalPeople => f.write_str("totalPeople"),
            Field::Services => f.write_str("services"),
            Field::ServiceId(i) => write!(f, "services[{i}].serviceId"),
            Field::Quantity(i) => write!(f, "services[{i}].quantity"),
            Field::ServiceStartTime(i) => write!(f, "services[{i}].startTime"),
            Field::ServiceEndTime(i) => write!(f, "services[{i}].endTime"),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which window a time error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowScope {
    Booking,
    Service(usize),
}

impl fmt::Display for WindowScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowScope::Booking => f.write_str("booking"),
            WindowScope::Service(i) => write!(f, "services[{i}]"),
        }
    }
}

impl Serialize for WindowScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A user-recoverable form error
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FormError {
    #[error("{field} is required")]
    FieldRequired { field: Field },

    #[error("{field} is invalid: {reason}")]
    FormatInvalid { field: Field, reason: String },

    #[error("start time must be before end time ({scope})")]
    TimeError { scope: WindowScope },

    #[error("venue is not available on the selected date")]
    Unavailable,

    #[error("availability could not be verified")]
    ApiError,
}

impl FormError {
    pub fn required(field: Field) -> Self {
        FormError::FieldRequired { field }
    }

    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        FormError::FormatInvalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Required non-blank text
pub fn require_text(field: Field, value: &str) -> Option<FormError> {
    value.trim().is_empty().then(|| FormError::required(field))
}

/// Required text of at least `min` characters
pub fn require_min_length(field: Field, value: &str, min: usize) -> Option<FormError> {
    require_text(field, value).or_else(|| {
        (value.trim().chars().count() < min)
            .then(|| FormError::invalid(field, format!("must be at least {min} characters")))
    })
}

/// Required, well-formed email address
pub fn require_email(field: Field, value: &str) -> Option<FormError> {
    require_text(field, value).or_else(|| {
        (!value.trim().validate_email()).then(|| FormError::invalid(field, "must be a valid email"))
    })
}
