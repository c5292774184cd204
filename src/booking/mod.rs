//! Booking form engine.
//!
//! Pricing, time-window checks, the service row list, the availability gate
//! and submission. Everything except the availability check and the final
//! submit is synchronous and free of I/O.

pub mod availability;
pub mod calculators;
pub mod catalog;
pub mod form;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod service_list;
pub mod submission;
pub mod time_window;
pub mod validation;

// Re-export commonly used items
pub use availability::{
    check_availability, AvailabilityGate, AvailabilityOutcome, AvailabilityResolution,
    AvailabilityState, AvailabilityTicket,
};
pub use calculators::{round_money, PricingPolicy, PricingQuote};
pub use catalog::{priced_services, priced_venues, Catalog};
pub use form::{BookingForm, FormStatus};
pub use routes::router;
pub use service_list::{ServiceEntry, ServiceList};
pub use submission::{build_booking, generate_booking_code, submit_booking, SubmitError};
pub use time_window::{TimeWindow, WindowCheck};
pub use validation::{Field, FormError, FormRules, WindowScope};
