//! Wire models shared with the remote booking API

pub mod availability;
pub mod booking;
pub mod time_of_day;
pub mod venue;

pub use availability::AvailabilityRecord;
pub use booking::{Booking, BookingStatus, ServiceSelection};
pub use venue::{Service, Venue};
