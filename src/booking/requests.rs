//! Request DTOs for booking API endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::availability::AvailabilityTicket;
use super::catalog::Catalog;
use super::form::BookingForm;
use super::validation::FormRules;
use crate::models::time_of_day::hhmm_option;

/// Snapshot of the booking form as posted by the browser.
///
/// Every field is optional so that partially filled forms can be quoted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingFormRequest {
    pub company_name: String,
    pub company_email: String,
    pub contact_phone: String,
    pub venue_id: Option<String>,
    #[serde(deserialize_with = "date_option::deserialize")]
    pub event_date: Option<NaiveDate>,
    #[serde(with = "hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "hhmm_option")]
    pub end_time: Option<NaiveTime>,
    pub total_people: Option<u32>,
    pub services: Vec<ServiceRowRequest>,
}

/// A service row in the request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRowRequest {
    pub service_id: Option<String>,
    pub quantity: Option<u32>,
    #[serde(with = "hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "hhmm_option")]
    pub end_time: Option<NaiveTime>,
}

impl BookingFormRequest {
    /// Replay the snapshot into a form, returning the availability ticket
    /// issued for its venue/date (if any)
    pub fn into_form(self, catalog: Catalog, rules: FormRules) -> (BookingForm, Option<AvailabilityTicket>) {
        let mut form = BookingForm::new(catalog, rules);
        form.remove_service(0);

        form.set_company_name(self.company_name);
        form.set_company_email(self.company_email);
        form.set_contact_phone(self.contact_phone);
        form.set_start_time(self.start_time);
        form.set_end_time(self.end_time);
        form.set_total_people(self.total_people);

        for row in self.services {
            let index = form.add_service();
            form.set_service_id(index, row.service_id);
            form.set_service_quantity(index, row.quantity);
            form.set_service_window(index, row.start_time, row.end_time);
        }

        // Only the last issued ticket counts; the venue one is superseded.
        let _ = form.set_venue(self.venue_id);
        let ticket = form.set_event_date(self.event_date);
        (form, ticket)
    }
}

/// Request to check availability for a venue/date pair
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityRequest {
    pub venue_id: Option<String>,
    #[serde(deserialize_with = "date_option::deserialize")]
    pub event_date: Option<NaiveDate>,
}

/// `YYYY-MM-DD` dates where an empty string means "not set"
mod date_option {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid date: {value}"))),
        }
    }
}
