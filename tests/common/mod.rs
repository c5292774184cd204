#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use eventbook_web::api::{BookingApi, ClientError, ClientResult};
use eventbook_web::booking::{AvailabilityResolution, BookingForm, Catalog, FormRules};
use eventbook_web::models::{Booking, Service, Venue};

/// In-memory stand-in for the remote booking API
#[derive(Default)]
pub struct MockApi {
    venues: Vec<Venue>,
    services: Vec<Service>,
    availability: HashMap<(String, NaiveDate), (Duration, Value)>,
    failing_submits: AtomicUsize,
    pub submitted: Mutex<Vec<Booking>>,
    pub availability_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        let catalog = catalog();
        Self {
            venues: catalog.venues().to_vec(),
            services: catalog.services().to_vec(),
            ..Default::default()
        }
    }

    /// Answer availability for (venue, date) with `payload` after `delay`
    pub fn with_availability(mut self, venue_id: &str, date: NaiveDate, delay: Duration, payload: Value) -> Self {
        self.availability
            .insert((venue_id.to_string(), date), (delay, payload));
        self
    }

    /// Answer with a single-record list for (venue, date)
    pub fn with_record(self, venue_id: &str, date: NaiveDate, available: bool) -> Self {
        let payload = json!([{
            "id": "1",
            "venueId": venue_id,
            "date": date.format("%Y-%m-%d").to_string(),
            "available": available
        }]);
        self.with_availability(venue_id, date, Duration::ZERO, payload)
    }

    /// Fail the next `count` booking submissions
    pub fn fail_next_submits(&self, count: usize) {
        self.failing_submits.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn venues(&self) -> ClientResult<Vec<Venue>> {
        Ok(self.venues.clone())
    }

    async fn services(&self) -> ClientResult<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn availability(&self, venue_id: &str, date: NaiveDate) -> ClientResult<Value> {
        self.availability_calls.fetch_add(1, Ordering::SeqCst);
        let Some((delay, payload)) = self.availability.get(&(venue_id.to_string(), date)).cloned() else {
            return Err(ClientError::Upstream {
                status: 503,
                body: "availability backend down".to_string(),
            });
        };
        tokio::time::sleep(delay).await;
        Ok(payload)
    }

    async fn create_booking(&self, booking: &Booking) -> ClientResult<Booking> {
        let fail = self
            .failing_submits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(ClientError::Upstream {
                status: 500,
                body: "try again".to_string(),
            });
        }

        let mut submitted = self.submitted.lock().unwrap();
        let mut created = booking.clone();
        created.id = Some((submitted.len() + 1).to_string());
        submitted.push(created.clone());
        Ok(created)
    }

    async fn bookings(&self) -> ClientResult<Vec<Booking>> {
        Ok(self.submitted.lock().unwrap().clone())
    }
}

pub fn t(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

pub fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Venue {
                id: "v1".to_string(),
                name: "Main Hall".to_string(),
                price_per_hour: dec!(100),
            },
            Venue {
                id: "v2".to_string(),
                name: "Garden".to_string(),
                price_per_hour: dec!(250),
            },
        ],
        vec![
            Service {
                id: "s1".to_string(),
                name: "Catering".to_string(),
                price_per_person: dec!(5),
            },
            Service {
                id: "s2".to_string(),
                name: "Audio".to_string(),
                price_per_person: dec!(2.5),
            },
        ],
    )
}

/// Form with every field filled in except the event date
pub fn form_without_date() -> BookingForm {
    let mut form = BookingForm::new(catalog(), FormRules::default());
    form.set_company_name("Acme Events");
    form.set_company_email("ops@acme.test");
    form.set_contact_phone("555-0100");
    let _ = form.set_venue(Some("v1".to_string()));
    form.set_start_time(t(9, 0));
    form.set_end_time(t(13, 0));
    form.set_total_people(Some(120));
    form.set_service_id(0, Some("s1".to_string()));
    form.set_service_quantity(0, Some(120));
    form.set_service_window(0, t(9, 0), t(10, 0));
    form
}

/// Request body for a complete booking on `date`
pub fn booking_request(date: NaiveDate) -> Value {
    json!({
        "companyName": "Acme Events",
        "companyEmail": "ops@acme.test",
        "contactPhone": "555-0100",
        "venueId": "v1",
        "eventDate": date.format("%Y-%m-%d").to_string(),
        "startTime": "09:00",
        "endTime": "13:00",
        "totalPeople": 120,
        "services": [
            {"serviceId": "s1", "quantity": 120, "startTime": "09:00", "endTime": "10:00"}
        ]
    })
}

pub fn resolve_available(form: &mut BookingForm, token: u64) {
    form.apply_availability(AvailabilityResolution {
        token,
        outcome: eventbook_web::booking::AvailabilityOutcome::Available,
    });
}
