//! In-memory booking form session
//!
//! Pricing is a pure function of the current snapshot (rows, venue, total
//! people, booking window) and is recomputed by every setter that touches one
//! of those inputs. Venue and date setters also issue an availability ticket,
//! which the caller runs and feeds back through [`BookingForm::apply_availability`].

use chrono::{NaiveDate, NaiveTime};

use super::availability::{
    AvailabilityGate, AvailabilityResolution, AvailabilityState, AvailabilityTicket,
};
use super::calculators::{calculate_quote, venue_cost, PricingQuote};
use super::catalog::Catalog;
use super::service_list::ServiceList;
use super::time_window::{TimeWindow, WindowCheck};
use super::validation::{
    require_email, require_min_length, require_text, Field, FormError, FormRules, WindowScope,
};
use crate::api::BookingApi;

/// Overall form validity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Valid,
    /// No synchronous errors, availability still in flight
    Pending,
    Invalid(Vec<FormError>),
}

impl FormStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FormStatus::Valid)
    }
}

/// One user's booking form
#[derive(Debug, Clone)]
pub struct BookingForm {
    rules: FormRules,
    catalog: Catalog,
    company_name: String,
    company_email: String,
    contact_phone: String,
    venue_id: Option<String>,
    event_date: Option<NaiveDate>,
    window: TimeWindow,
    total_people: Option<u32>,
    services: ServiceList,
    quote: PricingQuote,
    availability: AvailabilityGate,
}

impl BookingForm {
    /// New form with a single empty service row
    pub fn new(catalog: Catalog, rules: FormRules) -> Self {
        let mut services = ServiceList::new();
        services.add_entry();
        Self {
            rules,
            catalog,
            company_name: String::new(),
            company_email: String::new(),
            contact_phone: String::new(),
            venue_id: None,
            event_date: None,
            window: TimeWindow::default(),
            total_people: None,
            services,
            quote: PricingQuote::default(),
            availability: AvailabilityGate::new(),
        }
    }

    // ========== Field access ==========

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company_email(&self) -> &str {
        &self.company_email
    }

    pub fn contact_phone(&self) -> &str {
        &self.contact_phone
    }

    pub fn venue_id(&self) -> Option<&str> {
        self.venue_id.as_deref()
    }

    pub fn event_date(&self) -> Option<NaiveDate> {
        self.event_date
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn total_people(&self) -> Option<u32> {
        self.total_people
    }

    pub fn services(&self) -> &ServiceList {
        &self.services
    }

    /// Latest pricing, always in sync with the current snapshot
    pub fn quote(&self) -> PricingQuote {
        self.quote
    }

    pub fn availability(&self) -> AvailabilityState {
        self.availability.state()
    }

    pub fn has_time_error(&self) -> bool {
        self.window.has_time_error()
    }

    // ========== Contact fields ==========

    pub fn set_company_name(&mut self, value: impl Into<String>) {
        self.company_name = value.into();
    }

    pub fn set_company_email(&mut self, value: impl Into<String>) {
        self.company_email = value.into();
    }

    pub fn set_contact_phone(&mut self, value: impl Into<String>) {
        self.contact_phone = value.into();
    }

    // ========== Pricing and availability dependencies ==========

    /// Replace the reference data and re-price every row
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.services.reprice_all(&self.catalog);
        self.recompute();
    }

    #[must_use = "the returned ticket must be run and applied"]
    pub fn set_venue(&mut self, venue_id: Option<String>) -> Option<AvailabilityTicket> {
        self.venue_id = venue_id.filter(|v| !v.trim().is_empty());
        self.recompute();
        self.issue_availability()
    }

    #[must_use = "the returned ticket must be run and applied"]
    pub fn set_event_date(&mut self, date: Option<NaiveDate>) -> Option<AvailabilityTicket> {
        self.event_date = date;
        self.issue_availability()
    }

    pub fn set_start_time(&mut self, start: Option<NaiveTime>) {
        self.window.start = start;
        self.recompute();
    }

    pub fn set_end_time(&mut self, end: Option<NaiveTime>) {
        self.window.end = end;
        self.recompute();
    }

    pub fn set_total_people(&mut self, total_people: Option<u32>) {
        self.total_people = total_people;
        self.recompute();
    }

    // ========== Service rows ==========

    pub fn add_service(&mut self) -> usize {
        self.services.add_entry()
    }

    /// Remove a row; out of range leaves the form unchanged and returns false
    pub fn remove_service(&mut self, index: usize) -> bool {
        let removed = self.services.remove_entry(index).is_some();
        if removed {
            self.recompute();
        }
        removed
    }

    pub fn set_service_id(&mut self, index: usize, service_id: Option<String>) -> bool {
        let service_id = service_id.filter(|v| !v.trim().is_empty());
        let changed = self.services.set_service(index, service_id, &self.catalog);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn set_service_quantity(&mut self, index: usize, quantity: Option<u32>) -> bool {
        let changed = self.services.set_quantity(index, quantity, &self.catalog);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn set_service_window(
        &mut self,
        index: usize,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> bool {
        self.services.set_window(index, start, end)
    }

    // ========== Availability ==========

    /// Apply a resolved ticket; returns false when it was superseded
    pub fn apply_availability(&mut self, resolution: AvailabilityResolution) -> bool {
        self.availability.apply(resolution)
    }

    /// Issue, run and apply one availability check for the current venue/date
    pub async fn refresh_availability<A: BookingApi + ?Sized>(&mut self, api: &A) -> AvailabilityState {
        if let Some(ticket) = self.issue_availability() {
            let resolution = ticket.run(api).await;
            self.apply_availability(resolution);
        }
        self.availability.state()
    }

    fn issue_availability(&mut self) -> Option<AvailabilityTicket> {
        self.availability
            .issue(self.venue_id.as_deref(), self.event_date)
    }

    fn recompute(&mut self) {
        let venue_cost = self
            .catalog
            .price_per_hour(self.venue_id.as_deref())
            .map(|rate| venue_cost(rate, self.window.bounds()))
            .unwrap_or_default();
        self.quote = calculate_quote(
            &self.services.subtotals(),
            venue_cost,
            self.total_people,
            &self.rules.pricing,
        );
    }

    // ========== Validation ==========

    /// Synchronous errors over the whole snapshot, in field order
    pub fn field_errors(&self) -> Vec<FormError> {
        let mut errors = Vec::new();

        errors.extend(require_min_length(
            Field::CompanyName,
            &self.company_name,
            self.rules.company_name_min_len,
        ));
        errors.extend(require_email(Field::CompanyEmail, &self.company_email));
        errors.extend(require_text(Field::ContactPhone, &self.contact_phone));

        match self.venue_id.as_deref() {
            None => errors.push(FormError::required(Field::VenueId)),
            Some(id) if !self.catalog.venues().is_empty() && self.catalog.venue(id).is_none() => {
                errors.push(FormError::invalid(Field::VenueId, "unknown venue"))
            }
            Some(_) => {}
        }
        if self.event_date.is_none() {
            errors.push(FormError::required(Field::EventDate));
        }
        Self::window_errors(
            &mut errors,
            self.window,
            Field::StartTime,
            Field::EndTime,
            WindowScope::Booking,
        );
        if self.total_people.is_none() {
            errors.push(FormError::required(Field::TotalPeople));
        }

        if self.services.is_empty() {
            errors.push(FormError::required(Field::Services));
        }
        for (index, entry) in self.services.iter().enumerate() {
            match entry.service_id() {
                None => errors.push(FormError::required(Field::ServiceId(index))),
                Some(id) if !self.catalog.services().is_empty() && self.catalog.service(id).is_none() => {
                    errors.push(FormError::invalid(Field::ServiceId(index), "unknown service"))
                }
                Some(_) => {}
            }
            match entry.quantity() {
                None => errors.push(FormError::required(Field::Quantity(index))),
                Some(q) if q < self.rules.min_service_quantity => errors.push(FormError::invalid(
                    Field::Quantity(index),
                    format!("must be at least {}", self.rules.min_service_quantity),
                )),
                Some(_) => {}
            }
            Self::window_errors(
                &mut errors,
                entry.window(),
                Field::ServiceStartTime(index),
                Field::ServiceEndTime(index),
                WindowScope::Service(index),
            );
        }

        errors
    }

    fn window_errors(
        errors: &mut Vec<FormError>,
        window: TimeWindow,
        start_field: Field,
        end_field: Field,
        scope: WindowScope,
    ) {
        if window.start.is_none() {
            errors.push(FormError::required(start_field));
        }
        if window.end.is_none() {
            errors.push(FormError::required(end_field));
        }
        if window.check() == WindowCheck::TimeError {
            errors.push(FormError::TimeError { scope });
        }
    }

    /// Aggregate status: synchronous errors first, then the availability gate
    pub fn status(&self) -> FormStatus {
        let mut errors = self.field_errors();
        match self.availability.state() {
            AvailabilityState::Pending { .. } if errors.is_empty() => FormStatus::Pending,
            AvailabilityState::Pending { .. } => FormStatus::Invalid(errors),
            AvailabilityState::Resolved(outcome) => {
                errors.extend(outcome.error());
                if errors.is_empty() {
                    FormStatus::Valid
                } else {
                    FormStatus::Invalid(errors)
                }
            }
        }
    }
}
