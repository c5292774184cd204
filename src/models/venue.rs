//! Reference data: venues and add-on services

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable location with an hourly rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price_per_hour: Decimal,
}

/// An add-on offering priced per person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price_per_person: Decimal,
}
