//! Availability records returned by the booking API

use serde::{Deserialize, Serialize};

/// One (venue, date) availability entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub venue_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub available: bool,
}

impl AvailabilityRecord {
    pub fn matches(&self, venue_id: &str, date: &str) -> bool {
        self.venue_id == venue_id && self.date == date
    }
}
