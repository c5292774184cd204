//! `reqwest` implementation of [`BookingApi`]

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{BookingApi, ClientError, ClientResult};
use crate::config::ApiConfig;
use crate::models::{Booking, Service, Venue};

/// HTTP client for the mock booking API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Map non-success statuses to errors and decode the JSON body
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => ClientError::NotFound(body),
                s if s.is_client_error() => ClientError::Rejected {
                    status: s.as_u16(),
                    body,
                },
                s => ClientError::Upstream {
                    status: s.as_u16(),
                    body,
                },
            });
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn venues(&self) -> ClientResult<Vec<Venue>> {
        self.get(&self.config.venues_url).await
    }

    async fn services(&self) -> ClientResult<Vec<Service>> {
        self.get(&self.config.services_url).await
    }

    async fn availability(&self, venue_id: &str, date: NaiveDate) -> ClientResult<serde_json::Value> {
        let date = date.format("%Y-%m-%d").to_string();
        debug!("GET {} venueId={} date={}", self.config.availability_url, venue_id, date);
        let response = self
            .client
            .get(&self.config.availability_url)
            .query(&[("venueId", venue_id), ("date", date.as_str())])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create_booking(&self, booking: &Booking) -> ClientResult<Booking> {
        debug!("POST {} code={}", self.config.bookings_url, booking.booking_code);
        let response = self
            .client
            .post(&self.config.bookings_url)
            .json(booking)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get(&self.config.bookings_url).await
    }
}
