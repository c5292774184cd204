//! Booking front-end for event venues.
//!
//! Venues and services come from a remote booking API; the [`booking`] module
//! turns a user's form into a priced, validated [`models::Booking`] and submits
//! it back.

pub mod api;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::BookingApi;
use crate::booking::FormRules;
use crate::cache::AppCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn BookingApi>,
    pub cache: AppCache,
    pub rules: FormRules,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(booking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
