//! In-memory caching using moka
//!
//! Venues and services are read-only reference data shared by every form
//! session, so they are fetched once and refreshed in the background.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::api::BookingApi;
use crate::booking::{priced_services, priced_venues};
use crate::models::{Service, Venue};

/// Application cache holding reference data from the booking API
#[derive(Clone)]
pub struct AppCache {
    /// Venue list (single entry)
    pub venues: Cache<String, Arc<Vec<Venue>>>,
    /// Service list (single entry)
    pub services: Cache<String, Arc<Vec<Service>>>,
}

impl AppCache {
    pub const VENUES_KEY: &'static str = "venues";
    pub const SERVICES_KEY: &'static str = "services";

    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            venues: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            services: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            venues_cached: self.venues.entry_count() > 0,
            services_cached: self.services.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.venues.invalidate_all();
        self.services.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

/// Which reference lists are currently cached
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub venues_cached: bool,
    pub services_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes it every `every`.
pub async fn start_cache_warmer(cache: AppCache, api: Arc<dyn BookingApi>, every: Duration) {
    let mut interval = interval(every.max(Duration::from_secs(1)));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, api.as_ref()).await;
    }
}

/// Reload venues and services; a failed fetch keeps the previous entry
pub async fn warm_cache(cache: &AppCache, api: &dyn BookingApi) {
    info!("Starting cache warm-up...");

    match api.venues().await {
        Ok(venues) => {
            cache
                .venues
                .insert(AppCache::VENUES_KEY.to_string(), Arc::new(priced_venues(venues)))
                .await;
        }
        Err(e) => warn!("Failed to warm venues cache: {}", e),
    }

    match api.services().await {
        Ok(services) => {
            cache
                .services
                .insert(AppCache::SERVICES_KEY.to_string(), Arc::new(priced_services(services)))
                .await;
        }
        Err(e) => warn!("Failed to warm services cache: {}", e),
    }

    cache.venues.run_pending_tasks().await;
    cache.services.run_pending_tasks().await;
    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
