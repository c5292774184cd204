//! Venue and service lookups for one form session

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::api::{BookingApi, ClientResult};
use crate::cache::AppCache;
use crate::models::{Service, Venue};

/// Reference data the form prices against
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    venues: Arc<Vec<Venue>>,
    services: Arc<Vec<Service>>,
}

/// Keep venues with a positive hourly rate
pub fn priced_venues(venues: Vec<Venue>) -> Vec<Venue> {
    venues
        .into_iter()
        .filter(|v| {
            let priced = v.price_per_hour > Decimal::ZERO;
            if !priced {
                warn!("Dropping venue {} with price per hour {}", v.id, v.price_per_hour);
            }
            priced
        })
        .collect()
}

/// Keep services with a positive per-person price
pub fn priced_services(services: Vec<Service>) -> Vec<Service> {
    services
        .into_iter()
        .filter(|s| {
            let priced = s.price_per_person > Decimal::ZERO;
            if !priced {
                warn!("Dropping service {} with price per person {}", s.id, s.price_per_person);
            }
            priced
        })
        .collect()
}

impl Catalog {
    /// Build from raw reference data; unpriced entries are dropped
    pub fn new(venues: Vec<Venue>, services: Vec<Service>) -> Self {
        Self::from_shared(
            Arc::new(priced_venues(venues)),
            Arc::new(priced_services(services)),
        )
    }

    pub fn from_shared(venues: Arc<Vec<Venue>>, services: Arc<Vec<Service>>) -> Self {
        Self { venues, services }
    }

    /// Load reference data, reading through the cache
    pub async fn load<A: BookingApi + ?Sized>(api: &A, cache: &AppCache) -> ClientResult<Self> {
        let venues = match cache.venues.get(AppCache::VENUES_KEY).await {
            Some(cached) => {
                debug!("Cache HIT for venues");
                cached
            }
            None => {
                debug!("Cache MISS for venues");
                let venues = Arc::new(priced_venues(api.venues().await?));
                cache
                    .venues
                    .insert(AppCache::VENUES_KEY.to_string(), venues.clone())
                    .await;
                venues
            }
        };

        let services = match cache.services.get(AppCache::SERVICES_KEY).await {
            Some(cached) => {
                debug!("Cache HIT for services");
                cached
            }
            None => {
                debug!("Cache MISS for services");
                let services = Arc::new(priced_services(api.services().await?));
                cache
                    .services
                    .insert(AppCache::SERVICES_KEY.to_string(), services.clone())
                    .await;
                services
            }
        };

        Ok(Self::from_shared(venues, services))
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn venue(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn price_per_person(&self, service_id: Option<&str>) -> Option<Decimal> {
        service_id
            .and_then(|id| self.service(id))
            .map(|s| s.price_per_person)
    }

    pub fn price_per_hour(&self, venue_id: Option<&str>) -> Option<Decimal> {
        venue_id.and_then(|id| self.venue(id)).map(|v| v.price_per_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use crate::models::Booking;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingApi {
        calls: AtomicUsize,
        free_items: bool,
    }

    #[async_trait]
    impl BookingApi for CountingApi {
        async fn venues(&self) -> ClientResult<Vec<Venue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut venues = vec![Venue {
                id: "v1".to_string(),
                name: "Main Hall".to_string(),
                price_per_hour: dec!(80),
            }];
            if self.free_items {
                venues.push(Venue {
                    id: "v0".to_string(),
                    name: "Broken Hall".to_string(),
                    price_per_hour: dec!(-50),
                });
            }
            Ok(venues)
        }

        async fn services(&self) -> ClientResult<Vec<Service>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.free_items {
                return Ok(vec![]);
            }
            Ok(vec![
                Service {
                    id: "s0".to_string(),
                    name: "Free Parking".to_string(),
                    price_per_person: Decimal::ZERO,
                },
                Service {
                    id: "s1".to_string(),
                    name: "Catering".to_string(),
                    price_per_person: dec!(4.5),
                },
            ])
        }

        async fn availability(&self, _: &str, _: NaiveDate) -> ClientResult<serde_json::Value> {
            Err(ClientError::NotFound("unused".to_string()))
        }

        async fn create_booking(&self, _: &Booking) -> ClientResult<Booking> {
            Err(ClientError::NotFound("unused".to_string()))
        }

        async fn bookings(&self) -> ClientResult<Vec<Booking>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_load_reads_through_cache() {
        let api = CountingApi::default();
        let cache = AppCache::default();

        let first = Catalog::load(&api, &cache).await.unwrap();
        let second = Catalog::load(&api, &cache).await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.venues(), second.venues());
        assert_eq!(second.price_per_hour(Some("v1")), Some(dec!(80)));
        assert_eq!(second.price_per_hour(Some("nope")), None);
        assert_eq!(second.price_per_person(None), None);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let api = CountingApi::default();
        let cache = AppCache::default();

        Catalog::load(&api, &cache).await.unwrap();
        cache.invalidate_all();
        Catalog::load(&api, &cache).await.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_load_drops_unpriced_entries() {
        let api = CountingApi {
            free_items: true,
            ..Default::default()
        };
        let cache = AppCache::default();

        let catalog = Catalog::load(&api, &cache).await.unwrap();
        assert_eq!(catalog.venues().len(), 1);
        assert!(catalog.venue("v0").is_none());
        assert!(catalog.service("s0").is_none());
        assert_eq!(catalog.price_per_person(Some("s1")), Some(dec!(4.5)));
    }

    #[test]
    fn test_new_drops_unpriced_entries() {
        let catalog = Catalog::new(
            vec![Venue {
                id: "v1".to_string(),
                name: "Free Hall".to_string(),
                price_per_hour: Decimal::ZERO,
            }],
            vec![],
        );
        assert!(catalog.venues().is_empty());
    }
}
