//! Walks the service list and keeps the SKUs that apply to one region

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::catalog::CatalogClient;
use crate::services::region::applies_to_region;
use crate::types::SkuRecord;

/// Pause between services to stay under the catalog API rate limit
pub const DEFAULT_SERVICE_DELAY: Duration = Duration::from_secs(3);

/// Matching records plus counters for the run summary
#[derive(Debug, Default)]
pub struct Collection {
    /// In service order, then API page order
    pub records: Vec<SkuRecord>,
    /// SKUs received, matching or not
    pub fetched: usize,
    /// Entries dropped because they failed to fetch or decode
    pub skipped: usize,
}

pub struct SkuCollector<C> {
    client: C,
    region: String,
    delay: Duration,
}

impl<C: CatalogClient> SkuCollector<C> {
    pub fn new(client: C, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
            delay: DEFAULT_SERVICE_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fetch every service in order and flatten the SKUs that apply to the region.
    ///
    /// Per-SKU errors are logged and skipped; they never abort the run.
    pub fn collect<S: AsRef<str>>(&self, service_ids: &[S]) -> Collection {
        let mut collection = Collection::default();

        for (i, service_id) in service_ids.iter().enumerate() {
            if i > 0 {
                self.pause();
            }

            let service_id = service_id.as_ref();
            info!(service = service_id, "Fetching SKUs for service");
            let matched_before = collection.records.len();

            for item in self.client.list_skus(service_id) {
                match item {
                    Ok(sku) => {
                        collection.fetched += 1;
                        if applies_to_region(&sku.service_regions, &self.region) {
                            collection.records.push(SkuRecord::from_catalog(sku));
                        }
                    }
                    Err(e) => {
                        collection.skipped += 1;
                        warn!(service = service_id, error = %e, "Error fetching SKU, skipping");
                    }
                }
            }

            info!(
                service = service_id,
                matched = collection.records.len() - matched_before,
                "Finished service"
            );
        }

        collection
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}
