//! Catalog clients for listing SKUs by service

pub mod billing;
#[cfg(test)]
pub(crate) mod fake;

use crate::types::{CatalogSku, Result};

pub use billing::CloudBillingClient;

/// One-pass stream of SKUs for a single service
pub type SkuStream<'a> = Box<dyn Iterator<Item = Result<CatalogSku>> + 'a>;

/// Services fetched when none are given on the command line
pub const DEFAULT_SERVICE_IDS: [&str; 7] = [
    "6F81-5844-456A", // Compute Engine
    "E505-1604-58F8", // Networking
    "95FF-2EF5-5EA1", // Cloud Storage
    "58CD-E7C3-72CA", // Cloud Monitoring
    "9662-B51E-5089", // Cloud SQL
    "CCD8-9BF1-090E", // Kubernetes Engine
    "5490-F7B7-8DF6", // Cloud Logging
];

/// Source of catalog SKUs
pub trait CatalogClient {
    /// Lazily list every SKU of `services/<service_id>`.
    ///
    /// Errors are yielded per item; a stream may keep producing SKUs after
    /// an error.
    fn list_skus<'a>(&'a self, service_id: &str) -> SkuStream<'a>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn list_skus<'a>(&'a self, service_id: &str) -> SkuStream<'a> {
        (**self).list_skus(service_id)
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for Box<C> {
    fn list_skus<'a>(&'a self, service_id: &str) -> SkuStream<'a> {
        (**self).list_skus(service_id)
    }
}

/// Parent resource name for a service id
pub fn service_parent(service_id: &str) -> String {
    format!("services/{}", service_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_parent() {
        assert_eq!(service_parent("6F81-5844-456A"), "services/6F81-5844-456A");
    }

    #[test]
    fn test_default_services_unique() {
        let mut ids = DEFAULT_SERVICE_IDS.to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DEFAULT_SERVICE_IDS.len());
    }
}
