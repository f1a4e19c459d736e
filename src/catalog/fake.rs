//! In-memory catalog for tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::{CatalogClient, SkuStream};
use crate::types::{CatalogSku, PricingError};

enum Entry {
    Sku(CatalogSku),
    Fail(String),
}

/// Serves canned SKUs per service and records which services were listed
#[derive(Default)]
pub struct FakeCatalog {
    services: HashMap<String, Vec<Entry>>,
    calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sku(mut self, service_id: &str, sku_id: &str, regions: &[&str]) -> Self {
        let sku = CatalogSku {
            name: format!("services/{}/skus/{}", service_id, sku_id),
            sku_id: sku_id.to_string(),
            description: format!("SKU {}", sku_id),
            service_regions: regions.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        };
        self.services
            .entry(service_id.to_string())
            .or_default()
            .push(Entry::Sku(sku));
        self
    }

    pub fn with_failure(mut self, service_id: &str, message: &str) -> Self {
        self.services
            .entry(service_id.to_string())
            .or_default()
            .push(Entry::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CatalogClient for FakeCatalog {
    fn list_skus<'a>(&'a self, service_id: &str) -> SkuStream<'a> {
        self.calls.borrow_mut().push(service_id.to_string());
        let entries = self.services.get(service_id).map(Vec::as_slice).unwrap_or(&[]);
        Box::new(entries.iter().map(|entry| match entry {
            Entry::Sku(sku) => Ok(sku.clone()),
            Entry::Fail(message) => Err(PricingError::Decode(message.clone())),
        }))
    }
}
