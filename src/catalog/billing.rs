//! Cloud Billing catalog REST client (`services.skus.list`)

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{service_parent, CatalogClient, SkuStream};
use crate::types::{CatalogSku, PricingError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://cloudbilling.googleapis.com";

/// Largest page the catalog API serves
pub const DEFAULT_PAGE_SIZE: u32 = 5000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One page of `services.skus.list`.
///
/// SKUs stay as raw JSON so a single bad entry can be skipped without
/// losing the rest of the page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SkuPage {
    skus: Vec<serde_json::Value>,
    next_page_token: Option<String>,
}

/// Google API error envelope
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Blocking client for the public Cloud Billing catalog, authenticated by API key
pub struct CloudBillingClient {
    http: Client,
    endpoint: String,
    api_key: String,
    page_size: u32,
    currency: Option<String>,
}

impl CloudBillingClient {
    /// Create a client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gcp-pricing/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            currency: None,
        })
    }

    /// Point the client at a different base URL (for testing)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Ask the API to quote prices in `currency` instead of USD
    pub fn with_currency(mut self, currency: Option<String>) -> Self {
        self.currency = currency;
        self
    }

    fn skus_url(&self, parent: &str) -> String {
        format!("{}/v1/{}/skus", self.endpoint, parent)
    }

    /// Fetch a single page of SKUs
    fn fetch_page(&self, parent: &str, page_token: Option<&str>) -> Result<SkuPage> {
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        if let Some(ref currency) = self.currency {
            query.push(("currencyCode", currency.clone()));
        }

        debug!(parent, ?page_token, "Requesting SKU page");

        // Strip URLs from transport errors: the query carries the API key
        let response = self
            .http
            .get(self.skus_url(parent))
            .query(&query)
            .send()
            .map_err(|e| PricingError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PricingError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let mut body = response
            .bytes()
            .map_err(|e| PricingError::Http(e.without_url()))?
            .to_vec();
        simd_json::from_slice(&mut body)
            .map_err(|e| PricingError::Decode(format!("SKU page for {}: {}", parent, e)))
    }
}

impl CatalogClient for CloudBillingClient {
    fn list_skus<'a>(&'a self, service_id: &str) -> SkuStream<'a> {
        Box::new(SkuPages::new(self, service_parent(service_id)))
    }
}

/// Pull the human-readable message out of a Google error body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

/// Lazy SKU iterator that requests the next page once the current one is drained
struct SkuPages<'a> {
    client: &'a CloudBillingClient,
    parent: String,
    buffer: std::vec::IntoIter<serde_json::Value>,
    next_token: Option<String>,
    exhausted: bool,
}

impl<'a> SkuPages<'a> {
    fn new(client: &'a CloudBillingClient, parent: String) -> Self {
        Self {
            client,
            parent,
            buffer: Vec::new().into_iter(),
            next_token: None,
            exhausted: false,
        }
    }
}

impl Iterator for SkuPages<'_> {
    type Item = Result<CatalogSku>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(raw) = self.buffer.next() {
                return Some(serde_json::from_value(raw).map_err(|e| {
                    PricingError::Decode(format!("SKU in {}: {}", self.parent, e))
                }));
            }

            if self.exhausted {
                return None;
            }

            match self
                .client
                .fetch_page(&self.parent, self.next_token.as_deref())
            {
                Ok(page) => {
                    self.next_token = page.next_page_token.filter(|t| !t.is_empty());
                    self.exhausted = self.next_token.is_none();
                    self.buffer = page.skus.into_iter();
                }
                Err(e) => {
                    // A failed page ends this service; retrying the same
                    // token would fail the same way
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
