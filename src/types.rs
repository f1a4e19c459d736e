//! Core types: catalog wire shapes, flattened SKU records, and errors

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while fetching and dumping catalog pricing
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Region '{0}' not found in region config")]
    UnknownRegion(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PricingError>;

/// One SKU as returned by `services.skus.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSku {
    pub name: String,
    pub sku_id: String,
    pub description: String,
    pub category: Category,
    pub service_regions: Vec<String>,
    pub pricing_info: Vec<PricingInfo>,
    pub service_provider_name: String,
    pub geo_taxonomy: Option<GeoTaxonomy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub service_display_name: String,
    pub resource_family: String,
    pub resource_group: String,
    pub usage_type: String,
}

// Nested pricing data is read in the API's camelCase and written back
// in snake_case, the key style of the original dump format.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all(serialize = "snake_case", deserialize = "camelCase"),
    default
)]
pub struct PricingInfo {
    pub effective_time: String,
    pub summary: String,
    pub pricing_expression: PricingExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_info: Option<AggregationInfo>,
    pub currency_conversion_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all(serialize = "snake_case", deserialize = "camelCase"),
    default
)]
pub struct PricingExpression {
    pub usage_unit: String,
    pub display_quantity: f64,
    pub tiered_rates: Vec<TierRate>,
    pub usage_unit_description: String,
    pub base_unit: String,
    pub base_unit_description: String,
    pub base_unit_conversion_factor: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all(serialize = "snake_case", deserialize = "camelCase"),
    default
)]
pub struct TierRate {
    pub start_usage_amount: f64,
    pub unit_price: Money,
}

/// google.type.Money
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all(serialize = "snake_case", deserialize = "camelCase"),
    default
)]
pub struct Money {
    pub currency_code: String,
    #[serde(deserialize_with = "int64_from_json")]
    pub units: i64,
    pub nanos: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all(serialize = "snake_case", deserialize = "camelCase"),
    default
)]
pub struct AggregationInfo {
    pub aggregation_level: String,
    pub aggregation_interval: String,
    pub aggregation_count: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoTaxonomy {
    #[serde(rename = "type")]
    pub kind: String,
    pub regions: Vec<String>,
}

/// Proto3 JSON encodes int64 as a string; accept either form.
fn int64_from_json<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64Repr {
        Number(i64),
        Text(String),
    }

    match Int64Repr::deserialize(deserializer)? {
        Int64Repr::Number(n) => Ok(n),
        Int64Repr::Text(s) if s.is_empty() => Ok(0),
        Int64Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Flattened SKU written to the output file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkuRecord {
    pub name: String,
    pub sku_id: String,
    pub description: String,
    pub service_display_name: String,
    pub resource_family: String,
    pub resource_group: String,
    pub usage_type: String,
    pub service_regions: Vec<String>,
    pub pricing_info: Vec<PricingInfo>,
    pub service_provider_name: String,
    pub geo_taxonomy: Option<GeoTaxonomy>,
    /// Never populated; kept so downstream consumers see a stable shape
    pub mapping: String,
    pub nanos: i32,
    pub units: i64,
    pub currency_code: String,
    pub usage_unit: String,
    pub usage_unit_description: String,
    pub base_unit: String,
    pub base_unit_description: String,
    pub base_unit_conversion_factor: f64,
    pub display_quantity: f64,
    pub calculated_price: f64,
    pub price_per_unit: String,
}
