//! Unit price extraction from tiered pricing data

use crate::types::{CatalogSku, PricingInfo, SkuRecord};

/// Price derived from the first tier of the first pricing entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitPrice {
    pub units: i64,
    pub nanos: i32,
    pub currency_code: String,
    /// `units + nanos / 1e9`
    pub price: f64,
    /// e.g. "5.5000000000 USD per hour"
    pub per_unit: String,
}

impl UnitPrice {
    /// Extract the unit price from a SKU's pricing info.
    ///
    /// Only the first tiered rate of the first pricing entry is consulted.
    /// Missing pricing data yields a zero price and an empty display string.
    pub fn from_pricing(pricing_info: &[PricingInfo]) -> Self {
        let Some(info) = pricing_info.first() else {
            return Self::default();
        };
        let expression = &info.pricing_expression;
        let Some(rate) = expression.tiered_rates.first() else {
            return Self::default();
        };

        let money = &rate.unit_price;
        let price = money.units as f64 + money.nanos as f64 / 1e9;
        let per_unit = format!(
            "{:.10} {} per {}",
            price, money.currency_code, expression.usage_unit_description
        );

        Self {
            units: money.units,
            nanos: money.nanos,
            currency_code: money.currency_code.clone(),
            price,
            per_unit,
        }
    }
}

impl SkuRecord {
    /// Flatten a catalog SKU and attach its derived price fields
    pub fn from_catalog(sku: CatalogSku) -> Self {
        let price = UnitPrice::from_pricing(&sku.pricing_info);
        let expression = sku
            .pricing_info
            .first()
            .map(|info| info.pricing_expression.clone())
            .unwrap_or_default();

        Self {
            name: sku.name,
            sku_id: sku.sku_id,
            description: sku.description,
            service_display_name: sku.category.service_display_name,
            resource_family: sku.category.resource_family,
            resource_group: sku.category.resource_group,
            usage_type: sku.category.usage_type,
            service_regions: sku.service_regions,
            pricing_info: sku.pricing_info,
            service_provider_name: sku.service_provider_name,
            geo_taxonomy: sku.geo_taxonomy,
            mapping: String::new(),
            nanos: price.nanos,
            units: price.units,
            currency_code: price.currency_code,
            usage_unit: expression.usage_unit,
            usage_unit_description: expression.usage_unit_description,
            base_unit: expression.base_unit,
            base_unit_description: expression.base_unit_description,
            base_unit_conversion_factor: expression.base_unit_conversion_factor,
            display_quantity: expression.display_quantity,
            calculated_price: price.price,
            price_per_unit: price.per_unit,
        }
    }
}
