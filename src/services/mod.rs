//! Region filtering, price extraction, collection and output

pub mod collector;
pub mod pricing;
pub mod region;
pub mod writer;

pub use collector::{Collection, SkuCollector};
pub use pricing::UnitPrice;
pub use region::{applies_to_region, RegionConfig};
