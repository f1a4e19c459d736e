//! Region definitions and region membership filtering

use crate::types::{PricingError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Region tags that match every requested region
pub const WILDCARD_REGIONS: [&str; 2] = ["global", "multi-region"];

/// Known regions loaded from the `region` key of `gcp.yml`
#[derive(Debug, Default, Deserialize)]
pub struct RegionConfig {
    /// Region name to free-form metadata (only membership is checked)
    #[serde(default)]
    region: BTreeMap<String, serde_yaml_ng::Value>,
}

impl RegionConfig {
    /// Read and parse a region definitions file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PricingError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| PricingError::Config(format!("Cannot parse {}: {}", path.display(), e)))
    }

    /// Parse region definitions from YAML text
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.region.contains_key(region)
    }

    /// Fail unless `region` is defined
    pub fn require(&self, region: &str) -> Result<()> {
        if self.contains(region) {
            Ok(())
        } else {
            Err(PricingError::UnknownRegion(region.to_string()))
        }
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.region.keys().map(String::as_str)
    }
}

/// True if a SKU tagged with `service_regions` applies to `target`.
///
/// Matches the exact region name, or either wildcard tag.
pub fn applies_to_region<S: AsRef<str>>(service_regions: &[S], target: &str) -> bool {
    service_regions.iter().any(|r| {
        let r = r.as_ref();
        r == target || WILDCARD_REGIONS.contains(&r)
    })
}
