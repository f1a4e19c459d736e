//! CLI command handling

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use crate::catalog::billing::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE};
use crate::catalog::{CatalogClient, CloudBillingClient, DEFAULT_SERVICE_IDS};
use crate::services::collector::DEFAULT_SERVICE_DELAY;
use crate::services::{writer, RegionConfig, SkuCollector};
use crate::types::{PricingError, Result};

/// Long options that are also accepted with a single dash (`-region=me-central2`)
const LONG_FLAGS: [&str; 9] = [
    "region",
    "config",
    "output-dir",
    "service",
    "delay-secs",
    "page-size",
    "currency",
    "api-key",
    "endpoint",
];

/// Fetch Google Cloud SKU pricing for a region and save it as JSON
#[derive(Parser, Debug)]
#[command(name = "gcp-pricing")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Google Cloud region
    #[arg(long, default_value = "me-central2")]
    region: String,

    /// Region definitions file
    #[arg(long, default_value = "gcp.yml")]
    config: PathBuf,

    /// Directory the pricing file is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Catalog service id to fetch, repeatable (defaults to the built-in list)
    #[arg(long = "service", value_name = "ID")]
    services: Vec<String>,

    /// Seconds to wait between services
    #[arg(long, default_value_t = DEFAULT_SERVICE_DELAY.as_secs())]
    delay_secs: u64,

    /// SKUs requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Quote prices in this currency (ISO 4217) instead of USD
    #[arg(long)]
    currency: Option<String>,

    /// Cloud Billing API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, hide = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let (path, count) = self.run_with(Self::connect)?;

        println!("\nPricing information saved to {}", path.display());
        println!("\nFound {} SKUs for region {}", count, self.region);
        Ok(())
    }

    fn connect(&self, api_key: &str) -> Result<CloudBillingClient> {
        Ok(CloudBillingClient::new(api_key)?
            .with_endpoint(self.endpoint.as_str())
            .with_page_size(self.page_size)
            .with_currency(self.currency.clone()))
    }

    /// Validate settings, fetch through the client built by `connect`, and
    /// write the result file. Returns the file path and record count.
    ///
    /// The API key, region config and region are all checked before
    /// `connect` runs, so bad settings never reach the network.
    fn run_with<C, F>(&self, connect: F) -> Result<(PathBuf, usize)>
    where
        C: CatalogClient,
        F: FnOnce(&Self, &str) -> Result<C>,
    {
        let api_key = require_api_key(self.api_key.as_deref())?;
        let regions = RegionConfig::load(&self.config)?;
        regions.require(&self.region)?;

        info!(region = %self.region, "Fetching pricing");
        let client = connect(self, api_key)?;

        let collector = SkuCollector::new(client, self.region.as_str())
            .with_delay(Duration::from_secs(self.delay_secs));
        let collection = collector.collect(&self.service_ids());

        if collection.skipped > 0 {
            warn!(
                skipped = collection.skipped,
                fetched = collection.fetched,
                "Some SKUs could not be fetched"
            );
        }

        let path = writer::write_records(
            &self.output_dir,
            &self.region,
            &collection.records,
            &Local::now(),
        )?;
        Ok((path, collection.records.len()))
    }

    fn service_ids(&self) -> Vec<String> {
        if self.services.is_empty() {
            DEFAULT_SERVICE_IDS.iter().map(|s| s.to_string()).collect()
        } else {
            self.services.clone()
        }
    }
}

fn require_api_key(api_key: Option<&str>) -> Result<&str> {
    api_key
        .filter(|key| !key.is_empty())
        .ok_or(PricingError::MissingApiKey)
}

/// Rewrite Go-style single-dash long options (`-region=x`) to `--region=x`.
///
/// Short options and unknown names pass through untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let rewritten = arg.to_str().and_then(|s| {
                let flag = s.strip_prefix('-')?;
                if flag.starts_with('-') {
                    return None;
                }
                let name = flag.split_once('=').map_or(flag, |(name, _)| name);
                LONG_FLAGS.contains(&name).then(|| format!("-{}", s))
            });
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}
