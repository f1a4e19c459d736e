use clap::Parser;
use gcp_pricing::cli::{normalize_legacy_flags, Cli};

fn main() -> anyhow::Result<()> {
    gcp_pricing::init_tracing();
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    cli.run()
}
