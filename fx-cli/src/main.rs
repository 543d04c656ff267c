//! # FX Convert
//!
//! Binary that wires together all the components:
//! - Load configuration from flags, environment and `.env`
//! - Build the shared HTTP client and the API adapters
//! - Create the conversion service
//! - Run the interactive menu on stdin/stdout

mod config;
mod menu;

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_client::{CountryClient, ExchangeRateClient, build_http_client};
use fx_hex::{ConversionService, CurrencyCache};
use fx_types::CurrencyPair;

use crate::config::Config;
use crate::menu::Menu;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fx_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::parse();

    let http = build_http_client(&config.http_settings())?;
    let rates = ExchangeRateClient::with_base_url(http.clone(), &config.api_url);
    let cache = CurrencyCache::new(rates.clone(), config.cache_ttl());

    let mut service = ConversionService::new(config.key_provider(), rates, cache);
    if !config.no_country_lookup {
        service = service.with_country_lookup(CountryClient::with_base_url(
            http,
            &config.country_api_url,
        ));
    }

    tracing::info!(
        api_url = %config.api_url,
        cache_ttl_secs = config.cache_ttl,
        country_lookup = service.has_country_lookup(),
        "Starting currency converter"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&service, CurrencyPair::defaults(), stdin.lock(), stdout.lock())
        .run()
        .await?;

    Ok(())
}
