//! Command-line arguments for the stock server.
use clap::Parser;
use std::time::Duration;
use stock_common::net::{BIND_HOST, SERVICE_PORT};
use stock_common::symbols::SeedSymbol;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Interface to bind.
    #[clap(long, default_value = BIND_HOST)]
    pub host: String,

    /// TCP port for the gRPC service.
    #[clap(long, default_value_t = SERVICE_PORT)]
    pub port: u16,

    /// Milliseconds between generated samples and between live-feed pushes.
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Symbols enabled at startup, comma separated.
    #[clap(long, value_delimiter = ',', default_values_t = SeedSymbol::codes())]
    pub symbols: Vec<String>,
}

impl Args {
    /// Tick interval as a `Duration`.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
