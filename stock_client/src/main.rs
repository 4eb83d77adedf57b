//! Stock Client: a gRPC client for the simulated stock price server.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client list
//! stock_client toggle AAPL=off TSLA=on
//! stock_client subscriptions
//! stock_client --server http://10.0.0.5:50051 live MSFT=on --json
//! ```
//!
//! `live` keeps printing pushed prices until Ctrl+C or until the server closes the
//! stream.
#![warn(missing_docs)]
mod args;
mod model;
mod sender;

use crate::args::{Action, Args, ToggleArg};
use crate::model::price_line::PriceLine;
use crate::sender::FeedClient;
use clap::Parser;
use log::{error, info};
use std::future::Future;
use stock_common::Result;
use stock_common::StockError;
use stock_common::proto::StockPrices;
use tokio_stream::{Stream, StreamExt};
use tonic::Status;

/// Print pushed prices until `shutdown` resolves or the server ends the feed.
///
/// `shutdown` is polled as one pinned future for the whole session, so a signal that
/// fires while a batch is being printed is still seen on the next pass. Returns the
/// number of printed lines.
async fn print_feed<S, F>(mut feed: S, shutdown: F, json: bool) -> Result<usize>
where
    S: Stream<Item = std::result::Result<StockPrices, Status>> + Unpin,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut printed = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Closing live feed...");
                break;
            }
            msg = feed.next() => match msg {
                Some(prices) => {
                    for line in PriceLine::from_prices(prices?) {
                        if json {
                            println!("{}", serde_json::to_string(&line)?);
                        } else {
                            info!("PRICE: {}", line);
                        }
                        printed += 1;
                    }
                }
                None => {
                    info!("Server closed the live feed");
                    break;
                }
            }
        }
    }
    Ok(printed)
}

async fn run_live(client: &mut FeedClient, toggles: Vec<ToggleArg>, json: bool) -> Result<()> {
    let (toggle_tx, feed) = client.live(toggles).await?;
    info!("Live feed open. Press Ctrl+C to exit.");

    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C received."),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    print_feed(feed, ctrl_c, json).await?;

    drop(toggle_tx);
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut client = FeedClient::connect(args.server).await?;

    match args.action {
        Action::List => {
            for code in client.list().await? {
                println!("{}", code);
            }
        }
        Action::Toggle { toggles } => {
            let enabled = client.toggle(toggles).await?;
            println!("Enabled: {}", enabled.join(", "));
        }
        Action::Subscriptions => {
            for code in client.subscriptions().await? {
                println!("{}", code);
            }
        }
        Action::Live { toggles, json } => run_live(&mut client, toggles, json).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), StockError> {
    init_logger();
    let args = Args::parse();
    run(args).await.inspect_err(|e| error!("{}", e))
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
