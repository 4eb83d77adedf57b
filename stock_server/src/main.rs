//! Stock price streaming server.
//!
//! Binds the gRPC `StockService` (plus reflection) on `--host:--port`, seeds the
//! configured symbols as enabled and starts their price workers. Ctrl+C stops the
//! server, ends live feeds and waits for all workers.
use clap::Parser;
use log::error;
use stock_common::StockError;
use stock_common::net::socket_addr;
use stock_server::args::Args;
use stock_server::model::engine::StockEngine;
use stock_server::server;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), StockError> {
    init_logger();
    let args = Args::parse();

    let bind_addr = socket_addr(&args.host, args.port)
        .inspect_err(|e| error!("invalid bind address {}: {}", args.host, e))?;
    let listener = TcpListener::bind(bind_addr)
        .await
        .inspect_err(|e| error!("failed to listen: {}", e))?;

    let engine = StockEngine::new(args.symbols.clone(), args.tick());
    engine.start()?;

    let signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    server::serve(engine, listener, signal)
        .await
        .inspect_err(|e| error!("failed to serve: {}", e))
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
