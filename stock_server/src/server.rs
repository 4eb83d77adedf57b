//! Process bootstrap: wires the engine into a tonic server with reflection.

use crate::model::engine::StockEngine;
use crate::service::StockFeed;
use log::info;
use std::future::Future;
use std::sync::Arc;
use stock_common::Result;
use stock_common::proto::FILE_DESCRIPTOR_SET;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

/// Serve `StockService` and gRPC reflection on `listener` until `signal` resolves.
///
/// On `signal` the engine's shutdown token is cancelled first, which ends every live
/// feed session so in-flight streams let the server drain. Workers are awaited before
/// returning.
pub async fn serve<F>(engine: Arc<StockEngine>, listener: TcpListener, signal: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    info!("server listening at {}", listener.local_addr()?);

    let shutdown = engine.shutdown_token();
    let signal = async move {
        signal.await;
        info!("Shutdown requested");
        shutdown.cancel();
    };

    Server::builder()
        .add_service(StockFeed::new(Arc::clone(&engine)).into_server())
        .add_service(reflection)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
        .await?;

    engine.shutdown().await;
    Ok(())
}
