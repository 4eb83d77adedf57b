//! Calls into the stock server.
//!
//! Thin wrappers around the generated `StockServiceClient` that turn parsed CLI
//! toggles into request streams and unwrap responses into plain values.
use crate::args::ToggleArg;
use log::{debug, info};
use stock_common::{Result, StockError};
use stock_common::proto::stock_service_client::StockServiceClient;
use stock_common::proto::{StockPrices, StockToggle};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Streaming;
use tonic::transport::Channel;

/// Toggles that can be queued before the live feed reads them.
const TOGGLE_BUFFER: usize = 16;

/// Helper type for issuing RPCs against one channel.
pub struct FeedClient {
    inner: StockServiceClient<Channel>,
}

impl FeedClient {
    /// Connect to `endpoint` (e.g. `http://127.0.0.1:50051`).
    pub async fn connect(endpoint: String) -> Result<Self> {
        info!("Connecting to stock server at {}", endpoint);
        let inner = StockServiceClient::connect(endpoint).await?;
        Ok(Self { inner })
    }

    /// Every configured symbol.
    pub async fn list(&mut self) -> Result<Vec<String>> {
        let response = self.inner.list_stocks(()).await?;
        Ok(response.into_inner().codes)
    }

    /// Send `toggles` in order as one client stream and return the enabled set.
    pub async fn toggle(&mut self, toggles: Vec<ToggleArg>) -> Result<Vec<String>> {
        let requests: Vec<StockToggle> = toggles.into_iter().map(StockToggle::from).collect();
        debug!("Sending {} toggles", requests.len());
        let response = self.inner.toggle_stocks(tokio_stream::iter(requests)).await?;
        Ok(response.into_inner().codes)
    }

    /// Currently enabled symbols, in the order the server streams them.
    pub async fn subscriptions(&mut self) -> Result<Vec<String>> {
        let mut stream = self.inner.list_subscriptions(()).await?.into_inner();
        let mut codes = Vec::new();
        while let Some(code) = stream.message().await? {
            codes.push(code.code);
        }
        Ok(codes)
    }

    /// Open the live feed, queueing `toggles` first.
    ///
    /// The returned sender keeps the inbound direction open; dropping it ends the
    /// client's half of the stream while prices keep arriving.
    pub async fn live(
        &mut self,
        toggles: Vec<ToggleArg>,
    ) -> Result<(mpsc::Sender<StockToggle>, Streaming<StockPrices>)> {
        let (tx, rx) = mpsc::channel(TOGGLE_BUFFER.max(toggles.len()));
        for toggle in toggles {
            tx.try_send(toggle.into())
                .map_err(|e| StockError::InvalidArgument(e.to_string()))?;
        }
        let feed = self
            .inner
            .live_stock(ReceiverStream::new(rx))
            .await?
            .into_inner();
        Ok((tx, feed))
    }
}
