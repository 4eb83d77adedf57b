//! gRPC `StockService` implementation.
//!
//! The read paths (`ListStocks`, `ListSubscriptions`) and the bulk toggle
//! (`ToggleStocks`) work directly against the shared `StockEngine`; `LiveStock` hands
//! the connection to a `live_feed` session.

use crate::live_feed::{self, PriceStream};
use crate::model::engine::StockEngine;
use std::collections::HashMap;
use std::sync::Arc;
use stock_common::proto::stock_service_server::{StockService, StockServiceServer};
use stock_common::proto::{StockCode, StockCodes, StockToggle};
use tokio_stream::{Stream, StreamExt};
use tonic::{Request, Response, Status, Streaming};

/// Server-streaming snapshot returned by `ListSubscriptions`.
pub type SubscriptionStream = tokio_stream::Iter<std::vec::IntoIter<Result<StockCode, Status>>>;

/// Handler set backing the `StockService` RPCs.
#[derive(Debug, Clone)]
pub struct StockFeed {
    engine: Arc<StockEngine>,
}

impl StockFeed {
    /// Create handlers over `engine`.
    pub fn new(engine: Arc<StockEngine>) -> Self {
        Self { engine }
    }

    /// Wrap into the tonic service type.
    pub fn into_server(self) -> StockServiceServer<Self> {
        StockServiceServer::new(self)
    }

    /// Read toggles until end of input, apply them, and return the enabled set.
    ///
    /// A symbol sent more than once only keeps its last requested state. A receive
    /// error aborts the call before anything is applied.
    pub async fn apply_toggles<S>(&self, stream: S) -> Result<StockCodes, Status>
    where
        S: Stream<Item = Result<StockToggle, Status>> + Unpin,
    {
        let toggles = collect_toggles(stream).await?;
        self.engine.set_many(toggles)?;
        Ok(StockCodes {
            codes: self.engine.enabled_codes()?,
        })
    }
}

/// Drain a toggle stream into a map where later entries overwrite earlier ones.
async fn collect_toggles<S>(mut stream: S) -> Result<HashMap<String, bool>, Status>
where
    S: Stream<Item = Result<StockToggle, Status>> + Unpin,
{
    let mut toggles = HashMap::new();
    while let Some(toggle) = stream.next().await {
        let toggle = toggle?;
        toggles.insert(toggle.code, toggle.enabled);
    }
    Ok(toggles)
}

#[tonic::async_trait]
impl StockService for StockFeed {
    async fn list_stocks(&self, _request: Request<()>) -> Result<Response<StockCodes>, Status> {
        Ok(Response::new(StockCodes {
            codes: self.engine.all_codes()?,
        }))
    }

    async fn toggle_stocks(
        &self,
        request: Request<Streaming<StockToggle>>,
    ) -> Result<Response<StockCodes>, Status> {
        let codes = self.apply_toggles(request.into_inner()).await?;
        Ok(Response::new(codes))
    }

    type ListSubscriptionsStream = SubscriptionStream;

    async fn list_subscriptions(
        &self,
        _request: Request<()>,
    ) -> Result<Response<Self::ListSubscriptionsStream>, Status> {
        let snapshot: Vec<Result<StockCode, Status>> = self
            .engine
            .enabled_codes()?
            .into_iter()
            .map(|code| Ok(StockCode { code }))
            .collect();
        Ok(Response::new(tokio_stream::iter(snapshot)))
    }

    type LiveStockStream = PriceStream;

    async fn live_stock(
        &self,
        request: Request<Streaming<StockToggle>>,
    ) -> Result<Response<Self::LiveStockStream>, Status> {
        let feed = live_feed::open(Arc::clone(&self.engine), request.into_inner());
        Ok(Response::new(feed))
    }
}
