//! Bidirectional live price feed.
//!
//! One session per `LiveStock` call. A session runs two directions over the same RPC:
//!
//! - Inbound: a spawned task reading `StockToggle` messages and applying each one to
//!   the engine as it arrives. End of input stops this direction quietly; a receive
//!   error is logged and stops it too. Neither affects the outbound direction.
//! - Outbound: every tick, one `StockPrices` message per enabled symbol that already
//!   has a sample, each carrying exactly that symbol's latest price.
//!
//! Both directions share a session token derived from the engine's shutdown token. The
//! session ends when the client drops the response stream, when a send fails, or when
//! the engine shuts down; the inbound task is then cancelled and awaited so it never
//! outlives the connection.

use crate::model::engine::StockEngine;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use stock_common::Result;
use stock_common::proto::{StockPrices, StockToggle};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Outbound messages buffered per session before pushes wait on the client.
const FEED_BUFFER: usize = 64;

/// Outbound half of a session as handed to tonic.
pub type PriceStream = ReceiverStream<std::result::Result<StockPrices, Status>>;

type PriceSender = mpsc::Sender<std::result::Result<StockPrices, Status>>;

/// Start a live-feed session fed by `inbound` and return its outbound stream.
///
/// Must run inside a tokio runtime.
pub fn open<S>(engine: Arc<StockEngine>, inbound: S) -> PriceStream
where
    S: Stream<Item = std::result::Result<StockToggle, Status>> + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(FEED_BUFFER);
    tokio::spawn(run_session(engine, inbound, tx));
    ReceiverStream::new(rx)
}

async fn run_session<S>(engine: Arc<StockEngine>, inbound: S, tx: PriceSender)
where
    S: Stream<Item = std::result::Result<StockToggle, Status>> + Send + Unpin + 'static,
{
    info!("Live feed session opened");
    let session = engine.shutdown_token().child_token();
    let reader = tokio::spawn(drain_toggles(Arc::clone(&engine), inbound, session.clone()));

    push_prices(&engine, &tx, &session).await;

    session.cancel();
    if let Err(e) = reader.await {
        error!("Live feed toggle reader failed: {}", e);
    }
    info!("Live feed session closed");
}

/// Apply inbound toggles one by one until input ends, errors, or the session stops.
async fn drain_toggles<S>(engine: Arc<StockEngine>, mut inbound: S, session: CancellationToken)
where
    S: Stream<Item = std::result::Result<StockToggle, Status>> + Unpin,
{
    loop {
        let next = tokio::select! {
            _ = session.cancelled() => break,
            next = inbound.next() => next,
        };

        match next {
            Some(Ok(toggle)) => {
                if let Err(e) = engine.set(&toggle.code, toggle.enabled) {
                    warn!("Live feed toggle for {} failed: {}", toggle.code, e);
                }
            }
            Some(Err(status)) => {
                warn!("Live feed inbound stream error: {}", status);
                break;
            }
            None => {
                debug!("Live feed inbound stream finished");
                break;
            }
        }
    }
}

/// Push the latest sample of every enabled symbol once per tick.
async fn push_prices(engine: &StockEngine, tx: &PriceSender, session: &CancellationToken) {
    let tick = engine.tick();
    let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = session.cancelled() => return,
            _ = tx.closed() => return,
            _ = interval.tick() => {}
        }

        let batch = match latest_prices(engine) {
            Ok(batch) => batch,
            Err(e) => {
                error!("Live feed could not read prices: {}", e);
                let _ = tx.send(Err(e.into())).await;
                return;
            }
        };

        for prices in batch {
            if tx.send(Ok(prices)).await.is_err() {
                return;
            }
        }
    }
}

/// One single-entry message per enabled symbol that has a sample.
fn latest_prices(engine: &StockEngine) -> Result<Vec<StockPrices>> {
    let mut batch = Vec::new();
    for code in engine.enabled_codes()? {
        let Some(sample) = engine.latest(&code)? else {
            continue;
        };
        batch.push(StockPrices {
            prices: HashMap::from([(code, sample.to_proto())]),
        });
    }
    Ok(batch)
}
