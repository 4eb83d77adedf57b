//! Display form of live-feed pushes.
//!
//! Each `StockPrices` message from the server carries a map; the client flattens it
//! into one `PriceLine` per entry and prints it as text or as a JSON line.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use stock_common::proto::StockPrices;

/// Price for a single symbol at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    /// Symbol identifier.
    pub code: String,
    /// Latest generated price.
    pub price: i64,
    /// Generation time, if the server sent a valid one.
    pub timestamp: Option<DateTime<Utc>>,
}

impl PriceLine {
    /// Flatten a pushed message into lines, ordered by symbol.
    pub fn from_prices(msg: StockPrices) -> Vec<PriceLine> {
        let mut lines: Vec<PriceLine> = msg
            .prices
            .into_iter()
            .map(|(code, price)| PriceLine {
                code,
                price: price.price,
                timestamp: price
                    .timestamp
                    .and_then(|ts| DateTime::from_timestamp(ts.seconds, ts.nanos.max(0) as u32)),
            })
            .collect();
        lines.sort_by(|a, b| a.code.cmp(&b.code));
        lines
    }
}

impl fmt::Display for PriceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "{} Price={} Time={}", self.code, self.price, ts.to_rfc3339()),
            None => write!(f, "{} Price={}", self.code, self.price),
        }
    }
}
