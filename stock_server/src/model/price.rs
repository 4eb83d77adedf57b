//! Price sample model and the random-walk step.
//!
//! A `PriceSample` is one generated point of a symbol's series. Prices are plain
//! signed integers with no currency semantics and no floor: a long enough walk can
//! go negative.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use stock_common::proto::StockPrice;

/// Price every series starts from on its first tick.
pub const SEED_PRICE: i64 = 10_000;
/// Exclusive upper bound of a single step's magnitude.
pub const MAX_STEP: i64 = 100;

/// One generated price point for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSample {
    /// Symbol identifier.
    pub symbol: String,
    /// Generated price.
    pub price: i64,
    /// Wall-clock time the sample was generated.
    pub timestamp: DateTime<Utc>,
}

impl PriceSample {
    /// Baseline sample appended on a symbol's first tick.
    pub fn seed(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: SEED_PRICE,
            timestamp: Utc::now(),
        }
    }

    /// Next sample of the walk, stamped now.
    pub fn next(&self) -> Self {
        Self {
            symbol: self.symbol.clone(),
            price: next_price(self.price),
            timestamp: Utc::now(),
        }
    }

    /// Wire form of this sample, without the symbol (it keys the outbound map).
    pub fn to_proto(&self) -> StockPrice {
        StockPrice {
            price: self.price,
            timestamp: Some(self.proto_timestamp()),
        }
    }

    /// Wire form of the timestamp.
    pub fn proto_timestamp(&self) -> prost_types::Timestamp {
        prost_types::Timestamp {
            seconds: self.timestamp.timestamp(),
            nanos: self.timestamp.timestamp_subsec_nanos() as i32,
        }
    }
}

/// Calculate the next price: a fair coin picks the direction and the magnitude is
/// drawn uniformly from `[0, MAX_STEP)`.
pub fn next_price(last: i64) -> i64 {
    let mut rng = rand::rng();
    let magnitude = rng.random_range(0..MAX_STEP);
    if rng.random_bool(0.5) {
        last + magnitude
    } else {
        last - magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_bounded() {
        let mut price = SEED_PRICE;
        for _ in 0..10_000 {
            let next = next_price(price);
            assert!((next - price).abs() < MAX_STEP);
            price = next;
        }
    }

    #[test]
    fn walk_moves_both_ways() {
        let steps: Vec<i64> = (0..1_000).map(|_| next_price(0)).collect();
        assert!(steps.iter().any(|p| *p > 0));
        assert!(steps.iter().any(|p| *p < 0));
    }

    #[test]
    fn seed_sample_uses_baseline() {
        let sample = PriceSample::seed("AAPL");
        assert_eq!(sample.price, SEED_PRICE);
        assert_eq!(sample.symbol, "AAPL");
        let next = sample.next();
        assert_eq!(next.symbol, "AAPL");
        assert!(next.timestamp >= sample.timestamp);
    }

    #[test]
    fn sample_serializes_with_rfc3339_time() {
        let sample = PriceSample::seed("GOOG");
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["symbol"], "GOOG");
        assert_eq!(json["price"], SEED_PRICE);
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn proto_timestamp_matches_chrono() {
        let sample = PriceSample::seed("MSFT");
        let ts = sample.proto_timestamp();
        assert_eq!(ts.seconds, sample.timestamp.timestamp());
        assert!(ts.nanos >= 0 && ts.nanos < 1_000_000_000);
        let wire = sample.to_proto();
        assert_eq!(wire.price, SEED_PRICE);
        assert_eq!(wire.timestamp, Some(ts));
    }
}
