//! Append-only, per-symbol price series.
//!
//! Each symbol owns its own `Mutex<Vec<PriceSample>>` cell. The outer table is only
//! locked to find or create a cell, so ticks of unrelated symbols never wait on each
//! other and a reader of one symbol's latest sample never sees a half-finished append.
//! Series are never truncated; disabling a symbol leaves its history in place.

use crate::model::price::PriceSample;
use stock_common::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

type Series = Arc<Mutex<Vec<PriceSample>>>;

/// What [`PriceHistory::append_next`] appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appended {
    /// First sample of the series, at the baseline price.
    Seed(PriceSample),
    /// A random-walk step from the previous sample.
    Step(PriceSample),
}

impl Appended {
    /// The appended sample.
    pub fn sample(&self) -> &PriceSample {
        match self {
            Appended::Seed(sample) | Appended::Step(sample) => sample,
        }
    }
}

/// In-memory store of every symbol's generated samples.
#[derive(Debug, Default)]
pub struct PriceHistory {
    series: RwLock<HashMap<String, Series>>,
}

impl PriceHistory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn series(&self, symbol: &str) -> Result<Option<Series>> {
        let table = self.series.read()?;
        Ok(table.get(symbol).cloned())
    }

    fn series_or_create(&self, symbol: &str) -> Result<Series> {
        if let Some(series) = self.series(symbol)? {
            return Ok(series);
        }
        let mut table = self.series.write()?;
        let series = table.entry(symbol.to_string()).or_default();
        Ok(Arc::clone(series))
    }

    /// Add `sample` to the end of its symbol's series.
    pub fn append(&self, sample: PriceSample) -> Result<()> {
        let series = self.series_or_create(&sample.symbol)?;
        series.lock()?.push(sample);
        Ok(())
    }

    /// Append the next point of `symbol`'s walk and report what was appended.
    ///
    /// An empty series receives the baseline seed; otherwise the walk continues from
    /// the most recent price. Read and append happen under the same cell lock.
    pub fn append_next(&self, symbol: &str) -> Result<Appended> {
        let series = self.series_or_create(symbol)?;
        let mut samples = series.lock()?;
        let appended = match samples.last() {
            Some(last) => Appended::Step(last.next()),
            None => Appended::Seed(PriceSample::seed(symbol)),
        };
        samples.push(appended.sample().clone());
        Ok(appended)
    }

    /// Most recent sample, or `None` if the symbol never ticked.
    pub fn latest(&self, symbol: &str) -> Result<Option<PriceSample>> {
        let Some(series) = self.series(symbol)? else {
            return Ok(None);
        };
        let latest = series.lock()?.last().cloned();
        Ok(latest)
    }

    /// Full history in insertion order.
    pub fn all(&self, symbol: &str) -> Result<Vec<PriceSample>> {
        let Some(series) = self.series(symbol)? else {
            return Ok(Vec::new());
        };
        let samples = series.lock()?.clone();
        Ok(samples)
    }

    /// Number of samples recorded for `symbol`.
    pub fn len(&self, symbol: &str) -> Result<usize> {
        let Some(series) = self.series(symbol)? else {
            return Ok(0);
        };
        let len = series.lock()?.len();
        Ok(len)
    }
}
