//! Per-symbol price generation task.
//!
//! One `UpdateWorker` runs for each enabled symbol. Every tick it appends the next
//! point of the symbol's walk to the shared `PriceHistory`. Its cancellation token is
//! the one recorded next to the symbol's flag in `ConfigStore`: disabling the symbol
//! cancels it and the worker exits without appending again.

use crate::model::price_history::{Appended, PriceHistory};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Generation task state for a single symbol.
#[derive(Debug)]
pub struct UpdateWorker {
    symbol: String,
    history: Arc<PriceHistory>,
    tick: Duration,
    stop: CancellationToken,
}

impl UpdateWorker {
    /// Create a worker for `symbol` that stops once `stop` is cancelled.
    pub fn new(
        symbol: String,
        history: Arc<PriceHistory>,
        tick: Duration,
        stop: CancellationToken,
    ) -> Self {
        Self {
            symbol,
            history,
            tick,
            stop,
        }
    }

    /// Run until stopped. No lock is held while waiting for the next tick.
    pub async fn run(self) {
        debug!("Worker for {} started", self.symbol);

        loop {
            if self.stop.is_cancelled() {
                break;
            }

            tokio::select! {
                biased;
                _ = self.stop.cancelled() => break,
                _ = tokio::time::sleep(self.tick) => {}
            }

            match self.history.append_next(&self.symbol) {
                Ok(Appended::Seed(sample)) => {
                    info!("{} seeded at {}", sample.symbol, sample.price);
                }
                Ok(Appended::Step(sample)) => {
                    debug!("{} -> {}", sample.symbol, sample.price);
                }
                Err(e) => {
                    error!("Worker for {} failed to append: {}", self.symbol, e);
                    break;
                }
            }
        }

        debug!("Worker for {} stopped", self.symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::price::{MAX_STEP, SEED_PRICE};

    fn spawn_worker(
        symbol: &str,
        history: &Arc<PriceHistory>,
    ) -> (CancellationToken, tokio::task::JoinHandle<()>) {
        let stop = CancellationToken::new();
        let worker = UpdateWorker::new(
            symbol.to_string(),
            Arc::clone(history),
            Duration::from_secs(1),
            stop.clone(),
        );
        (stop, tokio::spawn(worker.run()))
    }

    #[tokio::test(start_paused = true)]
    async fn appends_once_per_tick() {
        let history = Arc::new(PriceHistory::new());
        let (stop, handle) = spawn_worker("AAPL", &history);

        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(history.len("AAPL").unwrap(), 4);

        let all = history.all("AAPL").unwrap();
        assert_eq!(all[0].price, SEED_PRICE);
        for pair in all.windows(2) {
            assert!((pair[1].price - pair[0].price).abs() < MAX_STEP);
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }

        stop.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_appended_before_first_tick() {
        let history = Arc::new(PriceHistory::new());
        let (stop, handle) = spawn_worker("MSFT", &history);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(history.latest("MSFT").unwrap().is_none());

        stop.cancel();
        handle.await.unwrap();
        assert!(history.latest("MSFT").unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_promptly_when_cancelled() {
        let history = Arc::new(PriceHistory::new());
        let (stop, handle) = spawn_worker("GOOG", &history);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let before = history.len("GOOG").unwrap();
        stop.cancel();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let after = history.len("GOOG").unwrap();
        assert!(after <= before + 1);
        assert_eq!(after, before);
    }

    #[tokio::test(start_paused = true)]
    async fn resumes_from_existing_history() {
        let history = Arc::new(PriceHistory::new());
        for _ in 0..3 {
            history.append_next("NFLX").unwrap();
        }
        let last = history.latest("NFLX").unwrap().unwrap();

        let (stop, handle) = spawn_worker("NFLX", &history);
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        stop.cancel();
        handle.await.unwrap();

        let all = history.all("NFLX").unwrap();
        assert_eq!(all.len(), 4);
        assert!((all[3].price - last.price).abs() < MAX_STEP);
    }
}
