//! Toggle controller and owner of all shared engine state.
//!
//! `StockEngine` is built once at startup and shared with every RPC handler through an
//! `Arc`. It owns the `ConfigStore`, the `PriceHistory`, the tick interval and the set
//! of running workers:
//!
//! - Enabling a symbol records the flag and a fresh worker token, then spawns an
//!   `UpdateWorker` on the engine's `TaskTracker`.
//! - Disabling a symbol flips the flag and cancels that token; the worker exits on its
//!   own.
//! - `shutdown` cancels the root token and waits for every worker to finish.

use crate::model::config_store::{ConfigStore, Transition};
use crate::model::price::PriceSample;
use crate::model::price_history::PriceHistory;
use crate::model::update_worker::UpdateWorker;
use log::info;
use stock_common::Result;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Default interval between two generated samples and two live-feed pushes.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Shared price-generation engine.
#[derive(Debug)]
pub struct StockEngine {
    config: ConfigStore,
    history: Arc<PriceHistory>,
    tick: Duration,
    shutdown: CancellationToken,
    workers: TaskTracker,
}

impl StockEngine {
    /// Build an engine whose table holds `symbols`, all enabled. No task runs until
    /// [`StockEngine::start`] is called.
    ///
    /// # Panics
    /// Panics if `tick` is zero: workers would spin and live-feed intervals cannot be
    /// built.
    pub fn new<I, S>(symbols: I, tick: Duration) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(!tick.is_zero(), "tick interval must be non-zero");
        let shutdown = CancellationToken::new();
        Arc::new(Self {
            config: ConfigStore::new(symbols, shutdown.clone()),
            history: Arc::new(PriceHistory::new()),
            tick,
            shutdown,
            workers: TaskTracker::new(),
        })
    }

    /// Spawn a worker for every pre-seeded enabled symbol. Must run inside a tokio
    /// runtime.
    pub fn start(&self) -> Result<()> {
        for (symbol, token) in self.config.claim_unassigned()? {
            info!("Stock {} enabled", symbol);
            self.spawn_worker(symbol, token);
        }
        Ok(())
    }

    fn spawn_worker(&self, symbol: String, token: CancellationToken) {
        let worker = UpdateWorker::new(symbol, Arc::clone(&self.history), self.tick, token);
        self.workers.spawn(worker.run());
    }

    /// Enable or disable `symbol`.
    ///
    /// Only a disabled → enabled transition starts a worker; repeating the current
    /// state does nothing.
    pub fn set(&self, symbol: &str, enabled: bool) -> Result<()> {
        match self.config.set(symbol, enabled)? {
            Transition::Unchanged => {}
            Transition::Enabled(token) => {
                info!("Changing {} to enabled", symbol);
                self.spawn_worker(symbol.to_string(), token);
            }
            Transition::Disabled => {
                info!("Changing {} to disabled", symbol);
            }
        }
        Ok(())
    }

    /// Apply a batch of toggles; for repeated symbols the last entry wins.
    pub fn set_many<I>(&self, toggles: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let latest: HashMap<String, bool> = toggles.into_iter().collect();
        for (symbol, enabled) in latest {
            self.set(&symbol, enabled)?;
        }
        Ok(())
    }

    /// Enabled state of `symbol`.
    pub fn get(&self, symbol: &str) -> Result<bool> {
        self.config.get(symbol)
    }

    /// Snapshot of the whole configuration table.
    pub fn list(&self) -> Result<BTreeMap<String, bool>> {
        self.config.list()
    }

    /// Every configured symbol regardless of state.
    pub fn all_codes(&self) -> Result<Vec<String>> {
        Ok(self.config.list()?.into_keys().collect())
    }

    /// Symbols currently enabled.
    pub fn enabled_codes(&self) -> Result<Vec<String>> {
        self.config.enabled()
    }

    /// Latest sample of `symbol`, if it ever ticked.
    pub fn latest(&self, symbol: &str) -> Result<Option<PriceSample>> {
        self.history.latest(symbol)
    }

    /// Full history of `symbol` in generation order.
    pub fn history(&self, symbol: &str) -> Result<Vec<PriceSample>> {
        self.history.all(symbol)
    }

    /// Tick interval shared by workers and live-feed sessions.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Token cancelled when the engine shuts down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop every worker and wait for them to exit.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.workers.close();
        self.workers.wait().await;
        info!("All stock workers stopped");
    }
}
