//! Symbol configuration table.
//!
//! Maps every known symbol to its enabled flag and, while enabled, the cancellation
//! token of the worker generating its prices. A toggle flips the flag and decides
//! whether a worker must be spawned under one write lock, so two concurrent enables of
//! the same symbol can never both win. Spawning itself is left to the caller, after
//! the lock has been released.
//!
//! Symbols that were never configured read as disabled. Enabling one adds it to the
//! table like any other disabled symbol; disabling one is a no-op.

use stock_common::Result;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Outcome of [`ConfigStore::set`].
#[derive(Debug)]
pub enum Transition {
    /// Requested state already held; nothing changed.
    Unchanged,
    /// The symbol went from disabled to enabled. The caller must start a worker
    /// bound to this token.
    Enabled(CancellationToken),
    /// The symbol went from enabled to disabled and its worker was signalled.
    Disabled,
}

#[derive(Debug)]
struct SymbolEntry {
    enabled: bool,
    /// Token of the worker currently assigned to this symbol.
    worker: Option<CancellationToken>,
}

/// Process-wide table of symbol enable flags.
#[derive(Debug)]
pub struct ConfigStore {
    entries: RwLock<BTreeMap<String, SymbolEntry>>,
    /// Parent of every worker token; cancelling it stops all workers.
    root: CancellationToken,
}

impl ConfigStore {
    /// Create a table where every symbol in `symbols` starts enabled.
    ///
    /// No worker is assigned yet; see [`ConfigStore::claim_unassigned`].
    pub fn new<I, S>(symbols: I, root: CancellationToken) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = symbols
            .into_iter()
            .map(|s| {
                (
                    s.into(),
                    SymbolEntry {
                        enabled: true,
                        worker: None,
                    },
                )
            })
            .collect();
        Self {
            entries: RwLock::new(entries),
            root,
        }
    }

    /// Enabled state of `symbol`; unknown symbols are disabled.
    pub fn get(&self, symbol: &str) -> Result<bool> {
        let entries = self.entries.read()?;
        Ok(entries.get(symbol).is_some_and(|e| e.enabled))
    }

    /// Snapshot of the whole table, ordered by symbol.
    pub fn list(&self) -> Result<BTreeMap<String, bool>> {
        let entries = self.entries.read()?;
        Ok(entries
            .iter()
            .map(|(symbol, e)| (symbol.clone(), e.enabled))
            .collect())
    }

    /// Snapshot of the symbols currently enabled, ordered by symbol.
    pub fn enabled(&self) -> Result<Vec<String>> {
        let entries = self.entries.read()?;
        Ok(entries
            .iter()
            .filter(|(_, e)| e.enabled)
            .map(|(symbol, _)| symbol.clone())
            .collect())
    }

    /// Set `symbol` to `enabled`.
    ///
    /// Idempotent: asking for the current state returns [`Transition::Unchanged`].
    /// On disable the assigned worker's token is cancelled before returning.
    pub fn set(&self, symbol: &str, enabled: bool) -> Result<Transition> {
        let mut entries = self.entries.write()?;
        let current = entries.get(symbol).is_some_and(|e| e.enabled);
        if current == enabled {
            return Ok(Transition::Unchanged);
        }

        if enabled {
            let token = self.root.child_token();
            entries.insert(
                symbol.to_string(),
                SymbolEntry {
                    enabled: true,
                    worker: Some(token.clone()),
                },
            );
            return Ok(Transition::Enabled(token));
        }

        if let Some(entry) = entries.get_mut(symbol) {
            entry.enabled = false;
            if let Some(token) = entry.worker.take() {
                token.cancel();
            }
        }
        Ok(Transition::Disabled)
    }

    /// Assign a fresh worker token to every enabled symbol that has none and return
    /// them. Used once at startup for the pre-seeded symbols.
    pub fn claim_unassigned(&self) -> Result<Vec<(String, CancellationToken)>> {
        let mut entries = self.entries.write()?;
        let mut claimed = Vec::new();
        for (symbol, entry) in entries.iter_mut() {
            if entry.enabled && entry.worker.is_none() {
                let token = self.root.child_token();
                entry.worker = Some(token.clone());
                claimed.push((symbol.clone(), token));
            }
        }
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigStore {
        ConfigStore::new(["AAPL", "MSFT"], CancellationToken::new())
    }

    #[test]
    fn seeded_symbols_start_enabled() {
        let config = store();
        assert!(config.get("AAPL").unwrap());
        assert!(config.get("MSFT").unwrap());
        assert_eq!(config.enabled().unwrap(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn unknown_symbol_reads_disabled() {
        let config = store();
        assert!(!config.get("ZZZZ").unwrap());
        assert!(matches!(
            config.set("ZZZZ", false).unwrap(),
            Transition::Unchanged
        ));
        assert!(!config.list().unwrap().contains_key("ZZZZ"));
    }

    #[test]
    fn enabling_unknown_symbol_adds_it() {
        let config = store();
        assert!(matches!(
            config.set("TSLA", true).unwrap(),
            Transition::Enabled(_)
        ));
        assert!(config.get("TSLA").unwrap());
        assert_eq!(config.list().unwrap().len(), 3);
    }

    #[test]
    fn set_is_idempotent() {
        let config = store();
        assert!(matches!(
            config.set("AAPL", true).unwrap(),
            Transition::Unchanged
        ));
        assert!(matches!(
            config.set("AAPL", false).unwrap(),
            Transition::Disabled
        ));
        assert!(matches!(
            config.set("AAPL", false).unwrap(),
            Transition::Unchanged
        ));
        assert!(matches!(
            config.set("AAPL", true).unwrap(),
            Transition::Enabled(_)
        ));
        assert!(matches!(
            config.set("AAPL", true).unwrap(),
            Transition::Unchanged
        ));
    }

    #[test]
    fn disable_cancels_assigned_worker() {
        let config = store();
        let Transition::Enabled(token) = config
            .set("AAPL", false)
            .and_then(|_| config.set("AAPL", true))
            .unwrap()
        else {
            panic!("expected a fresh worker token");
        };
        assert!(!token.is_cancelled());
        config.set("AAPL", false).unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn re_enable_never_reuses_a_cancelled_token() {
        let config = store();
        config.set("MSFT", false).unwrap();
        let Transition::Enabled(first) = config.set("MSFT", true).unwrap() else {
            panic!("expected enable");
        };
        config.set("MSFT", false).unwrap();
        let Transition::Enabled(second) = config.set("MSFT", true).unwrap() else {
            panic!("expected enable");
        };
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn claim_unassigned_only_once() {
        let config = store();
        let claimed = config.claim_unassigned().unwrap();
        assert_eq!(claimed.len(), 2);
        assert!(config.claim_unassigned().unwrap().is_empty());
    }

    #[test]
    fn root_cancellation_reaches_workers() {
        let root = CancellationToken::new();
        let config = ConfigStore::new(["AAPL"], root.clone());
        let claimed = config.claim_unassigned().unwrap();
        root.cancel();
        assert!(claimed.iter().all(|(_, t)| t.is_cancelled()));
    }

    #[test]
    fn concurrent_enables_spawn_once() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let config = Arc::new(ConfigStore::new(Vec::<String>::new(), CancellationToken::new()));
        let spawned = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let config = Arc::clone(&config);
                let spawned = Arc::clone(&spawned);
                std::thread::spawn(move || {
                    if let Transition::Enabled(_) = config.set("AAPL", true).unwrap() {
                        spawned.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(spawned.load(Ordering::SeqCst), 1);
    }
}
