//! Domain models and the price-generation engine.
//!
//! This module groups the shared state and the tasks that mutate it:
//! - `price` — `PriceSample` and the random-walk step.
//! - `price_history` — append-only per-symbol sample store.
//! - `config_store` — symbol enable flags and their worker handles.
//! - `update_worker` — the per-symbol generation task.
//! - `engine` — `StockEngine`, the toggle controller tying the above together.

pub mod config_store;
pub mod engine;
pub mod price;
pub mod price_history;
pub mod update_worker;
