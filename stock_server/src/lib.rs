//! Simulated live market-data server.
//!
//! A fixed set of symbols each get a randomized integer price series, generated by one
//! background worker per enabled symbol. Clients reach the engine over gRPC:
//!
//! - `model` — price samples, per-symbol history, the configuration table, workers and
//!   the `StockEngine` toggle controller that owns them.
//! - `live_feed` — the bidirectional `LiveStock` session (inbound toggles, outbound
//!   price pushes).
//! - `service` — the `StockService` handlers.
//! - `server` — tonic server wiring with reflection and graceful shutdown.
#![warn(missing_docs)]

pub mod args;
pub mod live_feed;
pub mod model;
pub mod server;
pub mod service;
