//!
//! Common types and utilities shared by the stock server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `StockError` used across the workspace.
//! - `result` — handy `Result<T, StockError>` alias.
//! - `symbols` — the default set of symbols the server seeds at startup.
//! - `net` — networking constants and small helpers.
//! - `proto` — wire types and tonic stubs generated from `proto/stock.proto`.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod proto;
pub mod result;
pub mod symbols;

pub use error::StockError;
pub use result::Result;
