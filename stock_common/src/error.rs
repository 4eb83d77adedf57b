//! Error types shared between client and server.
//!
//! The `StockError` enum unifies common failure cases for I/O, transport,
//! RPC status, serialization and lock poisoning, allowing crates to propagate a
//! single error type.
use std::io;
use std::net::AddrParseError;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum StockError {
    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A host/port pair could not be turned into a socket address.
    #[error("Invalid address: {0}")]
    AddrParse(#[from] AddrParseError),

    /// gRPC transport failure (bind, connect, serve).
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// A remote call returned a non-OK status.
    #[error("RPC failed: {0}")]
    Status(#[from] tonic::Status),

    /// The reflection service could not be built from the descriptor set.
    #[error("Reflection error: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A user supplied value that cannot be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for StockError {
    fn from(err: PoisonError<T>) -> Self {
        StockError::MutexLock(err.to_string())
    }
}

impl From<StockError> for tonic::Status {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Status(status) => status,
            StockError::InvalidArgument(msg) => tonic::Status::invalid_argument(msg),
            other => tonic::Status::internal(other.to_string()),
        }
    }
}
