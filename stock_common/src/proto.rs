//! Wire types and tonic stubs generated from `proto/stock.proto`.
#![allow(missing_docs)]

tonic::include_proto!("stock");

/// Encoded descriptor set consumed by the gRPC reflection service.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("stock_descriptor");

impl StockToggle {
    /// Build a toggle request for `code`.
    pub fn new(code: impl Into<String>, enabled: bool) -> Self {
        Self {
            code: code.into(),
            enabled,
        }
    }
}
