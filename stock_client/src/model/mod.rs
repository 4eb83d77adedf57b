//! Data model types printed by the client.
//!
//! - `price_line` — one symbol's price from a live-feed push, ready for display.
pub mod price_line;
