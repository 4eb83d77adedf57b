//! Symbols the server seeds its configuration table with.
//!
//! Symbols are opaque strings on the wire; this enum only names the default
//! set so both binaries agree on it.
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Symbols enabled at process start unless overridden on the command line.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Display, EnumIter, EnumString, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum SeedSymbol {
    AAPL,
    AMZN,
    GOOG,
    META,
    MSFT,
    NFLX,
}

impl SeedSymbol {
    /// All seed symbols as owned strings, in declaration order.
    pub fn codes() -> Vec<String> {
        Self::iter().map(|s| s.to_string()).collect()
    }
}
