//! Command-line arguments for the stock client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use std::str::FromStr;
use stock_common::net::default_endpoint;
use stock_common::proto::StockToggle;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Endpoint of the stock server.
    #[clap(long, default_value_t = default_endpoint())]
    pub server: String,

    /// What to do once connected.
    #[command(subcommand)]
    pub action: Action,
}

/// Client operations, one per RPC.
#[derive(Debug, Subcommand)]
pub enum Action {
    /// Print every configured symbol.
    List,
    /// Enable or disable symbols, then print the enabled set.
    Toggle {
        /// Toggles as `CODE=on` or `CODE=off`.
        #[arg(required = true)]
        toggles: Vec<ToggleArg>,
    },
    /// Print the symbols currently enabled.
    Subscriptions,
    /// Stream live prices until Ctrl+C.
    Live {
        /// Toggles sent when the feed opens, as `CODE=on` or `CODE=off`.
        toggles: Vec<ToggleArg>,
        /// Print each price as a JSON line.
        #[clap(long)]
        json: bool,
    },
}

/// A single `CODE=on|off` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleArg {
    /// Symbol to toggle.
    pub code: String,
    /// Requested state.
    pub enabled: bool,
}

impl FromStr for ToggleArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, state) = s
            .split_once('=')
            .ok_or_else(|| format!("expected CODE=on|off, got `{}`", s))?;
        let code = code.trim();
        if code.is_empty() {
            return Err(format!("missing symbol in `{}`", s));
        }
        let enabled = match state.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => true,
            "off" | "false" | "0" => false,
            other => return Err(format!("unknown state `{}` for {}", other, code)),
        };
        Ok(Self {
            code: code.to_ascii_uppercase(),
            enabled,
        })
    }
}

impl From<ToggleArg> for StockToggle {
    fn from(arg: ToggleArg) -> Self {
        StockToggle::new(arg.code, arg.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_on_and_off() {
        assert_eq!(
            "aapl=on".parse::<ToggleArg>().unwrap(),
            ToggleArg {
                code: "AAPL".into(),
                enabled: true
            }
        );
        assert!(!"MSFT=off".parse::<ToggleArg>().unwrap().enabled);
    }

    #[test]
    fn rejects_malformed_toggles() {
        assert!("AAPL".parse::<ToggleArg>().is_err());
        assert!("=on".parse::<ToggleArg>().is_err());
        assert!("AAPL=maybe".parse::<ToggleArg>().is_err());
    }

    #[test]
    fn toggle_subcommand_requires_arguments() {
        assert!(Args::try_parse_from(["stock_client", "toggle"]).is_err());
        let args = Args::try_parse_from(["stock_client", "toggle", "AAPL=off", "TSLA=on"]).unwrap();
        let Action::Toggle { toggles } = args.action else {
            panic!("expected toggle");
        };
        assert_eq!(toggles.len(), 2);
        assert_eq!(args.server, "http://127.0.0.1:50051");
    }

    #[test]
    fn live_accepts_json_flag() {
        let args = Args::try_parse_from(["stock_client", "live", "--json", "NFLX=on"]).unwrap();
        let Action::Live { toggles, json } = args.action else {
            panic!("expected live");
        };
        assert!(json);
        assert_eq!(toggles[0].code, "NFLX");
    }
}
