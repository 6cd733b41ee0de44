//! Miette-based error diagnostics for CLI error presentation.
//!
//! Every failure that reaches the entry point is turned into one of these
//! diagnostics so the user sees a code, the message and a suggestion.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::{ConfigError as ConfigFailure, Error, StoreError};

/// Configuration parse error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(stockledger::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Configuration that parsed but failed validation.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid configuration: {message}")]
#[diagnostic(code(stockledger::config_invalid))]
pub struct ConfigInvalid {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Invalid trade input.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid trade: {message}")]
#[diagnostic(code(stockledger::trade))]
pub struct TradeError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Failure talking to the document store.
#[derive(Debug, Error, Diagnostic)]
#[error("store request failed: {message}")]
#[diagnostic(
    code(stockledger::store),
    help("check store.url in the config file and your network connection")
)]
pub struct StoreUnavailable {
    pub message: String,
}

/// A trade id that is not in the store.
#[derive(Debug, Error, Diagnostic)]
#[error("trade {id} not found")]
#[diagnostic(
    code(stockledger::not_found),
    help("run `stockledger list --market <MARKET>` to see trade ids")
)]
pub struct TradeNotFound {
    pub id: String,
}

/// Build the diagnostic shown for `err`.
///
/// `config_path` is read back to point at the offending line of a config
/// file that failed to parse.
#[must_use]
pub fn report(err: Error, config_path: &Path) -> Report {
    match err {
        Error::Config(ConfigFailure::Parse(parse)) => config_parse(&parse, config_path),
        Error::Config(other) => Report::new(ConfigInvalid {
            message: other.to_string(),
            help: Some(format!(
                "edit {} or set STOCKLEDGER_STORE_URL",
                config_path.display()
            )),
        }),
        Error::Domain(domain) => Report::new(TradeError {
            help: trade_help(&domain),
            message: domain.to_string(),
        }),
        Error::Store(StoreError::NotFound { id }) => Report::new(TradeNotFound { id }),
        err @ (Error::Store(_) | Error::Http(_)) => Report::new(StoreUnavailable {
            message: err.to_string(),
        }),
        other => Report::msg(other.to_string()),
    }
}

fn config_parse(parse: &toml::de::Error, config_path: &Path) -> Report {
    let message = format!("failed to parse config: {}", parse.message());
    let source = std::fs::read_to_string(config_path).ok();
    match (source, parse.span()) {
        (Some(source), Some(span)) => Report::new(
            ConfigError::new(
                message,
                config_path.display().to_string(),
                source,
                span.start,
                span.end.saturating_sub(span.start),
            )
            .with_help("see config.toml.example for the expected layout"),
        ),
        _ => Report::msg(message),
    }
}

fn trade_help(err: &DomainError) -> Option<String> {
    let help = match err {
        DomainError::IncompleteSale => "pass --sell-price and --sell-date together",
        DomainError::ExpectedPriceOnSoldTrade => {
            "an expected price is only for held trades; use --clear-sale to reopen the trade"
        }
        DomainError::SellQuantityExceedsHolding { .. } => {
            "the sell quantity cannot exceed the shares on record"
        }
        DomainError::SellQuantityWithoutSale => {
            "a partial sale needs --sell-price and --sell-date"
        }
        DomainError::InvalidDate { .. } => "dates are written YYYY-MM-DD, e.g. 2024-07-01",
        DomainError::UnknownMarket(_) => "markets are TW, US or UK",
        DomainError::MissingField { .. } => "new trades need --name, --quantity and --buy-price",
        _ => return None,
    };
    Some(help.to_string())
}
