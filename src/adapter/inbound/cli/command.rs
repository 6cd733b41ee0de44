//! Command-line interface definitions.
//!
//! Defines the CLI structure for the stockledger application using `clap`.
//! Trade commands talk to the document store; `preview` and `config` work
//! offline.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::form::TradeForm;
use super::paths;
use crate::domain::{Market, SortKey};

/// Stock trade ledger with fee-aware profit and loss
#[derive(Parser, Debug)]
#[command(name = "stockledger")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.stockledger/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config path from `--config` or the default location.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::default_config)
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List trades of one market
    List(ListArgs),

    /// Show the portfolio summary of one market
    Summary(MarketArg),

    /// Show one trade with its calculations
    Show(IdArg),

    /// Record a new trade
    Add(AddArgs),

    /// Edit a trade, optionally selling part of it
    Edit(EditArgs),

    /// Delete a trade
    Delete(DeleteArgs),

    /// Compute the profit of a what-if trade without saving it
    Preview(PreviewArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `stockledger config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Market selection shared by the read commands.
#[derive(Args, Debug)]
pub struct MarketArg {
    /// Market to show [TW, US, UK] (defaults to the configured market)
    #[arg(short, long)]
    pub market: Option<Market>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub market: MarketArg,

    /// Sort column [date, stock, cost, fees, profit, profit-percent, holding]
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Trade identifier
    pub id: String,
}

/// Trade fields as typed. Values are coerced when the command runs.
#[derive(Args, Debug, Default)]
pub struct TradeFieldArgs {
    /// Market [TW, US, UK]
    #[arg(long)]
    pub market: Option<String>,

    /// Ticker symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// Stock name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of shares
    #[arg(long)]
    pub quantity: Option<String>,

    /// Buy date, YYYY-MM-DD (defaults to today for new trades)
    #[arg(long)]
    pub buy_date: Option<String>,

    /// Buy price per share
    #[arg(long)]
    pub buy_price: Option<String>,

    /// Sell price per share (requires --sell-date)
    #[arg(long)]
    pub sell_price: Option<String>,

    /// Sell date, YYYY-MM-DD (requires --sell-price)
    #[arg(long)]
    pub sell_date: Option<String>,

    /// What-if sell price for a held trade
    #[arg(long)]
    pub expected_price: Option<String>,

    /// Free-form note
    #[arg(long)]
    pub note: Option<String>,
}

impl TradeFieldArgs {
    #[must_use]
    pub fn form(&self) -> TradeForm {
        TradeForm {
            market: self.market.clone(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            quantity: self.quantity.clone(),
            buy_date: self.buy_date.clone(),
            buy_price: self.buy_price.clone(),
            sell_price: self.sell_price.clone(),
            sell_date: self.sell_date.clone(),
            expected_price: self.expected_price.clone(),
            note: self.note.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: TradeFieldArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Trade identifier
    pub id: String,

    #[command(flatten)]
    pub fields: TradeFieldArgs,

    /// Shares sold by this edit; fewer than held splits the trade
    #[arg(long)]
    pub sell_quantity: Option<String>,

    /// Remove the recorded sale
    #[arg(long)]
    pub clear_sale: bool,

    /// Remove the expected sell price
    #[arg(long)]
    pub clear_expected: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Trade identifier
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Number of shares
    #[arg(long)]
    pub quantity: String,

    /// Buy price per share
    #[arg(long)]
    pub buy_price: String,

    /// Buy date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub buy_date: Option<String>,

    /// Market [TW, US, UK]
    #[arg(long)]
    pub market: Option<String>,

    /// What-if sell price
    #[arg(long, conflicts_with_all = ["sell_price", "sell_date"])]
    pub expected_price: Option<String>,

    /// Realized sell price (requires --sell-date)
    #[arg(long)]
    pub sell_price: Option<String>,

    /// Sell date, YYYY-MM-DD
    #[arg(long)]
    pub sell_date: Option<String>,
}

impl PreviewArgs {
    #[must_use]
    pub fn form(&self) -> TradeForm {
        TradeForm {
            market: self.market.clone(),
            name: Some("preview".into()),
            quantity: Some(self.quantity.clone()),
            buy_date: self.buy_date.clone(),
            buy_price: Some(self.buy_price.clone()),
            sell_price: self.sell_price.clone(),
            sell_date: self.sell_date.clone(),
            expected_price: self.expected_price.clone(),
            ..TradeForm::default()
        }
    }
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    pub path: Option<PathBuf>,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
