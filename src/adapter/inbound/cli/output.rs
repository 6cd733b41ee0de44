//! Terminal output for the command handlers.
//!
//! Human-readable text by default, `{"type": ..., "payload": ...}` lines on
//! stdout with `--json`, and nothing but warnings and errors with `--quiet`.
//! Colors follow `--color` and whether the stream is a terminal.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Emit a JSON line with type and payload structure.
fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig, color: &ColorChoice) {
    write_config(config);
    match color {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Emit a structured record: a JSON line in JSON mode, nothing otherwise.
///
/// Handlers pair this with their own human-readable rendering.
pub fn record(kind: &str, payload: &impl Serialize) {
    if !is_json() {
        return;
    }
    match serde_json::to_value(payload) {
        Ok(value) => emit_json_line(kind, value),
        Err(err) => error(&format!("failed to encode {kind}: {err}")),
    }
}

/// Route one message: a JSON line in JSON mode, otherwise `render`.
///
/// Quiet mode drops the message unless `always` is set.
fn message(kind: &str, payload: serde_json::Value, always: bool, render: impl FnOnce()) {
    let config = read_config();
    if config.json {
        emit_json_line(kind, payload);
    } else if always || !config.quiet {
        render();
    }
}

/// Print the command title, e.g. `stockledger TW trades by date desc`.
pub fn header(title: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }
    println!(
        "{} {}",
        "stockledger".if_supports_color(Stream::Stdout, |t| t.bold()),
        title.if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
    println!();
}

/// Print a labeled value with the label padded to one column.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    message(
        "field",
        json!({ "label": label, "value": value }),
        false,
        || {
            println!(
                "  {:<14} {}",
                label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
                value
            );
        },
    );
}

pub fn success(text: &str) {
    message("success", json!({ "message": text }), false, || {
        println!("  {} {text}", "✓".if_supports_color(Stream::Stdout, |t| t.green()));
    });
}

/// Warnings are printed in quiet mode too.
pub fn warning(text: &str) {
    message("warning", json!({ "message": text }), true, || {
        println!("  {} {text}", "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()));
    });
}

/// Print an error to stderr. In JSON mode the error line goes to stderr as
/// well so stdout only carries results.
pub fn error(text: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": text } })
        );
        return;
    }
    eprintln!("  {} {text}", "×".if_supports_color(Stream::Stderr, |t| t.red()));
}

pub fn section(title: &str) {
    message("section", json!({ "title": title }), false, || {
        println!();
        println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
    });
}

/// Print a dimmed note.
pub fn note(text: &str) {
    message("note", json!({ "message": text }), false, || {
        println!("  {}", text.if_supports_color(Stream::Stdout, |t| t.dimmed()));
    });
}

/// Print a suggested next command.
pub fn hint(text: &str) {
    message("hint", json!({ "message": text }), false, || {
        println!(
            "  {}: {}",
            "hint".if_supports_color(Stream::Stdout, |t| t.cyan()),
            text.if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    });
}

/// Print pre-rendered text such as a table, indented.
pub fn block(content: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner on stderr.
///
/// Returns a hidden progress bar in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Clear a spinner without leaving a line behind.
pub fn spinner_clear(pb: &indicatif::ProgressBar) {
    pb.finish_and_clear();
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json || config.quiet {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!(
        "{} {}",
        "×".if_supports_color(Stream::Stderr, |t| t.red()),
        message
    ));
}

/// Format a value in green.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    value
        .if_supports_color(Stream::Stdout, |t| t.green())
        .to_string()
}

/// Format a value in red.
pub fn negative(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    value.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
}

/// Format a profit: green when positive, red when negative.
pub fn signed(value: Decimal, text: impl Display) -> String {
    if value > Decimal::ZERO {
        positive(text)
    } else if value < Decimal::ZERO {
        negative(text)
    } else {
        text.to_string()
    }
}

/// Whole-unit amount with thousands separators, e.g. `-10,540`.
#[must_use]
pub fn amount(value: Decimal) -> String {
    let rounded = value.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Percentage with two decimals, e.g. `9.36%`.
#[must_use]
pub fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(amount(dec!(0)), "0");
        assert_eq!(amount(dec!(999)), "999");
        assert_eq!(amount(dec!(1000)), "1,000");
        assert_eq!(amount(dec!(100142)), "100,142");
        assert_eq!(amount(dec!(-10540)), "-10,540");
        assert_eq!(amount(dec!(1234567.5)), "1,234,567.5");
    }

    #[test]
    fn formats_percent() {
        assert_eq!(percent(dec!(9.35878)), "9.36%");
        assert_eq!(percent(dec!(-100)), "-100.00%");
    }
}
