//! Output formatting utilities for the console.

use colored::Colorize;
use console_session::{format_cost, Exchange, SessionStats};
use serde::Serialize;

/// Print an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a key-value pair.
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.bold(), value);
}

/// Print a section header.
pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Print JSON output.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{}", output);
    Ok(())
}

/// Create a spinner for long-running operations.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("valid template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Print the routing/telemetry panel for a completed exchange.
pub fn exchange_panel(exchange: &Exchange) {
    if let Some(ref analysis) = exchange.analysis {
        section("Routing");
        key_value(
            "Complexity",
            &format!("{}/100 ({})", analysis.complexity_score, analysis.complexity_level),
        );
        key_value(
            "Model",
            &format!("{} ({} tier)", analysis.selected_model, analysis.model_tier),
        );
        if analysis.was_escalated {
            key_value("Escalated", "yes");
        }
        key_value("Signals", &analysis.signals_display());
        key_value("Reasoning", &analysis.reasoning);
        match exchange.quality {
            Some(ref quality) => key_value("Quality", &quality.label),
            None => key_value("Quality", "pending"),
        }
    }

    section("Usage");
    key_value("Tokens", &exchange.total_tokens.to_string());
    key_value("Cost", &exchange.cost_display);
    key_value("Time", &format!("{:.1}s", exchange.elapsed_ms as f64 / 1000.0));
}

/// Print the running session totals.
pub fn stats_summary(stats: &SessionStats) {
    section("Session");
    key_value("Requests", &stats.requests.to_string());
    key_value(
        "By tier",
        &format!("{} fast / {} complex", stats.fast, stats.complex),
    );
    key_value("Total cost", &format_cost(stats.total_cost));
    key_value("Saved", &format_cost(stats.saved_cost));
}
