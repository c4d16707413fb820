//! Stats command - view the gateway's aggregated metrics.

use anyhow::Result;
use clap::{Args, ValueEnum};
use console_client::{Client, MetricsPeriod};
use console_session::{format_cost, ModelTier};

use crate::output;

/// Aggregation period choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    /// Last hour.
    LastHour,
    /// Last 24 hours.
    LastDay,
    /// Last 7 days.
    LastWeek,
}

impl From<PeriodArg> for MetricsPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::LastHour => Self::LastHour,
            PeriodArg::LastDay => Self::LastDay,
            PeriodArg::LastWeek => Self::LastWeek,
        }
    }
}

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Time period for metrics aggregation
    #[arg(short, long, value_enum, default_value = "last-day")]
    pub period: PeriodArg,
}

/// Execute the stats command.
pub async fn execute(args: StatsArgs, base_url: &str, api_key: Option<&str>, json: bool) -> Result<()> {
    let builder = Client::builder().base_url(base_url);
    let builder = if let Some(key) = api_key {
        builder.api_key(key)
    } else {
        builder
    };
    let client = builder.build()?;

    let period: MetricsPeriod = args.period.into();
    let spinner = output::spinner("Fetching metrics...");
    let result = client.metrics(period).await;
    spinner.finish_and_clear();

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            output::error(&format!("Failed to fetch metrics: {}", e));
            return Ok(());
        }
    };

    if json {
        return output::json(&snapshot);
    }

    output::section(&format!("Gateway metrics ({})", period));
    output::key_value("Requests", &snapshot.total_requests.to_string());
    output::key_value("Total cost", &format_cost(snapshot.total_cost));
    output::key_value("Savings", &format_cost(snapshot.cost_savings));
    output::key_value("Escalation rate", &format!("{:.1}%", snapshot.escalation_rate));
    output::key_value("Avg quality", &format!("{:.1}", snapshot.avg_quality_score));

    if !snapshot.requests_by_model.is_empty() {
        output::section("By model");
        let mut models: Vec<_> = snapshot.requests_by_model.iter().collect();
        models.sort_by(|a, b| b.1.cmp(a.1));
        for (model, count) in models {
            output::key_value(
                model,
                &format!("{} ({} tier)", count, ModelTier::classify(model)),
            );
        }
    }

    Ok(())
}
