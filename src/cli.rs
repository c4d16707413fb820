//! CLI argument definitions using clap.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// LLM Router Console - terminal client for the adaptive routing gateway
#[derive(Parser, Debug)]
#[command(name = "llm-router-console")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Router gateway URL
    #[arg(short = 'u', long, env = "ROUTER_URL", default_value = "http://localhost:8000", global = true)]
    pub url: String,

    /// API key for authentication
    #[arg(short = 'k', long, env = "ROUTER_API_KEY", global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the gateway and watch its routing decisions
    Chat(commands::chat::ChatArgs),

    /// View the gateway's aggregated metrics
    Stats(commands::stats::StatsArgs),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Chat(args) => {
                commands::chat::execute(args, &self.url, self.api_key.as_deref(), self.json).await
            }
            Commands::Stats(args) => {
                commands::stats::execute(args, &self.url, self.api_key.as_deref(), self.json).await
            }
        }
    }
}
