//! Chat command - interactive console against the routing gateway.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use console_client::Client;
use console_session::{Session, SubmitOutcome};
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::output;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send once (omits the interactive loop)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Hide the routing/telemetry panel after each answer
    #[arg(long)]
    pub no_analysis: bool,
}

/// One completed exchange plus session totals, for `--json` output.
#[derive(Debug, Serialize)]
struct ChatOutput<'a> {
    exchange: &'a console_session::Exchange,
    stats: &'a console_session::SessionStats,
}

/// Execute the chat command.
pub async fn execute(args: ChatArgs, base_url: &str, api_key: Option<&str>, json: bool) -> Result<()> {
    let client = build_client(base_url, api_key)?;
    let mut session = Session::new(client);

    // Seed session accounting from the gateway's daily aggregate. Failures
    // are swallowed inside; the console starts at zero in that case.
    session.seed_stats().await;

    if let Some(ref message) = args.message {
        run_once(&mut session, message, &args, json).await
    } else {
        run_interactive(&mut session, &args).await
    }
}

/// Build the gateway client.
fn build_client(base_url: &str, api_key: Option<&str>) -> Result<Client> {
    let builder = Client::builder().base_url(base_url);
    let builder = if let Some(key) = api_key {
        builder.api_key(key)
    } else {
        builder
    };
    Ok(builder.build()?)
}

/// Send a single message and print the result.
async fn run_once(
    session: &mut Session<Client>,
    message: &str,
    args: &ChatArgs,
    json: bool,
) -> Result<()> {
    let spinner = output::spinner("Routing...");
    let outcome = session.submit(message).await;
    spinner.finish_and_clear();

    match outcome {
        SubmitOutcome::Completed(exchange) => {
            if json {
                output::json(&ChatOutput {
                    exchange: &exchange,
                    stats: session.stats(),
                })?;
            } else {
                if let Some(last) = session.transcript().last() {
                    println!("{}", last.content);
                }
                if !args.no_analysis {
                    output::exchange_panel(&exchange);
                    output::stats_summary(session.stats());
                }
            }
        }
        SubmitOutcome::Failed { detail } => output::error(&detail),
        SubmitOutcome::Ignored => output::error("No message provided"),
        SubmitOutcome::Busy => output::error("A request is already in flight"),
    }

    Ok(())
}

/// Run the interactive console loop.
async fn run_interactive(session: &mut Session<Client>, args: &ChatArgs) -> Result<()> {
    output::info("Connected to the routing gateway (type 'exit' to quit, '/clear' to reset, '/stats' for totals)");
    println!();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            output::stats_summary(session.stats());
            output::info("Goodbye!");
            break;
        }

        if input == "/clear" {
            session.reset();
            output::info("Transcript cleared");
            continue;
        }

        if input == "/stats" {
            output::stats_summary(session.stats());
            continue;
        }

        let spinner = output::spinner("Routing...");
        let outcome = session.submit(input).await;
        spinner.finish_and_clear();

        match outcome {
            SubmitOutcome::Completed(exchange) => {
                if let Some(last) = session.transcript().last() {
                    println!("{} {}", "Assistant:".green().bold(), last.content);
                }
                if !args.no_analysis {
                    output::exchange_panel(&exchange);
                }
            }
            SubmitOutcome::Failed { detail } => output::error(&detail),
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Busy => output::error("A request is already in flight"),
        }

        println!();
    }

    Ok(())
}
