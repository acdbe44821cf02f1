use crate::dispatcher::{Dispatcher, Outcome};
use crate::logging::{init_logging_with_config, LogConfig};
use crate::math;
use crate::server::{Request, Response};
use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;

/// Command-line interface for fitroute
#[derive(Debug, Parser)]
#[command(name = "fitroute")]
#[command(about = "Best-fit typed HTTP router", long_about = None)]
pub struct Cli {
    /// Pretty, human-readable logs on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the demo route table
    Routes {
        /// Print JSON instead of one line per route
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Dispatch one request through the demo route table
    Route {
        /// HTTP method (case-insensitive)
        method: String,

        /// Request target, e.g. `/add/3/4?verbose=1`
        target: String,

        /// Extra context entry, `key=value` (repeatable)
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,

        /// Print JSON with status, body and outcome
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct RouteReport<'a> {
    status: u16,
    body: &'a str,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

/// Parse arguments from the process and run.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::default_dev()
    } else {
        // Quiet by default: only warnings unless the environment asks for more.
        LogConfig::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| (key == "FITROUTE_LOG_LEVEL").then(|| "warn".to_string()))
        })
    };
    init_logging_with_config(&log_config)?;
    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Run `cli` against the demo route table, writing results to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let dispatcher = Dispatcher::new(math::routes());
    if let Some(err) = dispatcher.setup_error() {
        return Err(anyhow::Error::new(err.clone()).context("demo route table failed to build"));
    }

    match &cli.command {
        Commands::Routes { json } => {
            let summaries = dispatcher
                .table()
                .map(|table| table.summaries())
                .unwrap_or_default();
            if *json {
                serde_json::to_writer_pretty(&mut *out, &summaries)?;
                writeln!(out)?;
            } else {
                for route in &summaries {
                    writeln!(
                        out,
                        "[route] {} {} params={:?}",
                        route.method, route.template, route.params
                    )?;
                }
            }
        }
        Commands::Route {
            method,
            target,
            context,
            json,
        } => {
            let mut request = Request::parse(method, target)
                .with_context(|| format!("invalid HTTP method {method:?}"))?;
            for entry in context {
                let (key, value) = entry
                    .split_once('=')
                    .ok_or_else(|| anyhow!("context entry {entry:?} is not KEY=VALUE"))?;
                request = request.with_context(key, value);
            }

            let (response, outcome) = dispatcher.dispatch_with_outcome(&request);
            write_response(out, &response, &outcome, *json)?;
        }
    }
    Ok(())
}

fn write_response<W: Write>(
    out: &mut W,
    response: &Response,
    outcome: &Outcome,
    json: bool,
) -> Result<()> {
    if json {
        let report = RouteReport {
            status: response.status(),
            body: response.body(),
            outcome,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", response.status_line())?;
        writeln!(out, "{}", response.body())?;
    }
    Ok(())
}
