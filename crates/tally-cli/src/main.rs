//! Tally CLI - Order dashboard and customer analytics
//!
//! Usage:
//!   tally dashboard                   Totals, top customers and products
//!   tally customer 12                 Analytics for customer 12
//!   tally products                    Product revenue and trends
//!   tally order-sheet 12 --output .   Export an order sheet as CSV

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tally_core::CustomerId;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let snapshot = commands::load_snapshot(&cli.data)?;
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dashboard => {
            let today = commands::resolve_today(cli.today.as_deref())?;
            commands::cmd_dashboard(&snapshot, &config, today, cli.json)
        }
        Commands::Customer { id } => {
            let today = commands::resolve_today(cli.today.as_deref())?;
            commands::cmd_customer(&snapshot, &config, CustomerId(id), today, cli.json)
        }
        Commands::Products => commands::cmd_products(&snapshot, &config, cli.json),
        Commands::OrderSheet {
            customer_id,
            date,
            output,
        } => {
            let date = date
                .as_deref()
                .map(|d| commands::parse_date_arg(d, "--date"))
                .transpose()?;
            commands::cmd_order_sheet(&snapshot, CustomerId(customer_id), date, output.as_deref())
        }
    }
}
