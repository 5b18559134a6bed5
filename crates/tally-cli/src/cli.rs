//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Customer analytics for small order books
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Order dashboard and customer analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot path: a JSON file or a directory of CSV files
    #[arg(long, default_value = "data", global = true)]
    pub data: PathBuf,

    /// Analytics config override (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Date to report as of (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Business-wide totals, rankings and recent orders
    Dashboard,

    /// Analytics for one customer
    Customer {
        /// Customer ID
        id: i64,
    },

    /// Product revenue and monthly trends
    Products,

    /// Export an order sheet for a customer as CSV
    OrderSheet {
        /// Customer ID
        customer_id: i64,

        /// Order date to export (defaults to the customer's latest order)
        #[arg(short, long)]
        date: Option<String>,

        /// Output file or directory (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
