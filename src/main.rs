mod commands;
mod config;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Generate shareable calendar, tracking, and WooCommerce links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Google/Outlook calendar links and an ICS document
    Event(commands::event::EventArgs),
    /// Build a UTM-tagged tracking link
    Tracking(commands::tracking::TrackingArgs),
    /// Build WooCommerce add-to-cart links
    Woo(commands::woo::WooArgs),
    /// Show recent submissions
    History(commands::history::HistoryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Event(args) => commands::event::run(args),
        Commands::Tracking(args) => commands::tracking::run(args),
        Commands::Woo(args) => commands::woo::run(args),
        Commands::History(args) => commands::history::run(args),
    }
}
