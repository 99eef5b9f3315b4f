pub mod handlers;
pub mod listing;
pub mod wire;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use pansift_core::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Rules { strict } => handlers::handle_rules(strict),
        Commands::Classify {
            listing,
            provider,
            rules,
            strict,
            ads_only,
        } => handlers::handle_classify(listing, provider, rules, strict, ads_only),
        Commands::Plan {
            listing,
            provider,
            rules,
            strict,
            select,
            ids,
            wire,
            dest,
        } => handlers::handle_plan(listing, provider, rules, strict, select, ids, wire, dest),
    }
}
