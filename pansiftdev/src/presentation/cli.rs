use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::listing::Provider;

#[derive(Parser)]
#[command(author, version, about = "pansiftdev CLI (alpha)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ad filter table as JSON (a starting point for --rules)
    Rules {
        /// include the wider keyword list and whole-name patterns
        #[arg(long)]
        strict: bool,
    },

    /// Classify every file of a listing as ad or clean
    Classify {
        /// JSON listing (array, or a provider response with list/data.list/files)
        listing: PathBuf,
        #[arg(long, value_enum, default_value_t = Provider::Generic)]
        provider: Provider,
        /// filter table JSON; defaults to the built-in table
        #[arg(long = "rules")]
        rules: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
        /// only print ad files
        #[arg(long)]
        ads_only: bool,
    },

    /// Plan a transfer request for a listing and selection
    Plan {
        listing: PathBuf,
        #[arg(long, value_enum, default_value_t = Provider::Generic)]
        provider: Provider,
        #[arg(long = "rules")]
        rules: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
        /// 1-based positions, e.g. "1,3,5-10" or "all"
        #[arg(long, conflicts_with = "ids")]
        select: Option<String>,
        /// explicit file ids (repeatable); nothing selected means all clean files
        #[arg(long = "id")]
        ids: Vec<String>,
        /// render the provider request body instead of the plan
        #[arg(long)]
        wire: bool,
        /// destination folder (path for Baidu, folder fid for Quark/Xunlei)
        #[arg(long, default_value = "")]
        dest: String,
    },
}
