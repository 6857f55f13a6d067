use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use freshtrack_core::domain::common::{CaptureConfig, FreshTrackConfig, LlmConfig, StoreConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "freshtrack", about = "Food inventory scanner and advisor", version)]
pub struct Args {
    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Log filter, e.g. "info" or "freshtrack_core=debug"
    #[arg(long, env = "FRESHTRACK_LOG", default_value = "info")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    /// Gemini API key
    #[arg(
        long,
        env = "GEMINI_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub gemini_api_key: String,

    /// Model used for image scans
    #[arg(
        long,
        env = "FRESHTRACK_SCAN_MODEL",
        default_value = "gemini-3-pro-preview"
    )]
    pub scan_model: String,

    /// Model used for text-only reports
    #[arg(
        long,
        env = "FRESHTRACK_REPORT_MODEL",
        default_value = "gemini-3-flash-preview"
    )]
    pub report_model: String,

    /// Seconds before an analysis call is abandoned
    #[arg(long, env = "FRESHTRACK_TIMEOUT_SECS", default_value_t = 45)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StoreArgs {
    /// Path of the inventory store file
    #[arg(
        long = "store",
        env = "FRESHTRACK_STORE",
        default_value = "freshtrack-store.json"
    )]
    pub store_path: PathBuf,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Scan image files as one item and review the result
    Scan {
        /// One to three images of the same item
        #[arg(required = true, num_args = 1..=3)]
        images: Vec<PathBuf>,

        /// Commit the identified item without asking
        #[arg(long)]
        yes: bool,
    },
    /// Inspect or edit the committed inventory
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Ask which items need attention soon
    Reminders,
    /// Ask for a health summary of the inventory
    Nutrition,
    /// Ask for recipe ideas from the inventory
    Recipes,
    /// Replay the scripted offline tour
    Demo,
}

#[derive(Debug, Clone, Subcommand)]
pub enum StockAction {
    /// List all items, most recent first
    List,
    /// Remove one item by identifier
    Remove { id: Uuid },
}

impl From<Args> for FreshTrackConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LlmConfig {
                gemini_api_key: args.llm.gemini_api_key,
                scan_model: args.llm.scan_model,
                report_model: args.llm.report_model,
                request_timeout_secs: args.llm.request_timeout_secs,
            },
            store: StoreConfig {
                path: args.store.store_path,
            },
            capture: CaptureConfig::default(),
        }
    }
}
