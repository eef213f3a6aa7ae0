use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2026-10-18 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "kitstock", bin_name = "kitstock", version = get_version())]
#[command(about = "Stock of electronic components and the kits packed from them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $KITSTOCK_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List component stock
    #[command(alias = "ls", display_order = 1)]
    Components,

    /// List kit stock with unit costs
    #[command(display_order = 2)]
    Kits,

    /// Receive components from a purchase order
    #[command(display_order = 10)]
    Buy {
        /// Component fragment, e.g. "Battery,AA,1.5,3.10"
        fragment: String,
        qty: u64,
    },

    /// Sell components to a customer
    #[command(display_order = 11)]
    Sell {
        /// Component fragment, e.g. "Battery,AA,1.5,3.10"
        fragment: String,
        qty: u64,
    },

    /// Receive more of an existing kit
    #[command(name = "buy-kit", display_order = 12)]
    BuyKit { name: String, qty: u64 },

    /// Sell kits to a customer
    #[command(name = "sell-kit", display_order = 13)]
    SellKit { name: String, qty: u64 },

    /// Pack components into kits
    #[command(display_order = 20)]
    Pack {
        name: String,
        count: u64,

        /// Bill of materials line as QTY:FRAGMENT (repeatable; omit to reuse the stored kit)
        #[arg(long = "item", value_name = "QTY:FRAGMENT")]
        items: Vec<String>,
    },

    /// Break kits back into components
    #[command(display_order = 21)]
    Unpack { name: String, count: u64 },

    /// Show the transaction log
    #[command(display_order = 30)]
    History {
        /// Only the most recent N transactions
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (e.g., kits-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the data directory and file paths
    #[command(display_order = 32)]
    Paths,
}
