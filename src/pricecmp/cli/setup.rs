use clap::{Args, CommandFactory, Parser, Subcommand};
use pricecmp::model::SortKey;

#[derive(Parser, Debug)]
#[command(name = "pricecmp", bin_name = "pricecmp", version)]
#[command(about = "Compare grocery prices across stores", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend root URL (overrides config and PRICECMP_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch prices and print the table
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the store, brand and size values available for filtering
    Options {
        /// Search term to fetch with (defaults to the configured seed term)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Interactive session: search, filter and sort without refetching
    #[command(alias = "sh")]
    Shell {
        /// Initial search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (base-url, default-search, tunnel-headers, timeout-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Search term, sent to the backend and matched against name and brand
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show this store
    #[arg(long)]
    pub store: Option<String>,

    /// Only show this brand
    #[arg(long)]
    pub brand: Option<String>,

    /// Only show this size
    #[arg(long)]
    pub size: Option<String>,

    /// Column to sort by (name, brand, store, price, unitPrice, size)
    #[arg(long, default_value = "price")]
    pub sort: SortKey,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(
    name = "shell",
    multicall = true,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Fetch again, optionally with a new term
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Change the search term without fetching
    Term {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// Filter by store (no value clears it)
    Store {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Filter by brand (no value clears it)
    Brand {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Filter by size (no value clears it)
    Size {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Sort by a column; repeat to flip direction
    Sort { key: String },
    /// Reset filters and the search term
    Clear,
    /// List the values each filter accepts
    Options,
    /// Print the table again
    Show,
    /// Show this help
    Help,
    /// Leave the shell
    #[command(alias = "exit", alias = "q")]
    Quit,
}

/// Help listing for the shell, built from the command definitions.
pub fn shell_help() -> String {
    let cmd = ShellLine::command();
    let mut output = String::from("Commands:\n");
    for sc in cmd.get_subcommands() {
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<10} {}\n", sc.get_name(), about));
    }
    output
}
