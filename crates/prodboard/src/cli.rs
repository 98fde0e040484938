//! Clap derive structures for the `prodboard` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This
//! file is also compiled by `build.rs` for man pages, so it may only
//! depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// prodboard -- kubectl-style CLI for a products admin API
#[derive(Debug, Parser)]
#[command(
    name = "prodboard",
    version,
    about = "Manage products from the command line",
    long_about = "List, search, create, update, and delete products in a\n\
        products REST API (GET/POST/PUT/DELETE under /api/products).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "PRODBOARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API endpoint (overrides profile), e.g. http://localhost:3000
    #[arg(long, short = 'e', env = "PRODBOARD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Bearer token (overrides profile and keyring)
    #[arg(long, env = "PRODBOARD_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format [default: `defaults.output` from config, else table]
    #[arg(
        long = "output",
        short = 'o',
        env = "PRODBOARD_OUTPUT",
        value_name = "FORMAT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// Colorize output [default: `defaults.color` from config, else auto]
    #[arg(long = "color", value_name = "WHEN", global = true)]
    pub color_flag: Option<ColorMode>,

    /// Effective format once config defaults are applied.
    #[arg(skip)]
    pub output: OutputFormat,

    /// Effective color mode once config defaults are applied.
    #[arg(skip)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Answer yes to confirmation prompts (required without a TTY)
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "PRODBOARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PRODBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Rows per page (overrides profile)
    #[arg(
        long,
        env = "PRODBOARD_PAGE_SIZE",
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page_size: Option<u32>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, create, update, and delete products
    #[command(alias = "product", alias = "pr")]
    Products(ProductsArgs),

    /// Inspect and edit profiles in config.toml
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products (filter -> sort -> paginate)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a product
    Create {
        /// Product name
        #[arg(long)]
        name: String,

        /// Price; leading integer is used ("20.9" -> 20)
        #[arg(long, allow_hyphen_values = true)]
        price: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update a product; omitted fields keep their current values
    Update {
        /// Product ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New price; leading integer is used
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sort column
    #[arg(long, default_value = "id")]
    pub sort: SortColumn,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Case-insensitive search over name and description
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Show every match on one page
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Id,
    Name,
    Price,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively add a profile and make it the default
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// List profile names, marking the active one
    Profiles,

    /// Switch the default profile
    Use {
        /// Name of an existing profile
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
