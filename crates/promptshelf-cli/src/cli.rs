//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "promptshelf", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "PROMPTSHELF_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Content directory (overrides `content.path`).
    #[arg(long)]
    pub content_dir: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List prompts matching the given filters, one page at a time.
    List {
        /// Categories, comma-separated.
        #[arg(long)]
        category: Option<String>,

        /// Languages, comma-separated.
        #[arg(long)]
        language: Option<String>,

        /// Tags, comma-separated; a prompt matches if it has any of them.
        #[arg(long)]
        tags: Option<String>,

        /// Case-insensitive search over titles and tags.
        #[arg(short, long)]
        search: Option<String>,

        /// 1-based page number.
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one prompt.
    Show {
        /// Prompt slug.
        slug: String,

        /// Print rendered HTML instead of plain sections.
        #[arg(long)]
        html: bool,
    },

    /// List all tags in first-seen order.
    Tags,

    /// List categories with prompt counts.
    Categories,

    /// Validate the content collection and report problems.
    Validate,

    /// Normalize a filter query string.
    Query {
        /// Query string, with or without a leading `?`.
        query: String,
    },

    /// List repository contributors.
    Contributors {
        /// 1-based page number.
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Start the HTTP server.
    Serve {
        /// Port to listen on (defaults to `server.port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print version information.
    Version,

    /// Check system health.
    Health,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "server.port").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "server.port").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
