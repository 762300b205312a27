//! The Promptshelf application: resolved configuration plus command dispatch.

use crate::cli::{CliArgs, Command};
use crate::config::PromptshelfConfig;
use crate::contributors::ContributorClient;
use crate::prompt_handlers::{self, ListOptions};
use crate::{config_handlers, server};
use promptshelf_content::{ContentLoader, FsContentStore};
use promptshelf_core::Result;
use promptshelf_core::traits::ConfigProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// PromptshelfCli
// ============================================================================

/// CLI application over a loaded configuration.
pub struct PromptshelfCli {
    name: String,
    config: Arc<PromptshelfConfig>,
    version: String,
}

impl PromptshelfCli {
    /// Create from CLI args, loading config from file/env and applying
    /// `--content-dir`.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = PromptshelfConfig::load(args.config.as_deref())?;
        if let Some(dir) = &args.content_dir {
            config = config.with_content_path(dir.as_str());
        }
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: PromptshelfConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The resolved configuration.
    pub fn config(&self) -> &PromptshelfConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise a level from the verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    fn loader(&self) -> Result<ContentLoader<FsContentStore>> {
        let store = FsContentStore::from_config(&*self.config)?;
        log::debug!("reading prompts from {}", store.prompts_dir().display());
        Ok(ContentLoader::new(store))
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::List {
                category,
                language,
                tags,
                search,
                page,
                json,
            }) => {
                let options = ListOptions {
                    category,
                    language,
                    tags,
                    search,
                    page,
                    json,
                };
                prompt_handlers::handle_list(&self.loader()?, options).await
            }
            Some(Command::Show { slug, html }) => {
                prompt_handlers::handle_show(&self.loader()?, &slug, html).await
            }
            Some(Command::Tags) => prompt_handlers::handle_tags(&self.loader()?).await,
            Some(Command::Categories) => {
                prompt_handlers::handle_categories(&self.loader()?).await
            }
            Some(Command::Validate) => prompt_handlers::handle_validate(&self.loader()?).await,
            Some(Command::Query { query }) => {
                prompt_handlers::handle_query(&query);
                Ok(())
            }
            Some(Command::Contributors { page }) => {
                let client = ContributorClient::new(self.config.contributors.clone());
                let listing = client.page(page).await;
                for c in &listing.contributors {
                    println!(
                        "{:<24} {:<20} {:>6}  {}",
                        c.name, c.login, c.contributions, c.html_url
                    );
                }
                println!(
                    "Page {} of {} ({} contributors)",
                    listing.current_page, listing.total_pages, listing.total
                );
                Ok(())
            }
            Some(Command::Serve { port }) => {
                let port = port.unwrap_or(self.config.server.port);
                server::serve(&self.config, port).await
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Health) => {
                let prompts = self.config.content_path("prompts")?;
                let status = if prompts.is_dir() { "healthy" } else { "degraded" };
                println!("{}: {status}", self.config.project_name());
                println!("  content: {}", prompts.display());
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
