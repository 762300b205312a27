//! Command-line interface and HTTP server for Promptshelf.
//!
//! # Key Abstractions
//!
//! - [`PromptshelfCli`]: the application, holding resolved configuration
//! - [`PromptshelfConfig`]: layered configuration (file, env, defaults)
//! - [`server::router`]: the axum routes over the catalog
//! - [`contributors::ContributorClient`]: contributor listing with
//!   graceful degradation

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod contributors;
pub mod prompt_handlers;
pub mod server;

pub use app::PromptshelfCli;
pub use cli::{CliArgs, Command};
pub use config::PromptshelfConfig;
