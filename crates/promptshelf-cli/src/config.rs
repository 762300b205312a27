//! Configuration for the Promptshelf CLI and server.
//!
//! [`PromptshelfConfig`] loads from TOML files, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `PROMPTSHELF_CONFIG` environment variable
//! 3. XDG default: `~/.config/promptshelf/config.toml`
//! 4. Built-in defaults
//!
//! `PROMPTSHELF_<SECTION>_<KEY>` environment variables are layered on top.

use confyg::{Confygery, env};
use promptshelf_core::traits::ConfigProvider;
use promptshelf_core::util::paths::{expand_tilde, find_dir_with_marker};
use promptshelf_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PROMPTSHELF_CONFIG";

const ENV_PREFIX: &str = "PROMPTSHELF";

/// Marks a site root when searching upward for content.
const SITE_MARKER: &str = "content/prompts";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptshelfConfig {
    /// Project name, used in log and health output.
    pub project_name: String,

    /// Base path that relative content paths hang off.
    pub base_path: Option<String>,

    /// Content location.
    pub content: ContentConfig,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Contributor listing settings.
    pub contributors: ContributorsConfig,
}

/// Content storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root holding the `prompts/` and `categories/` collections.
    /// Defaults to `<base_path>/content`.
    pub path: Option<String>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Host address to bind to.
    pub host: String,
}

/// Where contributors are listed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorsConfig {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// REST API base URL.
    pub api_base: String,

    /// When false, no request is made and the list is empty.
    pub enabled: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for PromptshelfConfig {
    fn default() -> Self {
        Self {
            project_name: "promptshelf".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            server: ServerConfig::default(),
            contributors: ContributorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            owner: "dusskapark".to_string(),
            repo: "figma-mcp-prompts".to_string(),
            api_base: "https://api.github.com".to_string(),
            enabled: true,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl PromptshelfConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            log::debug!("loading config file {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("server");
        env_opts.add_section("contributors");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("promptshelf").join("config.toml"))
    }

    /// Override the content root.
    pub fn with_content_path(mut self, path: impl Into<String>) -> Self {
        self.content.path = Some(path.into());
        self
    }

    /// Content root directory.
    ///
    /// An explicit `content.path` wins (with `~` expanded). Otherwise the
    /// nearest ancestor of the base path holding `content/prompts` is used,
    /// falling back to `<base_path>/content`.
    pub fn content_root(&self) -> Result<PathBuf> {
        if let Some(p) = &self.content.path {
            return Ok(expand_tilde(p));
        }
        let base = self.base_path()?;
        let site_root = find_dir_with_marker(&base, SITE_MARKER).unwrap_or(base);
        Ok(site_root.join("content"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with the
    /// `PROMPTSHELF_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for PromptshelfConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        Ok(self.content_root()?.join(content_type))
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
