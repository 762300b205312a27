//! Repository contributor listing.
//!
//! Contributors come from the GitHub REST API. The listing is decorative, so
//! [`ContributorClient::list`] never fails: a disabled client, a network
//! error, a non-success status, or an unparseable body all yield an empty
//! list with a warning. Display names come from one profile lookup per
//! contributor; a failed lookup leaves the login as the name.

use futures::future::join_all;
use promptshelf_catalog::Pagination;
use promptshelf_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::config::ContributorsConfig;

/// Contributors shown per page.
pub const CONTRIBUTORS_PER_PAGE: usize = 8;

const ACCEPT: &str = "application/vnd.github.v3+json";

/// One contributor as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Account login.
    pub login: String,
    /// Display name from the user profile, or the login.
    #[serde(default)]
    pub name: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Profile URL.
    pub html_url: String,
    /// Commit count.
    pub contributions: u64,
    /// Account type, `User` or `Bot`.
    #[serde(rename = "type", default)]
    pub account_type: String,
}

impl Contributor {
    /// Whether this account is an automation bot.
    pub fn is_bot(&self) -> bool {
        self.account_type == "Bot"
    }
}

/// The fields read from `GET /users/{login}`.
#[derive(Debug, Deserialize)]
struct UserProfile {
    name: Option<String>,
}

/// Profile name when set and non-blank, else the login.
pub fn display_name(login: &str, profile_name: Option<&str>) -> String {
    profile_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(login)
        .to_string()
}

/// One page of contributors.
#[derive(Clone, Debug, Serialize)]
pub struct ContributorPage {
    /// Contributors on this page.
    pub contributors: Vec<Contributor>,
    /// Total human contributors.
    pub total: usize,
    /// Page shown, clamped to an existing page.
    pub current_page: usize,
    /// Total pages; zero when the list is empty.
    pub total_pages: usize,
}

/// Drop bot accounts, keeping API order.
pub fn humans(contributors: Vec<Contributor>) -> Vec<Contributor> {
    contributors.into_iter().filter(|c| !c.is_bot()).collect()
}

/// Slice `contributors` to `page` with [`CONTRIBUTORS_PER_PAGE`] per page.
pub fn paginate_contributors(contributors: &[Contributor], page: usize) -> ContributorPage {
    let pagination =
        Pagination::with_page_size(contributors.len(), page, CONTRIBUTORS_PER_PAGE).clamped();
    ContributorPage {
        contributors: contributors[pagination.range()].to_vec(),
        total: contributors.len(),
        current_page: pagination.current_page,
        total_pages: pagination.total_pages(),
    }
}

/// Client for the contributors endpoint.
#[derive(Clone, Debug)]
pub struct ContributorClient {
    config: ContributorsConfig,
    client: reqwest::Client,
}

impl ContributorClient {
    /// Create a client for the configured repository.
    pub fn new(config: ContributorsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint URL for the configured repository.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/contributors",
            self.config.api_base.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        )
    }

    /// Profile URL for `login`.
    pub fn user_endpoint(&self, login: &str) -> String {
        format!(
            "{}/users/{login}",
            self.config.api_base.trim_end_matches('/')
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT)
            .header("User-Agent", concat!("promptshelf/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| Error::http(format!("{what} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::http(format!(
                "{what} request returned {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::serialization(format!("{what} response: {e}")))
    }

    /// Fetch all contributors, bots included, without display names.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` on transport failure or a non-success status,
    /// `Error::Serialization` when the body is not a contributor list.
    pub async fn fetch(&self) -> Result<Vec<Contributor>> {
        self.get_json(self.endpoint(), "contributors").await
    }

    /// Display name for `login`, falling back to the login itself.
    pub async fn name_of(&self, login: &str) -> String {
        match self
            .get_json::<UserProfile>(self.user_endpoint(login), "user profile")
            .await
        {
            Ok(profile) => display_name(login, profile.name.as_deref()),
            Err(e) => {
                log::warn!("error fetching profile for {login}: {e}");
                login.to_string()
            }
        }
    }

    /// Fill in display names, one concurrent profile lookup per contributor.
    pub async fn with_names(&self, contributors: Vec<Contributor>) -> Vec<Contributor> {
        let names = join_all(contributors.iter().map(|c| self.name_of(&c.login))).await;
        contributors
            .into_iter()
            .zip(names)
            .map(|(contributor, name)| Contributor { name, ..contributor })
            .collect()
    }

    /// Named human contributors, or an empty list when unavailable.
    pub async fn list(&self) -> Vec<Contributor> {
        if !self.config.enabled {
            log::debug!("contributor listing disabled");
            return Vec::new();
        }
        match self.fetch().await {
            Ok(all) => self.with_names(humans(all)).await,
            Err(e) => {
                log::warn!("error fetching contributors: {e}");
                Vec::new()
            }
        }
    }

    /// One page of human contributors.
    pub async fn page(&self, page: usize) -> ContributorPage {
        paginate_contributors(&self.list().await, page)
    }
}
