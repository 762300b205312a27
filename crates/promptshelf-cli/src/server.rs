//! HTTP server.
//!
//! Routes:
//!
//! | Route | Response |
//! |---|---|
//! | `GET /health` | `{"status":"ok"}` |
//! | `GET /api/prompts?category=&language=&tags=&search=&page=` | one catalog page |
//! | `GET /api/prompts/{slug}` | entry with parsed and rendered sections |
//! | `GET /prompts/{slug}` | HTML detail page |
//! | `GET /api/tags` | all tags |
//! | `GET /api/categories` | categories with counts |
//! | `GET /api/contributors?page=` | one page of contributors |
//!
//! The collection is reloaded from the store on every request. A slug that
//! does not resolve is a 404, never a 500.

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use promptshelf_catalog::{Catalog, CategoryInfo, query};
use promptshelf_content::{
    ContentLoader, ContentStore, FsContentStore, PromptEntry, PromptSections, RenderedPrompt,
    escape_html, preview,
};
use promptshelf_core::{ConfigProvider, Error, Result};
use serde::Serialize;
use std::sync::Arc;
use url::form_urlencoded;

use crate::config::PromptshelfConfig;
use crate::contributors::{ContributorClient, ContributorPage};

/// Characters of prompt text used for the page description.
const DESCRIPTION_CHARS: usize = 150;

// ============================================================================
// State
// ============================================================================

/// Shared, immutable server state.
#[derive(Clone)]
pub struct AppState<S: ContentStore + Clone> {
    loader: Arc<ContentLoader<S>>,
    contributors: Arc<ContributorClient>,
    project_name: Arc<str>,
}

impl<S: ContentStore + Clone> AppState<S> {
    /// Build state over a loader and contributor client.
    pub fn new(
        loader: ContentLoader<S>,
        contributors: ContributorClient,
        project_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            loader: Arc::new(loader),
            contributors: Arc::new(contributors),
            project_name: project_name.into(),
        }
    }

    async fn catalog(&self) -> Catalog {
        Catalog::new(self.loader.load_all().await)
    }
}

impl AppState<FsContentStore> {
    /// Build state from configuration.
    pub fn from_config(config: &PromptshelfConfig) -> Result<Self> {
        let store = FsContentStore::from_config(config)?;
        Ok(Self::new(
            ContentLoader::new(store),
            ContributorClient::new(config.contributors.clone()),
            config.project_name(),
        ))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error response: `NotFound` maps to 404, everything else to 500.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Router
// ============================================================================

/// Build the application router.
pub fn router<S: ContentStore + Clone + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/prompts", get(list_prompts::<S>))
        .route("/api/prompts/{slug}", get(get_prompt::<S>))
        .route("/prompts/{slug}", get(prompt_page::<S>))
        .route("/api/tags", get(list_tags::<S>))
        .route("/api/categories", get(list_categories::<S>))
        .route("/api/contributors", get(list_contributors::<S>))
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(config: &PromptshelfConfig, port: u16) -> Result<()> {
    let state = AppState::from_config(config)?;
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::http(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("{} listening on http://{addr}", config.project_name());
    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::http(format!("server error: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

fn page_param(raw: Option<&str>) -> usize {
    raw.and_then(|q| {
        form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse::<usize>().ok())
    })
    .unwrap_or(1)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_prompts<S: ContentStore + Clone>(
    State(state): State<AppState<S>>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<serde_json::Value>> {
    let filter = query::parse(raw.as_deref().unwrap_or_default()).with_page(page_param(raw.as_deref()));
    let catalog = state.catalog().await;
    let view = catalog.view(&filter);
    tracing::debug!("GET /api/prompts ?{} -> {} matches", view.query, view.match_count);
    let body = serde_json::to_value(&view).map_err(|e| Error::serialization(e.to_string()))?;
    Ok(Json(body))
}

/// Entry with its parsed and rendered sections.
#[derive(Serialize)]
struct PromptDetail {
    #[serde(flatten)]
    entry: PromptEntry,
    sections: PromptSections,
    rendered: RenderedPrompt,
}

async fn get_prompt<S: ContentStore + Clone>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PromptDetail>> {
    let entry = state
        .loader
        .load_one(&slug)
        .await
        .ok_or_else(|| Error::not_found(format!("prompt '{slug}'")))?;
    let sections = entry.sections();
    let rendered = RenderedPrompt::from_sections(&sections);
    Ok(Json(PromptDetail {
        entry,
        sections,
        rendered,
    }))
}

async fn prompt_page<S: ContentStore + Clone>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> Response {
    match state.loader.load_one(&slug).await {
        Some(entry) => Html(detail_page(&entry, &state.project_name)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(not_found_page(&slug, &state.project_name)),
        )
            .into_response(),
    }
}

async fn list_tags<S: ContentStore + Clone>(State(state): State<AppState<S>>) -> Json<Vec<String>> {
    let catalog = state.catalog().await;
    Json(catalog.all_tags().into_iter().map(str::to_string).collect())
}

async fn list_categories<S: ContentStore + Clone>(
    State(state): State<AppState<S>>,
) -> Json<Vec<CategoryInfo>> {
    let catalog = state.catalog().await;
    let metadata = state.loader.load_categories().await;
    Json(catalog.category_counts(&metadata))
}

async fn list_contributors<S: ContentStore + Clone>(
    State(state): State<AppState<S>>,
    RawQuery(raw): RawQuery,
) -> Json<ContributorPage> {
    Json(state.contributors.page(page_param(raw.as_deref())).await)
}

// ============================================================================
// HTML pages
// ============================================================================

fn page_shell(title: &str, description: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n</head>\n\
         <body>\n<main class=\"container mx-auto px-4 py-8\">\n{}</main>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(description),
        body
    )
}

/// Full detail page for one prompt.
fn detail_page(entry: &PromptEntry, project_name: &str) -> String {
    let sections = entry.sections();
    let rendered = RenderedPrompt::from_sections(&sections);

    let mut body = format!(
        "<article>\n<h1>{}</h1>\n<p class=\"meta\"><span class=\"category\">{}</span> \
         <span class=\"language\">{}</span></p>\n",
        escape_html(&entry.title),
        escape_html(entry.category.title()),
        escape_html(entry.language.as_str())
    );
    if !entry.tags.is_empty() {
        body.push_str("<ul class=\"tags\">");
        for tag in &entry.tags {
            body.push_str(&format!("<li>{}</li>", escape_html(tag)));
        }
        body.push_str("</ul>\n");
    }
    body.push_str(&format!(
        "<section class=\"prompt\">\n<h2>Prompt</h2>\n{}\n</section>\n",
        rendered.prompt_html
    ));
    if let Some(how_to) = rendered.how_to_html {
        body.push_str(&format!(
            "<section class=\"how-to\">\n<h2>How to Use</h2>\n{how_to}</section>\n"
        ));
    }
    body.push_str("</article>\n<p><a href=\"/\">Back to all prompts</a></p>\n");

    page_shell(
        &format!("{} | {}", entry.title, project_name),
        &preview(&sections.prompt, DESCRIPTION_CHARS),
        &body,
    )
}

fn not_found_page(slug: &str, project_name: &str) -> String {
    page_shell(
        &format!("Prompt not found | {project_name}"),
        "Prompt not found",
        &format!(
            "<h1>Prompt not found</h1>\n<p>No prompt named <code>{}</code> exists.</p>\n\
             <p><a href=\"/\">Back to all prompts</a></p>\n",
            escape_html(slug)
        ),
    )
}
