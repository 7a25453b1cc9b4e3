//! Request orchestration: client -> stats -> store -> page.
//!
//! Handlers return rendered HTML so they can be exercised in tests without
//! any HTTP plumbing. Every fetch outcome is recovered here and rendered
//! as a normal page; only template/serialization failures bubble up as
//! [`PageError`] (a 500 at the server loop).

use askama::Template;
use octolens_core::github::GithubClient;
use octolens_core::history::HistoryStore;
use octolens_core::stats;
use thiserror::Error;

use crate::pages::{IndexPage, ResultPage};

/// How many past lookups the form page shows.
const RECENT_LIMIT: usize = 5;

/// Errors a handler cannot recover into a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("chart data serialization failed: {0}")]
    Chart(#[from] serde_json::Error),
}

/// Shared per-process state behind the two routes.
pub struct App {
    client: GithubClient,
    store: HistoryStore,
}

impl App {
    pub fn new(client: GithubClient, store: HistoryStore) -> Self {
        Self { client, store }
    }

    /// `GET /`: the search form with recent lookups.
    pub fn index_page(&self) -> Result<String, PageError> {
        self.form_page(None)
    }

    /// `POST /analyze`: analyze one username and render the result.
    pub fn analyze_page(&self, raw_username: &str) -> Result<String, PageError> {
        let username = raw_username.trim();
        if username.is_empty() {
            return self.missing_username_page();
        }
        match self.client.fetch_profile(username) {
            Ok(Some((profile, repos))) => {
                let score = stats::compute_score(&profile, &repos);
                let languages = stats::language_histogram(&repos);
                let top_repos: Vec<_> = stats::top_repos(&repos).into_iter().cloned().collect();
                let total_stars = stats::total_stars(&repos);

                // Persist using the profile's own counts, not anything
                // derived from the repo listing. A write failure must not
                // hide the analysis from the user.
                if let Err(e) = self
                    .store
                    .record(username, profile.followers, profile.public_repos)
                {
                    tracing::warn!("failed to record search for '{username}': {e}");
                }

                let labels: Vec<&str> = languages.iter().map(|b| b.language.as_str()).collect();
                let values: Vec<usize> = languages.iter().map(|b| b.count).collect();
                let lang_labels = serde_json::to_string(&labels)?;
                let lang_values = serde_json::to_string(&values)?;
                let page = ResultPage {
                    profile,
                    score,
                    lang_labels,
                    lang_values,
                    languages,
                    top_repos,
                    total_stars,
                };
                Ok(page.render()?)
            }
            Ok(None) => self.form_page(Some(format!("GitHub user '{username}' not found"))),
            Err(e) => {
                tracing::error!("profile lookup for '{username}' failed: {e}");
                self.form_page(Some(
                    "GitHub could not be reached right now. Try again in a moment.".to_string(),
                ))
            }
        }
    }

    /// `POST /analyze` without a username field.
    pub fn missing_username_page(&self) -> Result<String, PageError> {
        self.form_page(Some("Enter a username to analyze".to_string()))
    }

    fn form_page(&self, error: Option<String>) -> Result<String, PageError> {
        let recent = match self.store.recent_searches(RECENT_LIMIT) {
            Ok(recent) => recent,
            Err(e) => {
                // Reads are best-effort once the store opened cleanly.
                tracing::warn!("failed to load recent searches: {e}");
                Vec::new()
            }
        };
        Ok(IndexPage { error, recent }.render()?)
    }
}
