//! GitHub REST API integration.
//!
//! Wire types for the two endpoints we consume plus the typed error
//! taxonomy. A user that does not exist upstream is *not* an error: the
//! client reports it as `Ok(None)` so callers can distinguish "no such
//! user" (inline page message) from "GitHub is broken" (logged failure).

mod client;

pub use client::GithubClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors from GitHub API operations.
///
/// 404 on the profile endpoint is deliberately absent here; see the module
/// docs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or undecodable response body.
    #[error("network error talking to GitHub: {0}")]
    Network(#[from] reqwest::Error),

    /// GitHub answered with an unexpected status (rate limit, outage, ...).
    #[error("unexpected GitHub response ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },
}

/// A user profile from `GET /users/{username}`.
///
/// The completeness fields (`bio`, `blog`, `location`, `email`) come back
/// as `null` *or* as an empty string depending on the field; both mean
/// "absent" for scoring purposes, which [`Profile::field_present`] encodes.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub public_repos: u32,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
}

impl Profile {
    /// "Present" means set and non-empty; GitHub returns `""` for an unset
    /// blog, so `Some("")` does not count.
    pub fn field_present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// One repository entry from `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    pub description: Option<String>,
    /// Missing star data reads as zero.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Primary language; `None` for repos GitHub could not classify.
    pub language: Option<String>,
}
