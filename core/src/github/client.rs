//! Blocking HTTP client for the GitHub REST API.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use super::{FetchError, Profile, Repository};

/// GitHub's structured JSON media type.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub rejects requests without a User-Agent.
const OCTOLENS_USER_AGENT: &str = concat!("octolens/", env!("CARGO_PKG_VERSION"));

/// One page of repositories, most recently updated first.
const REPOS_PER_PAGE: u32 = 100;

/// Client for the two profile endpoints we consume.
///
/// The base URL is injectable so tests can point it at a mock server; the
/// production default lives in the server crate's configuration.
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client with the required default headers.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(OCTOLENS_USER_AGENT));

        let http = Client::builder().default_headers(headers).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// Fetch a profile and one page of its repositories.
    ///
    /// Two sequential requests: the profile lookup, then the repository list
    /// for the confirmed login. A 404 on the profile lookup yields
    /// `Ok(None)` without issuing the repository request. Any other
    /// non-success status, from either endpoint, is a [`FetchError`].
    ///
    /// No retries, no caching, transport-default timeouts.
    pub fn fetch_profile(
        &self,
        username: &str,
    ) -> Result<Option<(Profile, Vec<Repository>)>, FetchError> {
        let profile_url = format!("{}/users/{username}", self.base_url);
        let response = self.http.get(&profile_url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("GitHub user '{username}' not found");
            return Ok(None);
        }
        let profile: Profile = decode(response)?;

        let repos_url = format!(
            "{}/users/{}/repos?per_page={REPOS_PER_PAGE}&sort=updated",
            self.base_url, profile.login
        );
        let repos: Vec<Repository> = decode(self.http.get(&repos_url).send()?)?;

        tracing::debug!(
            "fetched profile '{}' with {} repos",
            profile.login,
            repos.len()
        );
        Ok(Some((profile, repos)))
    }
}

/// Turn a non-success response into a typed error, otherwise decode JSON.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json()?)
}
