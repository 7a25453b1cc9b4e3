//! Core domain for the octolens profile analyzer.
//!
//! Three layers, leaf to root:
//! - [`github`]: blocking client for the GitHub REST API (profile + repos).
//! - [`stats`]: pure functions deriving the score, language histogram and
//!   top-repository ranking from fetched data.
//! - [`history`]: append-only SQLite log of past lookups.
//!
//! No HTTP-server or template code lives here; the `octolens-server` crate
//! owns the web surface.

pub mod github;
pub mod history;
pub mod stats;

pub use github::{FetchError, GithubClient, Profile, Repository};
pub use history::{Clock, HistoryStore, SearchRecord, StoreError, SystemClock};
pub use stats::LanguageCount;
