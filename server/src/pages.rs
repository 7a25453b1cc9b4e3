//! Askama page templates.

use askama::Template;
use octolens_core::github::{Profile, Repository};
use octolens_core::history::SearchRecord;
use octolens_core::stats::LanguageCount;

/// Search form plus the recent-search list; doubles as the error page for
/// not-found and upstream failures (the message renders inline).
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub error: Option<String>,
    pub recent: Vec<SearchRecord>,
}

/// Analysis result for one profile.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub profile: Profile,
    pub score: u8,
    pub languages: Vec<LanguageCount>,
    pub top_repos: Vec<Repository>,
    pub total_stars: u64,
    /// Histogram labels as a JSON array, for the chart script.
    pub lang_labels: String,
    /// Histogram values as a JSON array, for the chart script.
    pub lang_values: String,
}
