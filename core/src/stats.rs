//! Statistics derived from a fetched profile.
//!
//! Everything here is pure and deterministic: no I/O, no clock. Each score
//! contribution is capped on its own and the sum is capped again, so the
//! result stays in [0, 100] no matter how extreme the inputs get.

use crate::github::{Profile, Repository};

/// Upper bound on the score.
const SCORE_CAP: u64 = 100;

/// Per-contribution caps.
const FOLLOWER_CAP: u64 = 30;
const REPO_COUNT_CAP: u64 = 20;
const STAR_CAP: u64 = 30;

/// Bonus for each present completeness field (bio, blog, location, email).
const COMPLETENESS_BONUS: u64 = 5;

/// Histogram and ranking limits.
const HISTOGRAM_LIMIT: usize = 6;
const TOP_REPO_LIMIT: usize = 5;

/// One language histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Heuristic 0-100 profile score.
///
/// `min(followers*2, 30) + min(public_repos, 20) + min(total_stars*3, 30)`
/// plus 5 for each of bio, blog, location and email, capped at 100.
pub fn compute_score(profile: &Profile, repos: &[Repository]) -> u8 {
    let mut score = (u64::from(profile.followers).saturating_mul(2)).min(FOLLOWER_CAP);
    score += u64::from(profile.public_repos).min(REPO_COUNT_CAP);
    score += total_stars(repos).saturating_mul(3).min(STAR_CAP);

    for field in [
        &profile.bio,
        &profile.blog,
        &profile.location,
        &profile.email,
    ] {
        if Profile::field_present(field) {
            score += COMPLETENESS_BONUS;
        }
    }

    score.min(SCORE_CAP) as u8
}

/// Occurrence counts of primary languages, descending, at most six buckets.
///
/// Repos without a language (or with an empty one) are skipped. The sort is
/// stable, so languages with equal counts keep first-encountered order.
pub fn language_histogram(repos: &[Repository]) -> Vec<LanguageCount> {
    let mut buckets: Vec<LanguageCount> = Vec::new();
    for repo in repos {
        let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) else {
            continue;
        };
        match buckets.iter_mut().find(|b| b.language == language) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(LanguageCount {
                language: language.to_string(),
                count: 1,
            }),
        }
    }
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(HISTOGRAM_LIMIT);
    buckets
}

/// The five most starred repositories, input order preserved on ties.
pub fn top_repos(repos: &[Repository]) -> Vec<&Repository> {
    let mut ranked: Vec<&Repository> = repos.iter().collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.truncate(TOP_REPO_LIMIT);
    ranked
}

/// Total star count across all repositories.
pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}
