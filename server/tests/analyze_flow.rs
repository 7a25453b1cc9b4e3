//! End-to-end handler tests: mocked GitHub API, real SQLite store.
//!
//! History assertions go through a second store connection on the same
//! file, so the handlers are tested with the exact API production uses.

#![expect(clippy::unwrap_used)]

use std::path::PathBuf;

use octolens_core::github::GithubClient;
use octolens_core::history::HistoryStore;
use octolens_server::handlers::App;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn octocat_json() -> serde_json::Value {
    json!({
        "login": "octocat",
        "name": "The Octocat",
        "avatar_url": "https://example.com/octocat.png",
        "html_url": "https://example.com/octocat",
        "followers": 42,
        "public_repos": 9,
        "bio": "likes tentacles",
        "blog": "https://octocat.example.com",
        "location": "the deep",
        "email": null,
    })
}

fn repos_json() -> serde_json::Value {
    json!([
        { "name": "hello-world", "html_url": "", "description": null, "stargazers_count": 3, "language": "Rust" },
        { "name": "scratch", "html_url": "", "description": null, "stargazers_count": 1, "language": "Rust" },
    ])
}

struct TestHarness {
    rt: Runtime,
    server: MockServer,
    app: App,
    db_path: PathBuf,
    _dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("history.db");

        let client = GithubClient::new(server.uri()).unwrap();
        let store = HistoryStore::open(&db_path).unwrap();
        let app = App::new(client, store);
        Self {
            rt,
            server,
            app,
            db_path,
            _dir: dir,
        }
    }

    fn mock_octocat(&self) {
        self.rt.block_on(async {
            Mock::given(method("GET"))
                .and(path("/users/octocat"))
                .respond_with(ResponseTemplate::new(200).set_body_json(octocat_json()))
                .mount(&self.server)
                .await;
            Mock::given(method("GET"))
                .and(path("/users/octocat/repos"))
                .respond_with(ResponseTemplate::new(200).set_body_json(repos_json()))
                .mount(&self.server)
                .await;
        });
    }

    /// Independent connection for history assertions.
    fn history(&self) -> HistoryStore {
        HistoryStore::open(&self.db_path).unwrap()
    }
}

#[test]
fn analyze_success_appends_exactly_one_record() {
    let harness = TestHarness::new();
    harness.mock_octocat();

    // Whitespace around the submitted name is trimmed before lookup.
    let html = harness.app.analyze_page("  octocat  ").unwrap();
    assert!(html.contains("The Octocat"));
    assert!(html.contains("/100"));
    assert!(html.contains("hello-world"));

    let history = harness.history();
    assert_eq!(history.search_count().unwrap(), 1);
    let recent = history.recent_searches(5).unwrap();
    assert_eq!(recent[0].username, "octocat");
    assert_eq!(recent[0].followers, 42);
    assert_eq!(recent[0].public_repos, 9);
}

#[test]
fn analyze_unknown_user_renders_error_and_leaves_history_unchanged() {
    let harness = TestHarness::new();
    harness.rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&harness.server)
            .await;
    });

    let html = harness.app.analyze_page("ghost").unwrap();
    assert!(html.contains("GitHub user &#x27;ghost&#x27; not found"));

    assert_eq!(harness.history().search_count().unwrap(), 0);
}

#[test]
fn analyze_upstream_failure_renders_generic_error_without_persisting() {
    let harness = TestHarness::new();
    harness.rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&harness.server)
            .await;
    });

    let html = harness.app.analyze_page("octocat").unwrap();
    assert!(html.contains("could not be reached"));

    assert_eq!(harness.history().search_count().unwrap(), 0);
}

#[test]
fn index_lists_recent_searches_most_recent_first() {
    let harness = TestHarness::new();
    let history = harness.history();
    for i in 0..7u32 {
        history.record(&format!("user-{i}"), i, i).unwrap();
    }

    let html = harness.app.index_page().unwrap();
    assert!(html.contains("user-6"));
    assert!(html.contains("user-2"));
    // Outside the 5-record window.
    assert!(!html.contains("user-1"));
    assert!(
        html.find("user-6").unwrap() < html.find("user-5").unwrap(),
        "newest search should render first"
    );
}

#[test]
fn missing_or_blank_username_renders_an_inline_prompt() {
    let harness = TestHarness::new();
    let html = harness.app.missing_username_page().unwrap();
    assert!(html.contains("Enter a username"));

    // A whitespace-only submission never reaches the API.
    let html = harness.app.analyze_page("   ").unwrap();
    assert!(html.contains("Enter a username"));
    assert_eq!(harness.history().search_count().unwrap(), 0);
}

#[test]
fn not_found_page_still_shows_recent_searches() {
    let harness = TestHarness::new();
    harness.history().record("earlier", 1, 1).unwrap();
    harness.rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&harness.server)
            .await;
    });

    let html = harness.app.analyze_page("ghost").unwrap();
    assert!(html.contains("not found"));
    assert!(html.contains("earlier"));
}
