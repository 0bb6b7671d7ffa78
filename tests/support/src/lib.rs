//! test-support: helpers for tests that talk to a fake Asana.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```no_run
//! use test_support::{init_tracing, MockAsana};
//!
//! init_tracing();
//! let mut asana = MockAsana::start();
//! let _ws = asana.workspaces(&["w1"]);
//! ```

use mockito::{Matcher, Mock, ServerGuard};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

pub const TOKEN: &str = "123abc";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,standup_reporter=debug"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Scrubs env vars the CLI reads so the host environment cannot leak into a test.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    cmd.env_remove("ASANA_TOKEN")
        .env_remove("STANDUP_REPORTER_BASE_URL")
        .env_remove("RUST_LOG")
        .env("TZ", "UTC");
    cmd
}

/// `{"data": [{"gid": ...}, ...]}`
pub fn entries_body(gids: &[&str]) -> Value {
    let data: Vec<Value> = gids
        .iter()
        .map(|g| json!({ "gid": g, "name": format!("Entry {g}") }))
        .collect();
    json!({ "data": data })
}

pub fn completed_task(name: &str, completed_at: &str) -> Value {
    json!({ "name": name, "completed": true, "completed_at": completed_at })
}

pub fn open_task(name: &str) -> Value {
    json!({ "name": name, "completed": false, "completed_at": null })
}

/// `{"data": [tasks...]}`
pub fn tasks_body(tasks: Vec<Value>) -> Value {
    json!({ "data": tasks })
}

/// A mockito server standing in for `https://app.asana.com/api/1.0/`.
///
/// Every mock requires the bearer token; requests that match nothing get mockito's 501.
pub struct MockAsana {
    server: ServerGuard,
}

impl MockAsana {
    pub fn start() -> Self {
        Self { server: mockito::Server::new() }
    }

    /// Base URL to hand to the gateway or `--base-url`.
    pub fn base_url(&self) -> String {
        format!("{}/", self.server.url())
    }

    pub fn workspaces(&mut self, gids: &[&str]) -> Mock {
        self.json("/workspaces", None, 200, entries_body(gids))
    }

    pub fn projects(&mut self, workspace: &str, gids: &[&str]) -> Mock {
        let path = format!("/workspaces/{workspace}/projects");
        self.json(&path, None, 200, entries_body(gids))
    }

    pub fn tasks(&mut self, project: &str, tasks: Vec<Value>) -> Mock {
        self.tasks_matching(project, Matcher::Any, tasks)
    }

    /// Task listing that only answers when the query string satisfies `query`.
    pub fn tasks_matching(&mut self, project: &str, query: Matcher, tasks: Vec<Value>) -> Mock {
        let path = format!("/projects/{project}/tasks");
        self.json(&path, Some(query), 200, tasks_body(tasks))
    }

    /// Task listing that fails with `status` and an Asana error envelope.
    pub fn failing_tasks(&mut self, project: &str, status: usize) -> Mock {
        let path = format!("/projects/{project}/tasks");
        let body = json!({ "errors": [{ "message": format!("project {project} unavailable") }] });
        self.json(&path, Some(Matcher::Any), status, body)
    }

    /// Mount an arbitrary raw body (for decode failures).
    pub fn raw(&mut self, path: &str, body: &str) -> Mock {
        self.server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .match_header("authorization", format!("Bearer {TOKEN}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    fn json(&mut self, path: &str, query: Option<Matcher>, status: usize, body: Value) -> Mock {
        let mut mock = self
            .server
            .mock("GET", path)
            .match_header("authorization", format!("Bearer {TOKEN}").as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string());
        if let Some(q) = query {
            mock = mock.match_query(q);
        }
        mock.create()
    }
}
