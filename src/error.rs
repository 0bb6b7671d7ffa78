// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failures for the Asana gateway, the per-project fan-out, and the top-level report run
// role: errors/taxonomy
// outputs: ApiError (gateway), ProjectFailure (recoverable, per project), ReportError (fatal, per run)
// invariants:
// - Every ApiError names the offending path or URL
// - ReportError messages are single user-readable lines
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single request against the task-tracking API.
#[derive(Error, Debug)]
pub enum ApiError {
  #[error("error parsing relative path \"{path}\": {source}")]
  InvalidPath {
    path: String,
    #[source]
    source: url::ParseError,
  },

  #[error("error requesting \"{url}\": {source}")]
  Transport {
    url: String,
    #[source]
    source: BoxError,
  },

  #[error("error requesting \"{url}\": HTTP {status}{}", paren_suffix(.message))]
  Status {
    url: String,
    status: u16,
    message: Option<String>,
  },

  #[error("error decoding response from \"{url}\": {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("unexpected response shape for \"{path}\": {source}")]
  Shape {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("request for \"{path}\" skipped: shutdown requested")]
  Cancelled { path: String },
}

fn paren_suffix(message: &Option<String>) -> String {
  message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

/// A project whose tasks could not be fetched. Recovered locally by the aggregator.
#[derive(Error, Debug)]
#[error("error requesting tasks for project {project_id}: {error}")]
pub struct ProjectFailure {
  pub project_id: String,
  #[source]
  pub error: ApiError,
}

/// Conditions that end a run without a report.
#[derive(Error, Debug)]
pub enum ReportError {
  #[error("error retrieving workspace: {0}")]
  Workspace(#[source] ApiError),

  #[error("no workspace available")]
  NoWorkspace,

  #[error("error retrieving projects: {0}")]
  Projects(#[source] ApiError),

  #[error("no projects in workspace")]
  NoProjects,

  /// Every project failed or came back empty; `failures` names the ones that failed.
  #[error("no tasks available")]
  NoTasks { failures: Vec<ProjectFailure> },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_message_is_optional() {
    let bare = ApiError::Status {
      url: "https://x/workspaces".into(),
      status: 500,
      message: None,
    };
    assert_eq!(bare.to_string(), "error requesting \"https://x/workspaces\": HTTP 500");

    let with_msg = ApiError::Status {
      url: "https://x/workspaces".into(),
      status: 401,
      message: Some("Not Authorized".into()),
    };
    assert_eq!(
      with_msg.to_string(),
      "error requesting \"https://x/workspaces\": HTTP 401 (Not Authorized)"
    );
  }

  #[test]
  fn project_failure_names_project() {
    let f = ProjectFailure {
      project_id: "42".into(),
      error: ApiError::Cancelled { path: "projects/42/tasks".into() },
    };
    let msg = f.to_string();
    assert!(msg.starts_with("error requesting tasks for project 42: "), "{msg}");
  }

  #[test]
  fn report_errors_are_single_line() {
    for e in [
      ReportError::NoWorkspace,
      ReportError::NoProjects,
      ReportError::NoTasks { failures: Vec::new() },
    ] {
      assert!(!e.to_string().contains('\n'));
    }
  }
}
