// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the Asana payload shapes and the in-memory report types shared by aggregation, partitioning and rendering
// role: model/types
// outputs: Envelope<T>, Entry, Task, ProjectOutcome, Aggregate, StandupReport
// invariants: Field names match the Asana JSON (gid, name, completed, completed_at); unknown fields ignored
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProjectFailure;

/// Every Asana response wraps its payload as `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
  pub data: T,
}

/// A workspace or project reference; only the identifier is consumed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Entry {
  pub gid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
  pub name: String,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
  /// Asana returns nameless rows for section headers and placeholders.
  pub fn is_placeholder(&self) -> bool {
    self.name.is_empty()
  }
}

/// What one aggregation unit produced for its project.
#[derive(Debug)]
pub enum ProjectOutcome {
  Fetched { project_id: String, tasks: Vec<Task> },
  Failed(ProjectFailure),
}

/// Merged fan-out result: tasks of every project that succeeded, plus one failure per project that did not.
#[derive(Debug, Default)]
pub struct Aggregate {
  pub tasks: Vec<Task>,
  pub failures: Vec<ProjectFailure>,
}

#[derive(Debug, Default)]
pub struct StandupReport {
  /// Completed before today's midnight, ascending by completion time.
  pub completed: Vec<Task>,
  /// Not completed, in arrival order.
  pub incomplete: Vec<Task>,
  pub failures: Vec<ProjectFailure>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn task_decodes_null_completed_at_and_ignores_extra_fields() {
    let v = serde_json::json!({
      "gid": "99",
      "resource_type": "task",
      "name": "Write report",
      "completed": false,
      "completed_at": null
    });
    let t: Task = serde_json::from_value(v).unwrap();
    assert_eq!(t.name, "Write report");
    assert!(!t.completed);
    assert!(t.completed_at.is_none());
  }

  #[test]
  fn task_completed_at_accepts_offsets() {
    let v = serde_json::json!({
      "name": "Ship it",
      "completed": true,
      "completed_at": "2026-10-18T14:30:00+02:00"
    });
    let t: Task = serde_json::from_value(v).unwrap();
    assert_eq!(t.completed_at.unwrap().to_rfc3339(), "2026-10-18T12:30:00+00:00");
  }

  #[test]
  fn envelope_requires_data_key() {
    let res: Result<Envelope<Vec<Entry>>, _> = serde_json::from_str(r#"{"errors":[]}"#);
    assert!(res.is_err());
  }

  #[test]
  fn placeholder_is_empty_name() {
    let t = Task { name: String::new(), completed: true, completed_at: None };
    assert!(t.is_placeholder());
  }
}
