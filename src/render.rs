use std::fmt::Write as _;

use crate::model::{StandupReport, Task};

pub const COMPLETED_HEADER: &str = "Yesterday's Activity:";
pub const INCOMPLETE_HEADER: &str = "Today's Planned Activity:";

/// Console text: completed section, then planned section, each task as `- <name>`.
pub fn render_report(report: &StandupReport) -> String {
  let mut out = String::new();
  section(&mut out, COMPLETED_HEADER, &report.completed);
  section(&mut out, INCOMPLETE_HEADER, &report.incomplete);
  out.push('\n');
  out
}

/// One diagnostic line per project that could not be fetched.
pub fn render_failures(report: &StandupReport) -> Vec<String> {
  report.failures.iter().map(|f| f.to_string()).collect()
}

fn section(out: &mut String, header: &str, tasks: &[Task]) {
  // writing into a String cannot fail
  let _ = writeln!(out, "\n{header}");
  for t in tasks {
    let _ = writeln!(out, "- {}", t.name);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{ApiError, ProjectFailure};

  fn task(name: &str, completed: bool) -> Task {
    Task { name: name.into(), completed, completed_at: None }
  }

  #[test]
  fn renders_sections_in_order() {
    let report = StandupReport {
      completed: vec![task("Fix login", true), task("Write docs", true)],
      incomplete: vec![task("Plan sprint", false)],
      failures: Vec::new(),
    };
    assert_eq!(
      render_report(&report),
      "\nYesterday's Activity:\n- Fix login\n- Write docs\n\nToday's Planned Activity:\n- Plan sprint\n\n"
    );
  }

  #[test]
  fn empty_sections_still_have_headers() {
    let out = render_report(&StandupReport::default());
    assert_eq!(out, "\nYesterday's Activity:\n\nToday's Planned Activity:\n\n");
  }

  #[test]
  fn one_line_per_failure() {
    let report = StandupReport {
      failures: vec![ProjectFailure {
        project_id: "b".into(),
        error: ApiError::Cancelled { path: "projects/b/tasks".into() },
      }],
      ..Default::default()
    };
    let lines = render_failures(&report);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("project b"));
  }
}
