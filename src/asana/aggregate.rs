// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fan out one task request per project, join on all of them, merge successes and collect failures
// role: asana/aggregation
// inputs: Gateway, project ids, TimeWindow (for completed_since), Shutdown flag, optional worker cap
// outputs: Aggregate { tasks, failures }
// side_effects: One GET per project through the gateway; debug! per failed project (callers report failures)
// invariants:
// - Exactly one ProjectOutcome per project id; collection ends only after all N arrived
// - A project's tasks keep upstream order; cross-project order is arrival order
// - Nameless tasks never leave their project's worker
// - A failing project contributes zero tasks and one ProjectFailure; the call itself never fails
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::sync::mpsc;

use crate::asana::gateway::{fetch_data, Gateway};
use crate::error::{ApiError, ProjectFailure};
use crate::model::{Aggregate, ProjectOutcome, Task};
use crate::shutdown::Shutdown;
use crate::window::TimeWindow;

const TASK_FIELDS: &str = "name,completed,completed_at";

#[derive(Clone, Copy, Debug, Default)]
pub struct AggregateOptions {
  /// Upper bound on concurrent project requests; `None` runs one worker per project.
  pub max_concurrency: Option<usize>,
}

pub fn tasks_path(project_id: &str, window: &TimeWindow) -> String {
  format!(
    "projects/{}/tasks?opt_fields={}&completed_since={}",
    project_id,
    TASK_FIELDS,
    window.completed_since()
  )
}

/// Fetch every project's tasks concurrently and merge them.
pub fn aggregate<G: Gateway + ?Sized>(
  gateway: &G,
  project_ids: &[String],
  window: &TimeWindow,
  shutdown: &Shutdown,
  opts: AggregateOptions,
) -> Aggregate {
  let mut out = Aggregate::default();
  if project_ids.is_empty() {
    return out;
  }

  let (tx, rx) = mpsc::channel::<ProjectOutcome>();

  // Scopes return once every spawned unit has finished: the counting join.
  // The sender moves into the scope and is dropped with it, closing the channel.
  match worker_pool(project_ids.len(), opts.max_concurrency) {
    Some(pool) => pool.scope(move |s| spawn_all(s, gateway, project_ids, window, shutdown, tx)),
    None => rayon::scope(move |s| spawn_all(s, gateway, project_ids, window, shutdown, tx)),
  }

  let mut received = 0usize;
  for outcome in rx {
    received += 1;
    match outcome {
      ProjectOutcome::Fetched { project_id, tasks } => {
        tracing::debug!(project = %project_id, count = tasks.len(), "project tasks collected");
        out.tasks.extend(tasks);
      }
      ProjectOutcome::Failed(failure) => {
        tracing::debug!(project = %failure.project_id, error = %failure.error, "skipping project");
        out.failures.push(failure);
      }
    }
  }
  debug_assert_eq!(received, project_ids.len());

  out
}

fn spawn_all<'s, G: Gateway + ?Sized>(
  scope: &rayon::Scope<'s>,
  gateway: &'s G,
  project_ids: &'s [String],
  window: &'s TimeWindow,
  shutdown: &'s Shutdown,
  tx: mpsc::Sender<ProjectOutcome>,
) {
  for project_id in project_ids {
    let tx = tx.clone();
    scope.spawn(move |_| {
      // Only fails once the receiver is gone, and then nobody is left to report to.
      let _ = tx.send(project_tasks(gateway, project_id, window, shutdown));
    });
  }
}

/// Dedicated pool sized to the fan-out (or the cap). Falls back to the global pool if threads cannot be spawned.
fn worker_pool(projects: usize, cap: Option<usize>) -> Option<rayon::ThreadPool> {
  let threads = cap.filter(|c| *c > 0).map_or(projects, |c| c.min(projects));

  match rayon::ThreadPoolBuilder::new()
    .num_threads(threads)
    .thread_name(|i| format!("asana-fetch-{i}"))
    .build()
  {
    Ok(pool) => Some(pool),
    Err(e) => {
      tracing::warn!(error = %e, "could not build fetch pool; using the global rayon pool");
      None
    }
  }
}

/// One unit of work: fetch, drop placeholders, report.
fn project_tasks<G: Gateway + ?Sized>(
  gateway: &G,
  project_id: &str,
  window: &TimeWindow,
  shutdown: &Shutdown,
) -> ProjectOutcome {
  let path = tasks_path(project_id, window);

  let fetched: Result<Vec<Task>, ApiError> = if shutdown.is_requested() {
    Err(ApiError::Cancelled { path })
  } else {
    fetch_data(gateway, &path)
  };

  match fetched {
    Ok(tasks) => ProjectOutcome::Fetched {
      project_id: project_id.to_string(),
      tasks: drop_placeholders(tasks),
    },
    Err(error) => ProjectOutcome::Failed(ProjectFailure {
      project_id: project_id.to_string(),
      error,
    }),
  }
}

fn drop_placeholders(tasks: Vec<Task>) -> Vec<Task> {
  tasks.into_iter().filter(|t| !t.is_placeholder()).collect()
}
