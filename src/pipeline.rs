// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report run: workspace -> projects -> concurrent task aggregation -> partitioned views
// role: processing/orchestrator
// inputs: Gateway, TimeWindow, Shutdown flag, AggregateOptions
// outputs: StandupReport (completed, incomplete, per-project failures)
// invariants:
// - Zero projects ⇒ NoProjects; zero aggregated tasks ⇒ NoTasks
// - Project failures never end the run; they travel in StandupReport::failures (or NoTasks)
// errors: ReportError for the fatal conditions; gateway errors wrapped with the phase that failed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::asana::aggregate::{aggregate, AggregateOptions};
use crate::asana::gateway::Gateway;
use crate::asana::workspace::{list_projects, resolve_workspace};
use crate::error::ReportError;
use crate::model::StandupReport;
use crate::partition::partition;
use crate::shutdown::Shutdown;
use crate::window::TimeWindow;

pub fn run_report<G: Gateway + ?Sized>(
  gateway: &G,
  window: &TimeWindow,
  shutdown: &Shutdown,
  opts: AggregateOptions,
) -> Result<StandupReport, ReportError> {
  tracing::info!("Gathering Asana data...");

  let workspace_id = resolve_workspace(gateway)?;
  tracing::debug!(workspace = %workspace_id, "workspace resolved");

  let project_ids = list_projects(gateway, &workspace_id).map_err(ReportError::Projects)?;
  if project_ids.is_empty() {
    return Err(ReportError::NoProjects);
  }
  tracing::debug!(count = project_ids.len(), since = %window.completed_since(), "fetching project tasks");

  let aggregate = aggregate(gateway, &project_ids, window, shutdown, opts);
  if aggregate.tasks.is_empty() {
    return Err(ReportError::NoTasks {
      failures: aggregate.failures,
    });
  }

  Ok(partition(aggregate, window))
}
