use crate::model::{Aggregate, StandupReport, Task};
use crate::window::TimeWindow;

/// Tasks completed before today's local midnight, oldest first. Ties keep input order.
pub fn completed_view(tasks: &[Task], window: &TimeWindow) -> Vec<Task> {
  let mut done: Vec<Task> = tasks
    .iter()
    .filter(|t| t.completed && t.completed_at.is_some_and(|at| at < window.today_midnight))
    .cloned()
    .collect();

  // sort_by_key is stable
  done.sort_by_key(|t| t.completed_at);
  done
}

/// Tasks not yet completed, in the order they were aggregated.
pub fn incomplete_view(tasks: &[Task]) -> Vec<Task> {
  tasks.iter().filter(|t| !t.completed).cloned().collect()
}

pub fn partition(aggregate: Aggregate, window: &TimeWindow) -> StandupReport {
  StandupReport {
    completed: completed_view(&aggregate.tasks, window),
    incomplete: incomplete_view(&aggregate.tasks),
    failures: aggregate.failures,
  }
}
