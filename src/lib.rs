//! Daily standup report from Asana: what was completed since the lookback
//! window opened, and what is still open.
//!
//! The pipeline is `TimeWindow` → workspace → projects → concurrent task
//! aggregation → completed/incomplete views. See [`pipeline::run_report`].

pub mod asana;
pub mod cli;
pub mod error;
pub mod ext;
pub mod model;
pub mod partition;
pub mod pipeline;
pub mod render;
pub mod shutdown;
pub mod util;
pub mod window;
