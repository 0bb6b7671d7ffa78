use anyhow::{bail, Result};
use clap::Parser;
use once_cell::sync::Lazy;

use crate::asana::aggregate::AggregateOptions;
use crate::asana::gateway::DEFAULT_BASE_URL;
use crate::util;
use crate::window::TimeWindow;

/// Longest lookback accepted by `--days` (about a century).
pub const MAX_DAYS: u32 = 36_500;

static LONG_VERSION: Lazy<String> = Lazy::new(|| {
  format!(
    "Version: {}\nCommit: {}\nBuild Date: {}",
    env!("CARGO_PKG_VERSION"),
    option_env!("STANDUP_REPORTER_COMMIT").unwrap_or("unknown"),
    option_env!("STANDUP_REPORTER_BUILD_DATE").unwrap_or("unknown"),
  )
});

#[derive(Parser, Debug)]
#[command(
    name = "standup-reporter",
    version,
    long_version = LONG_VERSION.as_str(),
    about = "Command-line application to gather daily standup reports.",
    long_about = None
)]
pub struct Cli {
  /// Number of days to go back to collect completed tasks. Default 1 day (or 3 days on Monday).
  #[arg(
    short = 'd',
    long,
    value_name = "N",
    default_value_t = 0,
    value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DAYS))
  )]
  pub days: u32,

  /// Asana Personal Access Token
  #[arg(
    short = 'a',
    long = "asana",
    value_name = "TOKEN",
    env = "ASANA_TOKEN",
    hide_env_values = true,
    required_unless_present = "gen_man"
  )]
  pub asana_token: Option<String>,

  /// Maximum number of projects fetched at once (0 = all projects at once)
  #[arg(long, value_name = "N", default_value_t = 0)]
  pub max_concurrency: usize,

  /// Log request-level detail to stderr
  #[arg(short = 'v', long)]
  pub verbose: bool,

  /// Asana API base URL (hidden; tests and proxies)
  #[arg(long, hide = true, env = "STANDUP_REPORTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
  pub base_url: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for the report window (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub token: String,
  pub base_url: String,
  pub window: TimeWindow,
  pub aggregate: AggregateOptions,
  pub verbose: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let token = cli.asana_token.as_deref().map(str::trim).unwrap_or_default().to_string();
  if token.is_empty() {
    bail!("Provide an Asana token with --asana TOKEN (or ASANA_TOKEN)");
  }

  let now_override = match cli.now_override.as_deref() {
    Some(raw) => match util::parse_now_override(Some(raw)) {
      Some(dt) => Some(dt),
      None => bail!("invalid --now-override {raw:?}: expected RFC3339 or YYYY-MM-DDTHH:MM:SS"),
    },
    None => None,
  };

  let window = TimeWindow::compute(Some(cli.days), util::effective_now(now_override));

  Ok(EffectiveConfig {
    token,
    base_url: cli.base_url,
    window,
    aggregate: AggregateOptions {
      max_concurrency: (cli.max_concurrency > 0).then_some(cli.max_concurrency),
    },
    verbose: cli.verbose,
  })
}
