use std::process::ExitCode;

use clap::Parser;

use standup_reporter::asana::gateway::HttpGateway;
use standup_reporter::cli::{normalize, Cli, EffectiveConfig};
use standup_reporter::error::ReportError;
use standup_reporter::model::StandupReport;
use standup_reporter::pipeline::run_report;
use standup_reporter::render::{render_failures, render_report};
use standup_reporter::shutdown::Shutdown;
use standup_reporter::util;

const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  if cli.gen_man {
    return match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        ExitCode::SUCCESS
      }
      Err(e) => {
        eprintln!("{:#}", e);
        ExitCode::FAILURE
      }
    };
  }

  // Phase 1: normalize CLI
  let cfg = match normalize(cli) {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("{:#}", e);
      return ExitCode::FAILURE;
    }
  };
  util::init_tracing(cfg.verbose);
  tracing::info!("Running standup reporter");

  // Phase 2: run the blocking pipeline off the runtime, racing it against interrupts
  let shutdown = Shutdown::new();
  let mut worker = {
    let shutdown = shutdown.clone();
    tokio::task::spawn_blocking(move || run(&cfg, &shutdown))
  };

  tokio::select! {
    joined = &mut worker => finish(joined, &shutdown),
    _ = interrupted() => {
      shutdown.request("interrupt");
      eprintln!("\nInterrupted, waiting for in-flight requests...");

      // Second interrupt: hard exit without draining
      tokio::select! {
        _ = worker => {}
        _ = interrupted() => {
          eprintln!("\nInterrupted again, exiting immediately.");
          std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
      }
      ExitCode::from(EXIT_INTERRUPTED)
    }
  }
}

enum RunError {
  Setup(standup_reporter::error::ApiError),
  Report(ReportError),
}

fn run(cfg: &EffectiveConfig, shutdown: &Shutdown) -> Result<StandupReport, RunError> {
  let gateway = HttpGateway::new(&cfg.base_url, &cfg.token).map_err(RunError::Setup)?;
  run_report(&gateway, &cfg.window, shutdown, cfg.aggregate).map_err(RunError::Report)
}

fn finish(
  joined: Result<Result<StandupReport, RunError>, tokio::task::JoinError>,
  shutdown: &Shutdown,
) -> ExitCode {
  match joined {
    Ok(Ok(report)) => {
      // Degraded, not fatal: name the projects that were skipped, then report the rest
      for line in render_failures(&report) {
        eprintln!("{}", line);
      }
      print!("{}", render_report(&report));
      ExitCode::SUCCESS
    }
    Ok(Err(RunError::Setup(e))) => {
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
    Ok(Err(RunError::Report(e))) => {
      if let ReportError::NoTasks { failures } = &e {
        for failure in failures {
          eprintln!("{}", failure);
        }
      }
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
    Err(join_err) => {
      // The worker panicked (or was torn down); run the same shutdown as an interrupt.
      shutdown.request("internal fault");
      if join_err.is_panic() {
        eprintln!("internal error: report worker panicked");
      } else {
        eprintln!("internal error: {}", join_err);
      }
      ExitCode::FAILURE
    }
  }
}

/// Resolves on Ctrl+C, or SIGTERM on unix. If no handler can be installed it never resolves.
async fn interrupted() {
  #[cfg(unix)]
  {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
      Ok(mut term) => {
        tokio::select! {
          r = tokio::signal::ctrl_c() => on_ctrl_c(r).await,
          _ = term.recv() => {}
        }
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to install SIGTERM handler");
        on_ctrl_c(tokio::signal::ctrl_c().await).await;
      }
    }
  }

  #[cfg(not(unix))]
  on_ctrl_c(tokio::signal::ctrl_c().await).await;
}

async fn on_ctrl_c(r: std::io::Result<()>) {
  if let Err(e) = r {
    tracing::warn!(error = %e, "failed to install ctrl_c handler");
    std::future::pending::<()>().await;
  }
}
