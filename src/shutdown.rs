// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: One shutdown routine shared by the interrupt path and the fault path
// role: lifecycle/shutdown
// outputs: Shutdown handle (clone per holder); cancellation token polled by aggregation workers
// invariants:
// - request() is idempotent; later calls return `false` and log nothing
// - Workers that see the flag skip their request instead of starting one
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, Default)]
pub struct Shutdown {
  token: CancellationToken,
}

impl Shutdown {
  pub fn new() -> Self {
    Self::default()
  }

  /// Cancel the run. Returns `false` if it was already cancelled.
  pub fn request(&self, reason: &str) -> bool {
    if self.token.is_cancelled() {
      return false;
    }
    self.token.cancel();
    tracing::info!(reason, "shutdown requested; waiting for in-flight requests");
    true
  }

  pub fn is_requested(&self) -> bool {
    self.token.is_cancelled()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_is_idempotent_and_shared_across_clones() {
    let a = Shutdown::new();
    let b = a.clone();
    assert!(!b.is_requested());
    assert!(a.request("interrupt"));
    assert!(!b.request("fault"));
    assert!(a.is_requested() && b.is_requested());
  }

  #[test]
  fn request_is_visible_from_worker_threads() {
    let shutdown = Shutdown::new();
    let seen = std::thread::scope(|s| {
      shutdown.request("interrupt");
      s.spawn(|| shutdown.is_requested()).join().unwrap()
    });
    assert!(seen);
  }
}
