// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for everything that talks to Asana (gateway, workspace/project lookup, task aggregation)
// role: asana/namespace
// outputs: Public submodules; only `gateway` performs I/O directly
// invariants: Callers depend on the Gateway trait, never on HttpGateway
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod aggregate;
pub mod gateway;
pub mod workspace;
