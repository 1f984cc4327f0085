//! Integration tests
//!
//! Commands run end to end through `run_with` against the in-memory platform; the REST adapter
//! is exercised against local axum servers.

mod harness;

mod test_events;
mod test_flows_auth;
mod test_flows_env;
mod test_import_delete;
mod test_lifecycle;
mod test_logs;
mod test_subdomain;
