//! Metrics collection.
//!
//! # Metrics
//! - `proxy_config_transactions_total` (counter): transaction outcomes by `outcome`
//!   (committed, discarded, failed, disposed)
//! - `proxy_config_version_fallback_total` (counter): version reads replaced by 1, by `reason`
//! - `proxy_runtime_commands_total` (counter): runtime commands by `command`, `status`

/// Transaction outcome labels.
pub const COMMITTED: &str = "committed";
pub const DISCARDED: &str = "discarded";
pub const FAILED: &str = "failed";
pub const DISPOSED: &str = "disposed";

pub fn record_transaction(outcome: &'static str) {
    ::metrics::counter!("proxy_config_transactions_total", "outcome" => outcome).increment(1);
}

pub fn record_version_fallback(reason: &'static str) {
    ::metrics::counter!("proxy_config_version_fallback_total", "reason" => reason).increment(1);
}

pub fn record_runtime_command(command: &'static str, success: bool) {
    let status = if success { "ok" } else { "error" };
    ::metrics::counter!("proxy_runtime_commands_total", "command" => command, "status" => status)
        .increment(1);
}
