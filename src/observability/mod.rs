//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client / store / runtime produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the embedding program installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing a subscriber or recorder is the caller's choice
//! - Metric names are prefixed `proxy_config_` / `proxy_runtime_`
//! - Without a recorder, metric updates are no-ops

pub mod logging;
pub mod metrics;
