//! Observation of state machine transitions.
//!
//! The engine has a single tracer slot, always filled by a
//! [`TracerAggregator`]. Logging, metrics and history collectors register
//! with the aggregator instead of coupling to engine internals.
//!
//! ```text
//! fire(event) ──► TracerAggregator ──┬──► LoggingTracer (tracing)
//!                                    ├──► HistoryTracer (bounded history)
//!                                    └──► custom Tracer  (metrics, ...)
//! ```

mod aggregator;
#[cfg(test)]
pub(crate) mod capture;
mod history;
mod log;
mod tracer;

pub use aggregator::{TracerAggregator, TracerId};
pub use history::{HistoryTracer, DEFAULT_HISTORY_CAPACITY};
pub use log::LoggingTracer;
pub use tracer::Tracer;
