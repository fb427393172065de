//! Rendering and logging outcomes for humans.
//!
//! [`Outcome::describe`] is unbounded and may carry terminal control
//! characters from upstream errors. Everything that reaches a log or a
//! terminal goes through [`render`] instead.

use std::fmt;

use outcome_config::{DiagnosticsConfig, ReportLevel};
use outcome_types::Outcome;

use crate::text::{strip_control_chars, truncate_to_fit};

const ELLIPSIS: &str = "...";

/// Bounded, control-free rendering of an outcome.
///
/// Failures get their cause chain appended when `include_causes` is set.
#[must_use]
pub fn render<T: fmt::Display>(outcome: &Outcome<T>, config: &DiagnosticsConfig) -> String {
    let mut text = outcome.describe();
    if config.include_causes()
        && let Some(fault) = outcome.failure_ref()
    {
        let causes: Vec<String> = fault.causes().collect();
        if !causes.is_empty() {
            text.push_str(&format!(" (caused by: {})", causes.join(": ")));
        }
    }
    truncate_to_fit(&strip_control_chars(&text), config.max_chars(), ELLIPSIS)
}

macro_rules! emit {
    ($level:expr, $($field:tt)+) => {
        match $level {
            ReportLevel::Trace => tracing::trace!($($field)+),
            ReportLevel::Debug => tracing::debug!($($field)+),
            ReportLevel::Info => tracing::info!($($field)+),
            ReportLevel::Warn => tracing::warn!($($field)+),
            ReportLevel::Error => tracing::error!($($field)+),
        }
    };
}

/// Emit one event describing `outcome`. Successes log at `success_level`,
/// failures at `failure_level` with the fault kind attached.
pub fn report<T: fmt::Display>(label: &str, outcome: &Outcome<T>, config: &DiagnosticsConfig) {
    let rendered = render(outcome, config);
    match outcome {
        Outcome::Success(_) => {
            emit!(config.success_level(), label, outcome = %rendered, "outcome succeeded");
        }
        Outcome::Failure(fault) => {
            let kind = fault.kind().as_str();
            emit!(config.failure_level(), label, kind, outcome = %rendered, "outcome failed");
        }
    }
}
