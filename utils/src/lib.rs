//! Shared infrastructure for outcomes.
//!
//! Kept out of `outcome-types` so the core type stays free of side effects:
//!
//! - **`diagnostics`**: bounded, terminal-safe rendering and `tracing` reports
//! - **`logging`**: subscriber setup for binaries and tests
//! - **`text`**: truncation and control-character stripping

pub mod diagnostics;
pub mod logging;
pub mod text;

pub use diagnostics::{render, report};
pub use logging::{env_filter, init_tracing};
pub use text::{strip_control_chars, truncate_to_fit};
