//! Core outcome types.
//!
//! A producer finishes a unit of work by building exactly one [`Outcome`];
//! consumers inspect it or chain combinators on it. No IO, no async, no
//! logging: everything here is a plain value.

mod fault;
mod outcome;

pub use fault::{ErrorCapability, Fault, FaultKind};
pub use outcome::Outcome;
