//! pr-automerge - merge GitHub pull requests that meet readiness criteria
//!
//! Scans a numeric range of pull requests on one repository, checks each
//! against approvals, required labels, CI status and mergeable state, and
//! merges the ones that qualify.
//!
//! # Architecture
//!
//! - [`platform`]: the `PlatformService` trait and its GitHub implementation
//! - [`criteria`]: the four readiness checks
//! - [`notify`]: timestamped, levelled notifications
//! - [`automation`]: the manager driving one pass over a range
//!
//! Configuration is loaded once into an [`config::AutomationConfig`] and
//! passed explicitly; nothing reads the environment after startup.

pub mod automation;
pub mod config;
pub mod criteria;
pub mod error;
pub mod notify;
pub mod platform;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
