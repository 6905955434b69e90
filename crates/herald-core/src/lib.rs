#![forbid(unsafe_code)]

//! Core: listener registry and synchronous change notification for Herald.
//!
//! # Role in Herald
//! `herald-core` owns the one reusable abstraction in the workspace: a
//! [`Subject`] holding a value plus a de-duplicated, insertion-ordered set of
//! listeners keyed by a registration id. Listeners are held through `Weak`
//! handles, so the subject never keeps a listener alive.
//!
//! # Primary responsibilities
//! - **Subject**: value storage, registration by id, fan-out on mutation.
//! - **Listener**: the single-method capability notified with the new value.
//! - **Subscription**: RAII guard for closure listeners.
//! - **RegistryConfig**: duplicate-id policy and expired-entry pruning.
//! - **Logging**: optional subscriber bootstrap (feature `subscriber`).
//!
//! # How it fits in the system
//! `herald-agency` builds its book agency and news scenarios on top of
//! [`Subject`]; `herald-demo` drives those scenarios from the console.

pub mod config;
pub mod error;
pub mod listener;
pub mod logging;
pub mod subject;

pub use config::{DuplicatePolicy, RegistryConfig};
pub use error::ConfigError;
pub use listener::Listener;
pub use subject::{Registration, Subject, Subscription};
