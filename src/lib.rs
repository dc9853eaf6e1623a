//! Task and project tracking backed by a local key-value directory.
//!
//! The pieces line up with one user action: a [`form`] buffer is validated,
//! a store in [`store`] applies and persists the change, the [`notify`] sink
//! confirms it, and [`query`] recomputes what to display.

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod ids;
pub mod logging;
pub mod model;
pub mod notify;
pub mod output;
pub mod query;
pub mod session;
pub mod store;
