//! core
//!
//! Configuration, ticket-number normalization, and the process context.

pub mod config;
pub mod context;
pub mod numbers;

pub use config::Config;
pub use context::App;
