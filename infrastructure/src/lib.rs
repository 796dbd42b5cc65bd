//! Infrastructure layer for conductor
//!
//! Adapters for the application ports: provider backends behind the LLM
//! gateway, local tool implementations behind the tool executor, and the
//! figment-based configuration loader.

pub mod config;
pub mod providers;
pub mod tools;

pub use config::{ConfigLoader, Settings};
pub use providers::DispatchGateway;
pub use tools::LocalToolExecutor;
