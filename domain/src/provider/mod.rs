//! Provider and model catalog
//!
//! Descriptors for the LLM backends the gateway can talk to, plus the
//! process-wide immutable catalog used for routing and capability gating.

pub mod catalog;
pub mod id;

pub use catalog::{Provider, ModelInfo, find_model, find_provider, providers};
pub use id::ProviderId;
