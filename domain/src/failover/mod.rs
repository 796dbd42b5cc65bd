//! Failure classification and failover recommendation
//!
//! Pure domain logic: given the raw text of a provider failure plus task
//! signals (media type, message keywords), classify the failure into a fixed
//! taxonomy and recommend a concrete alternative provider/model likely to
//! succeed for the same task. The recommendation is advisory metadata only;
//! this layer never retries on its own.

pub mod classify;
pub mod recommend;

pub use classify::{ClassifiedFailure, FailureKind, classify};
pub use recommend::{Alternative, recommend_alternative};
