//! Built-in tool implementations
//!
//! [`LocalToolExecutor`] dispatches on [`ToolKind`] and runs each call in
//! isolation: any failure becomes the record's result string. Network-backed
//! tools sit behind source traits ([`WeatherSource`], [`SearchSource`]) so
//! their report shaping stays testable without I/O.
//!
//! [`ToolKind`]: conductor_domain::ToolKind

pub mod calc;
pub mod clock;
pub mod executor;
pub mod search;
pub mod weather;

pub use executor::LocalToolExecutor;
pub use search::{SearchSource, TavilySource};
pub use weather::{OpenMeteoSource, WeatherSource};
