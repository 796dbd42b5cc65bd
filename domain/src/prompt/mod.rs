//! Prompt templates

pub mod tools;

pub use tools::ToolPromptTemplate;
