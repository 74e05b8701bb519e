//! GradPath academic-planning facade.
//!
//! Depend on this crate via `cargo add gradpath`. It bundles the planner
//! crates behind feature flags so a dashboard can pull in only what it
//! renders.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use planner_primitives as primitives;

/// Text-generation adapters, including the Gemini client (enabled by
/// `adapters` feature).
#[cfg(feature = "adapters")]
pub use planner_adapters as adapters;

/// The three dashboard flows (enabled by `flows` feature).
#[cfg(feature = "flows")]
pub use planner_flows as flows;

/// Prompt template rendering (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use planner_prompts as prompts;
