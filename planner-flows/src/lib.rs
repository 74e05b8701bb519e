//! The three AI-backed dashboard features, built on one generic pipeline.
//!
//! Every feature is the same linear flow: validate the form request, render
//! it into a fixed advisor prompt, call the configured [`TextGenerator`] with
//! a declared output schema, and validate the typed reply. [`Flow`] is that
//! pipeline; [`paths`], [`electives`], and [`prediction`] instantiate it.
//!
//! [`TextGenerator`]: planner_adapters::traits::TextGenerator

#![warn(missing_docs, clippy::pedantic)]

pub mod electives;
pub mod paths;
pub mod prediction;

mod error;
mod flow;

pub use error::{FlowError, FlowResult};
pub use flow::{Flow, FlowInput, FlowOutput};
