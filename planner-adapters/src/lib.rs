//! Remote text-generation adapters used by the planner flows.
//!
//! The [`traits`] module defines the provider-neutral interface; [`gemini`]
//! implements it against the Google Gemini `generateContent` API, which is
//! the service the dashboard delegates to.

#![warn(missing_docs, clippy::pedantic)]

pub mod gemini;
pub mod traits;

mod http_client;
