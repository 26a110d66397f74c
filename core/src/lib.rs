//! Core of the Smith task orchestration pipeline.
//!
//! Loads and validates the workspace configuration and task documents,
//! assembles prompts, dispatches them through a [`provider::ProviderFactory`]
//! and records run metrics.

pub mod api;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod provider;
pub mod state;
pub mod task;
pub mod validate;
