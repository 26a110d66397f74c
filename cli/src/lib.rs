//! smith-cli library - exposes the command handlers for integration tests.

pub mod app;
pub mod commands;
