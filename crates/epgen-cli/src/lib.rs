//! epgen CLI library.
//!
//! This crate provides the core functionality for the epgen CLI, including
//! project configuration loading, logging setup, and the goal commands.

pub mod commands;
pub mod logging;
pub mod project;
