//! epgen End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the generation flows:
//!
//! - Source generation: discovery documents -> archives -> source root
//! - Document goals: service classes -> discovery and OpenAPI documents
//! - Client libraries: service classes -> archives
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p epgen-tests
//! ```
//!
//! Most tests drive the library with [`harness::FakeGenerator`], which
//! behaves like the Endpoints tool without needing a JVM. The `e2e_cli`
//! tests run the `epgen` binary against a shell script standing in for the
//! tool and only run on unix.

pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use fixtures::{maven_client_archive, ArchiveBuilder, ProjectFixture};
pub use harness::{list_files, FakeGenerator};
