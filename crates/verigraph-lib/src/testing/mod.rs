//! Test support for verigraph
//!
//! Temporary workspaces for command tests and builders for the objects the
//! engine works on. Compiled for unit tests and behind the `test-utils`
//! feature for the integration test crates.

pub mod filesystem;
pub mod fixtures;

pub use filesystem::TempDirFixture;
pub use fixtures::{component_edges, concrete_id, manifest, tagged_component, valid_version};
