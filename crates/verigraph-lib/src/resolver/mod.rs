//! Latest-version resolution for versionless component ids

pub mod latest;

pub use latest::{ResolveError, resolve_latest};
