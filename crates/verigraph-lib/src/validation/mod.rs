//! Version validation
//!
//! [`validate`] is the gate every Version passes before it is persisted.

pub mod error;
pub mod package_json;
pub mod version_validator;

pub use error::{DuplicateDependencies, ValidationError, VersionInvalid};
pub use version_validator::{VersionValidator, validate};
