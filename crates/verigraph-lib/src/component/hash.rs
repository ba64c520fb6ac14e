//! Content hashes ("snaps") and version-reference syntax checks

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// Width of a content hash in hex characters (SHA-1)
pub const HASH_LENGTH: usize = 40;

/// Content address of an immutable object.
///
/// A `Ref` is not validated on construction: objects loaded from storage can
/// carry malformed hashes and the validator has to be able to see them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ref(String);

impl Ref {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Hash arbitrary bytes into a `Ref`
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha1::digest(bytes);
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is a well-formed snap hash
    pub fn is_valid(&self) -> bool {
        is_snap(&self.0)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ref {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A snap is a 40 character hex content hash
pub fn is_snap(value: &str) -> bool {
    value.len() == HASH_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A tag is a valid semantic version
pub fn is_tag(value: &str) -> bool {
    semver::Version::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    include!("hash.test.rs");
}
