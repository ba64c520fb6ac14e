//! Component identity, dependency model and the Version object

pub mod dependencies;
pub mod extensions;
pub mod hash;
pub mod id;
pub mod package_name;
pub mod paths;
pub mod version;

pub use dependencies::{
    Dependency, DependencyEntry, DependencyError, DependencyList, ImportSpecifier, Lifecycle,
    MainFileSpecifier, RelativePath,
};
pub use extensions::{ArtifactFiles, ArtifactRef, ExtensionDataEntry, ExtensionDataList};
pub use hash::{HASH_LENGTH, Ref, is_snap, is_tag};
pub use id::{ComponentId, ComponentIdList, LATEST, ParseIdError, VersionRef};
pub use package_name::validate_package_name;
pub use paths::is_valid_path;
pub use version::{
    LegacyFields, Log, PackageDependencies, SchemaName, SourceFile, Unrelated, Version,
};
