//! Gate that accepts or rejects a Version before it becomes history
//!
//! Checks run in a fixed order and the first failure wins. Every message
//! starts with the component (or hash) being saved and names the offending
//! field and value.

use super::error::{DuplicateDependencies, ValidationError, VersionInvalid};
use super::package_json::{
    DEPENDENCIES_FIELDS, NON_PACKAGE_JSON_FIELDS, NON_USER_CHANGEABLE_PROPS,
    OVERRIDES_FORBIDDEN_FIELDS, validate_dependencies_object, validate_package_json_field,
};
use crate::component::extensions::duplicates_ignore_case;
use crate::component::{
    ComponentId, Lifecycle, PackageDependencies, Version, VersionRef, is_valid_path,
    validate_package_name,
};
use semver::Version as SemVer;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, trace};

/// Objects produced before this version may carry duplicate extension entries
pub const DUPLICATE_EXTENSIONS_FIXED_IN: SemVer = SemVer::new(0, 0, 882);
/// Objects produced up to this version may miss extensions in their flattened list
pub const FLATTENED_EXTENSIONS_FIXED_AFTER: SemVer = SemVer::new(0, 0, 947);
/// Objects produced up to this version may record a parent as unrelated head
pub const UNRELATED_HEAD_FIXED_AFTER: SemVer = SemVer::new(0, 2, 33);

/// Core extension that only current-schema objects may be configured with
pub const BUILDER_EXTENSION: &str = "teambit.pipelines/builder";

/// Override value removing a dependency from a category
const REMOVE_MARKER: &str = "-";

/// Validate `version` before it is persisted under `owner`.
pub fn validate(version: &Version, owner: Option<&ComponentId>) -> Result<(), ValidationError> {
    VersionValidator::new(version, owner).run()
}

/// Runs the ordered checks against a single Version
pub struct VersionValidator<'a> {
    version: &'a Version,
    owner: Option<&'a ComponentId>,
    prefix: String,
}

impl<'a> VersionValidator<'a> {
    pub fn new(version: &'a Version, owner: Option<&'a ComponentId>) -> Self {
        Self {
            version,
            owner,
            prefix: version.describe(owner),
        }
    }

    pub fn run(&self) -> Result<(), ValidationError> {
        debug!(
            owner = self.owner.map(ToString::to_string).as_deref(),
            files = self.version.files.len(),
            "Validating version"
        );

        self.check_main_file()?;
        self.check_files()?;
        self.check_package_dependencies()?;
        self.check_extensions()?;
        self.check_dependency_lists()?;
        self.check_flattened_dependencies()?;
        self.check_duplicate_dependencies()?;
        self.check_log()?;
        self.check_overrides()?;
        self.check_package_json_changed_props()?;
        self.check_parents()?;
        self.check_unrelated_head()?;
        self.check_schema()?;
        self.check_owner_version()?;

        trace!("Version is valid");
        Ok(())
    }

    fn invalid(&self, detail: impl Display) -> ValidationError {
        VersionInvalid {
            message: format!("{}, {}", self.prefix, detail),
        }
        .into()
    }

    /// Producer-version gate: `None` producer never passes
    fn produced_since(&self, predicate: impl Fn(&SemVer) -> bool) -> bool {
        self.version.producer_version.as_ref().is_some_and(predicate)
    }

    fn check_main_file(&self) -> Result<(), ValidationError> {
        let main_file = &self.version.main_file;
        if main_file.is_empty() {
            return Err(self.invalid("the mainFile is missing"));
        }
        if !is_valid_path(main_file) {
            return Err(self.invalid(format!("the mainFile {} is invalid", main_file)));
        }
        Ok(())
    }

    fn check_files(&self) -> Result<(), ValidationError> {
        let files = &self.version.files;
        if files.is_empty() {
            return Err(self.invalid("the files are missing"));
        }
        for file in files {
            if !is_valid_path(&file.relative_path) {
                return Err(self.invalid(format!("the file {} is invalid", file.relative_path)));
            }
            if file.name.is_empty() {
                return Err(self.invalid(format!(
                    "the file {} is missing the name attribute",
                    file.relative_path
                )));
            }
            if file.file.is_empty() {
                return Err(self.invalid(format!(
                    "the file {} is missing the hash",
                    file.relative_path
                )));
            }
        }

        if !files
            .iter()
            .any(|file| file.relative_path == self.version.main_file)
        {
            let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
            return Err(self.invalid(format!(
                "unable to find the mainFile {} in the following files list: {}",
                self.version.main_file,
                paths.join(", ")
            )));
        }

        let duplicates = duplicates_ignore_case(files.iter().map(|f| f.relative_path.as_str()));
        if !duplicates.is_empty() {
            return Err(self.invalid(format!(
                "the following files are duplicated {}",
                duplicates.join(", ")
            )));
        }
        Ok(())
    }

    fn check_package_dependencies(&self) -> Result<(), ValidationError> {
        for lifecycle in Lifecycle::ALL {
            self.check_package_map(self.version.package_dependency_map(lifecycle))?;
        }
        Ok(())
    }

    fn check_package_map(&self, packages: &PackageDependencies) -> Result<(), ValidationError> {
        for (name, value) in packages {
            if let Err(errors) = validate_package_name(name) {
                return Err(self.invalid(format!(
                    "{} is invalid package name, errors: {}",
                    name,
                    errors.join(",")
                )));
            }
            if value.is_empty() {
                return Err(self.invalid(format!("the version of \"{}\" is empty", name)));
            }
        }
        Ok(())
    }

    fn check_extensions(&self) -> Result<(), ValidationError> {
        let extensions = &self.version.extensions;

        let duplicates = extensions.duplicate_string_ids();
        if !duplicates.is_empty() && self.produced_since(|v| *v >= DUPLICATE_EXTENSIONS_FIXED_IN) {
            return Err(self.invalid(format!(
                "the following extensions entries are duplicated {}",
                duplicates.join(", ")
            )));
        }

        for id in extensions.iter().filter_map(|e| e.extension_id.as_ref()) {
            if !id.has_version() {
                return Err(self.invalid(format!("the extension {} does not have a version", id)));
            }
        }

        for artifacts in extensions.artifacts() {
            for artifact in &artifacts.refs {
                if !is_valid_path(&artifact.relative_path) {
                    return Err(self.invalid(format!(
                        "the artifact {} is invalid",
                        artifact.relative_path
                    )));
                }
                if artifact.file.is_empty() {
                    return Err(self.invalid(format!(
                        "the artifact {} is missing the hash",
                        artifact.relative_path
                    )));
                }
            }
            let duplicates = artifacts.duplicate_paths();
            if !duplicates.is_empty() {
                return Err(self.invalid(format!(
                    "the following artifact files are duplicated {}",
                    duplicates.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn check_dependency_lists(&self) -> Result<(), ValidationError> {
        for lifecycle in Lifecycle::ALL {
            self.version
                .dependency_list(lifecycle)
                .validate(self.owner)
                .map_err(|source| ValidationError::InvalidDependency {
                    context: self.prefix.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    fn check_flattened_dependencies(&self) -> Result<(), ValidationError> {
        let version = self.version;
        let flattened = &version.flattened_dependencies;

        if (!version.dependencies.is_empty() || !version.dev_dependencies.is_empty())
            && flattened.is_empty()
        {
            return Err(self.invalid("it has dependencies but its flattenedDependencies is empty"));
        }

        for dependency in flattened {
            let concrete = dependency
                .version
                .as_ref()
                .is_some_and(VersionRef::is_concrete);
            if !concrete {
                return Err(self.invalid(format!(
                    "the flattenedDependency {} does not have a version",
                    dependency
                )));
            }
        }

        if self.produced_since(|v| *v > FLATTENED_EXTENSIONS_FIXED_AFTER) {
            for extension_id in version.extensions.extension_ids() {
                if !flattened.has(&extension_id) {
                    return Err(self.invalid(format!(
                        "the extension {} is missing from the flattenedDependencies",
                        extension_id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether the overrides remove `id` from the `lifecycle` category
    fn is_removed_by_override(&self, lifecycle: Lifecycle, id: &ComponentId) -> bool {
        let Some(serde_json::Value::Object(field)) =
            self.version.overrides.get(lifecycle.field_name())
        else {
            return false;
        };
        [id.to_string_without_version(), id.name.clone()]
            .iter()
            .any(|key| field.get(key).and_then(|v| v.as_str()) == Some(REMOVE_MARKER))
    }

    fn check_duplicate_dependencies(&self) -> Result<(), ValidationError> {
        let duplicates = self
            .version
            .dependencies_ids_exclude_extensions()
            .find_duplications_ignore_version();

        let mut clashes = BTreeMap::new();
        for (key, found) in duplicates {
            let mut remaining = 0;
            for lifecycle in Lifecycle::ALL {
                for dependency in self.version.dependency_list(lifecycle) {
                    if dependency.id.to_string_without_version() == key
                        && !self.is_removed_by_override(lifecycle, &dependency.id)
                    {
                        remaining += 1;
                    }
                }
            }
            if remaining <= 1 {
                trace!(dependency = %key, "Duplicate reconciled by overrides");
                continue;
            }
            clashes.insert(key, found.iter().map(ToString::to_string).collect());
        }

        if clashes.is_empty() {
            return Ok(());
        }
        Err(DuplicateDependencies {
            component: self
                .owner
                .map(ToString::to_string)
                .unwrap_or_else(|| self.version.hash().to_string()),
            clashes,
        }
        .into())
    }

    fn check_log(&self) -> Result<(), ValidationError> {
        if self.version.log.is_none() {
            return Err(self.invalid("the log object is missing"));
        }
        Ok(())
    }

    fn check_overrides(&self) -> Result<(), ValidationError> {
        for (field, value) in &self.version.overrides {
            if OVERRIDES_FORBIDDEN_FIELDS.contains(&field.as_str()) {
                return Err(self.invalid(format!(
                    "the \"overrides\" has a forbidden key \"{}\"",
                    field
                )));
            }
            let path = format!("overrides.{}", field);
            if DEPENDENCIES_FIELDS.contains(&field.as_str()) {
                match validate_dependencies_object(value) {
                    Ok(()) => {}
                    Err(None) => {
                        return Err(self.invalid(format!(
                            "expected {} to be object, got {}",
                            path, value
                        )));
                    }
                    Err(Some(name)) => {
                        return Err(self.invalid(format!(
                            "expected version of \"{}\" in {} to be a non-empty string",
                            name, path
                        )));
                    }
                }
            } else if !NON_PACKAGE_JSON_FIELDS.contains(&field.as_str()) {
                if let Some(problem) = validate_package_json_field(field, value) {
                    return Err(self.invalid(format!(
                        "\"{}\" is a package.json field but is not compliant with npm requirements. {}",
                        path, problem
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_package_json_changed_props(&self) -> Result<(), ValidationError> {
        for (prop, value) in &self.version.package_json_changed_props {
            if NON_USER_CHANGEABLE_PROPS.contains(&prop.as_str()) {
                return Err(self.invalid(format!(
                    "the packageJsonChangedProps should not override the prop {}",
                    prop
                )));
            }
            if let Some(problem) = validate_package_json_field(prop, value) {
                return Err(self.invalid(format!(
                    "the generated package.json field \"{}\" is not compliant with npm requirements. {}",
                    prop, problem
                )));
            }
        }
        Ok(())
    }

    fn check_parents(&self) -> Result<(), ValidationError> {
        if self.version.parents.is_empty() {
            return Ok(());
        }
        let own_hash = self.version.hash();
        for parent in &self.version.parents {
            if *parent == own_hash {
                return Err(self.invalid(format!(
                    "its parent has the same hash as itself: {}",
                    parent
                )));
            }
            if !parent.is_valid() {
                return Err(self.invalid(format!(
                    "its parent \"{}\" is not a valid snap (40 chars hex).",
                    parent
                )));
            }
        }
        Ok(())
    }

    fn check_unrelated_head(&self) -> Result<(), ValidationError> {
        let Some(unrelated) = &self.version.unrelated else {
            return Ok(());
        };
        if self.version.parents.contains(&unrelated.head)
            && self.produced_since(|v| *v > UNRELATED_HEAD_FIXED_AFTER)
        {
            return Err(self.invalid(format!(
                "the unrelated.head is the same as the parent: {}",
                unrelated.head
            )));
        }
        Ok(())
    }

    fn check_schema(&self) -> Result<(), ValidationError> {
        let version = self.version;
        let schema = version
            .schema
            .map(|s| s.to_string())
            .unwrap_or_else(|| "0.0.0".to_string());

        if version.is_legacy() {
            if version.extensions.has_name(BUILDER_EXTENSION) {
                return Err(self.invalid(format!(
                    "the extensions should not include \"{}\" as of the schema \"{}\"",
                    BUILDER_EXTENSION, schema
                )));
            }
            return Ok(());
        }

        let legacy = &version.legacy;
        let set_fields = [
            ("compiler", legacy.compiler.is_some()),
            ("tester", legacy.tester.is_some()),
            ("dists", legacy.dists.is_some()),
            ("mainDistFile", legacy.main_dist_file.is_some()),
        ];
        if let Some((field, _)) = set_fields.iter().find(|(_, set)| *set) {
            return Err(self.invalid(format!(
                "the {} field is not permitted according to schema \"{}\"",
                field, schema
            )));
        }

        let non_empty_fields = [
            ("customResolvedPaths", !legacy.custom_resolved_paths.is_empty()),
            (
                "compilerPackageDependencies",
                !legacy.compiler_package_dependencies.is_empty(),
            ),
            (
                "testerPackageDependencies",
                !legacy.tester_package_dependencies.is_empty(),
            ),
        ];
        if let Some((field, _)) = non_empty_fields.iter().find(|(_, set)| *set) {
            return Err(self.invalid(format!(
                "the {} field cannot have values according to schema \"{}\"",
                field, schema
            )));
        }

        for lifecycle in [Lifecycle::Runtime, Lifecycle::Dev] {
            let has_relative_paths = version
                .dependency_list(lifecycle)
                .iter()
                .any(|dep| !dep.relative_paths.is_empty());
            if has_relative_paths {
                return Err(self.invalid(format!(
                    "the {} should not have relativePaths according to schema \"{}\"",
                    lifecycle.field_name(),
                    schema
                )));
            }
        }
        Ok(())
    }

    fn check_owner_version(&self) -> Result<(), ValidationError> {
        let Some(version) = self.owner.and_then(|owner| owner.version.as_ref()) else {
            return Ok(());
        };
        if !version.is_concrete() {
            return Err(self.invalid(format!(
                "the version \"{}\" is invalid. it's not a hash (snap) nor a tag",
                version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("version_validator.test.rs");
}
