//! Command execution handlers
//!
//! Every command reads JSON input files and writes its JSON result to the
//! given writer. Failures surface as errors so the binary exits non-zero.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::component::{ComponentId, ComponentIdList, Version};
use crate::graph::{ComponentEdges, DependencyGraph, FlattenedComponent};
use crate::manifest::{
    ComponentManifest, DedupedDependencies, ManifestDependencies, dedupe_dependencies,
    merge_with_root_deps,
};
use crate::primitives::LogContext;
use crate::resolver::resolve_latest;
use crate::tagging::{TagRequest, TaggedComponent, tag_components};
use crate::validation::validate;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Execute CLI commands against the global configuration
pub fn execute_command(config: CliConfig, out: &mut dyn Write) -> Result<()> {
    let Some(command) = config.command else {
        writeln!(out, "verigraph - component version integrity")?;
        writeln!(out, "Run 'verigraph --help' for usage information")?;
        return Ok(());
    };
    execute_command_with_config(command, &config.app_config, out)
}

/// Execute a specific command with a provided configuration (for testing)
pub fn execute_command_with_config(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    if command.checks_issues() {
        debug!(?command, ignored = ?config.ignore_issues, "Executing command");
    } else {
        debug!(?command, "Executing command");
    }
    match command {
        Commands::Validate {
            version_json,
            owner,
        } => handle_validate(config, &version_json, owner, out),
        Commands::Flatten { graph, components } => {
            handle_flatten(config, &graph, &components, out)
        }
        Commands::Dedupe { manifests, root } => {
            handle_dedupe(config, &manifests, root.as_deref(), out)
        }
        Commands::Latest { ids, id } => handle_latest(config, &ids, &id, out),
        Commands::Tag { request } => handle_tag(config, &request, out),
        Commands::Version => handle_version(out),
    }
}

fn read_json<T: DeserializeOwned>(config: &AppConfig, path: &Path) -> Result<T> {
    let path = config.resolve_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to write JSON output")?;
    writeln!(out)?;
    Ok(())
}

fn parse_id(value: &str) -> Result<ComponentId> {
    value
        .parse()
        .with_context(|| format!("Invalid component id: {}", value))
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    hash: String,
}

fn handle_validate(
    config: &AppConfig,
    path: &Path,
    owner: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let version: Version = read_json(config, path)?;
    let owner = owner.as_deref().map(parse_id).transpose()?;
    validate(&version, owner.as_ref())?;
    write_json(
        out,
        &ValidationReport {
            valid: true,
            hash: version.hash().to_string(),
        },
    )
}

fn handle_flatten(
    config: &AppConfig,
    path: &Path,
    components: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let edges: Vec<ComponentEdges> = read_json(config, path)?;
    let graph = DependencyGraph::from_edges(&edges).context("Failed to build dependency graph")?;
    let suppressions = config.issue_suppressions();

    if components.is_empty() {
        let flattened = graph.flatten().into_checked(&suppressions)?;
        crate::log_info!(
            "Flattened dependency graph",
            LogContext::new("flatten").with_items(flattened.components.len())
        );
        return write_json(out, &flattened);
    }

    let ids = components
        .iter()
        .map(|id| parse_id(id))
        .collect::<Result<Vec<_>>>()?;
    if let Some(missing) = ids.iter().find(|id| !graph.contains(id)) {
        anyhow::bail!("Component {} is not part of the graph", missing);
    }
    // issues only come from cycles and self references, an acyclic graph
    // needs no full pass
    let subset: Vec<FlattenedComponent> = if graph.has_cycles() {
        let flattened = graph.flatten().into_checked(&suppressions)?;
        ids.iter()
            .filter_map(|id| flattened.get(id).cloned())
            .collect()
    } else {
        graph.flatten_components(&ids)
    };
    crate::log_info!(
        "Flattened components",
        LogContext::new("flatten").with_items(subset.len())
    );
    write_json(out, &subset)
}

fn handle_dedupe(
    config: &AppConfig,
    path: &Path,
    root: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let manifests: Vec<ComponentManifest> = read_json(config, path)?;
    let mut deduped = dedupe_dependencies(&manifests);
    if let Some(root) = root {
        let root: ManifestDependencies = read_json(config, root)?;
        deduped = merge_with_root_deps(&root, deduped);
    }
    write_json(out, &deduped)
}

fn handle_latest(config: &AppConfig, path: &Path, id: &str, out: &mut dyn Write) -> Result<()> {
    let known: Vec<String> = read_json(config, path)?;
    let candidates = known
        .iter()
        .map(|id| parse_id(id))
        .collect::<Result<ComponentIdList>>()?;
    let resolved = resolve_latest(&candidates, &parse_id(id)?)?;
    write_json(out, &resolved.to_string())
}

#[derive(Serialize)]
struct TagReport {
    components: Vec<TaggedComponent>,
    /// Package requests of the whole batch, hoisted once every component
    /// is flattened
    dependencies: DedupedDependencies,
}

fn handle_tag(config: &AppConfig, path: &Path, out: &mut dyn Write) -> Result<()> {
    let request: TagRequest = read_json(config, path)?;
    let components = tag_components(&request, &config.issue_suppressions())?;
    let manifests: Vec<ComponentManifest> =
        components.iter().map(TaggedComponent::manifest).collect();
    let dependencies = dedupe_dependencies(&manifests);
    crate::log_info!(
        "Tagged components",
        LogContext::new("tag").with_items(components.len())
    );
    write_json(
        out,
        &TagReport {
            components,
            dependencies,
        },
    )
}

fn handle_version(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "verigraph {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
