// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Declared-resources manifest and the identifier state the CLI host keeps
//! between runs.

use crate::error::{ProviderError, Result};
use crate::provider::{Provider, ResourceType};
use crate::resources::ResourceState;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

/// A YAML document listing the resources to reconcile, in dependency order
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<DeclaredResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeclaredResource {
    #[serde(rename = "type")]
    pub type_name: String,
    pub config: Value,
}

impl DeclaredResource {
    pub fn resource_type(&self) -> Result<ResourceType> {
        self.type_name.parse()
    }

    /// `<type>.<name>`, unique within a manifest
    pub fn address(&self) -> Result<String> {
        let name = self
            .config
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ProviderError::ManifestError(format!(
                    "{} resource is missing a string 'name'",
                    self.type_name
                ))
            })?;
        Ok(format!("{}.{}", self.type_name, name))
    }
}

impl Manifest {
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| ProviderError::ManifestError(format!("Failed to parse manifest: {}", e)))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            ProviderError::ManifestError(format!(
                "Failed to read manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&contents)
    }

    /// Resolve every entry's type and address, rejecting duplicates
    fn addressed(&self) -> Result<Vec<(String, ResourceType, &DeclaredResource)>> {
        let mut seen = HashSet::new();
        self.resources
            .iter()
            .map(|resource| {
                let address = resource.address()?;
                let kind = resource.resource_type()?;
                if !seen.insert(address.clone()) {
                    return Err(ProviderError::ManifestError(format!(
                        "{} is declared more than once",
                        address
                    )));
                }
                Ok((address, kind, resource))
            })
            .collect()
    }
}

/// One recorded resource instance
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub address: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
    pub config: Value,
}

impl StateEntry {
    fn state(&self) -> ResourceState {
        ResourceState::from_id(self.id.clone())
    }
}

/// Identifiers recorded by previous runs, kept in creation order
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StateFile {
    #[serde(default)]
    pub resources: Vec<StateEntry>,
}

impl StateFile {
    /// Load the state file, treating a missing file as empty state
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ProviderError::StateError(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ProviderError::StateError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ProviderError::StateError(format!("Failed to encode state: {}", e)))?;
        tokio::fs::write(path, contents).await.map_err(|e| {
            ProviderError::StateError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn get(&self, address: &str) -> Option<&StateEntry> {
        self.resources.iter().find(|e| e.address == address)
    }

    /// Record the outcome of an operation: a present id upserts, a cleared id removes
    fn record(&mut self, address: &str, resource: &DeclaredResource, state: &ResourceState) {
        match state.id() {
            Some(id) => {
                let entry = StateEntry {
                    address: address.to_string(),
                    type_name: resource.type_name.clone(),
                    id: id.to_string(),
                    config: resource.config.clone(),
                };
                match self.resources.iter_mut().find(|e| e.address == address) {
                    Some(existing) => *existing = entry,
                    None => self.resources.push(entry),
                }
            }
            None => self.remove(address),
        }
    }

    fn remove(&mut self, address: &str) {
        self.resources.retain(|e| e.address != address);
    }
}

/// What an apply run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub created: usize,
    pub unchanged: usize,
    pub deleted: usize,
}

/// Reconcile `state` against `manifest`.
///
/// Recorded resources are re-read, missing ones are created in manifest
/// order, and recorded resources no longer declared are deleted in reverse
/// order. The first failure stops the run; `state` reflects the work done so far.
#[instrument(skip_all, fields(declared = manifest.resources.len()))]
pub async fn apply(
    provider: &Provider,
    manifest: &Manifest,
    state: &mut StateFile,
) -> Result<ApplySummary> {
    let declared = manifest.addressed()?;
    let mut summary = ApplySummary::default();

    for (address, kind, resource) in &declared {
        let mut current = state.get(address).map(StateEntry::state).unwrap_or_default();

        if current.is_present() {
            current = provider
                .update(*kind, resource.config.clone(), current)
                .await?;
            state.record(address, resource, &current);
            if current.is_present() {
                summary.unchanged += 1;
                continue;
            }
            warn!("{} disappeared from the cluster, re-creating", address);
        }

        current = provider.create(*kind, resource.config.clone()).await?;
        state.record(address, resource, &current);
        if current.is_present() {
            summary.created += 1;
            info!("{} created", address);
        } else {
            warn!(
                "{} was submitted but could not be read back and is not tracked",
                address
            );
        }
    }

    let declared_addresses: HashSet<&str> = declared.iter().map(|(a, _, _)| a.as_str()).collect();
    let orphans: Vec<StateEntry> = state
        .resources
        .iter()
        .rev()
        .filter(|e| !declared_addresses.contains(e.address.as_str()))
        .cloned()
        .collect();

    for entry in orphans {
        delete_entry(provider, &entry).await?;
        state.remove(&entry.address);
        summary.deleted += 1;
    }

    info!(
        "Apply complete: {} created, {} unchanged, {} deleted",
        summary.created, summary.unchanged, summary.deleted
    );
    Ok(summary)
}

/// Re-read every recorded resource, dropping those that no longer exist.
///
/// Reads run concurrently; entries whose read failed are kept and the first
/// failure is returned after all reads finish.
#[instrument(skip_all, fields(recorded = state.resources.len()))]
pub async fn refresh(provider: &Provider, state: &mut StateFile) -> Result<usize> {
    let results = join_all(state.resources.iter().map(|entry| read_entry(provider, entry))).await;

    let mut first_error = None;
    let mut kept = Vec::with_capacity(state.resources.len());
    for (entry, result) in state.resources.drain(..).zip(results) {
        match result {
            Ok(observed) if observed.is_present() => kept.push(entry),
            Ok(_) => info!("{} no longer exists, dropping it from state", entry.address),
            Err(e) => {
                warn!("Failed to refresh {}: {}", entry.address, e);
                kept.push(entry);
                first_error.get_or_insert(e);
            }
        }
    }
    state.resources = kept;

    match first_error {
        Some(e) => Err(e),
        None => Ok(state.resources.len()),
    }
}

/// Delete every recorded resource in reverse creation order
#[instrument(skip_all, fields(recorded = state.resources.len()))]
pub async fn destroy(provider: &Provider, state: &mut StateFile) -> Result<usize> {
    let mut deleted = 0;
    while let Some(entry) = state.resources.last().cloned() {
        delete_entry(provider, &entry).await?;
        state.resources.pop();
        deleted += 1;
    }
    Ok(deleted)
}

async fn read_entry(provider: &Provider, entry: &StateEntry) -> Result<ResourceState> {
    let kind: ResourceType = entry.type_name.parse()?;
    provider
        .read(kind, entry.config.clone(), entry.state())
        .await
}

async fn delete_entry(provider: &Provider, entry: &StateEntry) -> Result<()> {
    let kind: ResourceType = entry.type_name.parse()?;
    provider
        .delete(kind, entry.config.clone(), entry.state())
        .await?;
    info!("{} deleted", entry.address);
    Ok(())
}
