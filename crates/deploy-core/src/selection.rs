//! Restricting a resolved graph to requested configs

use std::collections::{HashMap, HashSet};

use crate::resolver::{ConfigId, ResolvedConfig};
use crate::{Error, Result};

/// Keep the configs named in `requested` plus everything they transitively
/// require, in their original (dependency-first) order.
///
/// Runs over a fully resolved list, using the requirement edges recorded
/// during resolution; nothing is re-resolved.
pub fn select(resolved: Vec<ResolvedConfig>, requested: &[String]) -> Result<Vec<ResolvedConfig>> {
    let by_id: HashMap<&ConfigId, &ResolvedConfig> =
        resolved.iter().map(|config| (&config.id, config)).collect();

    let mut pending: Vec<ConfigId> = resolved
        .iter()
        .filter(|config| !config.name().is_empty())
        .filter(|config| requested.iter().any(|name| name == config.name()))
        .map(|config| config.id.clone())
        .collect();
    if pending.is_empty() {
        return Err(Error::SelectionNotFound {
            requested: requested.to_vec(),
        });
    }
    tracing::debug!(matched = pending.len(), "Selecting configs");

    let mut keep: HashSet<ConfigId> = HashSet::new();
    while let Some(id) = pending.pop() {
        if !keep.insert(id.clone()) {
            continue;
        }
        if let Some(config) = by_id.get(&id) {
            pending.extend(config.dependencies().filter(|dep| !keep.contains(dep)));
        }
    }

    Ok(resolved
        .into_iter()
        .filter(|config| keep.contains(&config.id))
        .collect())
}
