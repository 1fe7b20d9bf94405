//! Equipment registry for O(1) equipment code lookups
//!
//! This module maps equipment codes found in event metadata to the
//! equipment's internal id and names. The table starts from the built-in
//! defaults (or a configured table) and can be updated at runtime by
//! merging entries; every holder of the same `Arc<EquipmentRegistry>` sees
//! the update without a restart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::app::models::EquipmentResolution;
use crate::constants::DEFAULT_EQUIPMENT_TABLE;


/// One configurable equipment table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentEntry {
    /// Equipment code as written in event metadata (e.g. "1700")
    pub code: String,
    /// Internal equipment id
    pub id: String,
    /// Name shown in the work grid
    pub display_name: String,
    /// Descriptive equipment name
    pub name: String,
}

impl EquipmentEntry {
    fn into_pair(self) -> (String, EquipmentResolution) {
        (
            self.code,
            EquipmentResolution::new(self.id, self.display_name, self.name),
        )
    }
}

/// Equipment registry providing code → names resolution
///
/// Lookups are exact-match. An empty or unknown code resolves to the
/// all-empty [`EquipmentResolution`], which is not an error.
#[derive(Debug, Default)]
pub struct EquipmentRegistry {
    entries: RwLock<HashMap<String, EquipmentResolution>>,
}

impl EquipmentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in equipment table
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.merge(DEFAULT_EQUIPMENT_TABLE.iter().map(
            |(code, id, display_name, name)| EquipmentEntry {
                code: code.to_string(),
                id: id.to_string(),
                display_name: display_name.to_string(),
                name: name.to_string(),
            },
        ));
        registry
    }

    /// Create a registry from the built-in table overlaid with `entries`
    pub fn from_entries(entries: impl IntoIterator<Item = EquipmentEntry>) -> Self {
        let registry = Self::with_defaults();
        registry.merge(entries);
        registry
    }

    /// Merge entries into the table; later entries override earlier ones
    pub fn merge(&self, entries: impl IntoIterator<Item = EquipmentEntry>) {
        let mut table = self.write();
        let mut merged = 0usize;
        for entry in entries {
            let (code, resolution) = entry.into_pair();
            table.insert(code, resolution);
            merged += 1;
        }
        info!(
            "Merged {} equipment entries ({} codes known)",
            merged,
            table.len()
        );
    }

    /// Resolve an equipment code (O(1) lookup)
    pub fn resolve(&self, code: &str) -> EquipmentResolution {
        if code.is_empty() {
            return EquipmentResolution::unresolved();
        }

        match self.read().get(code) {
            Some(resolution) => {
                debug!("Resolved equipment code {}: {:?}", code, resolution);
                resolution.clone()
            }
            None => {
                debug!("No equipment mapping for code {}", code);
                EquipmentResolution::unresolved()
            }
        }
    }

    /// Check if a code is known
    pub fn contains(&self, code: &str) -> bool {
        self.read().contains_key(code)
    }

    /// Get the number of known codes
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Poisoning is ignored: every write is a sequence of single inserts.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, EquipmentResolution>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, EquipmentResolution>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
