use crate::core::{KeyValueStore, Parcel};
use crate::utils::error::{ParcelError, Result};
use std::collections::HashSet;

pub const DEFAULT_SLOT: &str = "parcels";

/// Mirrors the whole parcel collection into a single key-value slot.
#[derive(Debug, Clone)]
pub struct ParcelRepository<S: KeyValueStore> {
    storage: S,
    slot: String,
}

impl<S: KeyValueStore> ParcelRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_slot(storage, DEFAULT_SLOT)
    }

    pub fn with_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the slot. Never fails: a missing, unreadable or malformed slot
    /// yields an empty collection.
    pub fn load(&self) -> Vec<Parcel> {
        let raw = match self.storage.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("Slot `{}` is empty, starting with no parcels", self.slot);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Could not read slot `{}`: {}; starting empty", self.slot, e);
                return Vec::new();
            }
        };

        let parsed: Vec<Parcel> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    "Slot `{}` does not hold a parcel list ({}); starting empty",
                    self.slot,
                    e
                );
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let total = parsed.len();
        let parcels: Vec<Parcel> = parsed
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        if parcels.len() != total {
            tracing::warn!(
                "Dropped {} parcel(s) with duplicate ids from slot `{}`",
                total - parcels.len(),
                self.slot
            );
        }

        tracing::debug!("Loaded {} parcels from slot `{}`", parcels.len(), self.slot);
        parcels
    }

    /// Serializes the full collection and overwrites the slot.
    pub fn save(&self, parcels: &[Parcel]) -> Result<()> {
        let payload = serde_json::to_string(parcels)?;
        self.storage
            .set(&self.slot, &payload)
            .map_err(|e| match e {
                ParcelError::StorageError { .. } => e,
                other => ParcelError::storage(other.to_string()),
            })?;
        tracing::debug!("Saved {} parcels to slot `{}`", parcels.len(), self.slot);
        Ok(())
    }
}
