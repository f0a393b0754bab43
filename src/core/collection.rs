use crate::adapters::UuidIdGenerator;
use crate::core::persistence::ParcelRepository;
use crate::core::{IdGenerator, KeyValueStore, Parcel, ParcelInput};
use crate::utils::error::{ParcelError, Result};
use crate::utils::validation::Validate;

/// Upper bound on re-draws when a generated id is already taken.
const MAX_ID_ATTEMPTS: usize = 16;

/// Owns the authoritative, insertion-ordered parcel list and mirrors it to
/// the repository after every mutation.
pub struct ParcelCollection<S: KeyValueStore, G: IdGenerator = UuidIdGenerator> {
    parcels: Vec<Parcel>,
    repository: ParcelRepository<S>,
    ids: G,
    rollback_on_storage_failure: bool,
}

impl<S: KeyValueStore> ParcelCollection<S, UuidIdGenerator> {
    /// Loads the current contents of the repository's slot.
    pub fn open(repository: ParcelRepository<S>) -> Self {
        Self::open_with_ids(repository, UuidIdGenerator)
    }
}

impl<S: KeyValueStore, G: IdGenerator> ParcelCollection<S, G> {
    pub fn open_with_ids(repository: ParcelRepository<S>, ids: G) -> Self {
        let parcels = repository.load();
        tracing::info!(
            "Opened parcel collection with {} parcels (slot `{}`)",
            parcels.len(),
            repository.slot()
        );
        Self {
            parcels,
            repository,
            ids,
            rollback_on_storage_failure: false,
        }
    }

    /// When set, a failed write restores the in-memory list to what it was
    /// before the operation. Off by default: the list keeps the change and
    /// only the persisted slot is behind.
    pub fn with_rollback_on_storage_failure(mut self, enabled: bool) -> Self {
        self.rollback_on_storage_failure = enabled;
        self
    }

    pub fn list(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn get(&self, id: &str) -> Option<&Parcel> {
        self.parcels.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    pub fn repository(&self) -> &ParcelRepository<S> {
        &self.repository
    }

    pub fn create(&mut self, data: ParcelInput) -> Result<Parcel> {
        data.validate()?;

        let id = self.fresh_id()?;
        let parcel = Parcel::from_input(id, data);

        let snapshot = self.snapshot();
        self.parcels.push(parcel.clone());
        self.persist(snapshot)?;

        tracing::info!("Created parcel {} ({})", parcel.id, parcel.name);
        Ok(parcel)
    }

    pub fn update(&mut self, id: &str, data: ParcelInput) -> Result<Parcel> {
        data.validate()?;

        let index = self
            .parcels
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ParcelError::not_found(id))?;

        let snapshot = self.snapshot();
        self.parcels[index].apply(data);
        let updated = self.parcels[index].clone();
        self.persist(snapshot)?;

        tracing::info!("Updated parcel {} ({})", updated.id, updated.name);
        Ok(updated)
    }

    /// Removes the parcel if present. A missing id leaves the list as is
    /// but still rewrites the slot.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let snapshot = self.snapshot();
        let before = self.parcels.len();
        self.parcels.retain(|p| p.id != id);
        let removed = before - self.parcels.len();
        self.persist(snapshot)?;

        if removed > 0 {
            tracing::info!("Deleted parcel {}", id);
        } else {
            tracing::debug!("Delete of unknown parcel {} left the collection unchanged", id);
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return Ok(id);
            }
            tracing::warn!("Generated id {} is already in use, drawing another", id);
        }
        Err(ParcelError::InvalidStateError {
            message: format!(
                "could not generate an unused parcel id after {} attempts",
                MAX_ID_ATTEMPTS
            ),
        })
    }

    fn snapshot(&self) -> Option<Vec<Parcel>> {
        self.rollback_on_storage_failure
            .then(|| self.parcels.clone())
    }

    fn persist(&mut self, snapshot: Option<Vec<Parcel>>) -> Result<()> {
        if let Err(e) = self.repository.save(&self.parcels) {
            match snapshot {
                Some(previous) => {
                    tracing::error!("Saving parcels failed, rolling back in-memory change: {}", e);
                    self.parcels = previous;
                }
                None => {
                    tracing::error!(
                        "Saving parcels failed, in-memory change kept but not persisted: {}",
                        e
                    );
                }
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryKeyValueStore, SequentialIdGenerator};
    use crate::core::persistence::DEFAULT_SLOT;

    fn collection() -> ParcelCollection<MemoryKeyValueStore, SequentialIdGenerator> {
        ParcelCollection::open_with_ids(
            ParcelRepository::new(MemoryKeyValueStore::new()),
            SequentialIdGenerator::new("p"),
        )
    }

    /// Always returns the same id.
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> String {
            "dup".to_string()
        }
    }

    #[test]
    fn test_create_appends_and_persists_once() {
        let mut parcels = collection();
        let created = parcels
            .create(ParcelInput::new("Box A", 2, 1.5))
            .unwrap();

        assert_eq!(created.id, "p-1");
        assert_eq!(parcels.list(), &[created.clone()]);
        assert_eq!(parcels.repository().storage().write_count(), 1);
        assert_eq!(parcels.repository().load(), vec![created]);
    }

    #[test]
    fn test_create_invalid_writes_nothing() {
        let mut parcels = collection();
        let err = parcels.create(ParcelInput::new("", 1, 1.0)).unwrap_err();

        assert!(matches!(err, ParcelError::ValidationError { .. }));
        assert!(parcels.is_empty());
        assert_eq!(parcels.repository().storage().write_count(), 0);
    }

    #[test]
    fn test_create_redraws_colliding_id() {
        let store = MemoryKeyValueStore::new();
        store
            .insert_raw(
                DEFAULT_SLOT,
                r#"[{"id":"p-1","name":"Old","description":"","quantity":1,"weight":1.0}]"#,
            )
            .unwrap();
        let mut parcels = ParcelCollection::open_with_ids(
            ParcelRepository::new(store),
            SequentialIdGenerator::new("p"),
        );

        let created = parcels.create(ParcelInput::new("New", 1, 1.0)).unwrap();
        assert_eq!(created.id, "p-2");
    }

    #[test]
    fn test_create_gives_up_when_ids_keep_colliding() {
        let mut parcels =
            ParcelCollection::open_with_ids(ParcelRepository::new(MemoryKeyValueStore::new()), StuckIds);
        parcels.create(ParcelInput::new("First", 1, 1.0)).unwrap();

        let err = parcels.create(ParcelInput::new("Second", 1, 1.0)).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidStateError { .. }));
        assert_eq!(parcels.len(), 1);
    }

    #[test]
    fn test_update_replaces_fields_only_on_target() {
        let mut parcels = collection();
        let a = parcels.create(ParcelInput::new("A", 1, 1.0)).unwrap();
        let b = parcels.create(ParcelInput::new("B", 1, 1.0)).unwrap();

        let updated = parcels
            .update(&a.id, ParcelInput::new("A2", 5, 2.5).with_description("heavy"))
            .unwrap();

        assert_eq!(updated.id, a.id);
        assert_eq!(updated.to_input(), ParcelInput::new("A2", 5, 2.5).with_description("heavy"));
        assert_eq!(parcels.get(&b.id), Some(&b));
        assert_eq!(parcels.list()[0], updated);
        assert_eq!(parcels.repository().storage().write_count(), 3);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut parcels = collection();
        let err = parcels
            .update("nope", ParcelInput::new("A", 1, 1.0))
            .unwrap_err();

        assert!(matches!(err, ParcelError::NotFoundError { ref id } if id == "nope"));
        assert_eq!(parcels.repository().storage().write_count(), 0);
    }

    #[test]
    fn test_update_rejects_invalid_weight() {
        let mut parcels = collection();
        let a = parcels.create(ParcelInput::new("A", 1, 1.0)).unwrap();

        let err = parcels.update(&a.id, ParcelInput::new("A", 1, 0.05)).unwrap_err();
        assert!(matches!(err, ParcelError::ValidationError { .. }));
        assert_eq!(parcels.get(&a.id), Some(&a));
    }

    #[test]
    fn test_delete_missing_id_is_noop_but_persists() {
        let mut parcels = collection();
        let a = parcels.create(ParcelInput::new("A", 1, 1.0)).unwrap();

        parcels.delete("missing").unwrap();
        assert_eq!(parcels.list(), &[a]);
        assert_eq!(parcels.repository().storage().write_count(), 2);
    }

    #[test]
    fn test_storage_failure_keeps_change_by_default() {
        let mut parcels = collection();
        parcels.create(ParcelInput::new("A", 1, 1.0)).unwrap();
        parcels.repository().storage().set_disabled(true);

        let err = parcels.create(ParcelInput::new("B", 1, 1.0)).unwrap_err();
        assert!(matches!(err, ParcelError::StorageError { .. }));
        assert_eq!(parcels.len(), 2);

        parcels.repository().storage().set_disabled(false);
        assert_eq!(parcels.repository().load().len(), 1);
    }

    #[test]
    fn test_storage_failure_rolls_back_when_enabled() {
        let mut parcels = collection().with_rollback_on_storage_failure(true);
        let a = parcels.create(ParcelInput::new("A", 1, 1.0)).unwrap();
        parcels.repository().storage().set_disabled(true);

        assert!(parcels.update(&a.id, ParcelInput::new("A2", 1, 1.0)).is_err());
        assert!(parcels.delete(&a.id).is_err());
        assert!(parcels.create(ParcelInput::new("B", 1, 1.0)).is_err());

        assert_eq!(parcels.list(), &[a]);
    }
}
