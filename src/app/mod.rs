#[cfg(feature = "cli")]
pub mod commands;
pub mod render;

use crate::adapters::{FileKeyValueStore, UuidIdGenerator};
use crate::config::AppConfig;
use crate::core::collection::ParcelCollection;
use crate::core::persistence::ParcelRepository;
use crate::core::session::Session;

/// Opens the file-backed collection described by `config` and wraps it in a
/// fresh session.
pub fn open_session(config: &AppConfig) -> Session<FileKeyValueStore, UuidIdGenerator> {
    let storage = FileKeyValueStore::new(&config.storage.data_dir);
    let repository = ParcelRepository::with_slot(storage, config.storage.slot.clone());
    let collection = ParcelCollection::open(repository)
        .with_rollback_on_storage_failure(config.store.rollback_on_storage_failure);
    Session::new(collection)
}
