pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileKeyValueStore, MemoryKeyValueStore, SequentialIdGenerator, UuidIdGenerator};
pub use config::AppConfig;
pub use crate::core::collection::ParcelCollection;
pub use crate::core::persistence::ParcelRepository;
pub use crate::core::session::{Session, View};
pub use domain::model::{Parcel, ParcelInput};
pub use domain::ports::{Confirm, IdGenerator, KeyValueStore};
pub use utils::error::{ParcelError, Result};
