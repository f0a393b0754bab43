// Adapters layer: concrete implementations of the domain ports.

pub mod ids;
pub mod prompt;
pub mod storage;

pub use ids::{SequentialIdGenerator, UuidIdGenerator};
pub use prompt::{AssumeYes, ReaderConfirm};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
