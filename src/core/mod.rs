pub mod collection;
pub mod persistence;
pub mod session;

pub use crate::domain::model::{Parcel, ParcelInput};
pub use crate::domain::ports::{Confirm, IdGenerator, KeyValueStore};
pub use crate::utils::error::Result;
