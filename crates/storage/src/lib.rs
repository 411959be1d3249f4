#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitforge_domain as domain;
use strum::AsRefStr;

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod records;
pub mod store;

pub use local_storage::LocalStorage;
pub use store::{FileStore, MemoryStore};

/// String values addressed by key, like the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: Key) -> Result<Option<String>, StoreError>;
    fn set(&self, key: Key, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: Key) -> Result<(), StoreError>;
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    #[strum(serialize = "exercises")]
    Exercises,
    #[strum(serialize = "workoutSessions")]
    WorkoutSessions,
    #[strum(serialize = "capacityBaselines")]
    CapacityBaselines,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "ongoingSession")]
    OngoingSession,
    #[strum(serialize = "log")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store unavailable")]
    Unavailable,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable => domain::StorageError::Unavailable,
            StoreError::Io(err) => domain::StorageError::Other(Box::new(err)),
        }
    }
}
