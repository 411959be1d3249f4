use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::debug;

use crate::{Key, KeyValueStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<Key, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: Key) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: Key, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Unavailable)?;
        values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: Key) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Unavailable)?;
        values.remove(&key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: Key) -> PathBuf {
        self.directory.join(format!("{}.json", key.as_ref()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: Key) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: Key, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.directory)?;
        fs::write(self.path(key), value)?;
        debug!("wrote {}", self.path(key).display());
        Ok(())
    }

    fn remove(&self, key: Key) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn check_store(store: &impl KeyValueStore) {
        assert_eq!(store.get(Key::Settings).unwrap(), None);

        store.set(Key::Settings, "{}").unwrap();
        store.set(Key::Log, "[]").unwrap();
        assert_eq!(store.get(Key::Settings).unwrap(), Some(String::from("{}")));

        store.set(Key::Settings, "{\"windowDays\":3}").unwrap();
        assert_eq!(
            store.get(Key::Settings).unwrap(),
            Some(String::from("{\"windowDays\":3}"))
        );

        store.remove(Key::Settings).unwrap();
        store.remove(Key::Settings).unwrap();
        assert_eq!(store.get(Key::Settings).unwrap(), None);
        assert_eq!(store.get(Key::Log).unwrap(), Some(String::from("[]")));
    }

    #[test]
    fn test_memory_store() {
        check_store(&MemoryStore::default());
    }

    #[test]
    fn test_file_store() {
        let directory = tempfile::tempdir().unwrap();
        let store = FileStore::new(directory.path().join("data"));
        check_store(&store);
        assert!(store.directory().join("log.json").exists());
    }

    #[rstest]
    #[case::exercises(Key::Exercises, "exercises")]
    #[case::workout_sessions(Key::WorkoutSessions, "workoutSessions")]
    #[case::capacity_baselines(Key::CapacityBaselines, "capacityBaselines")]
    #[case::ongoing_session(Key::OngoingSession, "ongoingSession")]
    fn test_key_name(#[case] key: Key, #[case] expected: &str) {
        assert_eq!(key.as_ref(), expected);
    }
}
