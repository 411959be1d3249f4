use std::collections::VecDeque;

use fitforge_app::{Settings, log};
use fitforge_domain::{self as domain, ReadError, WriteError};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Key, KeyValueStore, records};

/// Repositories backed by JSON values in a key-value store.
pub struct LocalStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn read<V: DeserializeOwned>(&self, key: Key) -> Result<Option<V>, ReadError> {
        let Some(value) = self
            .store
            .get(key)
            .map_err(|err| ReadError::Storage(err.into()))?
        else {
            return Ok(None);
        };
        serde_json::from_str(&value)
            .map(Some)
            .map_err(|err| ReadError::Other(Box::new(err)))
    }

    fn write<V: Serialize + ?Sized>(&self, key: Key, value: &V) -> Result<(), WriteError> {
        let value =
            serde_json::to_string(value).map_err(|err| WriteError::Other(Box::new(err)))?;
        self.store
            .set(key, &value)
            .map_err(|err| WriteError::Storage(err.into()))
    }

    fn read_session_records(&self) -> Result<Vec<records::Session>, ReadError> {
        Ok(self.read(Key::WorkoutSessions)?.unwrap_or_default())
    }

    /// Replace the stored exercise catalog.
    pub fn write_exercises(&self, exercises: &[domain::Exercise]) -> Result<(), WriteError> {
        self.write(
            Key::Exercises,
            &exercises
                .iter()
                .map(records::Exercise::from)
                .collect::<Vec<_>>(),
        )
    }
}

impl<S: KeyValueStore> domain::CatalogRepository for LocalStorage<S> {
    /// Without a stored catalog the built-in exercises are used.
    fn read_exercises(&self) -> Result<Vec<domain::Exercise>, ReadError> {
        match self.read::<Vec<records::Exercise>>(Key::Exercises)? {
            Some(exercises) => exercises
                .into_iter()
                .map(|e| domain::Exercise::try_from(e).map_err(|err| ReadError::Other(err.into())))
                .collect(),
            None => Ok(domain::default_exercises()),
        }
    }
}

impl<S: KeyValueStore> domain::WorkoutRepository for LocalStorage<S> {
    fn read_sessions(&self) -> Result<Vec<domain::Session>, ReadError> {
        self.read_session_records()?
            .into_iter()
            .map(|s| domain::Session::try_from(s).map_err(|err| ReadError::Other(err.into())))
            .collect()
    }

    fn write_session(&self, session: domain::Session) -> Result<domain::Session, WriteError> {
        let mut sessions = self.read_session_records()?;
        let record = records::Session::from(&session);
        match sessions.iter_mut().find(|s| s.id == record.id) {
            Some(stored) => *stored = record,
            None => sessions.push(record),
        }
        self.write(Key::WorkoutSessions, &sessions)?;
        Ok(session)
    }

    fn delete_session(&self, id: &domain::SessionID) -> Result<domain::SessionID, WriteError> {
        let mut sessions = self.read_session_records()?;
        let len = sessions.len();
        sessions.retain(|s| s.id != id.as_str());
        if sessions.len() == len {
            return Err(WriteError::NotFound);
        }
        self.write(Key::WorkoutSessions, &sessions)?;
        Ok(id.clone())
    }
}

impl<S: KeyValueStore> domain::CapacityRepository for LocalStorage<S> {
    /// Without stored baselines the defaults are used.
    fn read_baselines(&self) -> Result<domain::CapacityBaselines, ReadError> {
        match self.read::<records::CapacityBaselines>(Key::CapacityBaselines)? {
            Some(baselines) => domain::CapacityBaselines::try_from(baselines)
                .map_err(|err| ReadError::Other(err.into())),
            None => Ok(domain::CapacityBaselines::default()),
        }
    }

    fn write_baselines(
        &self,
        baselines: domain::CapacityBaselines,
    ) -> Result<domain::CapacityBaselines, WriteError> {
        self.write(
            Key::CapacityBaselines,
            &records::CapacityBaselines::from(&baselines),
        )?;
        Ok(baselines)
    }
}

impl<S: KeyValueStore> fitforge_app::Repository for LocalStorage<S> {
    fn read_settings(&self) -> Result<Settings, ReadError> {
        Ok(self.read(Key::Settings)?.unwrap_or_default())
    }

    fn write_settings(&self, settings: Settings) -> Result<(), WriteError> {
        self.write(Key::Settings, &settings)
    }

    fn read_ongoing_session(&self) -> Result<Option<domain::OngoingSession>, ReadError> {
        self.read::<records::OngoingSession>(Key::OngoingSession)?
            .map(|s| {
                domain::OngoingSession::try_from(s).map_err(|err| ReadError::Other(err.into()))
            })
            .transpose()
    }

    fn write_ongoing_session(
        &self,
        ongoing_session: Option<&domain::OngoingSession>,
    ) -> Result<(), WriteError> {
        match ongoing_session {
            Some(ongoing_session) => self.write(
                Key::OngoingSession,
                &records::OngoingSession::from(ongoing_session),
            ),
            None => self
                .store
                .remove(Key::OngoingSession)
                .map_err(|err| WriteError::Storage(err.into())),
        }
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> log::Repository for LocalStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.read(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        self.write(Key::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
