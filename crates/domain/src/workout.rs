use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{AsRef, Deref, Display, From};
use uuid::Uuid;

use crate::{Catalog, ExerciseID, Muscle, Name};

#[derive(AsRef, Deref, Debug, Display, From, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(String);

impl SetID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SetID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(AsRef, Deref, Debug, Display, From, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(String);

impl SessionID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SessionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub exercise_id: ExerciseID,
    /// Conventionally pounds.
    pub weight: f64,
    pub reps: u32,
    pub timestamp: DateTime<Utc>,
    pub rpe: Option<RPE>,
    pub is_warmup: bool,
}

impl Set {
    #[must_use]
    pub fn new(exercise_id: ExerciseID, weight: f64, reps: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: SetID::generate(),
            exercise_id,
            weight,
            reps,
            timestamp,
            rpe: None,
            is_warmup: false,
        }
    }

    #[must_use]
    pub fn with_rpe(self, rpe: RPE) -> Self {
        Self {
            rpe: Some(rpe),
            ..self
        }
    }

    #[must_use]
    pub fn warmup(self) -> Self {
        Self {
            is_warmup: true,
            ..self
        }
    }

    /// Weight times reps. A weight that is not a finite, non-negative number yields zero.
    #[must_use]
    pub fn volume(&self) -> f64 {
        if self.weight.is_finite() && self.weight >= 0.0 {
            self.weight * f64::from(self.reps)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RPE(u8);

impl RPE {
    pub const ONE: RPE = RPE(10);
    pub const FIVE: RPE = RPE(50);
    pub const SIX: RPE = RPE(60);
    pub const SEVEN: RPE = RPE(70);
    pub const EIGHT: RPE = RPE(80);
    pub const NINE: RPE = RPE(90);
    pub const TEN: RPE = RPE(100);

    pub fn new(value: f64) -> Result<Self, RPEError> {
        if !(1.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (value * 10.0).round() as u8;

        if v % 5 != 0 {
            return Err(RPEError::InvalidResolution);
        }

        Ok(Self(v))
    }

    #[must_use]
    pub fn avg(values: &[RPE]) -> Option<RPE> {
        if values.is_empty() {
            None
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Some(RPE(
                (values.iter().map(|rpe| rpe.0 as usize).sum::<usize>() / values.len()) as u8,
            ))
        }
    }
}

impl From<RPE> for f64 {
    fn from(value: RPE) -> Self {
        f64::from(value.0) / 10.0
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f64>() {
            Ok(parsed_value) => RPE::new(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f64::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a multiple of 0.5")]
    InvalidResolution,
    #[error("RPE must be a decimal")]
    ParseError,
}

/// A finished, immutable workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionID,
    pub name: Name,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sets: Vec<Set>,
}

impl Session {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OngoingSession {
    pub id: SessionID,
    pub name: Name,
    pub start_time: DateTime<Utc>,
    sets: Vec<Set>,
}

impl OngoingSession {
    #[must_use]
    pub fn start(name: Name, start_time: DateTime<Utc>) -> Self {
        Self {
            id: SessionID::generate(),
            name,
            start_time,
            sets: vec![],
        }
    }

    #[must_use]
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn log_set(&mut self, set: Set) {
        self.sets.push(set);
    }

    pub fn undo_last_set(&mut self) -> Option<Set> {
        self.sets.pop()
    }

    pub fn remove_set(&mut self, id: &SetID) -> Option<Set> {
        let index = self.sets.iter().position(|s| s.id == *id)?;
        Some(self.sets.remove(index))
    }

    pub fn finish(&self, end_time: DateTime<Utc>) -> Result<Session, SessionError> {
        if end_time < self.start_time {
            return Err(SessionError::EndBeforeStart);
        }

        Ok(Session {
            id: self.id.clone(),
            name: self.name.clone(),
            start_time: self.start_time,
            end_time,
            sets: self.sets.clone(),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress(OngoingSession),
    Completed(Session),
}

impl SessionState {
    pub fn start(&mut self, name: Name, start_time: DateTime<Utc>) -> Result<(), SessionError> {
        match self {
            SessionState::NotStarted => {
                *self = SessionState::InProgress(OngoingSession::start(name, start_time));
                Ok(())
            }
            SessionState::InProgress(_) => Err(SessionError::AlreadyStarted),
            SessionState::Completed(_) => Err(SessionError::AlreadyCompleted),
        }
    }

    pub fn finish(&mut self, end_time: DateTime<Utc>) -> Result<&Session, SessionError> {
        let session = match self {
            SessionState::NotStarted => return Err(SessionError::NotStarted),
            SessionState::InProgress(ongoing) => ongoing.finish(end_time)?,
            SessionState::Completed(_) => return Err(SessionError::AlreadyCompleted),
        };
        *self = SessionState::Completed(session);
        let SessionState::Completed(session) = self else {
            unreachable!()
        };
        Ok(session)
    }

    #[must_use]
    pub fn ongoing(&self) -> Option<&OngoingSession> {
        match self {
            SessionState::InProgress(ongoing) => Some(ongoing),
            _ => None,
        }
    }

    pub fn ongoing_mut(&mut self) -> Option<&mut OngoingSession> {
        match self {
            SessionState::InProgress(ongoing) => Some(ongoing),
            _ => None,
        }
    }

    /// Sets logged so far, read-only for all states.
    #[must_use]
    pub fn sets(&self) -> &[Set] {
        match self {
            SessionState::NotStarted => &[],
            SessionState::InProgress(ongoing) => ongoing.sets(),
            SessionState::Completed(session) => &session.sets,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Session has not been started")]
    NotStarted,
    #[error("Session has already been started")]
    AlreadyStarted,
    #[error("Session has already been completed")]
    AlreadyCompleted,
    #[error("End time must not be before start time")]
    EndBeforeStart,
}

/// Completed sessions in chronological order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutLog {
    sessions: Vec<Session>,
}

impl WorkoutLog {
    #[must_use]
    pub fn new(mut sessions: Vec<Session>) -> Self {
        sessions.sort_by_key(|s| s.start_time);
        Self { sessions }
    }

    pub fn push(&mut self, session: Session) {
        let index = self
            .sessions
            .partition_point(|s| s.start_time <= session.start_time);
        self.sessions.insert(index, session);
    }

    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.sessions.iter().flat_map(|s| s.sets.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.iter().all(|s| s.sets.is_empty())
    }

    /// Time of the most recent set engaging each muscle. Sets of unknown exercises are ignored.
    #[must_use]
    pub fn last_trained(&self, catalog: &Catalog) -> BTreeMap<Muscle, DateTime<Utc>> {
        let mut result: BTreeMap<Muscle, DateTime<Utc>> = BTreeMap::new();
        for set in self.sets() {
            let Some(exercise) = catalog.get(&set.exercise_id) else {
                continue;
            };
            for engagement in exercise.engagement.iter().filter(|e| *e.percentage > 0.0) {
                result
                    .entry(engagement.muscle)
                    .and_modify(|t| *t = (*t).max(set.timestamp))
                    .or_insert(set.timestamp);
            }
        }
        result
    }
}
