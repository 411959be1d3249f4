#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod capacity;
mod catalog;
mod classification;
mod error;
mod exercise;
mod muscle;
mod name;
mod planning;
mod recovery;
mod service;
mod snapshot;
mod volume;
mod workout;

pub use capacity::{CapacityBaselines, CapacityError, normalize, normalize_to_scale};
pub use catalog::{
    Catalog, CatalogError, Correction, ENGAGEMENT_TOLERANCE, EngagementDeviation, ExerciseFilter,
    Normalization, default_exercises,
};
pub use classification::{
    Intensity, MuscleStatus, RecoveryStatus, Thresholds, ThresholdsError, classify, classify_all,
    needing_rest, ready_for_training, recommendation,
};
pub use error::{ReadError, StorageError, WriteError};
pub use exercise::{
    Category, EngagementRole, Equipment, Exercise, ExerciseID, MuscleEngagement, Percentage,
    PercentageError, Property, PropertyError,
};
pub use muscle::{BodyRegion, Muscle, MuscleError};
pub use name::{Name, NameError};
pub use planning::{
    DEFAULT_BODYWEIGHT_ESTIMATE, PlanProjection, PlannedExercise, PlannedSet, estimate_duration,
    planned_volume, project,
};
pub use recovery::{MuscleRecovery, RecoveryReport, analyze_recovery};
pub use service::{AnalysisService, CapacityService, CatalogService, Service, WorkoutService};
pub use snapshot::{AnalysisOptions, Snapshot, SummaryEntry, analyze, summarize};
pub use volume::{VolumeOptions, aggregate, aggregate_with, volume_by_region, volume_score};
pub use workout::{
    OngoingSession, RPE, RPEError, Session, SessionError, SessionID, SessionState, Set, SetID,
    WorkoutLog,
};

pub trait CatalogRepository {
    fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
}

pub trait WorkoutRepository {
    fn read_sessions(&self) -> Result<Vec<Session>, ReadError>;
    /// Replaces a stored session with the same ID.
    fn write_session(&self, session: Session) -> Result<Session, WriteError>;
    fn delete_session(&self, id: &SessionID) -> Result<SessionID, WriteError>;
}

pub trait CapacityRepository {
    fn read_baselines(&self) -> Result<CapacityBaselines, ReadError>;
    fn write_baselines(&self, baselines: CapacityBaselines)
    -> Result<CapacityBaselines, WriteError>;
}
