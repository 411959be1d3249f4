use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};

use crate::{
    AnalysisOptions, CapacityBaselines, CapacityRepository, Catalog, CatalogRepository,
    ReadError, RecoveryReport, Session, SessionID, Snapshot, WorkoutLog, WorkoutRepository,
    WriteError, analyze, analyze_recovery,
};

pub trait CatalogService {
    /// Load the exercise catalog and report exercises whose engagement does not sum to 100 %.
    ///
    /// If `normalize` is set, the engagement of those exercises is rescaled.
    fn get_catalog(&self, normalize: bool) -> Result<Catalog, ReadError>;
}

pub trait WorkoutService {
    fn get_workout_log(&self) -> Result<WorkoutLog, ReadError>;
    fn save_session(&self, session: Session) -> Result<Session, WriteError>;
    fn delete_session(&self, id: &SessionID) -> Result<SessionID, WriteError>;
}

pub trait CapacityService {
    fn get_baselines(&self) -> Result<CapacityBaselines, ReadError>;
    fn set_baselines(&self, baselines: CapacityBaselines)
    -> Result<CapacityBaselines, WriteError>;
}

pub trait AnalysisService {
    /// Unreadable data is treated as missing, so the result is empty rather than an error.
    fn snapshot(
        &self,
        options: &AnalysisOptions,
        normalize_catalog: bool,
        now: DateTime<Utc>,
    ) -> Snapshot;
    fn recovery_report(
        &self,
        window_days: Option<u32>,
        normalize_catalog: bool,
        now: DateTime<Utc>,
    ) -> RecoveryReport;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: CatalogRepository> CatalogService for Service<R> {
    fn get_catalog(&self, normalize: bool) -> Result<Catalog, ReadError> {
        let exercises = log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )?;
        let catalog = Catalog::new(exercises).map_err(|err| {
            error!("failed to build catalog: {err}");
            ReadError::Other(err.into())
        })?;

        for deviation in catalog.validate() {
            warn!(
                "engagement of exercise {} sums to {:.2} %",
                deviation.exercise_id, deviation.total
            );
        }

        if !normalize {
            return Ok(catalog);
        }

        let normalization = catalog.normalize();
        if !normalization.corrections.is_empty() {
            info!(
                "normalized engagement of {} exercises",
                normalization.corrections.len()
            );
        }
        Ok(normalization.catalog)
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    fn get_workout_log(&self) -> Result<WorkoutLog, ReadError> {
        log_on_error!(
            self.repository.read_sessions(),
            ReadError,
            "get",
            "workout sessions"
        )
        .map(WorkoutLog::new)
    }

    fn save_session(&self, session: Session) -> Result<Session, WriteError> {
        log_on_error!(
            self.repository.write_session(session),
            WriteError,
            "save",
            "workout session"
        )
    }

    fn delete_session(&self, id: &SessionID) -> Result<SessionID, WriteError> {
        log_on_error!(
            self.repository.delete_session(id),
            WriteError,
            "delete",
            "workout session"
        )
    }
}

impl<R: CapacityRepository> CapacityService for Service<R> {
    fn get_baselines(&self) -> Result<CapacityBaselines, ReadError> {
        log_on_error!(
            self.repository.read_baselines(),
            ReadError,
            "get",
            "capacity baselines"
        )
    }

    fn set_baselines(
        &self,
        baselines: CapacityBaselines,
    ) -> Result<CapacityBaselines, WriteError> {
        log_on_error!(
            self.repository.write_baselines(baselines),
            WriteError,
            "set",
            "capacity baselines"
        )
    }
}

impl<R> AnalysisService for Service<R>
where
    R: CatalogRepository + WorkoutRepository + CapacityRepository,
{
    fn snapshot(
        &self,
        options: &AnalysisOptions,
        normalize_catalog: bool,
        now: DateTime<Utc>,
    ) -> Snapshot {
        analyze(
            &self.get_workout_log().unwrap_or_default(),
            &self.get_catalog(normalize_catalog).unwrap_or_default(),
            &self.get_baselines().unwrap_or_default(),
            options,
            now,
        )
    }

    fn recovery_report(
        &self,
        window_days: Option<u32>,
        normalize_catalog: bool,
        now: DateTime<Utc>,
    ) -> RecoveryReport {
        analyze_recovery(
            &self.get_workout_log().unwrap_or_default(),
            &self.get_catalog(normalize_catalog).unwrap_or_default(),
            window_days.map(|days| now - Duration::days(i64::from(days))),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap, sync::LazyLock};

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        Category, Equipment, Exercise, ExerciseID, Muscle, MuscleEngagement, Name, Percentage,
        Set, StorageError,
    };

    static NOW: LazyLock<DateTime<Utc>> =
        LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());

    #[derive(Default)]
    struct FakeRepository {
        exercises: Vec<Exercise>,
        sessions: RefCell<Vec<Session>>,
        baselines: Option<CapacityBaselines>,
        unavailable: bool,
    }

    impl CatalogRepository for FakeRepository {
        fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.exercises.clone())
        }
    }

    impl WorkoutRepository for FakeRepository {
        fn read_sessions(&self) -> Result<Vec<Session>, ReadError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.sessions.borrow().clone())
        }

        fn write_session(&self, session: Session) -> Result<Session, WriteError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            let mut sessions = self.sessions.borrow_mut();
            sessions.retain(|s| s.id != session.id);
            sessions.push(session.clone());
            Ok(session)
        }

        fn delete_session(&self, id: &SessionID) -> Result<SessionID, WriteError> {
            let mut sessions = self.sessions.borrow_mut();
            let len = sessions.len();
            sessions.retain(|s| s.id != *id);
            if sessions.len() == len {
                return Err(WriteError::NotFound);
            }
            Ok(id.clone())
        }
    }

    impl CapacityRepository for FakeRepository {
        fn read_baselines(&self) -> Result<CapacityBaselines, ReadError> {
            if self.unavailable {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.baselines.clone().unwrap_or_default())
        }

        fn write_baselines(
            &self,
            baselines: CapacityBaselines,
        ) -> Result<CapacityBaselines, WriteError> {
            Ok(baselines)
        }
    }

    fn exercise(id: &str, engagement: &[(Muscle, f64)]) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(id).unwrap(),
            equipment: Equipment::Barbell,
            category: Category::Push,
            engagement: engagement
                .iter()
                .map(|(muscle, percentage)| MuscleEngagement {
                    muscle: *muscle,
                    percentage: Percentage::new(*percentage).unwrap(),
                })
                .collect(),
        }
    }

    fn session(id: &str, sets: Vec<Set>) -> Session {
        Session {
            id: id.into(),
            name: Name::new("Workout").unwrap(),
            start_time: *NOW - Duration::hours(2),
            end_time: *NOW - Duration::hours(1),
            sets,
        }
    }

    fn repository() -> FakeRepository {
        FakeRepository {
            exercises: vec![exercise(
                "bench_press",
                &[(Muscle::PectoralisMajor, 70.0), (Muscle::TricepsBrachii, 40.0)],
            )],
            sessions: RefCell::new(vec![session(
                "1",
                vec![Set::new(
                    ExerciseID::from("bench_press"),
                    100.0,
                    10,
                    *NOW - Duration::hours(1),
                )],
            )]),
            baselines: Some(
                CapacityBaselines::new(BTreeMap::from([(
                    String::from("pectoralis_major"),
                    1000.0,
                )]))
                .unwrap(),
            ),
            unavailable: false,
        }
    }

    #[test]
    fn test_get_catalog() {
        let service = Service::new(repository());

        let catalog = service.get_catalog(false).unwrap();
        assert_approx_eq!(
            catalog
                .get(&ExerciseID::from("bench_press"))
                .unwrap()
                .engagement_total(),
            110.0,
            0.001
        );

        let catalog = service.get_catalog(true).unwrap();
        assert_approx_eq!(
            catalog
                .get(&ExerciseID::from("bench_press"))
                .unwrap()
                .engagement_total(),
            100.0,
            0.01
        );
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_get_catalog_duplicate_id() {
        let service = Service::new(FakeRepository {
            exercises: vec![
                exercise("squat", &[(Muscle::Quadriceps, 100.0)]),
                exercise("squat", &[(Muscle::Quadriceps, 100.0)]),
            ],
            ..FakeRepository::default()
        });
        assert!(matches!(
            service.get_catalog(false),
            Err(ReadError::Other(_))
        ));
    }

    #[test]
    fn test_get_catalog_unavailable() {
        let service = Service::new(FakeRepository {
            unavailable: true,
            ..FakeRepository::default()
        });
        assert!(matches!(
            service.get_catalog(false),
            Err(ReadError::Storage(StorageError::Unavailable))
        ));
    }

    #[test]
    fn test_save_and_delete_session() {
        let service = Service::new(repository());

        service.save_session(session("2", vec![])).unwrap();
        assert_eq!(service.get_workout_log().unwrap().sessions().len(), 2);

        assert_eq!(
            service.delete_session(&SessionID::from("1")).unwrap(),
            SessionID::from("1")
        );
        assert!(matches!(
            service.delete_session(&SessionID::from("1")),
            Err(WriteError::NotFound)
        ));
        assert_eq!(
            service
                .get_workout_log()
                .unwrap()
                .sessions()
                .iter()
                .map(|s| s.id.clone())
                .collect::<Vec<_>>(),
            vec![SessionID::from("2")]
        );
    }

    #[test]
    fn test_snapshot() {
        let service = Service::new(repository());

        let snapshot = service.snapshot(&AnalysisOptions::default(), false, *NOW);
        assert_approx_eq!(snapshot.raw_volumes[&Muscle::PectoralisMajor], 700.0, 0.001);
        assert_approx_eq!(snapshot.raw_volumes[&Muscle::TricepsBrachii], 400.0, 0.001);
        assert_approx_eq!(snapshot.fatigue_by_muscle[&Muscle::PectoralisMajor], 70.0, 0.001);

        let snapshot = service.snapshot(&AnalysisOptions::default(), true, *NOW);
        assert_approx_eq!(snapshot.raw_volumes[&Muscle::PectoralisMajor], 636.4, 0.1);
    }

    #[test]
    fn test_snapshot_unavailable() {
        let service = Service::new(FakeRepository {
            unavailable: true,
            ..repository()
        });
        assert_eq!(
            service.snapshot(&AnalysisOptions::default(), false, *NOW),
            Snapshot::default()
        );
    }

    #[test]
    fn test_recovery_report() {
        let service = Service::new(repository());

        let report = service.recovery_report(Some(7), false, *NOW);
        assert_eq!(report.muscles.len(), 2);
        assert!(report.get(Muscle::PectoralisMajor).is_some());

        let report = service.recovery_report(Some(7), false, *NOW + Duration::days(30));
        assert!(report.muscles.is_empty());
    }
}
