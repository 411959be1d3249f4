use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use fitforge_domain::{self as domain, Property};
use log::warn;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub equipment: String,
    pub category: String,
    #[serde(default)]
    pub muscle_engagement: BTreeMap<String, f64>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            equipment: value.equipment.name().to_string(),
            category: value.category.name().to_string(),
            muscle_engagement: value
                .engagement
                .iter()
                .map(|e| (e.muscle.data_name().to_string(), *e.percentage))
                .collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        let mut engagement: Vec<domain::MuscleEngagement> = vec![];
        for (name, percentage) in value.muscle_engagement {
            let muscle = domain::Muscle::from_name(&name)?;
            if engagement.iter().any(|e| e.muscle == muscle) {
                return Err(ExerciseError::DuplicateMuscle(name));
            }
            engagement.push(domain::MuscleEngagement {
                muscle,
                percentage: domain::Percentage::new(percentage)?,
            });
        }

        Ok(Self {
            id: value.id.as_str().into(),
            name: domain::Name::new(&value.name)?,
            equipment: value.equipment.parse()?,
            category: value.category.parse()?,
            engagement,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidMuscle(#[from] domain::MuscleError),
    #[error(transparent)]
    InvalidPercentage(#[from] domain::PercentageError),
    #[error(transparent)]
    InvalidProperty(#[from] domain::PropertyError),
    #[error("Muscle \"{0}\" is engaged more than once")]
    DuplicateMuscle(String),
}

/// A logged set as stored. Weight and reps are kept loose so that a single
/// unusable set does not make the whole session list unreadable.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: String,
    pub exercise_id: String,
    pub weight: Option<f64>,
    pub reps: serde_json::Number,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    #[serde(default)]
    pub is_warmup: bool,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            id: value.id.to_string(),
            exercise_id: value.exercise_id.to_string(),
            weight: Some(value.weight),
            reps: value.reps.into(),
            timestamp: value.timestamp,
            rpe: value.rpe.map(f64::from),
            is_warmup: value.is_warmup,
        }
    }
}

impl Set {
    fn weight(&self) -> Option<f64> {
        self.weight.filter(|w| w.is_finite() && *w >= 0.0)
    }

    fn reps(&self) -> Option<u32> {
        self.reps
            .as_u64()
            .and_then(|r| u32::try_from(r).ok())
            .filter(|r| *r > 0)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    pub sets: Vec<Set>,
}

impl From<&domain::Session> for Session {
    fn from(value: &domain::Session) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            date: Some(value.date()),
            start_time: value.start_time,
            end_time: value.end_time,
            duration_minutes: Some(value.duration_minutes()),
            sets: stored_sets(&value.id, &value.sets),
        }
    }
}

impl TryFrom<Session> for domain::Session {
    type Error = SessionError;

    fn try_from(value: Session) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sets: sets(&value.id, value.sets)?,
            id: value.id.as_str().into(),
            start_time: value.start_time,
            end_time: value.end_time,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OngoingSession {
    pub id: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub sets: Vec<Set>,
}

impl From<&domain::OngoingSession> for OngoingSession {
    fn from(value: &domain::OngoingSession) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            start_time: value.start_time,
            sets: stored_sets(&value.id, value.sets()),
        }
    }
}

impl TryFrom<OngoingSession> for domain::OngoingSession {
    type Error = SessionError;

    fn try_from(value: OngoingSession) -> Result<Self, Self::Error> {
        let mut result =
            domain::OngoingSession::start(domain::Name::new(&value.name)?, value.start_time);
        for set in sets(&value.id, value.sets)? {
            result.log_set(set);
        }
        result.id = value.id.as_str().into();
        Ok(result)
    }
}

/// Sets with a weight that is not a finite, non-negative number are not stored.
fn stored_sets(session_id: &domain::SessionID, sets: &[domain::Set]) -> Vec<Set> {
    sets.iter()
        .filter(|s| {
            let valid = s.weight.is_finite() && s.weight >= 0.0;
            if !valid {
                warn!(
                    "not storing set {} of session {session_id}: invalid weight {}",
                    s.id, s.weight
                );
            }
            valid
        })
        .map(Set::from)
        .collect()
}

/// Sets with a missing, non-finite or negative weight or with reps that are not a
/// positive integer are dropped.
fn sets(session_id: &str, sets: Vec<Set>) -> Result<Vec<domain::Set>, SessionError> {
    let mut result = Vec::with_capacity(sets.len());
    for set in sets {
        let Some(weight) = set.weight() else {
            warn!(
                "dropping set {} of session {session_id}: invalid weight {:?}",
                set.id, set.weight
            );
            continue;
        };
        let Some(reps) = set.reps() else {
            warn!(
                "dropping set {} of session {session_id}: invalid reps {}",
                set.id, set.reps
            );
            continue;
        };
        result.push(domain::Set {
            id: set.id.as_str().into(),
            exercise_id: set.exercise_id.as_str().into(),
            weight,
            reps,
            timestamp: set.timestamp,
            rpe: set.rpe.map(domain::RPE::new).transpose()?,
            is_warmup: set.is_warmup,
        });
    }
    Ok(result)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidRPE(#[from] domain::RPEError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapacityBaseline {
    pub muscle: String,
    pub capacity_volume_units: f64,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct CapacityBaselines(pub Vec<CapacityBaseline>);

impl From<&domain::CapacityBaselines> for CapacityBaselines {
    fn from(value: &domain::CapacityBaselines) -> Self {
        Self(
            value
                .iter()
                .map(|(muscle, capacity_volume_units)| CapacityBaseline {
                    muscle: muscle.to_string(),
                    capacity_volume_units,
                })
                .collect(),
        )
    }
}

impl TryFrom<CapacityBaselines> for domain::CapacityBaselines {
    type Error = domain::CapacityError;

    fn try_from(value: CapacityBaselines) -> Result<Self, Self::Error> {
        domain::CapacityBaselines::new(
            value
                .0
                .into_iter()
                .map(|b| (b.muscle, b.capacity_volume_units))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::tests::data::{EXERCISE, ONGOING_SESSION, SESSION};

    #[test]
    fn test_exercise_from_json() {
        let record: Exercise = serde_json::from_value(json!({
            "id": "bench_press",
            "name": "Bench Press",
            "equipment": "Barbell",
            "category": "Push",
            "muscleEngagement": {
                "Pectoralis_Major": 70,
                "Triceps_Brachii": 30
            }
        }))
        .unwrap();
        assert_eq!(domain::Exercise::try_from(record), Ok(EXERCISE.clone()));
    }

    #[test]
    fn test_exercise_without_engagement() {
        let record: Exercise = serde_json::from_value(json!({
            "id": "stretch",
            "name": "Stretch",
            "equipment": "Body Weight",
            "category": "Core"
        }))
        .unwrap();
        let exercise = domain::Exercise::try_from(record).unwrap();
        assert_eq!(exercise.equipment, domain::Equipment::Bodyweight);
        assert!(exercise.engagement.is_empty());
    }

    #[rstest]
    #[case::unknown_muscle(
        &[("Pectoralis_Major", 70.0), ("Wings", 30.0)],
        ExerciseError::InvalidMuscle(domain::MuscleError::Unknown(String::from("Wings")))
    )]
    #[case::duplicate_muscle(
        &[("Pectoralis_Major", 70.0), ("pectoralis major", 30.0)],
        ExerciseError::DuplicateMuscle(String::from("pectoralis major"))
    )]
    #[case::invalid_percentage(
        &[("Pectoralis_Major", 170.0)],
        ExerciseError::InvalidPercentage(domain::PercentageError::OutOfRange(170.0))
    )]
    fn test_exercise_invalid_engagement(
        #[case] engagement: &[(&str, f64)],
        #[case] expected: ExerciseError,
    ) {
        let record = Exercise {
            muscle_engagement: engagement
                .iter()
                .map(|(name, percentage)| ((*name).to_string(), *percentage))
                .collect(),
            ..Exercise::from(&*EXERCISE)
        };
        assert_eq!(domain::Exercise::try_from(record), Err(expected));
    }

    #[test]
    fn test_exercise_invalid_category() {
        let record = Exercise {
            category: String::from("Cardio"),
            ..Exercise::from(&*EXERCISE)
        };
        assert_eq!(
            domain::Exercise::try_from(record),
            Err(ExerciseError::InvalidProperty(domain::PropertyError::Category(
                String::from("Cardio")
            )))
        );
    }

    #[test]
    fn test_session_to_json() {
        assert_eq!(
            serde_json::to_value(Session::from(&*SESSION)).unwrap(),
            json!({
                "id": "s1",
                "name": "Push Day",
                "date": "2024-03-09",
                "startTime": "2024-03-09T10:00:00Z",
                "endTime": "2024-03-09T11:00:00Z",
                "durationMinutes": 60,
                "sets": [
                    {
                        "id": "s1-1",
                        "exerciseId": "bench_press",
                        "weight": 100.0,
                        "reps": 10,
                        "timestamp": "2024-03-09T10:10:00Z",
                        "rpe": 8.5,
                        "isWarmup": false
                    },
                    {
                        "id": "s1-2",
                        "exerciseId": "bench_press",
                        "weight": 40.0,
                        "reps": 12,
                        "timestamp": "2024-03-09T10:05:00Z",
                        "isWarmup": true
                    }
                ]
            })
        );
    }

    #[test]
    fn test_session_from_json() {
        let record: Session = serde_json::from_value(json!({
            "id": "s1",
            "name": "Push Day",
            "startTime": "2024-03-09T10:00:00Z",
            "endTime": "2024-03-09T11:00:00Z",
            "sets": [
                {
                    "id": "s1-1",
                    "exerciseId": "bench_press",
                    "weight": 100,
                    "reps": 10,
                    "timestamp": "2024-03-09T10:10:00Z",
                    "rpe": 8.5
                },
                {
                    "id": "s1-2",
                    "exerciseId": "bench_press",
                    "weight": 40,
                    "reps": 12,
                    "timestamp": "2024-03-09T10:05:00Z",
                    "isWarmup": true
                },
                {
                    "id": "s1-3",
                    "exerciseId": "bench_press",
                    "weight": -5,
                    "reps": 12,
                    "timestamp": "2024-03-09T10:20:00Z"
                }
            ]
        }))
        .unwrap();
        assert_eq!(domain::Session::try_from(record), Ok(SESSION.clone()));
    }

    #[rstest]
    #[case::missing_weight(json!(null), json!(10))]
    #[case::negative_weight(json!(-5), json!(10))]
    #[case::negative_reps(json!(100), json!(-1))]
    #[case::zero_reps(json!(100), json!(0))]
    #[case::fractional_reps(json!(100), json!(2.5))]
    #[case::too_many_reps(json!(100), json!(5_000_000_000_u64))]
    fn test_session_unusable_set(
        #[case] weight: serde_json::Value,
        #[case] reps: serde_json::Value,
    ) {
        let record: Session = serde_json::from_value(json!({
            "id": "s1",
            "name": "Push Day",
            "startTime": "2024-03-09T10:00:00Z",
            "endTime": "2024-03-09T11:00:00Z",
            "sets": [
                {
                    "id": "s1-1",
                    "exerciseId": "bench_press",
                    "weight": 100,
                    "reps": 10,
                    "timestamp": "2024-03-09T10:10:00Z",
                    "rpe": 8.5
                },
                {
                    "id": "s1-3",
                    "exerciseId": "bench_press",
                    "weight": weight,
                    "reps": reps,
                    "timestamp": "2024-03-09T10:20:00Z"
                }
            ]
        }))
        .unwrap();
        let session = domain::Session::try_from(record).unwrap();
        assert_eq!(session.sets, vec![SESSION.sets[0].clone()]);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-1.0)]
    fn test_session_to_json_invalid_weight(#[case] weight: f64) {
        let mut session = SESSION.clone();
        session.sets[1].weight = weight;
        let record = Session::from(&session);
        assert_eq!(
            record.sets.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["s1-1"]
        );
        assert!(!serde_json::to_string(&record).unwrap().contains("null"));
    }

    #[test]
    fn test_session_invalid_rpe() {
        let mut record = Session::from(&*SESSION);
        record.sets[0].rpe = Some(8.3);
        assert_eq!(
            domain::Session::try_from(record),
            Err(SessionError::InvalidRPE(domain::RPEError::InvalidResolution))
        );
    }

    #[test]
    fn test_ongoing_session() {
        assert_eq!(
            domain::OngoingSession::try_from(OngoingSession::from(&*ONGOING_SESSION)),
            Ok(ONGOING_SESSION.clone())
        );
    }

    #[test]
    fn test_capacity_baselines() {
        let record: CapacityBaselines = serde_json::from_value(json!([
            { "muscle": "Pectoralis Major", "capacityVolumeUnits": 1200 },
            { "muscle": "quadriceps", "capacityVolumeUnits": 2500 }
        ]))
        .unwrap();
        let baselines = domain::CapacityBaselines::try_from(record).unwrap();
        assert_eq!(baselines.get(domain::Muscle::PectoralisMajor), Some(1200.0));
        assert_eq!(baselines.get(domain::Muscle::Quadriceps), Some(2500.0));
        assert_eq!(
            domain::CapacityBaselines::try_from(CapacityBaselines::from(&baselines)),
            Ok(baselines)
        );
    }
}
