use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::{Catalog, Muscle, RPE, RecoveryStatus, WorkoutLog};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleRecovery {
    pub muscle: Muscle,
    pub last_trained: DateTime<Utc>,
    pub days_since_last_trained: u32,
    /// Percentage of fatigue left, 0 when fully recovered.
    pub fatigue_score: f64,
    pub status: RecoveryStatus,
    pub estimated_recovery: Option<DateTime<Utc>>,
    pub volume: f64,
    pub avg_rpe: Option<RPE>,
    pub recommendation: String,
}

impl MuscleRecovery {
    #[must_use]
    pub fn recovery_percentage(&self) -> f64 {
        100.0 - self.fatigue_score
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryReport {
    pub muscles: Vec<MuscleRecovery>,
    pub overall_recovery_score: f64,
    pub ready_for_training: Vec<Muscle>,
    pub needing_rest: Vec<Muscle>,
    pub recommended_focus: Vec<Muscle>,
    pub deload_recommended: bool,
    pub summary: String,
}

impl RecoveryReport {
    #[must_use]
    pub fn get(&self, muscle: Muscle) -> Option<&MuscleRecovery> {
        self.muscles.iter().find(|m| m.muscle == muscle)
    }
}

/// Estimate the recovery state of each trained muscle from the time since it was last trained.
///
/// Recovery is assumed to progress linearly over the muscle's recovery time. Only sets at or
/// after `since` are considered.
#[must_use]
pub fn analyze_recovery(
    log: &WorkoutLog,
    catalog: &Catalog,
    since: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> RecoveryReport {
    let mut training: BTreeMap<Muscle, (DateTime<Utc>, f64, Vec<RPE>)> = BTreeMap::new();

    for set in log
        .sets()
        .filter(|s| since.is_none_or(|since| s.timestamp >= since))
    {
        let Some(exercise) = catalog.get(&set.exercise_id) else {
            continue;
        };
        for engagement in exercise.engagement.iter().filter(|e| *e.percentage > 0.0) {
            let (last_trained, volume, rpes) = training
                .entry(engagement.muscle)
                .or_insert((set.timestamp, 0.0, vec![]));
            *last_trained = (*last_trained).max(set.timestamp);
            *volume += set.volume() * *engagement.percentage / 100.0;
            rpes.push(set.rpe.unwrap_or(RPE::FIVE));
        }
    }

    let muscles = training
        .into_iter()
        .map(|(muscle, (last_trained, volume, rpes))| {
            muscle_recovery(muscle, last_trained, volume, &rpes, now)
        })
        .collect::<Vec<_>>();

    report(muscles)
}

fn muscle_recovery(
    muscle: Muscle,
    last_trained: DateTime<Utc>,
    volume: f64,
    rpes: &[RPE],
    now: DateTime<Utc>,
) -> MuscleRecovery {
    #[allow(clippy::cast_precision_loss)]
    let days_since = ((now - last_trained).num_seconds() as f64 / SECONDS_PER_DAY).max(0.0);
    let recovery_hours = muscle.recovery_hours();
    let recovery_per_day = 100.0 / (recovery_hours / 24.0);
    let recovery_percentage = (days_since * recovery_per_day).min(100.0);
    let fatigue_score = (100.0 - recovery_percentage).max(0.0);

    let (status, recommendation) = if fatigue_score < 20.0 {
        (
            RecoveryStatus::Recovered,
            String::from("Fully recovered and ready for training"),
        )
    } else if fatigue_score < 50.0 {
        (
            RecoveryStatus::Recovering,
            format!(
                "Partially recovered ({:.0}%). Light training OK.",
                (100.0 - fatigue_score).round()
            ),
        )
    } else {
        (
            RecoveryStatus::Fatigued,
            String::from("High fatigue detected. Consider rest or light training only."),
        )
    };

    #[allow(clippy::cast_possible_truncation)]
    let estimated_recovery = if fatigue_score > 20.0 {
        Some(now + Duration::seconds((fatigue_score / 100.0 * recovery_hours * 3600.0).round() as i64))
    } else {
        None
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days_since_last_trained = days_since.floor().min(f64::from(u32::MAX)) as u32;

    MuscleRecovery {
        muscle,
        last_trained,
        days_since_last_trained,
        fatigue_score,
        status,
        estimated_recovery,
        volume,
        avg_rpe: RPE::avg(rpes),
        recommendation,
    }
}

fn report(muscles: Vec<MuscleRecovery>) -> RecoveryReport {
    if muscles.is_empty() {
        return RecoveryReport {
            muscles,
            overall_recovery_score: 100.0,
            ready_for_training: vec![],
            needing_rest: vec![],
            recommended_focus: vec![],
            deload_recommended: false,
            summary: String::from(
                "No recent training data available. All muscle groups ready for training.",
            ),
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let overall_recovery_score = muscles
        .iter()
        .map(MuscleRecovery::recovery_percentage)
        .sum::<f64>()
        / muscles.len() as f64;

    let with_status = |status| {
        muscles
            .iter()
            .filter(|m| m.status == status)
            .map(|m| m.muscle)
            .collect::<Vec<_>>()
    };
    let ready_for_training = with_status(RecoveryStatus::Recovered);
    let needing_rest = with_status(RecoveryStatus::Fatigued);

    let mut focus = muscles
        .iter()
        .filter(|m| m.status == RecoveryStatus::Recovered && m.days_since_last_trained >= 2)
        .collect::<Vec<_>>();
    focus.sort_by(|a, b| b.days_since_last_trained.cmp(&a.days_since_last_trained));
    let recommended_focus = focus.iter().take(3).map(|m| m.muscle).collect::<Vec<_>>();

    #[allow(clippy::cast_precision_loss)]
    let deload_recommended = needing_rest.len() as f64 / muscles.len() as f64 > 0.6
        || muscles.iter().any(|m| m.fatigue_score > 80.0);

    let names = |muscles: &[Muscle]| {
        muscles
            .iter()
            .take(2)
            .map(|m| m.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let summary = if ready_for_training.len() > needing_rest.len() {
        format!(
            "Good recovery state. Ready to train {}.",
            names(&ready_for_training)
        )
    } else if !needing_rest.is_empty() {
        format!(
            "High fatigue in {}. Consider lighter training.",
            names(&needing_rest)
        )
    } else {
        String::from("Balanced recovery state. Normal training recommended.")
    };

    RecoveryReport {
        muscles,
        overall_recovery_score,
        ready_for_training,
        needing_rest,
        recommended_focus,
        deload_recommended,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        Category, Equipment, Exercise, MuscleEngagement, Name, Percentage, Session, Set,
    };

    static NOW: LazyLock<DateTime<Utc>> =
        LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());

    static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
        Catalog::new(vec![
            exercise("squat", &[(Muscle::Quadriceps, 80.0), (Muscle::Hamstrings, 20.0)]),
            exercise("curl", &[(Muscle::BicepsBrachii, 100.0)]),
            exercise("crunch", &[(Muscle::RectusAbdominis, 100.0), (Muscle::Obliques, 0.0)]),
            exercise("deadlift", &[(Muscle::ErectorSpinae, 100.0)]),
        ])
        .unwrap()
    });

    fn exercise(id: &str, engagement: &[(Muscle, f64)]) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(id).unwrap(),
            equipment: Equipment::Barbell,
            category: Category::Legs,
            engagement: engagement
                .iter()
                .map(|(muscle, percentage)| MuscleEngagement {
                    muscle: *muscle,
                    percentage: Percentage::new(*percentage).unwrap(),
                })
                .collect(),
        }
    }

    fn log(sets: Vec<Set>) -> WorkoutLog {
        WorkoutLog::new(vec![Session {
            id: "1".into(),
            name: Name::new("Workout").unwrap(),
            start_time: *NOW - Duration::days(30),
            end_time: *NOW,
            sets,
        }])
    }

    fn set(exercise_id: &str, hours_ago: i64) -> Set {
        Set::new(exercise_id.into(), 100.0, 10, *NOW - Duration::hours(hours_ago))
    }

    #[test]
    fn test_analyze_recovery_empty() {
        let report = analyze_recovery(&WorkoutLog::default(), &CATALOG, None, *NOW);
        assert_eq!(
            report,
            RecoveryReport {
                muscles: vec![],
                overall_recovery_score: 100.0,
                ready_for_training: vec![],
                needing_rest: vec![],
                recommended_focus: vec![],
                deload_recommended: false,
                summary: String::from(
                    "No recent training data available. All muscle groups ready for training."
                ),
            }
        );
    }

    #[test]
    fn test_analyze_recovery_decay() {
        let report = analyze_recovery(
            &log(vec![set("squat", 48), set("curl", 12), set("crunch", 96)]),
            &CATALOG,
            None,
            *NOW,
        );

        let quadriceps = report.get(Muscle::Quadriceps).unwrap();
        assert_eq!(quadriceps.days_since_last_trained, 2);
        assert_approx_eq!(quadriceps.fatigue_score, 100.0 / 3.0, 0.001);
        assert_eq!(quadriceps.status, RecoveryStatus::Recovering);
        assert_eq!(
            quadriceps.recommendation,
            "Partially recovered (67%). Light training OK."
        );
        assert_eq!(quadriceps.estimated_recovery, Some(*NOW + Duration::hours(24)));
        assert_approx_eq!(quadriceps.volume, 800.0, 0.001);
        assert_eq!(quadriceps.avg_rpe, Some(RPE::FIVE));

        let biceps = report.get(Muscle::BicepsBrachii).unwrap();
        assert_eq!(biceps.days_since_last_trained, 0);
        assert_approx_eq!(biceps.fatigue_score, 75.0, 0.001);
        assert_eq!(biceps.status, RecoveryStatus::Fatigued);
        assert_eq!(biceps.estimated_recovery, Some(*NOW + Duration::hours(36)));

        let abs = report.get(Muscle::RectusAbdominis).unwrap();
        assert_eq!(abs.days_since_last_trained, 4);
        assert_eq!(abs.fatigue_score, 0.0);
        assert_eq!(abs.status, RecoveryStatus::Recovered);
        assert_eq!(abs.recommendation, "Fully recovered and ready for training");
        assert_eq!(abs.estimated_recovery, None);

        assert!(report.get(Muscle::Obliques).is_none());
        assert_eq!(report.muscles.len(), 4);
    }

    #[test]
    fn test_analyze_recovery_report() {
        let report = analyze_recovery(
            &log(vec![
                set("squat", 120),
                set("curl", 72),
                set("crunch", 30),
                set("deadlift", 12),
            ]),
            &CATALOG,
            None,
            *NOW,
        );

        assert_eq!(
            report.ready_for_training,
            vec![
                Muscle::BicepsBrachii,
                Muscle::RectusAbdominis,
                Muscle::Quadriceps,
                Muscle::Hamstrings
            ]
        );
        assert_eq!(report.needing_rest, vec![Muscle::ErectorSpinae]);
        assert_eq!(
            report.recommended_focus,
            vec![Muscle::Quadriceps, Muscle::Hamstrings, Muscle::BicepsBrachii]
        );
        assert!(report.deload_recommended);
        assert_eq!(report.summary, "Good recovery state. Ready to train Biceps, Abs.");
        assert_approx_eq!(report.overall_recovery_score, (4.0 * 100.0 + 12.5) / 5.0, 0.001);
    }

    #[test]
    fn test_analyze_recovery_high_fatigue() {
        let report = analyze_recovery(
            &log(vec![set("curl", 2), set("deadlift", 2), set("crunch", 1)]),
            &CATALOG,
            None,
            *NOW,
        );
        assert!(report.ready_for_training.is_empty());
        assert_eq!(
            report.needing_rest,
            vec![Muscle::ErectorSpinae, Muscle::BicepsBrachii, Muscle::RectusAbdominis]
        );
        assert!(report.deload_recommended);
        assert_eq!(
            report.summary,
            "High fatigue in Lower Back, Biceps. Consider lighter training."
        );
    }

    #[test]
    fn test_analyze_recovery_balanced() {
        let report = analyze_recovery(&log(vec![set("curl", 30)]), &CATALOG, None, *NOW);
        assert_eq!(report.muscles[0].status, RecoveryStatus::Recovering);
        assert!(!report.deload_recommended);
        assert_eq!(
            report.summary,
            "Balanced recovery state. Normal training recommended."
        );
    }

    #[test]
    fn test_analyze_recovery_since() {
        let report = analyze_recovery(
            &log(vec![set("squat", 24 * 10), set("curl", 24)]),
            &CATALOG,
            Some(*NOW - Duration::days(7)),
            *NOW,
        );
        assert_eq!(
            report.muscles.iter().map(|m| m.muscle).collect::<Vec<_>>(),
            vec![Muscle::BicepsBrachii]
        );
    }
}
