use std::collections::BTreeMap;

use log::debug;

use crate::{
    Catalog, Equipment, ExerciseID, Muscle, SummaryEntry, Thresholds, normalize_to_scale,
    summarize,
};

pub const DEFAULT_BODYWEIGHT_ESTIMATE: f64 = 150.0;

const MINUTES_PER_SET: f64 = 2.5;
const MINUTES_PER_TRANSITION: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<PlannedSet>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedSet {
    pub target_weight: Option<f64>,
    pub target_reps: u32,
}

/// Planned workout time in minutes: 2.5 minutes per set and 2 minutes between exercises.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_duration(plan: &[PlannedExercise]) -> f64 {
    if plan.is_empty() {
        return 0.0;
    }

    let sets = plan.iter().map(|e| e.sets.len()).sum::<usize>();

    sets as f64 * MINUTES_PER_SET + (plan.len() - 1) as f64 * MINUTES_PER_TRANSITION
}

/// Projected volume per muscle of a planned workout.
///
/// Sets without a positive target weight count with `bodyweight_estimate` for bodyweight
/// exercises and with zero otherwise.
#[must_use]
pub fn planned_volume(
    plan: &[PlannedExercise],
    catalog: &Catalog,
    bodyweight_estimate: f64,
) -> BTreeMap<Muscle, f64> {
    let mut result: BTreeMap<Muscle, f64> = BTreeMap::new();

    for planned in plan {
        let Some(exercise) = catalog.get(&planned.exercise_id) else {
            debug!("skipping planned exercise {}: not in catalog", planned.exercise_id);
            continue;
        };

        for set in &planned.sets {
            let weight = match set.target_weight {
                Some(weight) if weight.is_finite() && weight > 0.0 => weight,
                _ if exercise.equipment == Equipment::Bodyweight
                    && bodyweight_estimate.is_finite() =>
                {
                    bodyweight_estimate.max(0.0)
                }
                _ => 0.0,
            };
            let volume = weight * f64::from(set.target_reps);
            for engagement in &exercise.engagement {
                *result.entry(engagement.muscle).or_default() +=
                    volume * *engagement.percentage / 100.0;
            }
        }
    }

    result
}

/// Projection of a planned workout, recomputed whenever the plan changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanProjection {
    pub raw_volumes: BTreeMap<Muscle, f64>,
    pub normalized_volumes: BTreeMap<Muscle, f64>,
    pub summary: Vec<SummaryEntry>,
    pub duration_minutes: f64,
}

#[must_use]
pub fn project(
    plan: &[PlannedExercise],
    catalog: &Catalog,
    bodyweight_estimate: f64,
    thresholds: &Thresholds,
) -> PlanProjection {
    let raw_volumes = planned_volume(plan, catalog, bodyweight_estimate);
    PlanProjection {
        normalized_volumes: normalize_to_scale(&raw_volumes),
        summary: summarize(&raw_volumes, thresholds),
        duration_minutes: estimate_duration(plan),
        raw_volumes,
    }
}
