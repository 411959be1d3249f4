use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::{BodyRegion, Catalog, Muscle, Set};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeOptions {
    /// Sets logged before this time are ignored.
    pub since: Option<DateTime<Utc>>,
    pub include_warmups: bool,
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self {
            since: None,
            include_warmups: true,
        }
    }
}

/// Accumulate the engagement-weighted volume of the given sets per muscle.
///
/// Each set contributes `weight * reps * percentage / 100` to every muscle its exercise
/// engages. Sets referring to exercises missing from the catalog are skipped. Nothing is
/// rounded.
pub fn aggregate<'a>(
    sets: impl IntoIterator<Item = &'a Set>,
    catalog: &Catalog,
    since: Option<DateTime<Utc>>,
) -> BTreeMap<Muscle, f64> {
    aggregate_with(
        sets,
        catalog,
        &VolumeOptions {
            since,
            ..VolumeOptions::default()
        },
    )
}

pub fn aggregate_with<'a>(
    sets: impl IntoIterator<Item = &'a Set>,
    catalog: &Catalog,
    options: &VolumeOptions,
) -> BTreeMap<Muscle, f64> {
    let mut result: BTreeMap<Muscle, f64> = BTreeMap::new();

    for set in sets {
        if options.since.is_some_and(|since| set.timestamp < since)
            || (set.is_warmup && !options.include_warmups)
        {
            continue;
        }

        let Some(exercise) = catalog.get(&set.exercise_id) else {
            debug!("skipping set {}: unknown exercise {}", set.id, set.exercise_id);
            continue;
        };

        let volume = set.volume();
        for engagement in &exercise.engagement {
            *result.entry(engagement.muscle).or_default() += volume * *engagement.percentage / 100.0;
        }
    }

    result
}

#[must_use]
pub fn volume_by_region(volumes: &BTreeMap<Muscle, f64>) -> BTreeMap<BodyRegion, f64> {
    let mut result: BTreeMap<BodyRegion, f64> = BTreeMap::new();
    for (muscle, volume) in volumes {
        *result.entry(muscle.region()).or_default() += volume;
    }
    result
}

/// Coarse 0 to 10 score of a raw volume.
#[must_use]
pub fn volume_score(volume: f64) -> u8 {
    if !volume.is_finite() || volume <= 0.0 {
        0
    } else if volume < 100.0 {
        2
    } else if volume < 250.0 {
        4
    } else if volume < 500.0 {
        6
    } else if volume < 1000.0 {
        8
    } else {
        10
    }
}
