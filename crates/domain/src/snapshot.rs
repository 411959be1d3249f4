use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    CapacityBaselines, Catalog, Intensity, Muscle, MuscleStatus, Thresholds, VolumeOptions,
    WorkoutLog, aggregate_with, classify, classify_all, needing_rest, normalize,
    normalize_to_scale, ready_for_training,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Only sets of the last `window_days` days are aggregated. `None` uses the whole log.
    pub window_days: Option<u32>,
    pub include_warmups: bool,
    pub fatigue_thresholds: Thresholds,
    pub volume_thresholds: Thresholds,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            window_days: Some(7),
            include_warmups: true,
            fatigue_thresholds: Thresholds::FATIGUE,
            volume_thresholds: Thresholds::VOLUME,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub muscle: Muscle,
    /// Data name with spaces instead of underscores.
    pub name: String,
    /// Raw volume rounded to whole units.
    pub volume: f64,
    /// Intensity of the volume relative to the largest volume.
    pub intensity: Intensity,
}

/// Summary entries of all muscles with positive volume, largest volume first.
#[must_use]
pub fn summarize(raw_volumes: &BTreeMap<Muscle, f64>, thresholds: &Thresholds) -> Vec<SummaryEntry> {
    let scaled = normalize_to_scale(raw_volumes);
    let mut result = raw_volumes
        .iter()
        .filter(|(_, volume)| volume.is_finite() && **volume > 0.0)
        .map(|(muscle, volume)| SummaryEntry {
            muscle: *muscle,
            name: muscle.data_name().replace('_', " "),
            volume: volume.round(),
            intensity: classify(scaled.get(muscle).copied().unwrap_or_default(), thresholds),
        })
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.volume.total_cmp(&a.volume));
    result
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub raw_volumes: BTreeMap<Muscle, f64>,
    /// Volumes relative to the largest one, on a 0 to 100 scale.
    pub normalized_volumes: BTreeMap<Muscle, f64>,
    /// Volumes relative to the capacity baselines, in percent.
    pub fatigue_by_muscle: BTreeMap<Muscle, f64>,
    pub intensity_by_muscle: BTreeMap<Muscle, Intensity>,
    pub statuses: Vec<MuscleStatus>,
    pub ready_for_training: Vec<Muscle>,
    pub needing_rest: Vec<Muscle>,
    pub summary: Vec<SummaryEntry>,
}

impl Snapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_volumes.is_empty()
    }

    #[must_use]
    pub fn format_summary(&self) -> String {
        if self.summary.is_empty() {
            return String::from("No training volume recorded.");
        }

        self.summary
            .iter()
            .map(|e| format!("{}: {} ({})", e.name, e.volume, e.intensity))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compute the training state of every muscle from the workout log.
///
/// Missing exercises and baselines as well as an empty log lead to zero or missing values,
/// never to an error.
#[must_use]
pub fn analyze(
    log: &WorkoutLog,
    catalog: &Catalog,
    baselines: &CapacityBaselines,
    options: &AnalysisOptions,
    now: DateTime<Utc>,
) -> Snapshot {
    let raw_volumes = aggregate_with(
        log.sets(),
        catalog,
        &VolumeOptions {
            since: options
                .window_days
                .map(|days| now - Duration::days(i64::from(days))),
            include_warmups: options.include_warmups,
        },
    );
    let fatigue_by_muscle = normalize(&raw_volumes, baselines);
    let statuses = classify_all(
        &fatigue_by_muscle,
        &log.last_trained(catalog),
        &options.fatigue_thresholds,
        now,
    );

    Snapshot {
        normalized_volumes: normalize_to_scale(&raw_volumes),
        intensity_by_muscle: statuses.iter().map(|s| (s.muscle, s.intensity)).collect(),
        ready_for_training: ready_for_training(&statuses),
        needing_rest: needing_rest(&statuses),
        summary: summarize(&raw_volumes, &options.volume_thresholds),
        raw_volumes,
        fatigue_by_muscle,
        statuses,
    }
}
