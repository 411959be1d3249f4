use std::collections::BTreeMap;

use crate::{Muscle, Property};

/// Reference training volume per capacity key, the denominator of the fatigue percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityBaselines(BTreeMap<String, f64>);

impl CapacityBaselines {
    /// Keys are matched case-insensitively; spaces and dashes are treated as underscores.
    pub fn new(baselines: BTreeMap<String, f64>) -> Result<Self, CapacityError> {
        let mut result = BTreeMap::new();
        for (key, value) in baselines {
            let canonical_key = canonicalize(&key);
            if !Muscle::iter().any(|m| m.capacity_key() == canonical_key) {
                return Err(CapacityError::UnknownKey(key));
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(CapacityError::InvalidValue(key, value));
            }
            result.insert(canonical_key, value);
        }
        Ok(Self(result))
    }

    #[must_use]
    pub fn get(&self, muscle: Muscle) -> Option<f64> {
        self.0.get(muscle.capacity_key()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CapacityBaselines {
    fn default() -> Self {
        Self(
            DEFAULT_BASELINES
                .iter()
                .map(|(key, value)| ((*key).to_string(), *value))
                .collect(),
        )
    }
}

const DEFAULT_BASELINES: [(&str, f64); 24] = [
    ("pectoralis_major", 15000.0),
    ("latissimus_dorsi", 15000.0),
    ("quadriceps", 18000.0),
    ("gluteus_maximus", 18000.0),
    ("hamstrings", 12000.0),
    ("erector_spinae", 12000.0),
    ("deltoids", 10000.0),
    ("triceps_brachii", 8000.0),
    ("biceps_brachii", 8000.0),
    ("trapezius", 8000.0),
    ("rhomboids", 6000.0),
    ("calves", 6000.0),
    ("rectus_abdominis", 5000.0),
    ("core", 5000.0),
    ("obliques", 4000.0),
    ("grip_forearms", 4000.0),
    ("brachialis", 4000.0),
    ("brachioradialis", 4000.0),
    ("hip_flexors", 4000.0),
    ("rotator_cuff", 3000.0),
    ("serratus_anterior", 3000.0),
    ("transverse_abdominis", 3000.0),
    ("anconeus", 2000.0),
    ("levator_scapulae", 2000.0),
];

fn canonicalize(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CapacityError {
    #[error("Unknown capacity key \"{0}\"")]
    UnknownKey(String),
    #[error("Capacity of \"{0}\" must be a positive number ({1})")]
    InvalidValue(String, f64),
}

/// Fatigue percentage per muscle: raw volume relative to the muscle's capacity baseline.
///
/// Muscles without a baseline get zero. Values above 100 are kept, they indicate training
/// beyond capacity.
#[must_use]
pub fn normalize(
    raw_volumes: &BTreeMap<Muscle, f64>,
    baselines: &CapacityBaselines,
) -> BTreeMap<Muscle, f64> {
    raw_volumes
        .iter()
        .map(|(muscle, volume)| {
            let fatigue = match baselines.get(*muscle) {
                Some(baseline) if volume.is_finite() && *volume > 0.0 => volume / baseline * 100.0,
                _ => 0.0,
            };
            (*muscle, fatigue)
        })
        .collect()
}

/// Volumes relative to the largest one, on a 0 to 100 scale.
///
/// If no volume is positive, the input is returned unchanged.
#[must_use]
pub fn normalize_to_scale(raw_volumes: &BTreeMap<Muscle, f64>) -> BTreeMap<Muscle, f64> {
    let max = raw_volumes
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    if max <= 0.0 {
        return raw_volumes.clone();
    }

    raw_volumes
        .iter()
        .map(|(muscle, volume)| (*muscle, volume / max * 100.0))
        .collect()
}
