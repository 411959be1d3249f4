use std::{collections::BTreeMap, fmt, slice::Iter};

use chrono::{DateTime, Utc};

use crate::{Muscle, Property};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Property for Intensity {
    fn iter() -> Iter<'static, Intensity> {
        static INTENSITY: [Intensity; 5] = [
            Intensity::None,
            Intensity::Low,
            Intensity::Medium,
            Intensity::High,
            Intensity::VeryHigh,
        ];
        INTENSITY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Intensity::None => "none",
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Upper bounds (inclusive) of the low, medium and high intensity buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    low: f64,
    medium: f64,
    high: f64,
}

impl Thresholds {
    /// For volumes on the relative 0 to 100 scale.
    pub const VOLUME: Thresholds = Thresholds {
        low: 20.0,
        medium: 50.0,
        high: 80.0,
    };
    /// For fatigue percentages relative to the capacity baseline.
    pub const FATIGUE: Thresholds = Thresholds {
        low: 30.0,
        medium: 60.0,
        high: 90.0,
    };

    pub fn new(low: f64, medium: f64, high: f64) -> Result<Self, ThresholdsError> {
        if ![low, medium, high].iter().all(|v| v.is_finite()) {
            return Err(ThresholdsError::NotFinite);
        }

        if low <= 0.0 || low >= medium || medium >= high {
            return Err(ThresholdsError::NotAscending);
        }

        Ok(Self { low, medium, high })
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn medium(&self) -> f64 {
        self.medium
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ThresholdsError {
    #[error("Thresholds must be numbers")]
    NotFinite,
    #[error("Thresholds must be positive and strictly ascending")]
    NotAscending,
}

#[must_use]
pub fn classify(value: f64, thresholds: &Thresholds) -> Intensity {
    if !value.is_finite() || value <= 0.0 {
        Intensity::None
    } else if value <= thresholds.low {
        Intensity::Low
    } else if value <= thresholds.medium {
        Intensity::Medium
    } else if value <= thresholds.high {
        Intensity::High
    } else {
        Intensity::VeryHigh
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum RecoveryStatus {
    Recovered,
    Recovering,
    Fatigued,
}

impl From<Intensity> for RecoveryStatus {
    fn from(value: Intensity) -> Self {
        match value {
            Intensity::None | Intensity::Low => RecoveryStatus::Recovered,
            Intensity::Medium => RecoveryStatus::Recovering,
            Intensity::High | Intensity::VeryHigh => RecoveryStatus::Fatigued,
        }
    }
}

impl fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecoveryStatus::Recovered => "Recovered",
                RecoveryStatus::Recovering => "Recovering",
                RecoveryStatus::Fatigued => "Fatigued",
            }
        )
    }
}

#[must_use]
pub fn recommendation(
    muscle: Muscle,
    intensity: Intensity,
    days_since_last_trained: Option<u32>,
) -> String {
    let name = muscle.display_name();
    let advice = match intensity {
        Intensity::None => format!("{name}: No recent training load. Ready for training."),
        Intensity::Low => format!("{name}: Fully recovered and ready for training."),
        Intensity::Medium => format!("{name}: Partially recovered. Light training OK."),
        Intensity::High => {
            format!("{name}: High fatigue detected. Consider rest or light training only.")
        }
        Intensity::VeryHigh => {
            format!("{name}: Trained beyond capacity. Rest before training it again.")
        }
    };
    match days_since_last_trained {
        None => advice,
        Some(0) => format!("{advice} Last trained today."),
        Some(1) => format!("{advice} Last trained yesterday."),
        Some(days) => format!("{advice} Last trained {days} days ago."),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleStatus {
    pub muscle: Muscle,
    pub fatigue: f64,
    pub intensity: Intensity,
    pub status: RecoveryStatus,
    pub days_since_last_trained: Option<u32>,
    pub recommendation: String,
}

/// Classify the fatigue percentage of every muscle in `fatigue`.
#[must_use]
pub fn classify_all(
    fatigue: &BTreeMap<Muscle, f64>,
    last_trained: &BTreeMap<Muscle, DateTime<Utc>>,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> Vec<MuscleStatus> {
    fatigue
        .iter()
        .map(|(muscle, fatigue)| {
            let intensity = classify(*fatigue, thresholds);
            let days_since_last_trained = last_trained
                .get(muscle)
                .map(|t| u32::try_from((now - *t).num_days().max(0)).unwrap_or(u32::MAX));
            MuscleStatus {
                muscle: *muscle,
                fatigue: *fatigue,
                intensity,
                status: RecoveryStatus::from(intensity),
                days_since_last_trained,
                recommendation: recommendation(*muscle, intensity, days_since_last_trained),
            }
        })
        .collect()
}

#[must_use]
pub fn ready_for_training(statuses: &[MuscleStatus]) -> Vec<Muscle> {
    statuses
        .iter()
        .filter(|s| s.status == RecoveryStatus::Recovered)
        .map(|s| s.muscle)
        .collect()
}

#[must_use]
pub fn needing_rest(statuses: &[MuscleStatus]) -> Vec<Muscle> {
    statuses
        .iter()
        .filter(|s| s.status == RecoveryStatus::Fatigued)
        .map(|s| s.muscle)
        .collect()
}
