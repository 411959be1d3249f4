use chrono::Duration;
use fitforge_domain::{AnalysisOptions, DEFAULT_BODYWEIGHT_ESTIMATE, Thresholds, ThresholdsError};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Days of training history taken into account. `None` uses the whole history.
    pub window_days: Option<u32>,
    pub include_warmups: bool,
    /// Rescale exercises whose muscle engagement does not sum to 100 % when loading the catalog.
    pub normalize_catalog: bool,
    pub bodyweight_estimate: f64,
    pub debounce_ms: u32,
    pub volume_thresholds: ThresholdSettings,
    pub fatigue_thresholds: ThresholdSettings,
}

impl Settings {
    pub fn analysis_options(&self) -> Result<AnalysisOptions, ThresholdsError> {
        Ok(AnalysisOptions {
            window_days: self.window_days,
            include_warmups: self.include_warmups,
            fatigue_thresholds: self.fatigue_thresholds.try_into()?,
            volume_thresholds: self.volume_thresholds.try_into()?,
        })
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::milliseconds(i64::from(self.debounce_ms))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_days: Some(7),
            include_warmups: true,
            normalize_catalog: false,
            bodyweight_estimate: DEFAULT_BODYWEIGHT_ESTIMATE,
            debounce_ms: 100,
            volume_thresholds: Thresholds::VOLUME.into(),
            fatigue_thresholds: Thresholds::FATIGUE.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSettings {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl From<Thresholds> for ThresholdSettings {
    fn from(value: Thresholds) -> Self {
        Self {
            low: value.low(),
            medium: value.medium(),
            high: value.high(),
        }
    }
}

impl TryFrom<ThresholdSettings> for Thresholds {
    type Error = ThresholdsError;

    fn try_from(value: ThresholdSettings) -> Result<Self, Self::Error> {
        Thresholds::new(value.low, value.medium, value.high)
    }
}
