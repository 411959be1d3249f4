#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitforge_domain::{OngoingSession, ReadError, WriteError};

pub mod log;
mod planner;
mod settings;

pub use planner::Planner;
pub use settings::{Settings, ThresholdSettings};

pub trait Repository {
    /// Missing settings are read as the defaults.
    fn read_settings(&self) -> Result<Settings, ReadError>;
    fn write_settings(&self, settings: Settings) -> Result<(), WriteError>;

    fn read_ongoing_session(&self) -> Result<Option<OngoingSession>, ReadError>;
    fn write_ongoing_session(
        &self,
        ongoing_session: Option<&OngoingSession>,
    ) -> Result<(), WriteError>;
}
