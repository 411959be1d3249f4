use chrono::{DateTime, Duration, Utc};
use fitforge_domain::{Catalog, PlanProjection, PlannedExercise, Thresholds, ThresholdsError, project};
use log::debug;

use crate::Settings;

/// Projection of a workout plan that is edited interactively.
///
/// Edits are collected until no further edit happened for the debounce period, then the
/// projection is recomputed once.
pub struct Planner {
    catalog: Catalog,
    bodyweight_estimate: f64,
    thresholds: Thresholds,
    debounce: Duration,
    plan: Vec<PlannedExercise>,
    last_edit: Option<DateTime<Utc>>,
    projection: PlanProjection,
}

impl Planner {
    pub fn new(catalog: Catalog, settings: &Settings) -> Result<Self, ThresholdsError> {
        Ok(Self {
            catalog,
            bodyweight_estimate: settings.bodyweight_estimate,
            thresholds: settings.volume_thresholds.try_into()?,
            debounce: settings.debounce(),
            plan: vec![],
            last_edit: None,
            projection: PlanProjection::default(),
        })
    }

    #[must_use]
    pub fn plan(&self) -> &[PlannedExercise] {
        &self.plan
    }

    /// Projection of the plan as of the last recomputation.
    #[must_use]
    pub fn projection(&self) -> &PlanProjection {
        &self.projection
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    pub fn update(&mut self, plan: Vec<PlannedExercise>, at: DateTime<Utc>) {
        self.plan = plan;
        self.last_edit = Some(at);
    }

    /// Recompute the projection if the debounce period has passed since the last edit.
    ///
    /// Returns whether the projection was recomputed.
    pub fn poll(&mut self, at: DateTime<Utc>) -> bool {
        match self.last_edit {
            Some(last_edit) if at - last_edit >= self.debounce => {
                self.projection = project(
                    &self.plan,
                    &self.catalog,
                    self.bodyweight_estimate,
                    &self.thresholds,
                );
                self.last_edit = None;
                debug!(
                    "recomputed projection of plan with {} exercises",
                    self.plan.len()
                );
                true
            }
            _ => false,
        }
    }
}
