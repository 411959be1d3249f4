use std::collections::{BTreeMap, HashSet};

use log::{debug, warn};

use crate::{
    Category, Equipment, Exercise, ExerciseID, Muscle, MuscleEngagement, Name, NameError,
    Percentage, PercentageError, Property,
};

/// Allowed deviation of an exercise's engagement total from 100 %.
pub const ENGAGEMENT_TOLERANCE: f64 = 0.01;

/// Exercises indexed by ID. Read-only once built.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    exercises: BTreeMap<ExerciseID, Exercise>,
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        let mut result = BTreeMap::new();
        for exercise in exercises {
            if result.contains_key(&exercise.id) {
                return Err(CatalogError::DuplicateID(exercise.id));
            }
            result.insert(exercise.id.clone(), exercise);
        }
        Ok(Self { exercises: result })
    }

    #[must_use]
    pub fn get(&self, id: &ExerciseID) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises.values().find(|e| e.name.matches(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercises whose engagement percentages do not add up to 100 %.
    #[must_use]
    pub fn validate(&self) -> Vec<EngagementDeviation> {
        self.exercises
            .values()
            .filter(|e| !e.engagement.is_empty())
            .filter_map(|e| {
                let total = e.engagement_total();
                if (total - 100.0).abs() > ENGAGEMENT_TOLERANCE {
                    Some(EngagementDeviation {
                        exercise_id: e.id.clone(),
                        total,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Rescale the engagement of every deviating exercise proportionally to 100 %.
    ///
    /// Percentages are rounded to two decimals. A remaining rounding error larger than the
    /// tolerance is assigned to the most engaged muscle. Exercises without engagement data or
    /// with a total of zero are kept as they are.
    #[must_use]
    pub fn normalize(&self) -> Normalization {
        let mut corrections = vec![];
        let exercises = self
            .exercises
            .iter()
            .map(|(id, exercise)| {
                let old_total = exercise.engagement_total();
                if exercise.engagement.is_empty()
                    || old_total <= 0.0
                    || (old_total - 100.0).abs() <= ENGAGEMENT_TOLERANCE
                {
                    return (id.clone(), exercise.clone());
                }
                let normalized = Exercise {
                    engagement: rescale(&exercise.engagement, old_total),
                    ..exercise.clone()
                };
                let new_total = normalized.engagement_total();
                debug!(
                    "normalized muscle engagement of {}: {old_total}% -> {new_total}%",
                    exercise.name
                );
                corrections.push(Correction {
                    exercise_id: id.clone(),
                    old_total,
                    new_total,
                    muscles: exercise.engagement.len(),
                });
                (id.clone(), normalized)
            })
            .collect();
        corrections.sort_by(|a, b| b.old_total.total_cmp(&a.old_total));
        Normalization {
            catalog: Catalog { exercises },
            corrections,
        }
    }
}

fn rescale(engagement: &[MuscleEngagement], total: f64) -> Vec<MuscleEngagement> {
    let scale = 100.0 / total;
    let mut result = engagement
        .iter()
        .map(|e| MuscleEngagement {
            muscle: e.muscle,
            percentage: Percentage::clamped(round_to_hundredths(*e.percentage * scale)),
        })
        .collect::<Vec<_>>();

    let new_total = result.iter().map(|e| *e.percentage).sum::<f64>();
    if (new_total - 100.0).abs() > ENGAGEMENT_TOLERANCE {
        if let Some(largest) = result
            .iter_mut()
            .max_by(|a, b| a.percentage.cmp_total(&b.percentage))
        {
            largest.percentage =
                Percentage::clamped(round_to_hundredths(*largest.percentage + 100.0 - new_total));
        }
    }

    result
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate exercise ID \"{0}\"")]
    DuplicateID(ExerciseID),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngagementDeviation {
    pub exercise_id: ExerciseID,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub exercise_id: ExerciseID,
    pub old_total: f64,
    pub new_total: f64,
    pub muscles: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub catalog: Catalog,
    /// Sorted by descending original total.
    pub corrections: Vec<Correction>,
}

#[derive(Default, PartialEq)]
pub struct ExerciseFilter {
    pub name: String,
    pub muscles: HashSet<Muscle>,
    pub equipment: HashSet<Equipment>,
    pub category: HashSet<Category>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Exercise> {
        catalog
            .iter()
            .filter(|e| {
                e.name
                    .as_ref()
                    .to_lowercase()
                    .contains(self.name.to_lowercase().trim())
                    && (self.muscles.is_empty() || self.muscles.iter().all(|m| e.engages(*m)))
                    && (self.equipment.is_empty() || self.equipment.contains(&e.equipment))
                    && (self.category.is_empty() || self.category.contains(&e.category))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.muscles.is_empty()
            && self.equipment.is_empty()
            && self.category.is_empty()
    }

    #[must_use]
    pub fn muscle_list(&self) -> Vec<(Muscle, bool)> {
        Muscle::iter()
            .map(|m| (*m, self.muscles.contains(m)))
            .collect::<Vec<_>>()
    }

    #[must_use]
    pub fn equipment_list(&self) -> Vec<(Equipment, bool)> {
        Equipment::iter()
            .map(|e| (*e, self.equipment.contains(e)))
            .collect::<Vec<_>>()
    }

    #[must_use]
    pub fn category_list(&self) -> Vec<(Category, bool)> {
        Category::iter()
            .map(|c| (*c, self.category.contains(c)))
            .collect::<Vec<_>>()
    }

    pub fn toggle_muscle(&mut self, muscle: Muscle) {
        if !self.muscles.remove(&muscle) {
            self.muscles.insert(muscle);
        }
    }

    pub fn toggle_equipment(&mut self, equipment: Equipment) {
        if !self.equipment.remove(&equipment) {
            self.equipment.insert(equipment);
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.category.remove(&category) {
            self.category.insert(category);
        }
    }
}

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    equipment: Equipment,
    category: Category,
    engagement: &'static [(Muscle, f64)],
}

/// Built-in exercises.
///
/// The engagement values are kept as recorded, most of them add up to more than 100 %.
/// Use [`Catalog::normalize`] to obtain proportional shares.
#[must_use]
pub fn default_exercises() -> Vec<Exercise> {
    EXERCISES
        .iter()
        .filter_map(|e| match e.build() {
            Ok(exercise) => Some(exercise),
            Err(err) => {
                warn!("skipping built-in exercise {}: {err}", e.id);
                None
            }
        })
        .collect()
}

impl CatalogEntry {
    fn build(&self) -> Result<Exercise, CatalogEntryError> {
        Ok(Exercise {
            id: self.id.into(),
            name: Name::new(self.name)?,
            equipment: self.equipment,
            category: self.category,
            engagement: self
                .engagement
                .iter()
                .map(|(muscle, percentage)| {
                    Ok(MuscleEngagement {
                        muscle: *muscle,
                        percentage: Percentage::new(*percentage)?,
                    })
                })
                .collect::<Result<Vec<_>, CatalogEntryError>>()?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
enum CatalogEntryError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Percentage(#[from] PercentageError),
}

const EXERCISES: [CatalogEntry; 14] = [
    CatalogEntry {
        id: "bench_press",
        name: "Bench Press",
        equipment: Equipment::Barbell,
        category: Category::Push,
        engagement: &[
            (Muscle::PectoralisMajor, 85.0),
            (Muscle::TricepsBrachii, 45.0),
            (Muscle::AnteriorDeltoids, 35.0),
        ],
    },
    CatalogEntry {
        id: "bench_dips",
        name: "Bench Dips",
        equipment: Equipment::Bench,
        category: Category::Push,
        engagement: &[
            (Muscle::TricepsBrachii, 85.0),
            (Muscle::PectoralisMajor, 40.0),
            (Muscle::AnteriorDeltoids, 30.0),
        ],
    },
    CatalogEntry {
        id: "pushup",
        name: "Pushup",
        equipment: Equipment::Bodyweight,
        category: Category::Push,
        engagement: &[
            (Muscle::PectoralisMajor, 70.0),
            (Muscle::TricepsBrachii, 50.0),
            (Muscle::AnteriorDeltoids, 40.0),
            (Muscle::CoreStabilizers, 30.0),
        ],
    },
    CatalogEntry {
        id: "dumbbell_shoulder_press",
        name: "Dumbbell Shoulder Press",
        equipment: Equipment::Dumbbell,
        category: Category::Push,
        engagement: &[
            (Muscle::Deltoids, 85.0),
            (Muscle::TricepsBrachii, 40.0),
            (Muscle::Trapezius, 20.0),
        ],
    },
    CatalogEntry {
        id: "dumbbell_curl",
        name: "Dumbbell Curl",
        equipment: Equipment::Dumbbell,
        category: Category::Pull,
        engagement: &[
            (Muscle::BicepsBrachii, 90.0),
            (Muscle::Brachialis, 50.0),
            (Muscle::Brachioradialis, 30.0),
        ],
    },
    CatalogEntry {
        id: "pullup",
        name: "Pullup",
        equipment: Equipment::PullUpBar,
        category: Category::Pull,
        engagement: &[
            (Muscle::LatissimusDorsi, 85.0),
            (Muscle::BicepsBrachii, 60.0),
            (Muscle::Rhomboids, 40.0),
            (Muscle::GripForearms, 35.0),
        ],
    },
    CatalogEntry {
        id: "single_arm_dumbbell_row",
        name: "Single Arm Dumbbell Row",
        equipment: Equipment::Dumbbell,
        category: Category::Pull,
        engagement: &[
            (Muscle::LatissimusDorsi, 80.0),
            (Muscle::Rhomboids, 50.0),
            (Muscle::BicepsBrachii, 40.0),
            (Muscle::RearDeltoids, 35.0),
        ],
    },
    CatalogEntry {
        id: "trx_row",
        name: "TRX Row",
        equipment: Equipment::TRX,
        category: Category::Pull,
        engagement: &[
            (Muscle::LatissimusDorsi, 50.0),
            (Muscle::Rhomboids, 25.0),
            (Muscle::BicepsBrachii, 15.0),
            (Muscle::RearDeltoids, 10.0),
        ],
    },
    CatalogEntry {
        id: "squat",
        name: "Squat",
        equipment: Equipment::Barbell,
        category: Category::Legs,
        engagement: &[
            (Muscle::Quadriceps, 80.0),
            (Muscle::GluteusMaximus, 70.0),
            (Muscle::Hamstrings, 40.0),
        ],
    },
    CatalogEntry {
        id: "goblet_squat",
        name: "Goblet Squat",
        equipment: Equipment::Kettlebell,
        category: Category::Legs,
        engagement: &[
            (Muscle::Quadriceps, 85.0),
            (Muscle::GluteusMaximus, 65.0),
            (Muscle::Core, 30.0),
        ],
    },
    CatalogEntry {
        id: "kettlebell_swing",
        name: "Kettlebell Swing",
        equipment: Equipment::Kettlebell,
        category: Category::Legs,
        engagement: &[
            (Muscle::GluteusMaximus, 85.0),
            (Muscle::Hamstrings, 70.0),
            (Muscle::ErectorSpinae, 50.0),
            (Muscle::Core, 30.0),
        ],
    },
    CatalogEntry {
        id: "box_step_ups",
        name: "Box Step Ups",
        equipment: Equipment::Plybox,
        category: Category::Legs,
        engagement: &[
            (Muscle::Quadriceps, 75.0),
            (Muscle::GluteusMaximus, 60.0),
            (Muscle::Hamstrings, 25.0),
        ],
    },
    CatalogEntry {
        id: "calf_raises",
        name: "Calf Raises",
        equipment: Equipment::Bodyweight,
        category: Category::Legs,
        engagement: &[(Muscle::Gastrocnemius, 70.0), (Muscle::Soleus, 30.0)],
    },
    CatalogEntry {
        id: "plank",
        name: "Plank",
        equipment: Equipment::Bodyweight,
        category: Category::Core,
        engagement: &[
            (Muscle::RectusAbdominis, 60.0),
            (Muscle::TransverseAbdominis, 25.0),
            (Muscle::Obliques, 15.0),
        ],
    },
];
