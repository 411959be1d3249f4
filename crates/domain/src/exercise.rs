use std::{collections::BTreeMap, fmt, slice::Iter, str::FromStr};

use derive_more::{AsRef, Deref, Display, From};

use crate::{Muscle, Name};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub equipment: Equipment,
    pub category: Category,
    pub engagement: Vec<MuscleEngagement>,
}

impl Exercise {
    #[must_use]
    pub fn engagement_map(&self) -> BTreeMap<Muscle, Percentage> {
        self.engagement
            .iter()
            .map(|e| (e.muscle, e.percentage))
            .collect()
    }

    #[must_use]
    pub fn engagement_total(&self) -> f64 {
        self.engagement.iter().map(|e| *e.percentage).sum()
    }

    #[must_use]
    pub fn engages(&self, muscle: Muscle) -> bool {
        self.engagement
            .iter()
            .any(|e| e.muscle == muscle && *e.percentage > 0.0)
    }

    /// Engaged muscles grouped by role, each group sorted by descending percentage.
    #[must_use]
    pub fn muscles_by_role(&self) -> BTreeMap<EngagementRole, Vec<MuscleEngagement>> {
        let mut sorted = self.engagement.clone();
        sorted.sort_by(|a, b| b.percentage.cmp_total(&a.percentage));
        let mut result: BTreeMap<EngagementRole, Vec<MuscleEngagement>> = BTreeMap::new();
        for engagement in sorted {
            result
                .entry(EngagementRole::from(engagement.percentage))
                .or_default()
                .push(engagement);
        }
        result
    }
}

#[derive(AsRef, Deref, Debug, Display, From, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleEngagement {
    pub muscle: Muscle,
    pub percentage: Percentage,
}

/// Share of an exercise's effort attributed to one muscle, in percent.
#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.0);
    pub const FULL: Percentage = Percentage(100.0);

    pub fn new(value: f64) -> Result<Self, PercentageError> {
        if !value.is_finite() {
            return Err(PercentageError::NotFinite);
        }

        if !(0.0..=100.0).contains(&value) {
            return Err(PercentageError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    pub(crate) fn clamped(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    pub(crate) fn cmp_total(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PercentageError {
    #[error("Percentage must be a number")]
    NotFinite,
    #[error("Percentage must be in the range 0 to 100 ({0})")]
    OutOfRange(f64),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum EngagementRole {
    Primary,
    Secondary,
    Stabilizer,
}

impl From<Percentage> for EngagementRole {
    fn from(value: Percentage) -> Self {
        if *value > 50.0 {
            EngagementRole::Primary
        } else if *value >= 20.0 {
            EngagementRole::Secondary
        } else {
            EngagementRole::Stabilizer
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Equipment {
    Barbell,
    Bench,
    Bodyweight,
    Cable,
    Dumbbell,
    Kettlebell,
    Machine,
    Plybox,
    PullUpBar,
    TRX,
}

impl Property for Equipment {
    fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 10] = [
            Equipment::Barbell,
            Equipment::Bench,
            Equipment::Bodyweight,
            Equipment::Cable,
            Equipment::Dumbbell,
            Equipment::Kettlebell,
            Equipment::Machine,
            Equipment::Plybox,
            Equipment::PullUpBar,
            Equipment::TRX,
        ];
        EQUIPMENT.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Bench => "Bench",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Cable => "Cable",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Machine => "Machine",
            Equipment::Plybox => "Plybox",
            Equipment::PullUpBar => "Pull-up_Bar",
            Equipment::TRX => "TRX",
        }
    }
}

impl FromStr for Equipment {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_name(s, &[("Body Weight", Equipment::Bodyweight)])
            .ok_or_else(|| PropertyError::Equipment(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Push,
    Pull,
    Legs,
    Core,
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORY: [Category; 4] =
            [Category::Push, Category::Pull, Category::Legs, Category::Core];
        CATEGORY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::Push => "Push",
            Category::Pull => "Pull",
            Category::Legs => "Legs",
            Category::Core => "Core",
        }
    }
}

impl FromStr for Category {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_name(
            s,
            &[
                ("ChestTriceps", Category::Push),
                ("BackBiceps", Category::Pull),
                ("Abs", Category::Core),
            ],
        )
        .ok_or_else(|| PropertyError::Category(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PropertyError {
    #[error("Unknown equipment \"{0}\"")]
    Equipment(String),
    #[error("Unknown category \"{0}\"")]
    Category(String),
}

pub trait Property: Clone + Copy + Sized + 'static {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

fn from_name<P: Property>(name: &str, aliases: &[(&str, P)]) -> Option<P> {
    let key = simplify(name);
    P::iter()
        .copied()
        .find(|p| simplify(p.name()) == key)
        .or_else(|| {
            aliases
                .iter()
                .find(|(alias, _)| simplify(alias) == key)
                .map(|(_, p)| *p)
        })
}

fn simplify(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
