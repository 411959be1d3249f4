use std::{fmt, slice::Iter, str::FromStr};

use crate::Property;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Muscle {
    // Neck
    LevatorScapulae = 1,
    // Chest
    PectoralisMajor = 11,
    SerratusAnterior = 12,
    // Back
    Trapezius = 21,
    LatissimusDorsi = 22,
    Rhomboids = 23,
    ErectorSpinae = 24,
    // Shoulders
    Deltoids = 31,
    AnteriorDeltoids = 32,
    RearDeltoids = 33,
    Shoulders = 34,
    RotatorCuff = 35,
    // Upper arms
    BicepsBrachii = 41,
    TricepsBrachii = 42,
    Brachialis = 43,
    Anconeus = 44,
    // Forearms
    GripForearms = 51,
    Brachioradialis = 52,
    // Waist
    RectusAbdominis = 61,
    Obliques = 62,
    TransverseAbdominis = 63,
    Core = 64,
    CoreStabilizers = 65,
    // Hips
    GluteusMaximus = 71,
    Glutes = 72,
    HipFlexors = 73,
    // Thighs
    Quadriceps = 81,
    Hamstrings = 82,
    // Calves
    Gastrocnemius = 91,
    Soleus = 92,
}

impl Property for Muscle {
    fn iter() -> Iter<'static, Muscle> {
        static MUSCLES: [Muscle; 30] = [
            Muscle::PectoralisMajor,
            Muscle::TricepsBrachii,
            Muscle::BicepsBrachii,
            Muscle::Deltoids,
            Muscle::AnteriorDeltoids,
            Muscle::RearDeltoids,
            Muscle::LatissimusDorsi,
            Muscle::Quadriceps,
            Muscle::Hamstrings,
            Muscle::Gastrocnemius,
            Muscle::GluteusMaximus,
            Muscle::Glutes,
            Muscle::ErectorSpinae,
            Muscle::RectusAbdominis,
            Muscle::Core,
            Muscle::CoreStabilizers,
            Muscle::Obliques,
            Muscle::Trapezius,
            Muscle::Rhomboids,
            Muscle::Shoulders,
            Muscle::GripForearms,
            Muscle::Brachialis,
            Muscle::Brachioradialis,
            Muscle::Anconeus,
            Muscle::LevatorScapulae,
            Muscle::RotatorCuff,
            Muscle::SerratusAnterior,
            Muscle::Soleus,
            Muscle::HipFlexors,
            Muscle::TransverseAbdominis,
        ];
        MUSCLES.iter()
    }

    fn name(self) -> &'static str {
        self.display_name()
    }
}

impl Muscle {
    /// Name as it appears in exercise data.
    #[must_use]
    pub fn data_name(self) -> &'static str {
        match self {
            Muscle::LevatorScapulae => "Levator_Scapulae",
            Muscle::PectoralisMajor => "Pectoralis_Major",
            Muscle::SerratusAnterior => "Serratus_Anterior",
            Muscle::Trapezius => "Trapezius",
            Muscle::LatissimusDorsi => "Latissimus_Dorsi",
            Muscle::Rhomboids => "Rhomboids",
            Muscle::ErectorSpinae => "Erector_Spinae",
            Muscle::Deltoids => "Deltoids",
            Muscle::AnteriorDeltoids => "Anterior_Deltoids",
            Muscle::RearDeltoids => "Rear_Deltoids",
            Muscle::Shoulders => "Shoulders",
            Muscle::RotatorCuff => "Rotator_Cuff",
            Muscle::BicepsBrachii => "Biceps_Brachii",
            Muscle::TricepsBrachii => "Triceps_Brachii",
            Muscle::Brachialis => "Brachialis",
            Muscle::Anconeus => "Anconeus",
            Muscle::GripForearms => "Grip_Forearms",
            Muscle::Brachioradialis => "Brachioradialis",
            Muscle::RectusAbdominis => "Rectus_Abdominis",
            Muscle::Obliques => "Obliques",
            Muscle::TransverseAbdominis => "Transverse_Abdominis",
            Muscle::Core => "Core",
            Muscle::CoreStabilizers => "Core_Stabilizers",
            Muscle::GluteusMaximus => "Gluteus_Maximus",
            Muscle::Glutes => "Glutes",
            Muscle::HipFlexors => "Hip_Flexors",
            Muscle::Quadriceps => "Quadriceps",
            Muscle::Hamstrings => "Hamstrings",
            Muscle::Gastrocnemius => "Gastrocnemius",
            Muscle::Soleus => "Soleus",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        #[allow(clippy::match_same_arms)]
        match self {
            Muscle::LevatorScapulae => "Neck",
            Muscle::PectoralisMajor => "Chest",
            Muscle::SerratusAnterior => "Serratus",
            Muscle::Trapezius => "Traps",
            Muscle::LatissimusDorsi => "Lats",
            Muscle::Rhomboids => "Rhomboids",
            Muscle::ErectorSpinae => "Lower Back",
            Muscle::Deltoids => "Shoulders",
            Muscle::AnteriorDeltoids => "Front Shoulders",
            Muscle::RearDeltoids => "Rear Shoulders",
            Muscle::Shoulders => "Shoulders",
            Muscle::RotatorCuff => "Rotator Cuff",
            Muscle::BicepsBrachii => "Biceps",
            Muscle::TricepsBrachii => "Triceps",
            Muscle::Brachialis => "Brachialis",
            Muscle::Anconeus => "Anconeus",
            Muscle::GripForearms => "Forearms",
            Muscle::Brachioradialis => "Brachioradialis",
            Muscle::RectusAbdominis => "Abs",
            Muscle::Obliques => "Obliques",
            Muscle::TransverseAbdominis => "Deep Core",
            Muscle::Core => "Core",
            Muscle::CoreStabilizers => "Core",
            Muscle::GluteusMaximus => "Glutes",
            Muscle::Glutes => "Glutes",
            Muscle::HipFlexors => "Hip Flexors",
            Muscle::Quadriceps => "Quads",
            Muscle::Hamstrings => "Hamstrings",
            Muscle::Gastrocnemius => "Calves",
            Muscle::Soleus => "Calves",
        }
    }

    /// Spellings found in older exercise data besides the data and display names.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Muscle::PectoralisMajor => &["Pecs", "Upper_Chest", "Lower_Chest"],
            Muscle::AnteriorDeltoids => &["Anterior_Deltoid", "Deltoids_Anterior", "Front_Delts"],
            Muscle::RearDeltoids => &["Rear_Deltoid", "Deltoids_Posterior", "Rear_Delts"],
            Muscle::Deltoids => &["Lateral_Deltoids", "Deltoids_Lateral", "Side_Delts"],
            Muscle::Trapezius => &["Middle_Trapezius", "Upper_Trapezius"],
            Muscle::GripForearms => &["Forearm_Flexors", "Grip"],
            Muscle::RectusAbdominis => &["Abdominals"],
            Muscle::GluteusMaximus => &["Gluteus"],
            _ => &[],
        }
    }

    /// Key of the capacity baseline this muscle is normalized against.
    ///
    /// Several muscles share one baseline: the deltoid heads, glutes, core and calves.
    #[must_use]
    pub fn capacity_key(self) -> &'static str {
        #[allow(clippy::match_same_arms)]
        match self {
            Muscle::LevatorScapulae => "levator_scapulae",
            Muscle::PectoralisMajor => "pectoralis_major",
            Muscle::SerratusAnterior => "serratus_anterior",
            Muscle::Trapezius => "trapezius",
            Muscle::LatissimusDorsi => "latissimus_dorsi",
            Muscle::Rhomboids => "rhomboids",
            Muscle::ErectorSpinae => "erector_spinae",
            Muscle::Deltoids
            | Muscle::AnteriorDeltoids
            | Muscle::RearDeltoids
            | Muscle::Shoulders => "deltoids",
            Muscle::RotatorCuff => "rotator_cuff",
            Muscle::BicepsBrachii => "biceps_brachii",
            Muscle::TricepsBrachii => "triceps_brachii",
            Muscle::Brachialis => "brachialis",
            Muscle::Anconeus => "anconeus",
            Muscle::GripForearms => "grip_forearms",
            Muscle::Brachioradialis => "brachioradialis",
            Muscle::RectusAbdominis => "rectus_abdominis",
            Muscle::Obliques => "obliques",
            Muscle::TransverseAbdominis => "transverse_abdominis",
            Muscle::Core | Muscle::CoreStabilizers => "core",
            Muscle::GluteusMaximus | Muscle::Glutes => "gluteus_maximus",
            Muscle::HipFlexors => "hip_flexors",
            Muscle::Quadriceps => "quadriceps",
            Muscle::Hamstrings => "hamstrings",
            Muscle::Gastrocnemius | Muscle::Soleus => "calves",
        }
    }

    #[must_use]
    pub fn region(self) -> BodyRegion {
        match self {
            Muscle::LevatorScapulae => BodyRegion::Neck,
            Muscle::PectoralisMajor | Muscle::SerratusAnterior => BodyRegion::Chest,
            Muscle::Trapezius
            | Muscle::LatissimusDorsi
            | Muscle::Rhomboids
            | Muscle::ErectorSpinae => BodyRegion::Back,
            Muscle::Deltoids
            | Muscle::AnteriorDeltoids
            | Muscle::RearDeltoids
            | Muscle::Shoulders
            | Muscle::RotatorCuff => BodyRegion::Shoulders,
            Muscle::BicepsBrachii
            | Muscle::TricepsBrachii
            | Muscle::Brachialis
            | Muscle::Anconeus
            | Muscle::GripForearms
            | Muscle::Brachioradialis => BodyRegion::Arms,
            Muscle::RectusAbdominis
            | Muscle::Obliques
            | Muscle::TransverseAbdominis
            | Muscle::Core
            | Muscle::CoreStabilizers => BodyRegion::Core,
            Muscle::GluteusMaximus
            | Muscle::Glutes
            | Muscle::HipFlexors
            | Muscle::Quadriceps
            | Muscle::Hamstrings
            | Muscle::Gastrocnemius
            | Muscle::Soleus => BodyRegion::Legs,
        }
    }

    /// Hours a muscle needs to recover completely from a training session.
    #[must_use]
    pub fn recovery_hours(self) -> f64 {
        #[allow(clippy::match_same_arms)]
        match self {
            Muscle::ErectorSpinae => 96.0,
            Muscle::Quadriceps | Muscle::Hamstrings | Muscle::GluteusMaximus | Muscle::Glutes => {
                72.0
            }
            Muscle::LatissimusDorsi | Muscle::PectoralisMajor => 60.0,
            Muscle::GripForearms
            | Muscle::Gastrocnemius
            | Muscle::Soleus
            | Muscle::RotatorCuff
            | Muscle::Obliques => 36.0,
            Muscle::RectusAbdominis => 24.0,
            _ => 48.0,
        }
    }

    /// Look up a muscle by data name, known alternate spelling or display name.
    ///
    /// Matching ignores case and treats spaces, dashes and underscores alike. Where several
    /// muscles share a display name, the first one in [`Property::iter`] order wins.
    pub fn from_name(name: &str) -> Result<Self, MuscleError> {
        let key = canonicalize(name);

        if key.is_empty() {
            return Err(MuscleError::Unknown(name.to_string()));
        }

        Muscle::iter()
            .find(|m| canonicalize(m.data_name()) == key)
            .or_else(|| {
                Muscle::iter().find(|m| m.aliases().iter().any(|a| canonicalize(a) == key))
            })
            .or_else(|| Muscle::iter().find(|m| canonicalize(m.display_name()) == key))
            .copied()
            .ok_or_else(|| MuscleError::Unknown(name.to_string()))
    }

    /// All muscles sharing the given capacity key.
    pub fn with_capacity_key(key: &str) -> impl Iterator<Item = Muscle> + '_ {
        Muscle::iter().copied().filter(move |m| m.capacity_key() == key)
    }
}

impl FromStr for Muscle {
    type Err = MuscleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Muscle::from_name(s)
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.data_name())
    }
}

fn canonicalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleError {
    #[error("Unknown muscle \"{0}\"")]
    Unknown(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum BodyRegion {
    Chest,
    Shoulders,
    Back,
    Arms,
    Legs,
    Core,
    Neck,
}

impl Property for BodyRegion {
    fn iter() -> Iter<'static, BodyRegion> {
        static REGIONS: [BodyRegion; 7] = [
            BodyRegion::Chest,
            BodyRegion::Shoulders,
            BodyRegion::Back,
            BodyRegion::Arms,
            BodyRegion::Legs,
            BodyRegion::Core,
            BodyRegion::Neck,
        ];
        REGIONS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            BodyRegion::Chest => "Chest",
            BodyRegion::Shoulders => "Shoulders",
            BodyRegion::Back => "Back",
            BodyRegion::Arms => "Arms",
            BodyRegion::Legs => "Legs",
            BodyRegion::Core => "Core",
            BodyRegion::Neck => "Neck",
        }
    }
}
