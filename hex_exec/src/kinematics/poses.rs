//! Predefined poses
//!
//! New poses are added by adding an entry to `PREDEFINED_POSES`, nothing
//! else needs to know about them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use hex_if::pose::{LegId, LegPose, PoseMap, NUM_LEGS};
use std::fmt;
use std::str::FromStr;

// Internal
use super::KinematicsError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Selector name meaning "no predefined pose, use the custom pose".
pub const NONE_POSE_NAME: &str = "NONE";

/// Standing leg: knee raised, foot planted below and outside the hip.
const STAND: [f64; 3] = [0.0, 30.0, -90.0];

/// All predefined poses. Angles are `[coxia, femur, tibia]` in degrees, one
/// entry per leg in canonical order (see `LegId::ALL`).
pub static PREDEFINED_POSES: &[PredefinedPose] = &[
    PredefinedPose {
        name: "NEUTRAL",
        angles: [[0.0, 0.0, 0.0]; NUM_LEGS],
    },
    PredefinedPose {
        name: "STAND",
        angles: [STAND; NUM_LEGS],
    },
    PredefinedPose {
        name: "CROUCH",
        angles: [[0.0, 60.0, -120.0]; NUM_LEGS],
    },
    PredefinedPose {
        name: "TWIST",
        angles: [[20.0, 30.0, -90.0]; NUM_LEGS],
    },
    PredefinedPose {
        name: "RAISE_FRONT",
        angles: [
            STAND,
            [0.0, 60.0, -30.0],
            [0.0, 60.0, -30.0],
            STAND,
            STAND,
            STAND,
        ],
    },
    PredefinedPose {
        name: "TRIPOD_A",
        angles: [
            [0.0, 50.0, -90.0],
            STAND,
            [0.0, 50.0, -90.0],
            STAND,
            [0.0, 50.0, -90.0],
            STAND,
        ],
    },
    PredefinedPose {
        name: "TRIPOD_B",
        angles: [
            STAND,
            [0.0, 50.0, -90.0],
            STAND,
            [0.0, 50.0, -90.0],
            STAND,
            [0.0, 50.0, -90.0],
        ],
    },
    PredefinedPose {
        name: "WAVE",
        angles: [
            STAND,
            [30.0, 75.0, 0.0],
            STAND,
            STAND,
            STAND,
            STAND,
        ],
    },
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A named, complete pose.
#[derive(Debug, PartialEq)]
pub struct PredefinedPose {
    /// Name used to select the pose.
    pub name: &'static str,

    /// `[coxia, femur, tibia]` for each leg in canonical order.
    ///
    /// Units: degrees
    pub angles: [[f64; 3]; NUM_LEGS],
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Selects whether a predefined pose overrides the custom pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseSelector {
    /// No predefined pose, the custom pose is used.
    None,

    /// The given predefined pose is used and any custom pose ignored.
    Predefined(&'static PredefinedPose),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PredefinedPose {
    /// Get the pose of a single leg.
    pub fn leg_pose(&self, leg: LegId) -> LegPose {
        let [coxia, femur, tibia] = self.angles[leg.id()];
        LegPose::new(leg, coxia, femur, tibia)
    }

    /// Get the complete pose map for this pose.
    pub fn pose_map(&self) -> PoseMap {
        LegId::ALL.iter().map(|l| self.leg_pose(*l)).collect()
    }
}

impl PoseSelector {
    /// The name of the selected pose, `NONE` if there isn't one.
    pub fn name(&self) -> &'static str {
        match self {
            PoseSelector::None => NONE_POSE_NAME,
            PoseSelector::Predefined(p) => p.name,
        }
    }
}

impl Default for PoseSelector {
    fn default() -> Self {
        PoseSelector::None
    }
}

impl FromStr for PoseSelector {
    type Err = KinematicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match find(s) {
            Ok(p) => Ok(PoseSelector::Predefined(p)),
            Err(KinematicsError::ReservedPoseName) => Ok(PoseSelector::None),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for PoseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find a predefined pose by name.
///
/// `NONE` is reserved and never resolves to a pose.
pub fn find(name: &str) -> Result<&'static PredefinedPose, KinematicsError> {
    let name = name.trim();

    if name == NONE_POSE_NAME {
        return Err(KinematicsError::ReservedPoseName);
    }

    PREDEFINED_POSES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| KinematicsError::UnknownPose(name.to_string()))
}

/// All valid selector names, `NONE` first.
pub fn selector_names() -> Vec<&'static str> {
    std::iter::once(NONE_POSE_NAME)
        .chain(PREDEFINED_POSES.iter().map(|p| p.name))
        .collect()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
