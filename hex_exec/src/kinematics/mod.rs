//! Kinematic model of the hexapod
//!
//! The model is a pure forward kinematics calculation: given the body
//! measurements and the joint angles of each leg it produces the position of
//! every point on the body and legs. Nothing is carried between calculations,
//! a `VirtualHexapod` is rebuilt from its inputs every time.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod body;
mod leg;
mod model;
mod poses;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use body::*;
pub use leg::*;
pub use model::*;
pub use poses::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur when using the kinematic model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    #[error("{0:?} is not a predefined pose")]
    UnknownPose(String),

    #[error("\"NONE\" selects the custom pose and has no predefined geometry")]
    ReservedPoseName,
}

// ---------------------------------------------------------------------------
// TEST UTILITIES
// ---------------------------------------------------------------------------
