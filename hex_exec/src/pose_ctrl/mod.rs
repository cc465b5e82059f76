//! Pose control module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

use crate::kinematics::KinematicsError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during PoseCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum PoseCtrlError {
    #[error("The default pose in the parameters is invalid: {0}")]
    InvalidDefaultPose(KinematicsError),

    #[error("PoseCtrl must be initialised before it can be processed")]
    NotInitialised,
}
