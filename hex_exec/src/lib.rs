//! # Hexapod library.
//!
//! This library allows other crates in the workspace to access items defined inside the hexapod
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Kinematic model - converts measurements and joint angles into the points of a virtual hexapod
pub mod kinematics;

/// Pose control module - selects between predefined and custom poses and drives the model
pub mod pose_ctrl;
