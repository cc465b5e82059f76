//! # Hexapod interface crate.
//!
//! Provides the value types shared between the kinematic model, the executable and any external
//! renderer: body measurements, leg poses and the named points produced by the model.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Measurements, leg identifiers and joint angle poses, plus their text parsing
pub mod pose;

/// Named 3D points making up the body and legs
pub mod points;
