//! # Point definitions
//!
//! Frame: x to the right of the body, y forwards towards the head, z upwards.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::pose::{LegId, NUM_LEGS};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the head point.
pub const HEAD_POINT_NAME: &str = "head";

/// Name of the body centre point.
pub const CENTER_POINT_NAME: &str = "center";

/// Names of the points along a leg, hip to foot.
pub const LEG_POINT_NAMES: [&str; 4] = ["hip", "coxia", "femur", "tip"];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A named point in the body frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Points making up the body of the hexapod.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyPoints {
    /// Point on the front edge marking the forward direction.
    pub head: Point,

    /// Centre of the body, the origin of the body frame.
    pub center: Point,

    /// Vertices of the body outline, one per leg in canonical order. Each is named after the leg
    /// attached to it.
    pub vertices: [Point; NUM_LEGS],
}

/// Points making up a single leg.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LegPoints {
    /// Index of the leg, see [`LegId::id`].
    pub id: usize,

    /// The leg these points belong to.
    pub name: LegId,

    /// Attachment point of the leg on the body, the axis of the coxia joint.
    pub hip: Point,

    /// End of the coxia segment, the axis of the femur joint.
    pub coxia: Point,

    /// End of the femur segment, the axis of the tibia joint.
    pub femur: Point,

    /// End of the tibia segment, the foot tip.
    pub tip: Point,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Point {
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64, z: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
        }
    }

    /// Get the coordinates as an array.
    pub fn xyz(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

impl BodyPoints {
    /// The body vertex the given leg attaches to.
    pub fn vertex(&self, leg: LegId) -> &Point {
        &self.vertices[leg.id()]
    }

    /// Iterate over all body points: vertices in canonical order, then head and centre.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.vertices
            .iter()
            .chain(std::iter::once(&self.head))
            .chain(std::iter::once(&self.center))
    }
}

impl LegPoints {
    /// The leg's points ordered hip to foot.
    pub fn points(&self) -> [&Point; 4] {
        [&self.hip, &self.coxia, &self.femur, &self.tip]
    }

    /// Straight line distance from the hip to the foot tip.
    pub fn reach(&self) -> f64 {
        self.hip.distance_to(&self.tip)
    }
}
