//! Body geometry calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use hex_if::{
    points::{BodyPoints, Point, CENTER_POINT_NAME, HEAD_POINT_NAME, LEG_POINT_NAMES},
    pose::{LegId, Measurements, NUM_LEGS},
};
use nalgebra::{Unit, Vector3};

// Internal
use util::convert::{named_point, Convert};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Where each leg attaches to the body and which way it points when its
/// coxia is at zero, in canonical leg order.
pub const LEG_LAYOUT: [LegLayout; NUM_LEGS] = [
    LegLayout {
        leg: LegId::RightMiddle,
        vertex: BodyVertex::MiddleRight,
        baseline_deg: 0.0,
    },
    LegLayout {
        leg: LegId::RightFront,
        vertex: BodyVertex::FrontRight,
        baseline_deg: 45.0,
    },
    LegLayout {
        leg: LegId::LeftFront,
        vertex: BodyVertex::FrontLeft,
        baseline_deg: 135.0,
    },
    LegLayout {
        leg: LegId::LeftMiddle,
        vertex: BodyVertex::MiddleLeft,
        baseline_deg: 180.0,
    },
    LegLayout {
        leg: LegId::LeftBack,
        vertex: BodyVertex::BackLeft,
        baseline_deg: 225.0,
    },
    LegLayout {
        leg: LegId::RightBack,
        vertex: BodyVertex::BackRight,
        baseline_deg: 315.0,
    },
];

/// Tolerance below which the head is considered to coincide with the centre.
const DEGENERATE_BODY_TOL: f64 = 1e-12;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Placement of a single leg on the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegLayout {
    /// The leg being placed.
    pub leg: LegId,

    /// The body vertex the leg's hip sits on.
    pub vertex: BodyVertex,

    /// Direction the leg points with a zero coxia angle, measured
    /// anticlockwise about +z from +x.
    ///
    /// Units: degrees
    pub baseline_deg: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The six vertices of the body outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyVertex {
    FrontRight,
    MiddleRight,
    BackRight,
    FrontLeft,
    MiddleLeft,
    BackLeft,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BodyVertex {
    /// Position of this vertex in the body frame.
    pub fn position(self, measurements: &Measurements) -> Vector3<f64> {
        let m = measurements;

        match self {
            BodyVertex::FrontRight => Vector3::new(m.front, m.side, 0.0),
            BodyVertex::MiddleRight => Vector3::new(m.middle, 0.0, 0.0),
            BodyVertex::BackRight => Vector3::new(m.front, -m.side, 0.0),
            BodyVertex::FrontLeft => Vector3::new(-m.front, m.side, 0.0),
            BodyVertex::MiddleLeft => Vector3::new(-m.middle, 0.0, 0.0),
            BodyVertex::BackLeft => Vector3::new(-m.front, -m.side, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the layout entry for a leg.
pub fn leg_layout(leg: LegId) -> &'static LegLayout {
    &LEG_LAYOUT[leg.id()]
}

/// Calculate the points of the body from the measurements.
///
/// Negative or non-finite measurements are treated as zero.
pub fn build_body(measurements: &Measurements) -> BodyPoints {
    let m = measurements.sanitised();

    let vertices =
        LEG_LAYOUT.map(|l| named_point(l.leg.name(), &l.vertex.position(&m)));

    BodyPoints {
        head: Point::new(HEAD_POINT_NAME, 0.0, m.side, 0.0),
        center: Point::new(CENTER_POINT_NAME, 0.0, 0.0, 0.0),
        vertices,
    }
}

/// Get the hip point of every leg, in canonical order.
///
/// Hips are the body vertices given by `LEG_LAYOUT`.
pub fn build_leg_origins(body: &BodyPoints) -> [Point; NUM_LEGS] {
    LEG_LAYOUT.map(|l| {
        let mut hip = body.vertex(l.leg).clone();
        hip.name = LEG_POINT_NAMES[0].to_string();
        hip
    })
}

/// Unit vector pointing from the centre of the body towards the head.
///
/// A body with no forward extent has no head direction of its own, in which
/// case +y is used.
pub fn head_direction(body: &BodyPoints) -> Unit<Vector3<f64>> {
    let head: Vector3<f64> = body.head.convert();
    let center: Vector3<f64> = body.center.convert();

    Unit::try_new(head - center, DEGENERATE_BODY_TOL).unwrap_or_else(Vector3::y_axis)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
