//! Virtual hexapod model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use hex_if::{
    points::{BodyPoints, LegPoints, Point},
    pose::{LegId, LegPose, Measurements, PoseMap, NUM_LEGS},
};
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use super::{build_body, build_leg, build_leg_origins};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The computed points of a hexapod for one set of measurements and pose.
///
/// A `VirtualHexapod` is a plain value: it is rebuilt from its inputs on
/// every change, and copies handed to a renderer are independent of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualHexapod {
    measurements: Measurements,
    body: BodyPoints,
    legs: [LegPoints; NUM_LEGS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VirtualHexapod {
    /// Create a hexapod with every leg in the neutral pose.
    pub fn new(front: f64, middle: f64, side: f64, coxia: f64, femur: f64, tibia: f64) -> Self {
        Self::from_measurements(Measurements::new(front, middle, side, coxia, femur, tibia))
    }

    /// Create a hexapod with every leg in the neutral pose.
    pub fn from_measurements(measurements: Measurements) -> Self {
        Self::with_pose(measurements, &PoseMap::new())
    }

    /// Create a hexapod in the given pose.
    pub fn with_pose(measurements: Measurements, poses: &PoseMap) -> Self {
        let measurements = measurements.sanitised();
        let body = build_body(&measurements);
        let legs = build_legs(&body, &measurements, poses);

        Self {
            measurements,
            body,
            legs,
        }
    }

    /// Recalculate every leg for the given pose.
    ///
    /// Legs missing from `poses` take the neutral pose, so the result does
    /// not depend on the previous pose of the hexapod.
    pub fn update(&mut self, poses: &PoseMap) {
        if !poses.is_complete() {
            debug!(
                "Pose has {} of {} legs, using neutral for {:?}",
                poses.len(),
                NUM_LEGS,
                poses.missing_legs()
            );
        }

        self.legs = build_legs(&self.body, &self.measurements, poses);
    }

    /// The (sanitised) measurements this hexapod was built from.
    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn body(&self) -> &BodyPoints {
        &self.body
    }

    /// All legs in canonical order.
    pub fn legs(&self) -> &[LegPoints; NUM_LEGS] {
        &self.legs
    }

    pub fn leg(&self, leg: LegId) -> &LegPoints {
        &self.legs[leg.id()]
    }

    /// Every named point of the hexapod, body points first then each leg hip
    /// to foot. Body points have no leg.
    pub fn points(&self) -> Vec<(Option<LegId>, &Point)> {
        let mut points: Vec<(Option<LegId>, &Point)> =
            self.body.iter().map(|p| (None, p)).collect();

        for leg in self.legs.iter() {
            points.extend(leg.points().iter().map(|p| (Some(leg.name), *p)));
        }

        points
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn build_legs(
    body: &BodyPoints,
    measurements: &Measurements,
    poses: &PoseMap,
) -> [LegPoints; NUM_LEGS] {
    let hips = build_leg_origins(body);

    LegId::ALL.map(|leg| {
        // The slot decides which leg is built, whatever the pose says
        let p = poses.get_or_neutral(leg);
        let pose = LegPose::new(leg, p.coxia, p.femur, p.tibia);

        build_leg(&hips[leg.id()], measurements, &pose)
    })
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::kinematics::{test_util::*, LEG_LAYOUT};

    fn measurements() -> Measurements {
        Measurements::new(100.0, 100.0, 100.0, 50.0, 80.0, 120.0)
    }

    fn sample_pose() -> PoseMap {
        let mut poses = PoseMap::new();
        poses.insert(LegPose::new(LegId::RightFront, 15.0, 30.0, -75.0));
        poses.insert(LegPose::new(LegId::LeftBack, -20.0, 10.0, -45.0));
        poses
    }

    #[test]
    fn test_neutral_reach() {
        let hexapod = VirtualHexapod::from_measurements(measurements());

        for leg in hexapod.legs().iter() {
            assert_close(leg.reach(), 250.0);
            assert_close(leg.tip.z, 0.0);
        }

        // Hips match the layout table scaled by the measurements
        for layout in LEG_LAYOUT.iter() {
            let expected = layout.vertex.position(&measurements());
            assert_points_close(
                &hexapod.leg(layout.leg).hip,
                [expected.x, expected.y, expected.z],
            );
        }
    }

    #[test]
    fn test_neutral_symmetry() {
        let hexapod = VirtualHexapod::from_measurements(measurements());

        // Left/right across the sagittal plane
        for leg in LegId::ALL.iter() {
            let tip = &hexapod.leg(*leg).tip;
            let other = &hexapod.leg(leg.mirror()).tip;
            assert_points_close(tip, [-other.x, other.y, other.z]);
        }

        // Front/back across the frontal plane
        let pairs = [
            (LegId::RightFront, LegId::RightBack),
            (LegId::LeftFront, LegId::LeftBack),
        ];
        for (front, back) in pairs.iter() {
            let tip = &hexapod.leg(*front).tip;
            let other = &hexapod.leg(*back).tip;
            assert_points_close(tip, [other.x, -other.y, other.z]);
        }
    }

    #[test]
    fn test_zero_collapse() {
        let hexapod = VirtualHexapod::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

        for (_, p) in hexapod.points() {
            assert_eq!(p.xyz(), [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = VirtualHexapod::with_pose(measurements(), &sample_pose());
        let b = VirtualHexapod::with_pose(measurements(), &sample_pose());

        assert_eq!(a, b);
    }

    #[test]
    fn test_update_idempotent() {
        let mut hexapod = VirtualHexapod::from_measurements(measurements());

        hexapod.update(&sample_pose());
        let first = hexapod.clone();
        hexapod.update(&sample_pose());

        assert_eq!(hexapod, first);
        assert_eq!(first, VirtualHexapod::with_pose(measurements(), &sample_pose()));
    }

    #[test]
    fn test_partial_pose() {
        let neutral = VirtualHexapod::from_measurements(measurements());

        // Start from a fully posed hexapod to check nothing carries over
        let mut hexapod =
            VirtualHexapod::with_pose(measurements(), &PoseMap::uniform(40.0, 20.0, -60.0));
        hexapod.update(&sample_pose());

        for leg in LegId::ALL.iter() {
            match leg {
                LegId::RightFront | LegId::LeftBack => {
                    assert_ne!(hexapod.leg(*leg), neutral.leg(*leg))
                }
                _ => assert_eq!(hexapod.leg(*leg), neutral.leg(*leg)),
            }
        }
    }

    #[test]
    fn test_points() {
        let hexapod = VirtualHexapod::from_measurements(measurements());
        let points = hexapod.points();

        assert_eq!(points.len(), 8 + 4 * NUM_LEGS);
        assert_eq!(points[6].1.name, "head");
        assert_eq!(points[8], (Some(LegId::RightMiddle), &hexapod.leg(LegId::RightMiddle).hip));
    }

    #[test]
    fn test_pose_map_json_builds_keyed_leg() {
        // An entry naming a different leg still builds the leg of its key
        let poses: PoseMap = serde_json::from_str(
            r#"{"right-front": {"id": 4, "name": "left-back", "coxia": 0, "femur": 0, "tibia": 0}}"#,
        )
        .unwrap();
        let hexapod = VirtualHexapod::with_pose(measurements(), &poses);
        let neutral = VirtualHexapod::from_measurements(measurements());

        assert_eq!(hexapod, neutral);
        assert_eq!(hexapod.leg(LegId::RightFront).name, LegId::RightFront);

        let names: Vec<LegId> = hexapod.legs().iter().map(|l| l.name).collect();
        assert_eq!(names, LegId::ALL.to_vec());
    }

    #[test]
    fn test_serde_round_trip() {
        let hexapod = VirtualHexapod::with_pose(measurements(), &sample_pose());

        let json = serde_json::to_string(&hexapod).unwrap();
        let back: VirtualHexapod = serde_json::from_str(&json).unwrap();

        assert_eq!(back, hexapod);
        assert!(json.contains("\"right-front\""));
        assert!(json.contains("\"tip\""));

        // Coordinates come back bit for bit, including the neutral corner legs
        let neutral = VirtualHexapod::from_measurements(measurements());
        let json = serde_json::to_string_pretty(&neutral).unwrap();
        let back: VirtualHexapod = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.leg(LegId::RightFront).femur.x.to_bits(),
            neutral.leg(LegId::RightFront).femur.x.to_bits()
        );
        assert_eq!(back, neutral);
    }
}
