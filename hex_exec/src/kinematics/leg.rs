//! Leg forward kinematics
//!
//! Each leg is a chain of three segments. The coxia yaws about the vertical
//! axis from the leg's baseline direction, then the femur and tibia pitch in
//! the vertical plane containing the coxia. Each joint sits at the previous
//! joint plus the segment length along the accumulated orientation:
//!
//! ```text
//! R_coxia = Rz(baseline + side_sign * coxia)
//! R_femur = R_coxia * pitch(femur)
//! R_tibia = R_femur * pitch(tibia)
//! ```
//!
//! Only the yaw is mirrored between sides. Left legs point the opposite way
//! to right legs, so a pitch about their own outward axis is already a mirror
//! image of the same pitch on the right.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use hex_if::{
    points::{LegPoints, Point, LEG_POINT_NAMES},
    pose::{LegPose, Measurements},
};
use log::trace;
use nalgebra::{Rotation3, Vector3};

// Internal
use super::leg_layout;
use util::{
    convert::{named_point, Convert},
    maths::wrap_deg_360,
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the points of a leg from its hip and pose.
///
/// Segment lengths come from `measurements` and are shared between all legs.
/// Non-finite angles and negative or non-finite lengths are treated as zero,
/// a zero length segment places its joint on top of the previous one.
pub fn build_leg(hip: &Point, measurements: &Measurements, pose: &LegPose) -> LegPoints {
    let pose = pose.sanitised();
    let m = measurements.sanitised();
    let leg = pose.name;

    // Yaw is mirrored for left legs so that the same coxia angle moves both
    // sides symmetrically
    let yaw_deg = leg_layout(leg).baseline_deg + leg.side().yaw_sign() * pose.coxia;

    let coxia_frame = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw_deg.to_radians());
    let femur_frame = coxia_frame * pitch(pose.femur);
    let tibia_frame = femur_frame * pitch(pose.tibia);

    let hip_pos: Vector3<f64> = hip.convert();
    let coxia_pos = hip_pos + coxia_frame * segment(m.coxia);
    let femur_pos = coxia_pos + femur_frame * segment(m.femur);
    let tip_pos = femur_pos + tibia_frame * segment(m.tibia);

    trace!(
        "{} heading {:.2} deg, tip at [{:.3}, {:.3}, {:.3}]",
        leg,
        wrap_deg_360(yaw_deg),
        tip_pos.x,
        tip_pos.y,
        tip_pos.z
    );

    LegPoints {
        id: leg.id(),
        name: leg,
        hip: named_point(LEG_POINT_NAMES[0], &hip_pos),
        coxia: named_point(LEG_POINT_NAMES[1], &coxia_pos),
        femur: named_point(LEG_POINT_NAMES[2], &femur_pos),
        tip: named_point(LEG_POINT_NAMES[3], &tip_pos),
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Rotation raising the local outward (+x) axis towards +z by the given
/// angle.
fn pitch(angle_deg: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), -angle_deg.to_radians())
}

/// A segment of the given length along the local outward axis.
fn segment(length: f64) -> Vector3<f64> {
    Vector3::new(length, 0.0, 0.0)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::kinematics::{build_body, build_leg_origins, test_util::*};
    use hex_if::pose::LegId;

    fn measurements() -> Measurements {
        Measurements::new(100.0, 100.0, 100.0, 50.0, 80.0, 120.0)
    }

    fn leg(id: LegId, coxia: f64, femur: f64, tibia: f64) -> LegPoints {
        let m = measurements();
        let hips = build_leg_origins(&build_body(&m));
        build_leg(&hips[id.id()], &m, &LegPose::new(id, coxia, femur, tibia))
    }

    #[test]
    fn test_neutral_leg() {
        // Right middle points straight along +x from its hip at (100, 0)
        let points = leg(LegId::RightMiddle, 0.0, 0.0, 0.0);

        assert_points_close(&points.hip, [100.0, 0.0, 0.0]);
        assert_points_close(&points.coxia, [150.0, 0.0, 0.0]);
        assert_points_close(&points.femur, [230.0, 0.0, 0.0]);
        assert_points_close(&points.tip, [350.0, 0.0, 0.0]);
        assert_eq!(points.name, LegId::RightMiddle);
        assert_eq!(points.id, 0);
        assert_eq!(points.tip.name, "tip");
    }

    #[test]
    fn test_pitch_chain() {
        // Femur up 90 then tibia back down 90: the femur is vertical and the
        // tibia horizontal again
        let points = leg(LegId::RightMiddle, 0.0, 90.0, -90.0);

        assert_points_close(&points.coxia, [150.0, 0.0, 0.0]);
        assert_points_close(&points.femur, [150.0, 0.0, 80.0]);
        assert_points_close(&points.tip, [270.0, 0.0, 80.0]);

        // Tibia pitch accumulates on top of the femur
        let points = leg(LegId::LeftMiddle, 0.0, 30.0, -90.0);
        let drop = 120.0 * (60f64).to_radians().sin();
        assert_close(points.tip.z, 80.0 * (30f64).to_radians().sin() - drop);
    }

    #[test]
    fn test_coxia_yaw() {
        // Positive coxia swings a right leg anticlockwise, i.e. forwards
        let points = leg(LegId::RightMiddle, 90.0, 0.0, 0.0);
        assert_points_close(&points.tip, [100.0, 250.0, 0.0]);

        // ...and a left leg clockwise, also forwards
        let points = leg(LegId::LeftMiddle, 90.0, 0.0, 0.0);
        assert_points_close(&points.tip, [-100.0, 250.0, 0.0]);
    }

    #[test]
    fn test_mirrored_legs() {
        for id in LegId::ALL.iter() {
            let this = leg(*id, 25.0, 40.0, -70.0);
            let other = leg(id.mirror(), 25.0, 40.0, -70.0);

            for (a, b) in this.points().iter().zip(other.points().iter()) {
                assert_points_close(a, [-b.x, b.y, b.z]);
            }
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        // NaN angles are zeroed
        let nan = leg(LegId::RightFront, std::f64::NAN, std::f64::NAN, 0.0);
        let zero = leg(LegId::RightFront, 0.0, 0.0, 0.0);
        assert_eq!(nan, zero);

        // Zero length segments collapse onto the hip
        let hip = Point::new("hip", 1.0, 2.0, 3.0);
        let points = build_leg(
            &hip,
            &Measurements::default(),
            &LegPose::new(LegId::LeftBack, 10.0, 20.0, 30.0),
        );
        for p in points.points().iter() {
            assert_eq!(p.xyz(), [1.0, 2.0, 3.0]);
        }
    }
}
