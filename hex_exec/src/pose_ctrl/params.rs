//! Parameters structure for PoseCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use hex_if::pose::Measurements;
use serde::{Deserialize, Serialize};

use crate::kinematics::NONE_POSE_NAME;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Pose control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// Measurements used until measurements are provided as input.
    #[serde(default)]
    pub default_measurements: Measurements,

    // ---- POSE ----
    /// Predefined pose used when the input doesn't select one. `NONE` uses
    /// the custom pose.
    #[serde(default = "default_pose")]
    pub default_pose: String,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            default_measurements: Measurements::default(),
            default_pose: default_pose(),
        }
    }
}

fn default_pose() -> String {
    NONE_POSE_NAME.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_params() {
        let params: Params = util::params::from_str(
            r#"
            [default_measurements]
            front = 100.0
            side = 100.0
            middle = 100.0
            coxia = 50.0
            femur = 80.0
            "#,
        )
        .unwrap();

        assert_eq!(params.default_pose, "NONE");
        assert_eq!(
            params.default_measurements,
            Measurements::new(100.0, 100.0, 100.0, 50.0, 80.0, 0.0)
        );
    }
}
