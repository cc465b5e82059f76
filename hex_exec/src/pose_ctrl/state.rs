//! Implementations for the PoseCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use hex_if::pose::{parse_pose_map, LegId, Measurements, PoseMap, NUM_LEGS};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

// Internal
use super::{Params, PoseCtrlError};
use crate::kinematics::{PoseSelector, VirtualHexapod};
use util::{module::State, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pose control module state
#[derive(Default)]
pub struct PoseCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// Selector used when the input doesn't provide one, `None` until
    /// initialised.
    pub(crate) default_selector: Option<PoseSelector>,

    /// Measurements from the most recent input that had any.
    pub(crate) current_measurements: Option<Measurements>,

    pub(crate) output: Option<VirtualHexapod>,
}

/// Input data to Pose Control.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// New measurements, or `None` to keep using the previous ones.
    pub measurements: Option<Measurements>,

    /// Predefined pose selection, or `None` to use the default from the
    /// parameters.
    pub selector: Option<PoseSelector>,

    /// The custom pose, used only when no predefined pose is selected. If
    /// there is no custom pose every leg is neutral.
    pub custom_pose: Option<PoseInput>,
}

/// A custom pose.
#[derive(Debug, Clone)]
pub enum PoseInput {
    /// A pose map, possibly partial.
    Map(PoseMap),

    /// A pose map as JSON text, keyed by leg name or index. Text that can't
    /// be parsed results in every leg taking the neutral pose.
    Json(String),

    /// The same angles on every leg.
    ///
    /// Units: degrees
    Uniform { coxia: f64, femur: f64, tibia: f64 },
}

/// Status report for PoseCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq)]
pub struct StatusReport {
    /// A predefined pose was used, any custom pose was ignored.
    pub predefined_active: bool,

    /// No measurements were given so the previous (or default) ones were used.
    pub measurements_reused: bool,

    /// The custom pose text could not be parsed.
    pub pose_parse_failed: bool,

    /// Legs which took the neutral pose because the pose had no entry for
    /// them, in canonical order.
    pub legs_defaulted: [bool; NUM_LEGS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for PoseCtrl {
    type InitData = Params;
    type InitError = PoseCtrlError;

    type InputData = InputData;
    type OutputData = VirtualHexapod;
    type StatusReport = StatusReport;
    type ProcError = PoseCtrlError;

    /// Initialise the PoseCtrl module.
    ///
    /// Expected init data is the loaded parameters.
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: Option<&Session>,
    ) -> Result<(), Self::InitError> {
        let selector = init_data
            .default_pose
            .parse::<PoseSelector>()
            .map_err(PoseCtrlError::InvalidDefaultPose)?;

        info!(
            "PoseCtrl initialised, default pose {}, default measurements {:?} (leg reach {:.1})",
            selector,
            init_data.default_measurements,
            init_data.default_measurements.sanitised().leg_reach()
        );

        self.default_selector = Some(selector);
        self.current_measurements = None;
        self.output = None;
        self.params = init_data;

        Ok(())
    }

    /// Perform cyclic processing of Pose Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let default_selector = self.default_selector.ok_or(PoseCtrlError::NotInitialised)?;

        // Clear the status report
        self.report = StatusReport::default();

        // Use the new measurements if there are any, otherwise the last ones
        let measurements = match input_data.measurements {
            Some(m) => m.sanitised(),
            None => {
                self.report.measurements_reused = true;
                self.current_measurements
                    .unwrap_or(self.params.default_measurements)
            }
        };
        self.current_measurements = Some(measurements);

        // A predefined pose overrides the custom one
        let selector = input_data.selector.unwrap_or(default_selector);
        let poses = match selector {
            PoseSelector::Predefined(pose) => {
                debug!("Predefined pose {} active, custom pose ignored", pose.name);
                self.report.predefined_active = true;
                pose.pose_map()
            }
            PoseSelector::None => self.custom_pose_map(input_data.custom_pose.as_ref()),
        };

        for leg in poses.missing_legs() {
            self.report.legs_defaulted[leg.id()] = true;
        }

        let hexapod = VirtualHexapod::with_pose(measurements, &poses);

        // Update the output in self
        self.output = Some(hexapod.clone());

        Ok((hexapod, self.report))
    }
}

impl PoseCtrl {
    /// The most recent output, if there's been one.
    pub fn output(&self) -> Option<&VirtualHexapod> {
        self.output.as_ref()
    }

    /// Convert the custom pose input into a pose map.
    fn custom_pose_map(&mut self, input: Option<&PoseInput>) -> PoseMap {
        match input {
            None => PoseMap::new(),
            Some(PoseInput::Map(poses)) => poses.clone(),
            Some(PoseInput::Uniform {
                coxia,
                femur,
                tibia,
            }) => PoseMap::uniform(*coxia, *femur, *tibia),
            Some(PoseInput::Json(json)) => match parse_pose_map(json) {
                Ok(poses) => poses,
                Err(e) => {
                    warn!("Can't parse the custom pose, using neutral: {}", e);
                    self.report.pose_parse_failed = true;
                    PoseMap::new()
                }
            },
        }
    }
}

impl PoseInput {
    /// Build a uniform pose from `[coxia, femur, tibia]`.
    ///
    /// Any other number of angles is ignored with a warning and `None` returned.
    pub fn uniform_from_slice(angles: &[f64]) -> Option<Self> {
        match angles {
            [coxia, femur, tibia] => Some(PoseInput::Uniform {
                coxia: *coxia,
                femur: *femur,
                tibia: *tibia,
            }),
            _ => {
                warn!(
                    "A uniform pose needs coxia, femur and tibia angles but {} were given, \
                     ignoring it",
                    angles.len()
                );
                None
            }
        }
    }
}

impl StatusReport {
    /// Legs which took the neutral pose.
    pub fn defaulted_legs(&self) -> Vec<LegId> {
        LegId::ALL
            .iter()
            .filter(|l| self.legs_defaulted[l.id()])
            .copied()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::kinematics::find;
    use hex_if::pose::LegPose;

    fn measurements() -> Measurements {
        Measurements::new(100.0, 100.0, 100.0, 50.0, 80.0, 120.0)
    }

    fn pose_ctrl(default_pose: &str) -> PoseCtrl {
        let mut ctrl = PoseCtrl::default();
        ctrl.init(
            Params {
                default_measurements: measurements(),
                default_pose: default_pose.into(),
            },
            None,
        )
        .unwrap();
        ctrl
    }

    #[test]
    fn test_not_initialised() {
        let mut ctrl = PoseCtrl::default();
        assert!(matches!(
            ctrl.proc(&InputData::default()),
            Err(PoseCtrlError::NotInitialised)
        ));
    }

    #[test]
    fn test_invalid_default_pose() {
        let mut ctrl = PoseCtrl::default();
        let result = ctrl.init(
            Params {
                default_measurements: measurements(),
                default_pose: "SOMERSAULT".into(),
            },
            None,
        );
        assert!(matches!(result, Err(PoseCtrlError::InvalidDefaultPose(_))));
    }

    #[test]
    fn test_defaults() {
        let mut ctrl = pose_ctrl("NONE");
        let (hexapod, report) = ctrl.proc(&InputData::default()).unwrap();

        assert_eq!(hexapod, VirtualHexapod::from_measurements(measurements()));
        assert!(report.measurements_reused);
        assert!(!report.predefined_active);
        assert_eq!(report.defaulted_legs(), LegId::ALL.to_vec());
        assert_eq!(ctrl.output(), Some(&hexapod));
    }

    #[test]
    fn test_measurements_reused() {
        let mut ctrl = pose_ctrl("NONE");
        let small = Measurements::new(10.0, 10.0, 10.0, 5.0, 5.0, 5.0);

        ctrl.proc(&InputData {
            measurements: Some(small),
            ..Default::default()
        })
        .unwrap();

        let (hexapod, report) = ctrl.proc(&InputData::default()).unwrap();
        assert_eq!(*hexapod.measurements(), small);
        assert!(report.measurements_reused);
    }

    #[test]
    fn test_predefined_overrides_custom() {
        let mut ctrl = pose_ctrl("NONE");
        let stand = find("STAND").unwrap();

        let (hexapod, report) = ctrl
            .proc(&InputData {
                measurements: Some(measurements()),
                selector: Some(PoseSelector::Predefined(stand)),
                custom_pose: Some(PoseInput::Uniform {
                    coxia: 45.0,
                    femur: 0.0,
                    tibia: 0.0,
                }),
            })
            .unwrap();

        assert!(report.predefined_active);
        assert!(report.defaulted_legs().is_empty());
        assert_eq!(
            hexapod,
            VirtualHexapod::with_pose(measurements(), &stand.pose_map())
        );

        // With the default selector from the params the custom pose is ignored too
        let mut ctrl = pose_ctrl("STAND");
        let (default_hexapod, _) = ctrl
            .proc(&InputData {
                custom_pose: Some(PoseInput::Json("{}".into())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(default_hexapod, hexapod);
    }

    #[test]
    fn test_custom_json_pose() {
        let mut ctrl = pose_ctrl("STAND");

        let (hexapod, report) = ctrl
            .proc(&InputData {
                measurements: Some(measurements()),
                selector: Some(PoseSelector::None),
                custom_pose: Some(PoseInput::Json(
                    r#"{"right-front": {"coxia": 10, "femur": 20, "tibia": -30}, "1": 5}"#.into(),
                )),
            })
            .unwrap();

        let mut expected = PoseMap::new();
        expected.insert(LegPose::new(LegId::RightFront, 10.0, 20.0, -30.0));

        assert_eq!(
            hexapod,
            VirtualHexapod::with_pose(measurements(), &expected)
        );
        assert!(!report.pose_parse_failed);
        assert!(!report.legs_defaulted[LegId::RightFront.id()]);
        assert!(report.legs_defaulted[LegId::LeftBack.id()]);
    }

    #[test]
    fn test_unparsable_pose_is_neutral() {
        let mut ctrl = pose_ctrl("NONE");

        let (hexapod, report) = ctrl
            .proc(&InputData {
                custom_pose: Some(PoseInput::Json("not json".into())),
                ..Default::default()
            })
            .unwrap();

        assert!(report.pose_parse_failed);
        assert_eq!(hexapod, VirtualHexapod::from_measurements(measurements()));
    }

    #[test]
    fn test_uniform_from_slice() {
        assert!(matches!(
            PoseInput::uniform_from_slice(&[1.0, -2.0, 3.0]),
            Some(PoseInput::Uniform {
                coxia,
                femur,
                tibia,
            }) if coxia == 1.0 && femur == -2.0 && tibia == 3.0
        ));

        assert!(PoseInput::uniform_from_slice(&[1.0, 2.0]).is_none());
        assert!(PoseInput::uniform_from_slice(&[]).is_none());
    }

    #[test]
    fn test_uniform_pose() {
        let mut ctrl = pose_ctrl("NONE");

        let (hexapod, _) = ctrl
            .proc(&InputData {
                custom_pose: Some(PoseInput::Uniform {
                    coxia: 0.0,
                    femur: 90.0,
                    tibia: 0.0,
                }),
                ..Default::default()
            })
            .unwrap();

        // Every leg points straight up from the end of its coxia
        for leg in hexapod.legs().iter() {
            assert!((leg.tip.z - 200.0).abs() < 1e-9);
        }
    }
}
