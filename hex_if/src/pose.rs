//! # Pose definitions
//!
//! Leg and joint identifiers are part of the wire contract: they serialise as the kebab-case
//! names listed in [`LegId::ALL`] and [`JointId::ALL`], and must not change.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of legs on the hexapod.
pub const NUM_LEGS: usize = 6;

/// Names of the measurement fields, in the order the UI presents them.
pub const MEASUREMENT_NAMES: [&str; 6] = ["front", "side", "middle", "coxia", "femur", "tibia"];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Body dimensions and leg segment lengths.
///
/// Any field missing from serialised input defaults to zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Measurements {
    /// Lateral distance from the centre to the front and back body vertices.
    pub front: f64,

    /// Forward distance from the centre to the front body vertices (and the head). The back
    /// vertices sit the same distance behind the centre.
    pub side: f64,

    /// Lateral distance from the centre to the middle body vertices.
    pub middle: f64,

    /// Length of the coxia segment, shared by all legs.
    pub coxia: f64,

    /// Length of the femur segment, shared by all legs.
    pub femur: f64,

    /// Length of the tibia segment, shared by all legs.
    pub tibia: f64,
}

/// Joint angles of a single leg.
///
/// Units: degrees
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LegPose {
    /// Index of the leg, see [`LegId::id`].
    pub id: usize,

    /// The leg this pose belongs to.
    pub name: LegId,

    /// Yaw of the coxia about the vertical axis, relative to the leg's outward direction.
    pub coxia: f64,

    /// Pitch of the femur, positive raises the leg.
    pub femur: f64,

    /// Pitch of the tibia relative to the femur, positive raises the foot.
    pub tibia: f64,
}

/// A mapping from legs to their poses.
///
/// A complete map has an entry for each of the six legs, but partial maps are valid input
/// anywhere a `PoseMap` is accepted: legs without an entry take the neutral pose.
///
/// When deserialised each entry belongs to the leg named by its key. Any `id` or `name` inside an
/// entry is ignored and missing joint angles are zero.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct PoseMap(BTreeMap<LegId, LegPose>);

/// The joint angles of a serialised pose map entry.
#[derive(Deserialize, Default)]
#[serde(default)]
struct JointAngles {
    coxia: f64,
    femur: f64,
    tibia: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The six legs, in canonical order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum LegId {
    RightMiddle,
    RightFront,
    LeftFront,
    LeftMiddle,
    LeftBack,
    RightBack,
}

/// Which side of the body a leg is on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
}

/// The three actuated joints of a leg, ordered hip to foot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum JointId {
    Coxia,
    Femur,
    Tibia,
}

/// Errors raised while parsing pose or measurement text.
#[derive(Debug, Error)]
pub enum PoseParseError {
    #[error("Input contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Expected a JSON object but found {0}")]
    NotAnObject(&'static str),

    #[error("{0:?} is not a recognised leg name or index")]
    UnknownLeg(String),

    #[error("{0:?} is not a recognised joint name")]
    UnknownJoint(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Measurements {
    /// Create a new set of measurements.
    pub fn new(front: f64, middle: f64, side: f64, coxia: f64, femur: f64, tibia: f64) -> Self {
        Self {
            front,
            side,
            middle,
            coxia,
            femur,
            tibia,
        }
    }

    /// Return a copy with every non-finite or negative field replaced by zero.
    pub fn sanitised(&self) -> Self {
        Self {
            front: non_negative(self.front),
            side: non_negative(self.side),
            middle: non_negative(self.middle),
            coxia: non_negative(self.coxia),
            femur: non_negative(self.femur),
            tibia: non_negative(self.tibia),
        }
    }

    /// Total length of a leg when fully extended.
    pub fn leg_reach(&self) -> f64 {
        self.coxia + self.femur + self.tibia
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        match name {
            "front" => Some(&mut self.front),
            "side" => Some(&mut self.side),
            "middle" => Some(&mut self.middle),
            "coxia" => Some(&mut self.coxia),
            "femur" => Some(&mut self.femur),
            "tibia" => Some(&mut self.tibia),
            _ => None,
        }
    }
}

impl LegId {
    /// All legs in canonical order.
    pub const ALL: [LegId; NUM_LEGS] = [
        LegId::RightMiddle,
        LegId::RightFront,
        LegId::LeftFront,
        LegId::LeftMiddle,
        LegId::LeftBack,
        LegId::RightBack,
    ];

    /// Index of this leg in the canonical order.
    pub fn id(self) -> usize {
        self as usize
    }

    /// Get the leg with the given index, or `None` if it's out of range.
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    /// The canonical name of this leg.
    pub fn name(self) -> &'static str {
        match self {
            LegId::RightMiddle => "right-middle",
            LegId::RightFront => "right-front",
            LegId::LeftFront => "left-front",
            LegId::LeftMiddle => "left-middle",
            LegId::LeftBack => "left-back",
            LegId::RightBack => "right-back",
        }
    }

    pub fn side(self) -> Side {
        match self {
            LegId::RightMiddle | LegId::RightFront | LegId::RightBack => Side::Right,
            LegId::LeftFront | LegId::LeftMiddle | LegId::LeftBack => Side::Left,
        }
    }

    /// The leg on the opposite side of the body in the same position.
    pub fn mirror(self) -> Self {
        match self {
            LegId::RightMiddle => LegId::LeftMiddle,
            LegId::RightFront => LegId::LeftFront,
            LegId::LeftFront => LegId::RightFront,
            LegId::LeftMiddle => LegId::RightMiddle,
            LegId::LeftBack => LegId::RightBack,
            LegId::RightBack => LegId::LeftBack,
        }
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegId {
    type Err = PoseParseError;

    /// Parse a leg from either its canonical name or its index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(leg) = Self::ALL.iter().find(|l| l.name() == s) {
            return Ok(*leg);
        }

        s.parse::<usize>()
            .ok()
            .and_then(Self::from_id)
            .ok_or_else(|| PoseParseError::UnknownLeg(s.to_string()))
    }
}

impl Side {
    /// Sign applied to yaw angles on this side so that left and right legs rotate as mirror
    /// images of each other.
    pub fn yaw_sign(self) -> f64 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }
}

impl JointId {
    /// All joints, ordered hip to foot.
    pub const ALL: [JointId; 3] = [JointId::Coxia, JointId::Femur, JointId::Tibia];

    pub fn name(self) -> &'static str {
        match self {
            JointId::Coxia => "coxia",
            JointId::Femur => "femur",
            JointId::Tibia => "tibia",
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointId {
    type Err = PoseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|j| j.name() == s.trim())
            .copied()
            .ok_or_else(|| PoseParseError::UnknownJoint(s.to_string()))
    }
}

impl LegPose {
    pub fn new(leg: LegId, coxia: f64, femur: f64, tibia: f64) -> Self {
        Self {
            id: leg.id(),
            name: leg,
            coxia,
            femur,
            tibia,
        }
    }

    /// The neutral pose, all joint angles at zero.
    pub fn neutral(leg: LegId) -> Self {
        Self::new(leg, 0.0, 0.0, 0.0)
    }

    /// Set the angle of a joint.
    pub fn set_angle(&mut self, joint: JointId, angle_deg: f64) {
        match joint {
            JointId::Coxia => self.coxia = angle_deg,
            JointId::Femur => self.femur = angle_deg,
            JointId::Tibia => self.tibia = angle_deg,
        }
    }

    /// Return a copy with any non-finite angle replaced by zero.
    ///
    /// The `id` is also recomputed from `name` so the two always agree.
    pub fn sanitised(&self) -> Self {
        Self::new(
            self.name,
            finite_or_zero(self.coxia),
            finite_or_zero(self.femur),
            finite_or_zero(self.tibia),
        )
    }
}

impl PoseMap {
    /// An empty map, every leg takes the neutral pose.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A complete map with the same joint angles on every leg.
    pub fn uniform(coxia: f64, femur: f64, tibia: f64) -> Self {
        LegId::ALL
            .iter()
            .map(|l| LegPose::new(*l, coxia, femur, tibia))
            .collect()
    }

    /// Insert a pose, keyed by the leg named in the pose. Returns the pose it replaced.
    pub fn insert(&mut self, pose: LegPose) -> Option<LegPose> {
        self.0.insert(pose.name, pose)
    }

    pub fn get(&self, leg: LegId) -> Option<&LegPose> {
        self.0.get(&leg)
    }

    /// Get the pose of a leg, or the neutral pose if the leg has no entry.
    pub fn get_or_neutral(&self, leg: LegId) -> LegPose {
        self.0
            .get(&leg)
            .copied()
            .unwrap_or_else(|| LegPose::neutral(leg))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if every leg has an entry.
    pub fn is_complete(&self) -> bool {
        self.0.len() == NUM_LEGS
    }

    /// Legs without an entry, in canonical order.
    pub fn missing_legs(&self) -> Vec<LegId> {
        LegId::ALL
            .iter()
            .filter(|l| !self.0.contains_key(*l))
            .copied()
            .collect()
    }

    pub fn iter(&self) -> btree_map::Values<'_, LegId, LegPose> {
        self.0.values()
    }
}

impl<'de> Deserialize<'de> for PoseMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<LegId, JointAngles>::deserialize(deserializer)?;

        Ok(entries
            .into_iter()
            .map(|(leg, a)| LegPose::new(leg, a.coxia, a.femur, a.tibia))
            .collect())
    }
}

impl FromIterator<LegPose> for PoseMap {
    fn from_iter<I: IntoIterator<Item = LegPose>>(iter: I) -> Self {
        let mut map = PoseMap::new();
        for pose in iter {
            map.insert(pose);
        }
        map
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Parse measurements from a JSON object.
///
/// Missing or null fields are zero. Fields which are present but not numeric are also zero, with
/// a warning. The result is sanitised, see [`Measurements::sanitised`].
pub fn parse_measurements(json_str: &str) -> Result<Measurements, PoseParseError> {
    let val = parse_object(json_str)?;
    let mut measurements = Measurements::default();

    for name in MEASUREMENT_NAMES.iter() {
        if let Some(field) = measurements.field_mut(name) {
            *field = lenient_number(val.get(*name), name);
        }
    }

    Ok(measurements.sanitised())
}

/// Parse the pose of a single leg from a JSON object containing `coxia`, `femur` and `tibia`.
///
/// Any `id` or `name` in the object is ignored in favour of `leg`. Missing joints are zero, and
/// keys which aren't joint names are skipped with a warning.
pub fn parse_leg_pose(leg: LegId, json_str: &str) -> Result<LegPose, PoseParseError> {
    let val = parse_object(json_str)?;
    Ok(leg_pose_from_object(leg, &val))
}

/// Parse a pose map from a JSON object keyed by leg name or leg index.
///
/// Entries which can't be used (unknown key, value not an object) are skipped with a warning,
/// so that those legs take the neutral pose. Only text that isn't a JSON object at all is an
/// error.
pub fn parse_pose_map(json_str: &str) -> Result<PoseMap, PoseParseError> {
    let val = parse_object(json_str)?;
    let mut poses = PoseMap::new();

    for (key, entry) in val.iter() {
        let leg = match key.parse::<LegId>() {
            Ok(l) => l,
            Err(e) => {
                warn!("Skipping pose entry: {}", e);
                continue;
            }
        };

        match entry {
            Value::Object(obj) => {
                poses.insert(leg_pose_from_object(leg, obj));
            }
            other => warn!(
                "Skipping pose entry for {}: expected an object but found {}",
                leg,
                value_kind(other)
            ),
        }
    }

    Ok(poses)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn parse_object(json_str: &str) -> Result<Map<String, Value>, PoseParseError> {
    match serde_json::from_str(json_str) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(other) => Err(PoseParseError::NotAnObject(value_kind(&other))),
        Err(e) => Err(PoseParseError::InvalidJson(e)),
    }
}

fn leg_pose_from_object(leg: LegId, obj: &Map<String, Value>) -> LegPose {
    let mut pose = LegPose::neutral(leg);

    for (key, value) in obj.iter() {
        // The leg comes from the caller, not the entry
        if key == "id" || key == "name" {
            continue;
        }

        match key.parse::<JointId>() {
            Ok(joint) => pose.set_angle(joint, lenient_number(Some(value), joint.name())),
            Err(e) => warn!("Ignoring {:?} in the pose of {}: {}", key, leg, e),
        }
    }

    pose
}

/// Interpret a JSON value as a number, falling back to zero.
///
/// Numeric strings are accepted since UI inputs frequently report their value as text.
fn lenient_number(value: Option<&Value>, field: &str) -> f64 {
    let num = match value {
        None | Some(Value::Null) => return 0.0,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match num {
        Some(n) if n.is_finite() => n,
        _ => {
            warn!(
                "Value of {:?} is not a finite number ({}), using 0",
                field,
                value.map(value_kind).unwrap_or("nothing")
            );
            0.0
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
