//! Flat, durable representation of the player's state
//!
//! One scalar per YAML key so hand-edited files stay readable.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TIME, UNIT_EPSILON};

/// Snapshot of everything written to `player.yml`
///
/// Position and rotation components are optional so a file that never
/// mentioned them can be told apart from one that stored zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRecord {
    pub posx: Option<f32>,
    pub posy: Option<f32>,
    pub posz: Option<f32>,

    pub rotx: Option<f32>,
    pub roty: Option<f32>,
    pub rotz: Option<f32>,
    pub rotw: Option<f32>,

    pub time: f32,
    pub fly: bool,
    #[serde(rename = "gridRadius")]
    pub grid_radius: i32,
    #[serde(rename = "timeFactorIndex")]
    pub time_factor_index: i32,
}

impl Default for StateRecord {
    fn default() -> Self {
        Self {
            posx: None,
            posy: None,
            posz: None,
            rotx: None,
            roty: None,
            rotz: None,
            rotw: None,
            time: DEFAULT_TIME,
            fly: false,
            grid_radius: 0,
            time_factor_index: 0,
        }
    }
}

impl StateRecord {
    /// Record from raw values. Without a rotation the components stay zero.
    pub fn new(position: Vec3, rotation: Option<Quat>, time: f32) -> Self {
        let rot = rotation.unwrap_or(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        Self {
            posx: Some(position.x),
            posy: Some(position.y),
            posz: Some(position.z),
            rotx: Some(rot.x),
            roty: Some(rot.y),
            rotz: Some(rot.z),
            rotw: Some(rot.w),
            time,
            ..Self::default()
        }
    }

    pub fn with_fly(mut self, fly: bool) -> Self {
        self.fly = fly;
        self
    }

    pub fn with_grid_radius(mut self, radius: i32) -> Self {
        self.grid_radius = radius;
        self
    }

    pub fn with_time_factor_index(mut self, index: i32) -> Self {
        self.time_factor_index = index;
        self
    }

    /// Stored position, None if no position key was present
    pub fn position(&self) -> Option<Vec3> {
        if self.posx.is_none() && self.posy.is_none() && self.posz.is_none() {
            return None;
        }
        Some(Vec3::new(
            self.posx.unwrap_or(0.0),
            self.posy.unwrap_or(0.0),
            self.posz.unwrap_or(0.0),
        ))
    }

    /// Stored rotation as-is (not normalized)
    ///
    /// All-zero components mean "no rotation was saved".
    pub fn rotation(&self) -> Option<Quat> {
        let q = Quat::from_xyzw(
            self.rotx.unwrap_or(0.0),
            self.roty.unwrap_or(0.0),
            self.rotz.unwrap_or(0.0),
            self.rotw.unwrap_or(0.0),
        );
        if q == Quat::from_xyzw(0.0, 0.0, 0.0, 0.0) {
            None
        } else {
            Some(q)
        }
    }

    /// Stored rotation, only if it yields a usable camera orientation
    pub fn valid_rotation(&self) -> Option<Quat> {
        self.rotation().filter(|q| forward_axis_is_unit(*q))
    }
}

/// Unit-vector guard: the third column of the rotation matrix built from `q`
/// must have length 1.
///
/// The matrix is built without normalizing `q`, so garbage quaternions
/// produce a stretched column and are rejected.
///
/// Only that column is checked, not the length of `q`: e.g. `(0, 0, 5, 5)`
/// passes and is returned unnormalized.
pub fn forward_axis_is_unit(q: Quat) -> bool {
    if !q.is_finite() {
        return false;
    }
    let z_axis = Mat3::from_quat(q).z_axis;
    (z_axis.length() - 1.0).abs() <= UNIT_EPSILON
}
