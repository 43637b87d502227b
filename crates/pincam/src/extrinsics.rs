use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::rotation::{matrix_from_rvec, rvec_from_matrix};

/// Coordinate frame a translation vector is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// The fixed external reference frame.
    World,
    /// The frame centered on the camera's optical center.
    Camera,
}

/// Represents the extrinsic parameters of a pinhole camera
///
/// The stored translation `tvec` is the vector from the camera's optical
/// center to the world origin *expressed in camera coordinates*, so
/// `tvec = -R * T` where `T` is the world-frame camera position and `R` the
/// world-to-camera rotation. Every rotation update re-derives `tvec` from the
/// recovered `T`; overwriting the rotation alone would silently move the
/// camera in world space.
///
/// `rvec` holds (pitch, yaw, roll) in radians and is interpreted as a single
/// Rodrigues axis-angle vector, not as a chain of elementary rotations (see
/// [`matrix_from_rvec`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrinsics {
    /// Rotation vector (pitch, yaw, roll) in radians.
    pub rvec: [f64; 3],
    /// Camera-frame translation, `-R * T`.
    pub tvec: [f64; 3],
}

impl Default for Extrinsics {
    fn default() -> Self {
        Self {
            rvec: [0.0; 3],
            tvec: [0.0; 3],
        }
    }
}

impl Extrinsics {
    /// Create extrinsics from rotation angles in degrees and a translation.
    ///
    /// # Arguments
    ///
    /// * `rvec_deg` - Rotation vector (pitch, yaw, roll) in degrees
    /// * `t` - Translation; with [`Frame::World`] it is the world-frame
    ///   camera position and is converted via `t = -R * T`, with
    ///   [`Frame::Camera`] it is stored as supplied
    pub fn new(rvec_deg: [f64; 3], t: [f64; 3], frame: Frame) -> Self {
        let mut extrinsics = Self {
            rvec: [
                rvec_deg[0].to_radians(),
                rvec_deg[1].to_radians(),
                rvec_deg[2].to_radians(),
            ],
            tvec: t,
        };
        if frame == Frame::World {
            let t_cam = -extrinsics.rotation() * DVec3::from_array(t);
            extrinsics.tvec = t_cam.to_array();
        }
        extrinsics
    }

    /// The world-to-camera rotation matrix, rebuilt from `rvec`.
    pub fn rotation(&self) -> DMat3 {
        matrix_from_rvec(DVec3::from_array(self.rvec))
    }

    /// The camera position in world coordinates, `T = -R^-1 * tvec`.
    pub fn position(&self) -> [f64; 3] {
        (-(self.rotation().transpose() * DVec3::from_array(self.tvec))).to_array()
    }

    /// Rotation angles (pitch, yaw, roll) in degrees.
    pub fn angles_deg(&self) -> [f64; 3] {
        [
            self.rvec[0].to_degrees(),
            self.rvec[1].to_degrees(),
            self.rvec[2].to_degrees(),
        ]
    }

    /// Set the absolute camera position without touching the rotation.
    ///
    /// World-frame positions are converted via `t = -R * T`; camera-frame
    /// input is the position of the camera seen from the world origin, so
    /// only the sign flips.
    pub fn set_position(&mut self, t: [f64; 3], frame: Frame) {
        let t = DVec3::from_array(t);
        self.tvec = match frame {
            Frame::World => (-(self.rotation() * t)).to_array(),
            Frame::Camera => (-t).to_array(),
        };
    }

    /// Add a delta to the camera position, rotation untouched.
    ///
    /// The delta is converted with the same frame rule as
    /// [`Extrinsics::set_position`] before being accumulated onto `tvec`.
    pub fn translate(&mut self, dt: [f64; 3], frame: Frame) {
        let dt = DVec3::from_array(dt);
        let dt_cam = match frame {
            Frame::World => -(self.rotation() * dt),
            Frame::Camera => -dt,
        };
        self.tvec = (DVec3::from_array(self.tvec) + dt_cam).to_array();
    }

    /// Set the camera orientation while preserving the world-frame position.
    ///
    /// Recovers `T` from the current pose, installs the new rotation, then
    /// recomputes `tvec = -R_new * T`. The recover-then-reapply order is
    /// mandatory.
    pub fn set_angles(&mut self, pitch_deg: f64, yaw_deg: f64, roll_deg: f64) {
        let position = DVec3::from_array(self.position());
        self.rvec = [
            pitch_deg.to_radians(),
            yaw_deg.to_radians(),
            roll_deg.to_radians(),
        ];
        self.tvec = (-(self.rotation() * position)).to_array();
    }

    /// Apply an incremental world-frame rotation, preserving the world-frame
    /// position.
    ///
    /// The delta matrix is left-multiplied, `R_new = R_delta * R_old`, and
    /// the stored rotation vector is recovered from `R_new` through the
    /// inverse Rodrigues mapping.
    pub fn rotate(&mut self, dpitch_deg: f64, dyaw_deg: f64, droll_deg: f64) {
        let position = DVec3::from_array(self.position());
        let delta = matrix_from_rvec(DVec3::new(
            dpitch_deg.to_radians(),
            dyaw_deg.to_radians(),
            droll_deg.to_radians(),
        ));
        let rotation = delta * self.rotation();
        self.rvec = rvec_from_matrix(&rotation).to_array();
        self.tvec = (-(rotation * position)).to_array();
    }
}
