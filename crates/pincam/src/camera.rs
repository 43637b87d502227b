use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distortion::PolynomialDistortion;
use crate::extrinsics::{Extrinsics, Frame};
use crate::intrinsics::{ImageSize, Intrinsics};

/// Error types for camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Depth raster does not cover the configured image size
    #[error("depth raster has {actual} values, expected width * height = {expected}")]
    DepthSizeMismatch {
        /// Number of pixels in the configured image raster
        expected: usize,
        /// Length of the supplied depth slice
        actual: usize,
    },
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

/// Sentinel pixel emitted for world points behind the camera.
pub const INVISIBLE: [f64; 2] = [-1.0, -1.0];

/// A pinhole camera: image size, intrinsics, optional lens distortion and
/// the rigid world-to-camera transform.
///
/// The model follows `s[x, y, 1] = K [R|t] [Mw, 1]` with a right-handed
/// coordinate system, x right, y down, z forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraModel {
    /// Image plane dimensions in pixels.
    pub size: ImageSize,
    /// Intrinsic parameters.
    pub intrinsics: Intrinsics,
    /// Lens distortion; `None` is a pure pinhole.
    pub distortion: Option<PolynomialDistortion>,
    /// Extrinsic parameters.
    pub extrinsics: Extrinsics,
}

impl Default for CameraModel {
    fn default() -> Self {
        Self::new([1280, 720].into(), 500.0)
    }
}

impl CameraModel {
    /// Create a camera with an isotropic focal length, centered principal
    /// point and zero pose.
    pub fn new(size: ImageSize, focal_length: f64) -> Self {
        Self {
            size,
            intrinsics: Intrinsics::from_focal_length(size, focal_length),
            distortion: None,
            extrinsics: Extrinsics::default(),
        }
    }

    /// Rebuild the intrinsics from an isotropic focal length and the image
    /// center, overwriting any prior K.
    pub fn set_intrinsics(&mut self, size: ImageSize, focal_length: f64) {
        self.size = size;
        self.intrinsics = Intrinsics::from_focal_length(size, focal_length);
    }

    /// Replace the lens distortion model.
    pub fn set_distortion(&mut self, distortion: Option<PolynomialDistortion>) {
        self.distortion = distortion;
    }

    /// Replace the full pose, see [`Extrinsics::new`].
    pub fn set_extrinsics(&mut self, rvec_deg: [f64; 3], t: [f64; 3], frame: Frame) {
        self.extrinsics = Extrinsics::new(rvec_deg, t, frame);
    }

    /// Set the absolute camera position, see [`Extrinsics::set_position`].
    pub fn set_position(&mut self, t: [f64; 3], frame: Frame) {
        self.extrinsics.set_position(t, frame);
    }

    /// Move the camera by a delta, see [`Extrinsics::translate`].
    pub fn translate(&mut self, dt: [f64; 3], frame: Frame) {
        self.extrinsics.translate(dt, frame);
    }

    /// Set the orientation keeping the world position fixed, see
    /// [`Extrinsics::set_angles`].
    pub fn set_angles(&mut self, pitch_deg: f64, yaw_deg: f64, roll_deg: f64) {
        self.extrinsics.set_angles(pitch_deg, yaw_deg, roll_deg);
    }

    /// Rotate incrementally keeping the world position fixed, see
    /// [`Extrinsics::rotate`].
    pub fn rotate(&mut self, dpitch_deg: f64, dyaw_deg: f64, droll_deg: f64) {
        self.extrinsics.rotate(dpitch_deg, dyaw_deg, droll_deg);
    }

    /// The camera position in world coordinates.
    pub fn position(&self) -> [f64; 3] {
        self.extrinsics.position()
    }

    /// Rotation angles (pitch, yaw, roll) in degrees.
    pub fn angles_deg(&self) -> [f64; 3] {
        self.extrinsics.angles_deg()
    }

    /// Project world points onto the image plane.
    ///
    /// Points with camera-frame depth `Zc <= 0` are behind the camera and
    /// yield the [`INVISIBLE`] sentinel instead of a pixel.
    ///
    /// # Arguments
    ///
    /// * `world_points` - 3D points in the world frame
    ///
    /// # Returns
    ///
    /// One pixel coordinate per input point.
    pub fn project_to_image(&self, world_points: &[[f64; 3]]) -> Vec<[f64; 2]> {
        let rotation = self.extrinsics.rotation();
        let tvec = DVec3::from_array(self.extrinsics.tvec);
        let Intrinsics { fx, fy, cx, cy } = self.intrinsics;

        world_points
            .iter()
            .map(|&point| {
                let mc = rotation * DVec3::from_array(point) + tvec;
                if mc.z <= 0.0 {
                    return INVISIBLE;
                }
                let x = fx * mc.x / mc.z + cx;
                let y = fy * mc.y / mc.z + cy;
                match &self.distortion {
                    Some(distortion) => {
                        let (xd, yd) = distortion.distort(x, y, &self.intrinsics);
                        [xd, yd]
                    }
                    None => [x, y],
                }
            })
            .collect()
    }

    /// Transform world points into the camera frame.
    ///
    /// Rigid transform only, no intrinsic mapping and no visibility
    /// filtering.
    pub fn project_to_camera(&self, world_points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let rotation = self.extrinsics.rotation();
        let tvec = DVec3::from_array(self.extrinsics.tvec);

        world_points
            .iter()
            .map(|&point| (rotation * DVec3::from_array(point) + tvec).to_array())
            .collect()
    }

    /// Back-project a per-pixel depth raster to camera-frame points.
    ///
    /// The raster is row-major with origin at the top-left pixel and must
    /// hold exactly `width * height` values, one camera-frame depth `Zc` per
    /// pixel. Each pixel maps to
    /// `(Zc * (x - cx) / fx, Zc * (y - cy) / fy, Zc)`.
    ///
    /// # Errors
    ///
    /// [`CameraError::DepthSizeMismatch`] when the slice length differs from
    /// the configured raster size; no output is produced.
    pub fn unproject_depth(&self, depth: &[f64]) -> CameraResult<Vec<[f64; 3]>> {
        let expected = self.size.pixels();
        if depth.len() != expected {
            return Err(CameraError::DepthSizeMismatch {
                expected,
                actual: depth.len(),
            });
        }

        let Intrinsics { fx, fy, cx, cy } = self.intrinsics;
        let mut points = Vec::with_capacity(expected);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let zc = depth[y * self.size.width + x];
                points.push([
                    zc * (x as f64 - cx) / fx,
                    zc * (y as f64 - cy) / fy,
                    zc,
                ]);
            }
        }
        Ok(points)
    }

    /// Intersect the viewing ray through a pixel with the world ground plane
    /// `Y = 0`.
    ///
    /// The pixel is undistorted when a distortion model is set, turned into
    /// a camera-frame ray and solved for the depth at which the world Y
    /// coordinate vanishes.
    ///
    /// # Returns
    ///
    /// The world-frame ground point, or `None` when the ray does not hit the
    /// ground plane in front of the camera (horizon rays included).
    pub fn unproject_to_ground(&self, pixel: [f64; 2]) -> Option<[f64; 3]> {
        let (x, y) = match &self.distortion {
            Some(distortion) => distortion.undistort(pixel[0], pixel[1], &self.intrinsics),
            None => (pixel[0], pixel[1]),
        };

        let Intrinsics { fx, fy, cx, cy } = self.intrinsics;
        let ray_cam = DVec3::new((x - cx) / fx, (y - cy) / fy, 1.0);
        let ray_world = self.extrinsics.rotation().transpose() * ray_cam;
        if ray_world.y.abs() < 1e-12 {
            return None;
        }

        let position = DVec3::from_array(self.position());
        // camera-frame depth at which the ray reaches Y = 0
        let depth = -position.y / ray_world.y;
        if depth <= 0.0 {
            return None;
        }
        Some((position + depth * ray_world).to_array())
    }

    /// Image row of the ground plane's vanishing line, `cy - fy * tan(pitch)`.
    ///
    /// Rays through pixels on this row run parallel to the ground; the
    /// returned row may lie outside the image for steep pitch angles.
    pub fn horizon_row(&self) -> f64 {
        self.intrinsics.cy - self.intrinsics.fy * self.extrinsics.rvec[0].tan()
    }
}
