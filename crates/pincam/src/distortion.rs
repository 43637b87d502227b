use serde::{Deserialize, Serialize};

use crate::intrinsics::Intrinsics;

/// Represents the polynomial distortion parameters of a camera
///
/// The coefficients follow the OpenCV ordering `(k1, k2, p1, p2, k3)`.
///
/// # Fields
///
/// * `k1` - The first radial distortion coefficient
/// * `k2` - The second radial distortion coefficient
/// * `p1` - The first tangential distortion coefficient
/// * `p2` - The second tangential distortion coefficient
/// * `k3` - The third radial distortion coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolynomialDistortion {
    /// The first radial distortion coefficient
    pub k1: f64,
    /// The second radial distortion coefficient
    pub k2: f64,
    /// The first tangential distortion coefficient
    pub p1: f64,
    /// The second tangential distortion coefficient
    pub p2: f64,
    /// The third radial distortion coefficient
    pub k3: f64,
}

impl PolynomialDistortion {
    /// Create distortion parameters from an OpenCV-ordered coefficient vector.
    pub fn from_coeffs(coeffs: [f64; 5]) -> Self {
        let [k1, k2, p1, p2, k3] = coeffs;
        Self { k1, k2, p1, p2, k3 }
    }

    /// The coefficients as an OpenCV-ordered vector.
    pub fn coeffs(&self) -> [f64; 5] {
        [self.k1, self.k2, self.p1, self.p2, self.k3]
    }

    /// Check if there is any distortion.
    pub fn is_identity(&self) -> bool {
        self.coeffs() == [0.0; 5]
    }

    /// Distort a pixel coordinate.
    ///
    /// # Arguments
    ///
    /// * `x` - The x coordinate of the point
    /// * `y` - The y coordinate of the point
    /// * `intrinsics` - The intrinsic parameters of the camera
    ///
    /// # Returns
    ///
    /// The distorted pixel coordinate.
    pub fn distort(&self, x: f64, y: f64, intrinsics: &Intrinsics) -> (f64, f64) {
        let (fx, fy, cx, cy) = (intrinsics.fx, intrinsics.fy, intrinsics.cx, intrinsics.cy);

        // normalize the coordinates
        let x = (x - cx) / fx;
        let y = (y - cy) / fy;

        let (xd, yd) = self.distort_normalized(x, y);

        // denormalize the coordinates
        (fx * xd + cx, fy * yd + cy)
    }

    /// Undistort a pixel coordinate by fixed-point iteration.
    ///
    /// The polynomial model has no closed-form inverse; the distorted
    /// normalized coordinate is refined until the forward model reproduces
    /// the input.
    ///
    /// # Arguments
    ///
    /// * `x` - The x coordinate of the distorted point
    /// * `y` - The y coordinate of the distorted point
    /// * `intrinsics` - The intrinsic parameters of the camera
    ///
    /// # Returns
    ///
    /// The undistorted pixel coordinate.
    pub fn undistort(&self, x: f64, y: f64, intrinsics: &Intrinsics) -> (f64, f64) {
        let (fx, fy, cx, cy) = (intrinsics.fx, intrinsics.fy, intrinsics.cx, intrinsics.cy);

        // normalize the coordinates
        let x = (x - cx) / fx;
        let y = (y - cy) / fy;

        const MAX_ITERATIONS: usize = 10;
        const EPSILON: f64 = 1e-9;

        let mut xu = x;
        let mut yu = y;

        for _ in 0..MAX_ITERATIONS {
            let (xd, yd) = self.distort_normalized(xu, yu);
            let dx = x - xd;
            let dy = y - yd;
            xu += dx;
            yu += dy;
            if dx.abs() < EPSILON && dy.abs() < EPSILON {
                break;
            }
        }

        // denormalize the coordinates
        (fx * xu + cx, fy * yu + cy)
    }

    /// Forward distortion in normalized image coordinates.
    pub(crate) fn distort_normalized(&self, x: f64, y: f64) -> (f64, f64) {
        // calculate the radial distance
        let r2 = x * x + y * y;

        // radial distortion
        let kr = 1.0 + self.k1 * r2 + self.k2 * r2 * r2 + self.k3 * r2 * r2 * r2;

        // tangential distortion
        let xd = x * kr + 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let yd = y * kr + self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;

        (xd, yd)
    }
}
