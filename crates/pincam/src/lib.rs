#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Pincam
//!
//! A single-camera coordinate-transform toolkit built around the standard
//! pinhole model `s[x, y, 1] = K [R|t] [Mw, 1]`.
//!
//! ## Key Features
//!
//! - **Intrinsics**: focal length / field-of-view handling and the 3x3 K matrix
//! - **Extrinsics**: pose editing that keeps the world-frame camera position
//!   consistent across rotation updates
//! - **Projection**: world-to-image, world-to-camera, per-pixel depth
//!   back-projection and ground-plane ray casting
//! - **Distortion**: optional Brown-Conrady polynomial lens model
//!
//! ## Example
//!
//! ```rust
//! use pincam::{CameraModel, Frame};
//!
//! let mut camera = CameraModel::default();
//! camera.set_extrinsics([0.0, 0.0, 0.0], [0.0, 1.5, 0.0], Frame::World);
//!
//! // A point on the optical axis lands on the principal point.
//! let pixels = camera.project_to_image(&[[0.0, 1.5, 10.0]]);
//! assert_eq!(pixels[0], [640.0, 360.0]);
//! ```

/// Camera model combining intrinsics, extrinsics and optional distortion.
pub mod camera;

/// Brown-Conrady polynomial lens distortion.
pub mod distortion;

/// Rigid world-to-camera transform and pose editing.
pub mod extrinsics;

/// Image geometry and the intrinsic parameter matrix.
pub mod intrinsics;

/// Rodrigues rotation vector to rotation matrix conversions.
pub mod rotation;

pub use camera::{CameraError, CameraModel, CameraResult};
pub use distortion::PolynomialDistortion;
pub use extrinsics::{Extrinsics, Frame};
pub use intrinsics::{focal_from_fov, ImageSize, Intrinsics};
