use serde::{Deserialize, Serialize};

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use pincam::ImageSize;
///
/// let size = ImageSize {
///     width: 1280,
///     height: 720,
/// };
/// assert_eq!(size.pixels(), 921600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels in the image raster.
    pub fn pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Compute the focal length in pixels from a field of view.
///
/// Solves `(size / 2) / f = tan(fov / 2)` for `f`.
///
/// # Arguments
///
/// * `image_size_px` - The image extent along the axis of the field of view
/// * `fov_deg` - The field of view in degrees
///
/// # Returns
///
/// The focal length in pixels.
pub fn focal_from_fov(image_size_px: usize, fov_deg: f64) -> f64 {
    (image_size_px as f64 / 2.0) / (fov_deg.to_radians() / 2.0).tan()
}

/// Represents the intrinsic parameters of a pinhole camera
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl Intrinsics {
    /// Create intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create intrinsics from an isotropic focal length with the principal
    /// point at the image center.
    pub fn from_focal_length(size: ImageSize, focal_length: f64) -> Self {
        Self {
            fx: focal_length,
            fy: focal_length,
            cx: size.width as f64 / 2.0,
            cy: size.height as f64 / 2.0,
        }
    }

    /// The 3x3 intrinsic matrix K in its standard upper-triangular form.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }
}
