use approx::assert_relative_eq;
use pincam::{focal_from_fov, CameraModel, Frame, PolynomialDistortion};

const FOV_DEG: f64 = 130.0;

/// Camera setup of the dashcam ranging tool: wide-angle lens, mounted 1.5
/// units above the ground plane, looking straight ahead.
fn dashcam_camera() -> CameraModel {
    let mut camera = CameraModel::new([1280, 720].into(), focal_from_fov(1280, FOV_DEG));
    camera.set_extrinsics([0.0; 3], [0.0, 1.5, 0.0], Frame::World);
    camera
}

#[test]
fn ground_grid_projects_and_recovers() {
    let camera = dashcam_camera();

    let mut grid = Vec::new();
    for x in -10..=10 {
        for z in 0..=20 {
            grid.push([x as f64, 0.0, z as f64]);
        }
    }

    let pixels = camera.project_to_image(&grid);
    let mut recovered = 0;
    for (point, pixel) in grid.iter().zip(pixels.iter()) {
        if *pixel == [-1.0, -1.0] {
            // the z = 0 row sits in the camera plane
            assert_eq!(point[2], 0.0);
            continue;
        }
        let ground = camera
            .unproject_to_ground(*pixel)
            .expect("projected ground pixel must unproject");
        assert_relative_eq!(ground[0], point[0], epsilon = 1e-6);
        assert_relative_eq!(ground[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(ground[2], point[2], epsilon = 1e-6);
        recovered += 1;
    }
    assert_eq!(recovered, 21 * 20);
}

#[test]
fn distorted_pixels_recover_ground_points() {
    let mut camera = dashcam_camera();
    camera.set_distortion(Some(PolynomialDistortion::from_coeffs([
        -0.1, 0.01, -0.005, -0.001, 0.0,
    ])));

    for point in [[0.0, 0.0, 10.0], [2.0, 0.0, 15.0], [-3.0, 0.0, 20.0]] {
        let pixel = camera.project_to_image(&[point])[0];
        assert_ne!(pixel, [-1.0, -1.0]);
        let ground = camera.unproject_to_ground(pixel).unwrap();
        assert_relative_eq!(ground[0], point[0], epsilon = 1e-3);
        assert_relative_eq!(ground[2], point[2], epsilon = 1e-3);
    }
}

#[test]
fn horizon_splits_the_image_into_ground_and_sky() {
    let mut camera = dashcam_camera();
    camera.set_angles(-10.0, 0.0, 0.0);

    let horizon = camera.horizon_row();
    let cx = camera.intrinsics.cx;

    assert!(camera.unproject_to_ground([cx, horizon]).is_none());
    assert!(camera.unproject_to_ground([cx, horizon + 20.0]).is_none());
    assert!(camera.unproject_to_ground([cx, horizon - 50.0]).is_some());
}

#[test]
fn ranged_distance_grows_toward_the_horizon() {
    let camera = dashcam_camera();
    let horizon = camera.horizon_row();
    let cx = camera.intrinsics.cx;

    let near = camera.unproject_to_ground([cx, horizon - 100.0]).unwrap();
    let far = camera.unproject_to_ground([cx, horizon - 10.0]).unwrap();
    assert!(far[2] > near[2]);
}

#[test]
fn pose_edits_keep_ranging_consistent() {
    let mut camera = dashcam_camera();

    // drive forward 5 units, then look down a little
    camera.translate([0.0, 0.0, 5.0], Frame::World);
    camera.rotate(-5.0, 0.0, 0.0);

    let point = [1.0, 0.0, 18.0];
    let pixel = camera.project_to_image(&[point])[0];
    assert_ne!(pixel, [-1.0, -1.0]);

    let ground = camera.unproject_to_ground(pixel).unwrap();
    assert_relative_eq!(ground[0], point[0], epsilon = 1e-6);
    assert_relative_eq!(ground[2], point[2], epsilon = 1e-6);
}
