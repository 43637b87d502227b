use pincam::{focal_from_fov, CameraModel, Frame};

fn main() {
    let mut camera = CameraModel::new([1280, 720].into(), focal_from_fov(1280, 130.0));
    camera.set_extrinsics([0.0, 0.0, 0.0], [0.0, 1.5, 0.0], Frame::World);

    // a 3x3 patch of the ground grid in front of the camera
    let grid: Vec<[f64; 3]> = (-1..=1)
        .flat_map(|x| (5..=7).map(move |z| [x as f64, 0.0, z as f64]))
        .collect();

    let pixels = camera.project_to_image(&grid);
    for (point, pixel) in grid.iter().zip(pixels.iter()) {
        println!("{point:?} -> ({:.1}, {:.1})", pixel[0], pixel[1]);
    }

    println!("horizon row: {:.1}", camera.horizon_row());
}
