use argh::FromArgs;
use std::path::PathBuf;

use pincam::{focal_from_fov, CameraModel, Frame, PolynomialDistortion};

const DEFAULT_FOV_DEG: f64 = 130.0;
const DEFAULT_CAMERA_HEIGHT: f64 = 1.5;
const DEFAULT_DISTORTION: [f64; 5] = [-0.1, 0.01, -0.005, -0.001, 0.0];

#[derive(FromArgs)]
/// Estimate ground-plane distances for image pixels with a pinhole camera.
struct Args {
    /// path to a JSON camera parameter file
    #[argh(option)]
    config: Option<PathBuf>,

    /// horizontal field of view in degrees when no config is given
    #[argh(option, default = "DEFAULT_FOV_DEG")]
    fov: f64,

    /// image width in pixels when no config is given
    #[argh(option, default = "1280")]
    width: usize,

    /// image height in pixels when no config is given
    #[argh(option, default = "720")]
    height: usize,

    /// disable the default lens distortion model
    #[argh(switch)]
    pinhole: bool,

    /// pixel to range, as "x,y" (repeatable)
    #[argh(option, from_str_fn(parse_pixel))]
    pixel: Vec<[f64; 2]>,

    /// world-frame camera move "dx,dy,dz" applied before reporting
    #[argh(option, from_str_fn(parse_triple))]
    translate: Option<[f64; 3]>,

    /// camera rotation "dpitch,dyaw,droll" in degrees applied before reporting
    #[argh(option, from_str_fn(parse_triple))]
    rotate: Option<[f64; 3]>,

    /// print the projected ground grid
    #[argh(switch)]
    grid: bool,

    /// print the camera parameters as JSON and exit
    #[argh(switch)]
    dump_config: bool,
}

/// Camera plus the pixels picked for ranging; replaces the mutable globals
/// of an interactive calibration session.
struct RangingSession {
    camera: CameraModel,
    selected: Vec<[f64; 2]>,
}

impl RangingSession {
    fn new(camera: CameraModel, selected: Vec<[f64; 2]>) -> Self {
        Self { camera, selected }
    }

    fn report_selected(&self) {
        for pixel in &self.selected {
            match self.camera.unproject_to_ground(*pixel) {
                Some(ground) => println!(
                    "({:.0}, {:.0}) -> {:.1}, {:.1} [m]",
                    pixel[0], pixel[1], ground[0], ground[2]
                ),
                None => println!("({:.0}, {:.0}) -> no ground intersection", pixel[0], pixel[1]),
            }
        }
    }

    fn report_grid(&self) {
        let mut grid = Vec::new();
        for x in -10..=10 {
            for z in 0..=20 {
                grid.push([x as f64, 0.0, z as f64]);
            }
        }

        let pixels = self.camera.project_to_image(&grid);
        for (point, pixel) in grid.iter().zip(pixels.iter()) {
            if *pixel == [-1.0, -1.0] {
                continue;
            }
            println!(
                "({:.0}, {:.0}, {:.0}) -> ({:.1}, {:.1})",
                point[0], point[1], point[2], pixel[0], pixel[1]
            );
        }
    }
}

fn parse_pixel(value: &str) -> Result<[f64; 2], String> {
    let parts = parse_floats(value)?;
    match parts.as_slice() {
        &[x, y] => Ok([x, y]),
        _ => Err(format!("expected \"x,y\", got \"{value}\"")),
    }
}

fn parse_triple(value: &str) -> Result<[f64; 3], String> {
    let parts = parse_floats(value)?;
    match parts.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(format!("expected three comma-separated values, got \"{value}\"")),
    }
}

fn parse_floats(value: &str) -> Result<Vec<f64>, String> {
    value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| e.to_string()))
        .collect()
}

fn default_camera(width: usize, height: usize, fov_deg: f64, pinhole: bool) -> CameraModel {
    let mut camera = CameraModel::new([width, height].into(), focal_from_fov(width, fov_deg));
    if !pinhole {
        camera.set_distortion(Some(PolynomialDistortion::from_coeffs(DEFAULT_DISTORTION)));
    }
    camera.set_extrinsics([0.0; 3], [0.0, DEFAULT_CAMERA_HEIGHT, 0.0], Frame::World);
    camera
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let camera = match &args.config {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            let camera: CameraModel = serde_json::from_reader(file)?;
            log::info!("loaded camera parameters from {}", path.display());
            camera
        }
        None => default_camera(args.width, args.height, args.fov, args.pinhole),
    };

    let mut session = RangingSession::new(camera, args.pixel);

    if let Some(dt) = args.translate {
        session.camera.translate(dt, Frame::World);
        log::info!("camera moved to {:?}", session.camera.position());
    }
    if let Some([dpitch, dyaw, droll]) = args.rotate {
        session.camera.rotate(dpitch, dyaw, droll);
        log::info!("camera angles now {:?} deg", session.camera.angles_deg());
    }

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&session.camera)?);
        return Ok(());
    }

    println!("camera position: {:?}", session.camera.position());
    println!("horizon row: {:.1}", session.camera.horizon_row());

    if args.grid {
        session.report_grid();
    }
    session.report_selected();

    Ok(())
}
