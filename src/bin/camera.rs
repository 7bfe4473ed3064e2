use clap::Parser;
use face_coords::config::TrackerArgs;
use face_coords::{tracker, CameraSource, FaceTracker, KeyWait, Window};

/// Track the first face seen by a webcam and record it to slot files.
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// Capture device index.
    #[arg(long, default_value_t = 0)]
    camera: i32,

    #[command(flatten)]
    tracker: TrackerArgs,
}

fn main() -> anyhow::Result<()> {
    face_coords::init_logging();

    let args: Args = Args::parse();

    let (face_detector, recorder) = args.tracker.build()?;
    let mut face_tracker = FaceTracker::new(face_detector, recorder);

    let mut camera_source = CameraSource::new(args.camera)?;
    let window = Window::new(&args.tracker.window, KeyWait::Poll)?;

    tracker::run(&mut camera_source, &mut face_tracker, &window)?;
    Ok(())
}
