use clap::Parser;
use face_coords::config::TrackerArgs;
use face_coords::{tracker, FaceTracker, ImageFiles, KeyWait, Window};
use std::path::PathBuf;

/// Run the face tracker over still images, one frame per file.
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// Images processed in order. Escape in the viewer stops early.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    #[command(flatten)]
    tracker: TrackerArgs,
}

fn main() -> anyhow::Result<()> {
    face_coords::init_logging();

    let args: Args = Args::parse();

    let (face_detector, recorder) = args.tracker.build()?;
    let mut face_tracker = FaceTracker::new(face_detector, recorder);

    let mut images = ImageFiles::new(args.images);
    let window = Window::new(&args.tracker.window, KeyWait::Hold)?;

    tracker::run(&mut images, &mut face_tracker, &window)?;
    Ok(())
}
