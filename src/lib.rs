pub mod border;
pub mod bounding_box;
pub mod config;
pub mod detector;
pub mod display;
pub mod overlay;
pub mod recorder;
pub mod slots;
pub mod source;
pub mod tracker;
pub mod transport;
pub mod watcher;

pub use border::{BorderThreshold, FrameSize};
pub use bounding_box::{BoundingBox, ParseBoxError};
pub use detector::{DetectorParams, FaceDetector};
pub use display::{KeyWait, Viewer, Window};
pub use recorder::SlotRecorder;
pub use slots::{Slot, SlotFiles};
pub use source::{CameraSource, FrameSource, ImageFiles};
pub use tracker::{FaceTracker, FrameProcessor, LoopState, StopReason};
pub use transport::ErrorWrapper;

pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
