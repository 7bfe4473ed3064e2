use crate::border::{BorderThreshold, DEFAULT_BORDER_THRESHOLD};
use crate::detector::{DetectorParams, FaceDetector};
use crate::display::DEFAULT_WINDOW;
use crate::recorder::SlotRecorder;
use crate::slots::SlotFiles;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct TrackerArgs {
    /// Directory holding the five slot files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Haar cascade XML. Defaults to OpenCV's bundled frontal face cascade.
    #[arg(long)]
    pub cascade: Option<PathBuf>,

    /// Fraction of the frame width/height counted as border.
    #[arg(long, default_value_t = DEFAULT_BORDER_THRESHOLD)]
    pub border_threshold: f64,

    #[arg(long, default_value_t = 1.3)]
    pub scale_factor: f64,

    #[arg(long, default_value_t = 5)]
    pub min_neighbors: i32,

    /// Viewer window title.
    #[arg(long, default_value = DEFAULT_WINDOW)]
    pub window: String,
}

impl TrackerArgs {
    pub fn detector_params(&self) -> DetectorParams {
        DetectorParams {
            scale_factor: self.scale_factor,
            min_neighbors: self.min_neighbors,
        }
    }

    pub fn border_threshold(&self) -> anyhow::Result<BorderThreshold> {
        BorderThreshold::new(self.border_threshold)
    }

    pub fn build(&self) -> anyhow::Result<(FaceDetector, SlotRecorder)> {
        let threshold = self.border_threshold()?;
        let params = self.detector_params();
        params.validate()?;

        let recorder = SlotRecorder::new(SlotFiles::new(&self.output_dir), threshold)?;
        tracing::info!(
            dir = %self.output_dir.display(),
            threshold = threshold.fraction(),
            "slot files ready"
        );

        let detector = match &self.cascade {
            Some(path) => FaceDetector::from_path(path, params)?,
            None => FaceDetector::new(params)?,
        };
        Ok((detector, recorder))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ZenohArgs {
    /// Endpoints to connect to.
    #[clap(short = 'e', long)]
    pub connect: Vec<zenoh_config::EndPoint>,

    /// Endpoints to listen on.
    #[clap(long)]
    pub listen: Vec<zenoh_config::EndPoint>,
}
