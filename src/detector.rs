use crate::bounding_box::BoundingBox;
use opencv::prelude::*;
use opencv::{core, imgproc, objdetect, types};
use std::path::Path;

pub const DEFAULT_CASCADE: &str = "haarcascades/haarcascade_frontalface_default.xml";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.3,
            min_neighbors: 5,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            anyhow::bail!("Scale factor must be greater than 1, got {}", self.scale_factor);
        }
        if self.min_neighbors < 0 {
            anyhow::bail!("Min neighbors must not be negative, got {}", self.min_neighbors);
        }
        Ok(())
    }
}

pub struct FaceDetector {
    classifier: objdetect::CascadeClassifier,
    params: DetectorParams,
}

impl FaceDetector {
    /// Loads the bundled frontal face cascade found through OpenCV's data search.
    pub fn new(params: DetectorParams) -> anyhow::Result<Self> {
        let xml = core::find_file_def(DEFAULT_CASCADE)?;
        Self::from_file(&xml, params)
    }

    pub fn from_path(path: &Path, params: DetectorParams) -> anyhow::Result<Self> {
        let xml = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Cascade path is not valid UTF-8: {:?}", path))?;
        Self::from_file(xml, params)
    }

    fn from_file(xml: &str, params: DetectorParams) -> anyhow::Result<Self> {
        params.validate()?;
        let classifier = objdetect::CascadeClassifier::new(xml)?;
        if classifier.empty()? {
            anyhow::bail!("Failed to load face cascade from {}", xml);
        }
        tracing::info!(cascade = xml, ?params, "loaded face detector");
        Ok(Self { classifier, params })
    }

    pub fn detect(&mut self, image: &Mat) -> anyhow::Result<Vec<BoundingBox>> {
        let mut faces = types::VectorOfRect::new();

        self.classifier.detect_multi_scale(
            image,
            &mut faces,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            core::Size {
                width: 0,
                height: 0,
            },
            core::Size {
                width: 0,
                height: 0,
            },
        )?;
        Ok(faces.into_iter().map(BoundingBox::from).collect())
    }
}

pub fn convert_to_grayscale(image: &Mat) -> anyhow::Result<Mat> {
    let mut gray: Mat = Mat::default();
    imgproc::cvt_color_def(image, &mut gray, imgproc::COLOR_BGR2GRAY)?;
    Ok(gray)
}
