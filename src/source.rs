use opencv::prelude::*;
use opencv::{imgcodecs, videoio};
use std::collections::VecDeque;
use std::path::PathBuf;

pub trait FrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<Mat>>;
}

pub struct CameraSource {
    capture: videoio::VideoCapture,
}

impl CameraSource {
    /// A device that fails to open is not an error here, the first read
    /// simply yields no frame.
    pub fn new(index: i32) -> anyhow::Result<Self> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)?;
        if videoio::VideoCapture::is_opened(&capture)? {
            tracing::info!(index, "camera opened");
        } else {
            tracing::warn!(index, "camera did not open");
        }
        Ok(Self { capture })
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
        let mut frame = Mat::default();
        match self.capture.read(&mut frame) {
            Ok(true) if !frame.empty() => Ok(Some(frame)),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::warn!(%err, "camera read failed");
                Ok(None)
            }
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(err) = self.capture.release() {
            tracing::warn!(%err, "failed to release camera");
        }
    }
}

/// Still images read in order, one frame per file.
///
/// A file that cannot be decoded ends the sequence like a dead camera would.
pub struct ImageFiles {
    paths: VecDeque<PathBuf>,
}

impl ImageFiles {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }
}

impl FrameSource for ImageFiles {
    fn next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        let Some(name) = path.to_str() else {
            tracing::warn!(?path, "image path is not valid UTF-8");
            return Ok(None);
        };
        let frame = imgcodecs::imread_def(name)?;
        if frame.empty() {
            tracing::warn!(path = name, "could not read image");
            return Ok(None);
        }
        tracing::debug!(path = name, "read image");
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_camera_yields_no_frame_instead_of_an_error() {
        let mut source = CameraSource::new(9999).unwrap();
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn empty_image_list_has_no_frames() {
        let mut source = ImageFiles::new(Vec::new());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn unreadable_image_ends_the_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = ImageFiles::new(vec![dir.path().join("missing.png")]);
        assert!(source.next_frame().unwrap().is_none());
    }
}
