use crate::border::{BorderThreshold, FrameSize};
use crate::bounding_box::BoundingBox;
use crate::slots::SlotFiles;

pub struct SlotRecorder {
    files: SlotFiles,
    threshold: BorderThreshold,
}

impl SlotRecorder {
    pub fn new(files: SlotFiles, threshold: BorderThreshold) -> anyhow::Result<Self> {
        files.ensure_created()?;
        Ok(Self { files, threshold })
    }

    pub fn files(&self) -> &SlotFiles {
        &self.files
    }

    /// Records the first detected face and returns it.
    ///
    /// Only index 0 is tracked, in whatever order the detector produced.
    /// With no faces nothing is written and the slots keep their stale values.
    pub fn record(
        &self,
        faces: &[BoundingBox],
        frame: FrameSize,
    ) -> anyhow::Result<Option<BoundingBox>> {
        let Some(face) = faces.first() else {
            return Ok(None);
        };

        let slots = self.threshold.triggered_slots(face, frame);
        for slot in &slots {
            self.files.store(*slot, face)?;
        }
        tracing::debug!(face = %face, ?slots, "recorded face");
        Ok(Some(*face))
    }
}
