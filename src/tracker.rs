use crate::border::FrameSize;
use crate::detector::{convert_to_grayscale, FaceDetector};
use crate::display::Viewer;
use crate::overlay::draw_face;
use crate::recorder::SlotRecorder;
use crate::source::FrameSource;
use opencv::prelude::*;

/// Turns a captured frame into the annotated frame to show.
pub trait FrameProcessor {
    fn process_frame(&mut self, frame: &Mat) -> anyhow::Result<Mat>;
}

pub struct FaceTracker {
    face_detector: FaceDetector,
    recorder: SlotRecorder,
}

impl FaceTracker {
    pub fn new(face_detector: FaceDetector, recorder: SlotRecorder) -> Self {
        Self {
            face_detector,
            recorder,
        }
    }
}

impl FrameProcessor for FaceTracker {
    fn process_frame(&mut self, frame: &Mat) -> anyhow::Result<Mat> {
        let mut debug_frame = frame.clone();
        let frame_grayscale = convert_to_grayscale(frame)?;

        let detected_faces = self.face_detector.detect(&frame_grayscale)?;
        tracing::debug!(faces = detected_faces.len(), "detected faces");

        let frame_size = FrameSize::from(frame.size()?);
        if let Some(face) = self.recorder.record(&detected_faces, frame_size)? {
            draw_face(&mut debug_frame, &face)?;
        }

        Ok(debug_frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    FrameUnavailable,
    UserCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

impl LoopState {
    fn after_frame(cancelled: bool) -> Self {
        if cancelled {
            LoopState::Stopped(StopReason::UserCancelled)
        } else {
            LoopState::Running
        }
    }
}

pub fn step(
    source: &mut impl FrameSource,
    tracker: &mut impl FrameProcessor,
    window: &impl Viewer,
) -> anyhow::Result<LoopState> {
    let Some(frame) = source.next_frame()? else {
        return Ok(LoopState::Stopped(StopReason::FrameUnavailable));
    };

    let debug_frame = tracker.process_frame(&frame)?;
    window.show(&debug_frame)?;
    Ok(LoopState::after_frame(window.cancelled()?))
}

/// Steps until the source runs dry or the user presses Escape.
///
/// Source and window stay borrowed, the caller drops them to release
/// the device and close the viewer on every exit path.
pub fn run(
    source: &mut impl FrameSource,
    tracker: &mut impl FrameProcessor,
    window: &impl Viewer,
) -> anyhow::Result<StopReason> {
    let mut frames: u64 = 0;
    loop {
        match step(source, tracker, window)? {
            LoopState::Running => frames += 1,
            LoopState::Stopped(reason) => {
                tracing::info!(?reason, frames, "tracking loop stopped");
                return Ok(reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::BorderThreshold;
    use crate::bounding_box::BoundingBox;
    use crate::slots::{Slot, SlotFiles};
    use crate::source::ImageFiles;
    use opencv::core;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    struct FixedFaces {
        recorder: SlotRecorder,
        faces: Vec<BoundingBox>,
        calls: usize,
    }

    impl FrameProcessor for FixedFaces {
        fn process_frame(&mut self, frame: &Mat) -> anyhow::Result<Mat> {
            self.calls += 1;
            self.recorder
                .record(&self.faces, FrameSize::from(frame.size()?))?;
            Ok(frame.clone())
        }
    }

    #[derive(Default)]
    struct ScriptedKeys {
        escapes: RefCell<VecDeque<bool>>,
        shown: Cell<usize>,
    }

    impl ScriptedKeys {
        fn new(escapes: &[bool]) -> Self {
            Self {
                escapes: RefCell::new(escapes.iter().copied().collect()),
                shown: Cell::new(0),
            }
        }
    }

    impl Viewer for ScriptedKeys {
        fn show(&self, _frame: &Mat) -> anyhow::Result<()> {
            self.shown.set(self.shown.get() + 1);
            Ok(())
        }

        fn cancelled(&self) -> anyhow::Result<bool> {
            Ok(self.escapes.borrow_mut().pop_front().unwrap_or(false))
        }
    }

    struct Frames(VecDeque<Mat>);

    impl FrameSource for Frames {
        fn next_frame(&mut self) -> anyhow::Result<Option<Mat>> {
            Ok(self.0.pop_front())
        }
    }

    fn blank_frames(count: usize) -> Frames {
        let frames = (0..count)
            .map(|_| {
                Mat::new_rows_cols_with_default(600, 800, core::CV_8UC3, core::Scalar::all(0.0))
                    .unwrap()
            })
            .collect();
        Frames(frames)
    }

    fn fixed_faces(faces: Vec<BoundingBox>) -> (TempDir, FixedFaces) {
        let dir = tempfile::tempdir().unwrap();
        let recorder =
            SlotRecorder::new(SlotFiles::new(dir.path()), BorderThreshold::default()).unwrap();
        let processor = FixedFaces {
            recorder,
            faces,
            calls: 0,
        };
        (dir, processor)
    }

    fn contents(files: &SlotFiles) -> Vec<String> {
        Slot::ALL
            .into_iter()
            .map(|slot| fs::read_to_string(files.path(slot)).unwrap())
            .collect()
    }

    #[test]
    fn escape_stops_the_loop() {
        assert_eq!(
            LoopState::after_frame(true),
            LoopState::Stopped(StopReason::UserCancelled)
        );
    }

    #[test]
    fn other_keys_keep_running() {
        assert_eq!(LoopState::after_frame(false), LoopState::Running);
    }

    #[test]
    fn missing_frame_stops_without_touching_slots() {
        let (_dir, mut processor) = fixed_faces(vec![BoundingBox::new(50, 50, 100, 100)]);
        let files = processor.recorder.files().clone();
        files
            .store(Slot::Left, &BoundingBox::new(1, 2, 3, 4))
            .unwrap();
        let before = contents(&files);
        let viewer = ScriptedKeys::default();

        let state = step(&mut ImageFiles::new(Vec::new()), &mut processor, &viewer).unwrap();

        assert_eq!(state, LoopState::Stopped(StopReason::FrameUnavailable));
        assert_eq!(processor.calls, 0);
        assert_eq!(viewer.shown.get(), 0);
        assert_eq!(contents(&files), before);
    }

    #[test]
    fn run_records_frames_until_escape() {
        let (_dir, mut processor) = fixed_faces(vec![BoundingBox::new(50, 50, 100, 100)]);
        let viewer = ScriptedKeys::new(&[false, true]);

        let reason = run(&mut blank_frames(3), &mut processor, &viewer).unwrap();

        assert_eq!(reason, StopReason::UserCancelled);
        assert_eq!(processor.calls, 2);
        assert_eq!(viewer.shown.get(), 2);
        let files = processor.recorder.files();
        assert_eq!(
            fs::read_to_string(files.path(Slot::Current)).unwrap(),
            "50,50,100,100"
        );
        assert_eq!(fs::read_to_string(files.path(Slot::Right)).unwrap(), "");
    }

    #[test]
    fn run_stops_when_frames_run_out() {
        let (_dir, mut processor) = fixed_faces(Vec::new());
        let viewer = ScriptedKeys::default();

        let reason = run(&mut blank_frames(2), &mut processor, &viewer).unwrap();

        assert_eq!(reason, StopReason::FrameUnavailable);
        assert_eq!(processor.calls, 2);
        assert!(contents(processor.recorder.files())
            .iter()
            .all(|text| text.is_empty()));
    }
}
