use crate::bounding_box::BoundingBox;
use opencv::core::{self, Rect};
use opencv::imgproc;
use opencv::prelude::*;

const BOX_THICKNESS: i32 = 2;
const CENTER_RADIUS: i32 = 4;

fn green() -> core::Scalar {
    core::Scalar::new(0.0, 255.0, 0.0, 0.0)
}

fn red() -> core::Scalar {
    core::Scalar::new(0.0, 0.0, 255.0, 0.0)
}

pub fn draw_face(frame: &mut Mat, face: &BoundingBox) -> anyhow::Result<()> {
    imgproc::rectangle(
        frame,
        Rect::from(*face),
        green(),
        BOX_THICKNESS,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::circle(
        frame,
        face.center(),
        CENTER_RADIUS,
        red(),
        imgproc::FILLED,
        imgproc::LINE_8,
        0,
    )?;
    Ok(())
}
