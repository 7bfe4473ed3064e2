use opencv::core::{Point, Rect};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(bbox.x, bbox.y, bbox.width, bbox.height)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseBoxError {
    #[error("expected 4 comma separated fields, found {0}")]
    FieldCount(usize),
    #[error("field {index} is not an integer: {value:?}")]
    NotAnInteger { index: usize, value: String },
    #[error("negative size {width}x{height}")]
    NegativeSize { width: i32, height: i32 },
    #[error("box {x},{y} {width}x{height} extends past the i32 range")]
    OutOfRange {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl FromStr for BoundingBox {
    type Err = ParseBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        if fields.len() != 4 {
            return Err(ParseBoxError::FieldCount(fields.len()));
        }

        let mut values = [0i32; 4];
        for (index, field) in fields.iter().enumerate() {
            values[index] = field
                .trim()
                .parse()
                .map_err(|_| ParseBoxError::NotAnInteger {
                    index,
                    value: field.to_string(),
                })?;
        }

        let [x, y, width, height] = values;
        if width < 0 || height < 0 {
            return Err(ParseBoxError::NegativeSize { width, height });
        }
        if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
            return Err(ParseBoxError::OutOfRange {
                x,
                y,
                width,
                height,
            });
        }
        Ok(Self::new(x, y, width, height))
    }
}
