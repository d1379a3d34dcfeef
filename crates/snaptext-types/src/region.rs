use serde::{Deserialize, Serialize};

/// Screen position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("degenerate region: {width}x{height}")]
    Degenerate { width: i64, height: i64 },
}

/// Rectangle in screen pixels used as a capture target.
///
/// Width and height are always positive; there is no way to build an
/// empty `Region`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRegion", into = "RawRegion")]
pub struct Region {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

/// Pixels trimmed from each side of a dragged rectangle so the drawn
/// 2px border is not part of the capture.
const BORDER_INSET: i64 = 1;

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Result<Self, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::Degenerate {
                width: width.into(),
                height: height.into(),
            });
        }

        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Normalized rectangle between two drag corners, inset by the
    /// border stroke: `(min+1, min+1, |dx|-2, |dy|-2)`.
    pub fn from_drag(start: Point, end: Point) -> Result<Self, RegionError> {
        let (x1, y1) = (i64::from(start.x), i64::from(start.y));
        let (x2, y2) = (i64::from(end.x), i64::from(end.y));

        let x = x1.min(x2) + BORDER_INSET;
        let y = y1.min(y2) + BORDER_INSET;
        let width = (x2 - x1).abs() - 2 * BORDER_INSET;
        let height = (y2 - y1).abs() - 2 * BORDER_INSET;

        if width <= 0 || height <= 0 {
            return Err(RegionError::Degenerate { width, height });
        }

        let degenerate = RegionError::Degenerate { width, height };
        Ok(Self {
            x: i32::try_from(x).map_err(|_| degenerate)?,
            y: i32::try_from(y).map_err(|_| degenerate)?,
            width: u32::try_from(width).map_err(|_| degenerate)?,
            height: u32::try_from(height).map_err(|_| degenerate)?,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

#[derive(Serialize, Deserialize)]
struct RawRegion {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl TryFrom<RawRegion> for Region {
    type Error = RegionError;

    fn try_from(raw: RawRegion) -> Result<Self, Self::Error> {
        Region::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl From<Region> for RawRegion {
    fn from(region: Region) -> Self {
        Self {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        }
    }
}
