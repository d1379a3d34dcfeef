pub mod region;
pub mod types;

pub use region::{Point, Region, RegionError};
pub use types::{Action, AppEvent, PointerEvent, RawImage, TextSource};
