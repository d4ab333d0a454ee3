use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in asset pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Shape of a user-drawn region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    Rectangle,
    Polygon,
    Point,
    Polyline,
}

/// A user-drawn annotation area with attached tag names.
///
/// Only `Rectangle` regions yield bounding boxes for export; the first two
/// points are the start and end corners of the rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub region_type: RegionType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Region {
    pub fn new(region_type: RegionType) -> Self {
        Region {
            id: Uuid::new_v4().to_string(),
            region_type,
            tags: Vec::new(),
            points: Vec::new(),
        }
    }

    /// A rectangle spanning the two given corner points.
    pub fn rectangle(start: Point, end: Point, tags: Vec<String>) -> Self {
        Region {
            id: Uuid::new_v4().to_string(),
            region_type: RegionType::Rectangle,
            tags,
            points: vec![start, end],
        }
    }
}
