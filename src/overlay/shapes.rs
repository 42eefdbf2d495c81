//! Overlay geometry and its boundary parsing.
//!
//! Scanner results arrive as loosely shaped JSON: a detection box is either a
//! list of `[x, y]` pairs or a `{x, y, width, height}` record, and a scan line
//! is a two-element list of `{x, y}` endpoints that may be missing. The shape
//! is decided here, once, so the renderer only ever sees typed values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// Where a barcode was found in the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionBox {
    /// Outline through every point in order, closed back to the first.
    Polygon { points: Vec<Point> },
    /// Axis-aligned rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Rectangle record as a scanner reports it.
#[derive(Deserialize)]
struct RectRecord {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl DetectionBox {
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        Self::Polygon {
            points: points.into_iter().collect(),
        }
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Decode a scanner's box value.
    ///
    /// Returns `None` for `null` and for anything that is neither a list of
    /// `[x, y]` pairs nor a rectangle record. Malformed shapes are dropped
    /// without error.
    pub fn from_json(value: &Value) -> Option<Self> {
        let parsed = match value {
            Value::Array(_) => Vec::<[f32; 2]>::deserialize(value)
                .map(|pairs| Self::polygon(pairs.into_iter().map(Point::from))),
            Value::Object(_) => RectRecord::deserialize(value)
                .map(|r| Self::rect(r.x, r.y, r.width, r.height)),
            Value::Null => return None,
            other => {
                debug!(value = %other, "dropping unrecognised detection box");
                return None;
            }
        };
        match parsed {
            Ok(shape) => Some(shape),
            Err(e) => {
                debug!(error = %e, "dropping unrecognised detection box");
                None
            }
        }
    }

    /// A polygon with no points outlines nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Polygon { points } if points.is_empty())
    }
}

/// A scan line across the frame. Either endpoint may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanLine {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl ScanLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints, if present.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.start.zip(self.end)
    }

    /// Decode a scanner's line value: a list whose first two entries are
    /// `{x, y}` records (or `null`).
    ///
    /// Returns `None` only when the value itself is absent or not a list.
    pub fn from_json(value: &Value) -> Option<Self> {
        let entries = value.as_array()?;
        let point_at = |i: usize| {
            entries
                .get(i)
                .and_then(|v| Point::deserialize(v).ok())
        };
        Some(Self {
            start: point_at(0),
            end: point_at(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_pairs_become_polygon() {
        let parsed = DetectionBox::from_json(&json!([[1, 2], [3.5, 4], [5, 6]]));
        assert_eq!(
            parsed,
            Some(DetectionBox::polygon([
                Point::new(1.0, 2.0),
                Point::new(3.5, 4.0),
                Point::new(5.0, 6.0),
            ]))
        );
    }

    #[test]
    fn test_record_becomes_rect() {
        let parsed = DetectionBox::from_json(&json!({"x": 10, "y": 20, "width": 30, "height": 40}));
        assert_eq!(parsed, Some(DetectionBox::rect(10.0, 20.0, 30.0, 40.0)));
    }

    #[test]
    fn test_empty_list_is_empty_polygon() {
        let parsed = DetectionBox::from_json(&json!([])).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_malformed_shapes_dropped() {
        assert_eq!(DetectionBox::from_json(&json!(null)), None);
        assert_eq!(DetectionBox::from_json(&json!({"x": 1, "y": 2})), None);
        assert_eq!(DetectionBox::from_json(&json!([1, 2, 3, 4])), None);
        assert_eq!(DetectionBox::from_json(&json!("box")), None);
        assert_eq!(DetectionBox::from_json(&json!([[1, 2], [3]])), None);
    }

    #[test]
    fn test_scan_line_both_endpoints() {
        let line = ScanLine::from_json(&json!([{"x": 0, "y": 5}, {"x": 100, "y": 5}])).unwrap();
        assert_eq!(
            line.endpoints(),
            Some((Point::new(0.0, 5.0), Point::new(100.0, 5.0)))
        );
    }

    #[test]
    fn test_scan_line_missing_endpoint() {
        let line = ScanLine::from_json(&json!([{"x": 0, "y": 5}])).unwrap();
        assert_eq!(line.start, Some(Point::new(0.0, 5.0)));
        assert_eq!(line.end, None);
        assert_eq!(line.endpoints(), None);

        let line = ScanLine::from_json(&json!([null, {"x": 1, "y": 1}])).unwrap();
        assert_eq!(line.endpoints(), None);
    }

    #[test]
    fn test_scan_line_absent() {
        assert_eq!(ScanLine::from_json(&json!(null)), None);
        assert_eq!(ScanLine::from_json(&json!({"x": 1})), None);
    }
}
