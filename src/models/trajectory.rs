// src/models/trajectory.rs
//
// Glyph stroke trajectories as served by the backend.
//
// A path is an ordered list of pen commands in glyph space (y up). On the wire
// each command is a tuple `[tag, ...points]` with points encoded as `[x, y]`.

use log::warn;
use nannou::prelude::{pt2, Point2};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::TrajectoryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_pt2(self) -> Point2 {
        pt2(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Move(Point),
    Line(Point),
    /// Cubic Bézier: two control points, then the end point.
    Curve(Point, Point, Point),
    Close,
    /// A command the decoder could not make sense of. Only produced under
    /// `TagPolicy::Lenient`; renders as a no-op.
    Unknown { tag: String },
}

impl Segment {
    /// Where the pen rests after this segment, if the segment has an endpoint.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Segment::Move(p) | Segment::Line(p) => Some(*p),
            Segment::Curve(_, _, p) => Some(*p),
            Segment::Close | Segment::Unknown { .. } => None,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Segment::Move(_) => "M",
            Segment::Line(_) => "L",
            Segment::Curve(..) => "C",
            Segment::Close => "Z",
            Segment::Unknown { tag } => tag,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Segment::Unknown { .. })
    }
}

/// What to do with segment tuples that don't decode to a known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPolicy {
    /// Fail the whole response.
    Strict,
    /// Keep the segment as `Segment::Unknown` and draw nothing for it.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphPath {
    segments: Vec<Segment>,
}

impl GlyphPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn unknown_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_unknown()).count()
    }

    /// Decode the path of `character` from its JSON value.
    pub fn decode(
        character: &str,
        value: &Value,
        policy: TagPolicy,
    ) -> Result<Self, TrajectoryError> {
        let raw_segments = value
            .as_array()
            .ok_or_else(|| TrajectoryError::MalformedPath {
                character: character.to_string(),
            })?;

        let segments = raw_segments
            .iter()
            .enumerate()
            .map(|(index, raw)| decode_segment(character, index, raw, policy))
            .collect::<Result<Vec<_>, _>>()?;

        let path = Self { segments };
        if path.unknown_count() > 0 {
            let tags: Vec<&str> = path.unknown_tags().collect();
            warn!(
                "'{}': skipping {} segment(s) with unusable tags {:?}",
                character,
                path.unknown_count(),
                tags
            );
        }
        Ok(path)
    }

    fn unknown_tags(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_unknown())
            .map(Segment::tag)
    }
}

fn decode_segment(
    character: &str,
    index: usize,
    raw: &Value,
    policy: TagPolicy,
) -> Result<Segment, TrajectoryError> {
    let malformed = |tag: &str, reason: String| match policy {
        TagPolicy::Lenient => Ok(Segment::Unknown {
            tag: tag.to_string(),
        }),
        TagPolicy::Strict => Err(TrajectoryError::MalformedSegment {
            character: character.to_string(),
            index,
            tag: tag.to_string(),
            reason,
        }),
    };

    let Some(items) = raw.as_array() else {
        return malformed("", format!("expected a tuple, found {}", raw));
    };
    let Some(tag) = items.first().and_then(Value::as_str) else {
        return malformed("", "missing command tag".to_string());
    };
    let args = &items[1..];

    let arity = match tag {
        "M" | "L" => 1,
        "C" => 3,
        "Z" => 0,
        other => {
            return match policy {
                TagPolicy::Lenient => Ok(Segment::Unknown {
                    tag: other.to_string(),
                }),
                TagPolicy::Strict => Err(TrajectoryError::UnknownTag {
                    character: character.to_string(),
                    index,
                    tag: other.to_string(),
                }),
            };
        }
    };

    // Lenient decoding tolerates trailing arguments, strict wants the exact count
    let arity_ok = match policy {
        TagPolicy::Lenient => args.len() >= arity,
        TagPolicy::Strict => args.len() == arity,
    };
    if !arity_ok {
        return malformed(
            tag,
            format!("expected {} point(s), found {}", arity, args.len()),
        );
    }

    let mut points = Vec::with_capacity(arity);
    for arg in &args[..arity] {
        match decode_point(arg) {
            Some(point) => points.push(point),
            None => return malformed(tag, format!("invalid point {}", arg)),
        }
    }

    Ok(match tag {
        "M" => Segment::Move(points[0]),
        "L" => Segment::Line(points[0]),
        "C" => Segment::Curve(points[0], points[1], points[2]),
        _ => Segment::Close,
    })
}

fn decode_point(value: &Value) -> Option<Point> {
    match value.as_array()?.as_slice() {
        [x, y] => Some(Point::new(x.as_f64()? as f32, y.as_f64()? as f32)),
        _ => None,
    }
}

/// Character -> path, in the order the backend sent them.
/// That order is the left-to-right order of the canvases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryMap {
    entries: Vec<(String, GlyphPath)>,
}

impl TrajectoryMap {
    pub fn from_entries(entries: Vec<(String, GlyphPath)>) -> Self {
        Self { entries }
    }

    pub fn decode(object: &Map<String, Value>, policy: TagPolicy) -> Result<Self, TrajectoryError> {
        let entries = object
            .iter()
            .map(|(character, value)| {
                GlyphPath::decode(character, value, policy).map(|path| (character.clone(), path))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GlyphPath)> {
        self.entries.iter().map(|(c, p)| (c.as_str(), p))
    }

    #[cfg(test)]
    pub fn get(&self, character: &str) -> Option<&GlyphPath> {
        self.entries
            .iter()
            .find(|(c, _)| c == character)
            .map(|(_, p)| p)
    }

    pub fn characters(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_all_commands() {
        let value = json!([
            ["M", [0, 0]],
            ["L", [100, 700]],
            ["C", [1.5, 2.5], [3, 4], [5, 6]],
            ["Z"]
        ]);
        let path = GlyphPath::decode("a", &value, TagPolicy::Strict).unwrap();

        assert_eq!(
            path.segments(),
            &[
                Segment::Move(Point::new(0.0, 0.0)),
                Segment::Line(Point::new(100.0, 700.0)),
                Segment::Curve(
                    Point::new(1.5, 2.5),
                    Point::new(3.0, 4.0),
                    Point::new(5.0, 6.0)
                ),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn test_empty_path() {
        let path = GlyphPath::decode("a", &json!([]), TagPolicy::Strict).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_unknown_tag_lenient() {
        let value = json!([["M", [0, 0]], ["Q", [1, 1], [2, 2]], ["Z"]]);
        let path = GlyphPath::decode("a", &value, TagPolicy::Lenient).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(
            path.segments()[1],
            Segment::Unknown {
                tag: "Q".to_string()
            }
        );
        assert_eq!(path.unknown_count(), 1);
        assert_eq!(path.unknown_tags().collect::<Vec<_>>(), vec!["Q"]);
    }

    #[test]
    fn test_unknown_tag_strict() {
        let value = json!([["M", [0, 0]], ["Q", [1, 1], [2, 2]]]);
        let err = GlyphPath::decode("山", &value, TagPolicy::Strict).unwrap_err();

        match err {
            TrajectoryError::UnknownTag {
                character,
                index,
                tag,
            } => {
                assert_eq!(character, "山");
                assert_eq!(index, 1);
                assert_eq!(tag, "Q");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_arity() {
        let value = json!([["C", [0, 0], [1, 1]]]);

        let lenient = GlyphPath::decode("a", &value, TagPolicy::Lenient).unwrap();
        assert!(lenient.segments()[0].is_unknown());
        assert_eq!(lenient.segments()[0].tag(), "C");

        let strict = GlyphPath::decode("a", &value, TagPolicy::Strict);
        assert!(matches!(
            strict,
            Err(TrajectoryError::MalformedSegment { index: 0, .. })
        ));
    }

    #[test]
    fn test_trailing_args() {
        let value = json!([["Z", [0, 0]]]);

        let lenient = GlyphPath::decode("a", &value, TagPolicy::Lenient).unwrap();
        assert_eq!(lenient.segments(), &[Segment::Close]);

        assert!(GlyphPath::decode("a", &value, TagPolicy::Strict).is_err());
    }

    #[test]
    fn test_non_numeric_point() {
        let value = json!([["L", ["x", 1]]]);
        let path = GlyphPath::decode("a", &value, TagPolicy::Lenient).unwrap();
        assert!(path.segments()[0].is_unknown());
    }

    #[test]
    fn test_path_not_an_array() {
        let err = GlyphPath::decode("a", &json!({"M": 1}), TagPolicy::Lenient).unwrap_err();
        assert!(matches!(err, TrajectoryError::MalformedPath { .. }));
    }

    #[test]
    fn test_end_points() {
        assert_eq!(
            Segment::Curve(
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 3.0)
            )
            .end_point(),
            Some(Point::new(2.0, 3.0))
        );
        assert_eq!(Segment::Close.end_point(), None);
    }

    #[test]
    fn test_map_keeps_order() {
        let value = json!({
            "秋": [["M", [0, 0]]],
            "山": [],
            "居": [["Z"]]
        });
        let map = TrajectoryMap::decode(value.as_object().unwrap(), TagPolicy::Strict).unwrap();

        assert_eq!(map.characters(), vec!["秋", "山", "居"]);
        assert!(map.get("山").unwrap().is_empty());
        assert_eq!(map.get("居").unwrap().len(), 1);
        assert!(map.get("暝").is_none());
    }
}
