//! Edge and label placement.

use std::f64::consts::PI;

/// Perpendicular distance of a label from its link, in reference units.
pub const LABEL_OFFSET_SCALE: f64 = 0.4;
/// Reference length the perpendicular vector is normalized to.
const LABEL_REFERENCE_LENGTH: f64 = 100.0;
/// Stand-in denominator for zero-length links.
const MIN_LABEL_DENOMINATOR: f64 = 0.1;

/// A position in graph coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downward.
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Start and end of a link so that the end sits on the target's rim and the
/// start is pulled in by the same offset toward the target.
pub fn arc_endpoints(source: Point, target: Point, target_radius: f64) -> (Point, Point) {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dr = dx.hypot(dy);
	if dr == 0.0 {
		return (source, target);
	}
	let (ox, oy) = (dx * target_radius / dr, dy * target_radius / dr);
	(
		Point::new(source.x + ox, source.y + oy),
		Point::new(target.x - ox, target.y - oy),
	)
}

/// SVG path of a circular arc from `source` to `target`, radius equal to their
/// distance.
pub fn link_arc(source: Point, target: Point, target_radius: f64) -> String {
	let dr = source.distance(target);
	let (start, end) = arc_endpoints(source, target, target_radius);
	format!(
		"M{},{}A{},{} 0 0,0 {},{}",
		start.x, start.y, dr, dr, end.x, end.y
	)
}

/// Label anchor: the link midpoint pushed sideways off the line.
pub fn calc_label_pos(source: Point, target: Point) -> Point {
	let mid = Point::new((source.x + target.x) / 2.0, (source.y + target.y) / 2.0);
	// direction rotated by -90 degrees
	let (rx, ry) = (target.y - source.y, -(target.x - source.x));
	let len = rx.hypot(ry) / LABEL_REFERENCE_LENGTH;
	let len = if len != 0.0 { len } else { MIN_LABEL_DENOMINATOR };
	Point::new(
		mid.x - LABEL_OFFSET_SCALE * rx / len,
		mid.y - LABEL_OFFSET_SCALE * ry / len,
	)
}

/// Label angle in degrees for a link from `source` to `target`.
pub fn label_angle(source: Point, target: Point) -> f64 {
	let rad = (target.x - source.x).atan2(target.y - source.y);
	-90.0 - rad * (180.0 / PI)
}

/// `transform` attribute rotating a label about `center`.
pub fn rotate_label(source: Point, target: Point, center: Point) -> String {
	format!(
		"rotate({} {} {})",
		label_angle(source, target),
		center.x,
		center.y
	)
}

/// `transform` attribute placing a node group.
pub fn translate(p: Point) -> String {
	format!("translate({},{})", p.x, p.y)
}
