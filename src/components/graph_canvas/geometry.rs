//! Planar geometry shared by edge layout and hit-testing.

/// A point in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	/// Construct a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Distances below this treat two points as coincident.
const MIN_DISTANCE: f64 = 1e-6;

/// Returns the point `radius` units from `source` along the direction to
/// `target`.
///
/// Edge lines are trimmed with this from both endpoints so they stop at the
/// node disk boundary instead of running to its center. Coincident endpoints
/// have no direction; the source point is returned unchanged.
pub fn edge_point(source: Point, target: Point, radius: f64) -> Point {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < MIN_DISTANCE {
		return source;
	}
	let ratio = radius / dist;
	Point {
		x: source.x + dx * ratio,
		y: source.y + dy * ratio,
	}
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	(dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_exactly_radius_towards_target() {
		let p = edge_point(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
		assert!((p.x - 4.0).abs() < 1e-9);
		assert!(p.y.abs() < 1e-9);
	}

	#[test]
	fn offset_point_lies_on_the_segment() {
		let source = Point::new(3.0, -2.0);
		let target = Point::new(-5.0, 7.0);
		let radius = 2.5;
		let p = edge_point(source, target, radius);

		assert!((distance(source, p) - radius).abs() < 1e-9);
		// Collinear with the segment: cross product of (p - source) and
		// (target - source) vanishes.
		let cross = (p.x - source.x) * (target.y - source.y)
			- (p.y - source.y) * (target.x - source.x);
		assert!(cross.abs() < 1e-9);
	}

	#[test]
	fn coincident_endpoints_return_source_unchanged() {
		let source = Point::new(12.0, 34.0);
		let p = edge_point(source, source, 40.0);
		assert_eq!(p, source);
	}

	#[test]
	fn near_zero_distance_is_guarded() {
		let source = Point::new(1.0, 1.0);
		let target = Point::new(1.0 + 1e-9, 1.0);
		let p = edge_point(source, target, 40.0);
		assert_eq!(p, source);
	}
}
