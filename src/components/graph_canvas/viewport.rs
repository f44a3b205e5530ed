//! Pan/zoom transform composition.
//!
//! One authoritative transform exists per canvas. Gestures are classified
//! before they get here; each class has its own update policy, so a pan can
//! never rescale the scene and a zoom can never escape the configured range.

use super::config::ZoomConfig;
use super::geometry::Point;

/// A 2D affine view transform: translation plus uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	pub x: f64,
	pub y: f64,
	/// Uniform scale factor.
	pub k: f64,
}

impl Transform {
	/// The identity transform.
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	/// Transform placing the world origin at the center of a
	/// `width` × `height` viewport, unscaled.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}
}

impl Default for Transform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// A gesture the viewport accepts. Anything else (a plain wheel without a
/// modifier key, say) is dropped by the caller and never reaches the
/// transform.
#[derive(Clone, Copy, Debug)]
pub enum Gesture {
	/// Programmatic transform, applied verbatim.
	Reset(Transform),
	/// Pointer-drag pan: a new translation; the current scale is kept.
	Pan { x: f64, y: f64 },
	/// Explicit zoom request (ctrl/cmd + wheel): a full transform whose
	/// scale is clamped into the configured range.
	Zoom(Transform),
}

/// Owns the single authoritative transform for a canvas.
#[derive(Clone, Debug)]
pub struct Viewport {
	transform: Transform,
	config: ZoomConfig,
}

impl Viewport {
	/// Create a viewport at the identity transform.
	pub fn new(config: ZoomConfig) -> Self {
		Self {
			transform: Transform::IDENTITY,
			config,
		}
	}

	/// Current transform.
	pub fn transform(&self) -> Transform {
		self.transform
	}

	/// Apply a gesture according to its class's policy.
	pub fn apply(&mut self, gesture: Gesture) {
		match gesture {
			Gesture::Reset(t) => self.transform = t,
			Gesture::Pan { x, y } => {
				self.transform.x = x;
				self.transform.y = y;
			}
			Gesture::Zoom(t) => {
				self.transform = Transform {
					k: t.k.clamp(self.config.min_zoom, self.config.max_zoom),
					..t
				};
			}
		}
	}

	/// Map screen coordinates into world coordinates.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Build the transform a wheel step at screen point (`cx`, `cy`)
	/// requests: the scale moves one configured step in the wheel's
	/// direction while the world point under the cursor stays put. Pass the
	/// result through [`Gesture::Zoom`].
	pub fn wheel_zoom(&self, cx: f64, cy: f64, delta_y: f64) -> Transform {
		let factor = if delta_y > 0.0 {
			1.0 / self.config.wheel_step
		} else {
			self.config.wheel_step
		};
		let k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = k / self.transform.k;
		Transform {
			x: cx - (cx - self.transform.x) * ratio,
			y: cy - (cy - self.transform.y) * ratio,
			k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> Viewport {
		Viewport::new(ZoomConfig::default())
	}

	#[test]
	fn reset_applies_verbatim() {
		let mut v = viewport();
		let t = Transform {
			x: 400.0,
			y: 300.0,
			k: 1.0,
		};
		v.apply(Gesture::Reset(t));
		assert_eq!(v.transform(), t);
	}

	#[test]
	fn pan_updates_translation_and_keeps_scale() {
		let mut v = viewport();
		v.apply(Gesture::Zoom(Transform {
			x: 10.0,
			y: 20.0,
			k: 2.5,
		}));

		v.apply(Gesture::Pan { x: 70.0, y: -15.0 });
		let t = v.transform();
		assert_eq!((t.x, t.y), (70.0, -15.0));
		assert_eq!(t.k, 2.5);
	}

	#[test]
	fn zoom_scale_is_clamped_to_the_configured_range() {
		let mut v = viewport();
		v.apply(Gesture::Zoom(Transform {
			x: 0.0,
			y: 0.0,
			k: 50.0,
		}));
		assert_eq!(v.transform().k, 10.0);

		v.apply(Gesture::Zoom(Transform {
			x: 0.0,
			y: 0.0,
			k: 0.001,
		}));
		assert_eq!(v.transform().k, 0.1);
	}

	#[test]
	fn centered_transform_maps_origin_to_viewport_center() {
		let mut v = viewport();
		v.apply(Gesture::Reset(Transform::centered(800.0, 600.0)));
		let p = v.screen_to_world(400.0, 300.0);
		assert_eq!(p, Point::new(0.0, 0.0));
		assert_eq!(v.transform().k, 1.0);
	}

	#[test]
	fn wheel_zoom_keeps_the_cursor_point_fixed() {
		let mut v = viewport();
		v.apply(Gesture::Reset(Transform::centered(800.0, 600.0)));

		let before = v.screen_to_world(250.0, 130.0);
		let requested = v.wheel_zoom(250.0, 130.0, -1.0);
		v.apply(Gesture::Zoom(requested));
		let after = v.screen_to_world(250.0, 130.0);

		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
		assert!(v.transform().k > 1.0);
	}

	#[test]
	fn repeated_wheel_zoom_saturates_at_the_range_edge() {
		let mut v = viewport();
		for _ in 0..200 {
			let t = v.wheel_zoom(0.0, 0.0, -1.0);
			v.apply(Gesture::Zoom(t));
		}
		assert_eq!(v.transform().k, 10.0);
	}
}
