//! Screen ↔ world transform: pan and zoom-to-cursor.

use crate::model::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SCALE: f32 = 0.1;
pub const DEFAULT_MAX_SCALE: f32 = 5.0;

/// One wheel (or trackpad scroll) step in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    pub dx: f32,
    pub dy: f32,
    /// Ctrl/Cmd held: zoom instead of pan.
    pub zoom_modifier: bool,
}

/// `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Point,
    pub scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            scale: 1.0,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl Viewport {
    /// Limits that are not a positive, ordered range fall back to the defaults.
    pub fn with_limits(min_scale: f32, max_scale: f32) -> Self {
        let (min_scale, max_scale) = if min_scale > 0.0 && min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            log::warn!("viewport: ignoring zoom limits [{min_scale}, {max_scale}]");
            (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
        };
        let mut viewport = Self {
            min_scale,
            max_scale,
            ..Self::default()
        };
        viewport.scale = viewport.clamp_scale(1.0);
        viewport
    }

    /// Tolerates inverted limits set through the public fields.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Shift by a raw screen-space delta. Unbounded.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Rescale so the world point under `anchor` stays under it.
    ///
    /// Returns whether the scale actually changed (it may already sit at a
    /// clamp limit).
    pub fn zoom_at(&mut self, anchor: Point, new_scale: f32) -> bool {
        let new_scale = self.clamp_scale(new_scale);
        if new_scale == self.scale {
            return false;
        }
        let world = self.to_world(anchor);
        self.scale = new_scale;
        self.offset = Point::new(anchor.x - world.x * new_scale, anchor.y - world.y * new_scale);
        log::trace!("zoom {:.3} at ({:.1}, {:.1})", new_scale, anchor.x, anchor.y);
        true
    }

    /// Apply one wheel step at screen point `anchor`.
    ///
    /// With the zoom modifier the scale moves by `-dy * sensitivity`;
    /// otherwise the canvas scrolls naturally (offset moves against the
    /// delta).
    pub fn apply_wheel(&mut self, input: WheelInput, anchor: Point, sensitivity: f32) -> bool {
        if input.zoom_modifier {
            self.zoom_at(anchor, self.scale - input.dy * sensitivity)
        } else {
            self.pan(-input.dx, -input.dy);
            input.dx != 0.0 || input.dy != 0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_screen_inverse() {
        let vp = Viewport {
            offset: Point::new(30.0, -12.0),
            scale: 2.0,
            ..Viewport::default()
        };
        let world = Point::new(7.0, 9.0);
        let screen = vp.to_screen(world);
        assert_eq!(screen, Point::new(44.0, 6.0));
        assert_eq!(vp.to_world(screen), world);
    }

    #[test]
    fn wheel_without_modifier_pans() {
        let mut vp = Viewport::default();
        let changed = vp.apply_wheel(
            WheelInput {
                dx: 5.0,
                dy: 10.0,
                zoom_modifier: false,
            },
            Point::ZERO,
            0.001,
        );
        assert!(changed);
        assert_eq!(vp.offset, Point::new(-5.0, -10.0));
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn inverted_limits_fall_back_to_defaults() {
        let mut vp = Viewport::with_limits(5.0, 0.1);
        assert_eq!((vp.min_scale, vp.max_scale), (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE));
        assert!(vp.zoom_at(Point::new(10.0, 10.0), 50.0));
        assert_eq!(vp.scale, DEFAULT_MAX_SCALE);

        let nan = Viewport::with_limits(f32::NAN, 2.0);
        assert_eq!(nan.min_scale, DEFAULT_MIN_SCALE);

        let tight = Viewport::with_limits(2.0, 4.0);
        assert_eq!(tight.scale, 2.0);
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let mut vp = Viewport::default();
        let anchor = Point::new(200.0, 100.0);
        let before = vp.to_world(anchor);
        vp.apply_wheel(
            WheelInput {
                dx: 0.0,
                dy: -500.0,
                zoom_modifier: true,
            },
            anchor,
            0.001,
        );
        assert!((vp.scale - 1.5).abs() < 1e-6);
        let after = vp.to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-3);
        assert!((before.y - after.y).abs() < 1e-3);

        assert!(vp.zoom_at(anchor, 100.0));
        assert_eq!(vp.scale, 5.0);
        assert!(!vp.zoom_at(anchor, 6.0));
        vp.zoom_at(anchor, 0.0);
        assert_eq!(vp.scale, 0.1);
    }
}
