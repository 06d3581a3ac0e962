//! The playable floor rectangle.
//!
//! The table is whatever part of the floor the camera can see, so the
//! bounds change with the viewport. [`TableBounds::from_view`] derives
//! them from an overhead camera; the round controller accepts new bounds
//! on resize.

/// Axis-aligned floor rectangle in the horizontal `(x, z)` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBounds {
    /// Left edge.
    pub min_x: f32,
    /// Right edge.
    pub max_x: f32,
    /// Far edge.
    pub min_z: f32,
    /// Near edge.
    pub max_z: f32,
}

impl Default for TableBounds {
    fn default() -> Self {
        Self::centered(4.0, 3.0)
    }
}

impl TableBounds {
    /// Create bounds from explicit edges.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Bounds centered on the origin.
    pub fn centered(half_width: f32, half_depth: f32) -> Self {
        Self::new(-half_width, half_width, -half_depth, half_depth)
    }

    /// Visible floor area of a camera looking straight down.
    pub fn from_view(view: &ViewSpec) -> Self {
        let half_fov = (view.fov_y_degrees.clamp(1.0, 179.0) * 0.5).to_radians();
        let half_depth = view.camera_height.max(0.0) * half_fov.tan();
        let half_width = half_depth * view.aspect.max(0.0);
        Self::centered(
            (half_width - view.margin).max(0.0),
            (half_depth - view.margin).max(0.0),
        )
    }

    /// Returns true if both edges are finite and ordered.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_z, self.max_z]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_z <= self.max_z
    }

    /// Returns true if the point lies inside (edges included).
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }

    /// Center of the rectangle as `(x, z)`.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Width along x.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Depth along z.
    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Allowed range of x for the center of a body with the given radius.
    pub fn x_range(&self, radius: f32) -> (f32, f32) {
        inset(self.min_x, self.max_x, radius)
    }

    /// Allowed range of z for the center of a body with the given radius.
    pub fn z_range(&self, radius: f32) -> (f32, f32) {
        inset(self.min_z, self.max_z, radius)
    }
}

/// Shrink `[min, max]` by `radius` on both sides, collapsing to the
/// midpoint when the range is narrower than a body.
fn inset(min: f32, max: f32, radius: f32) -> (f32, f32) {
    let lo = min + radius;
    let hi = max - radius;
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = (min + max) * 0.5;
        (mid, mid)
    }
}

/// An overhead camera used to derive [`TableBounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSpec {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    /// Camera height above the floor.
    pub camera_height: f32,
    /// Distance kept clear of the visible edge.
    pub margin: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_bounds() {
        let b = TableBounds::centered(4.0, 3.0);
        assert_eq!(b.width(), 8.0);
        assert_eq!(b.depth(), 6.0);
        assert_eq!(b.center(), (0.0, 0.0));
        assert!(b.contains(4.0, -3.0));
        assert!(!b.contains(4.1, 0.0));
    }

    #[test]
    fn ranges_account_for_radius() {
        let b = TableBounds::centered(4.0, 3.0);
        assert_eq!(b.x_range(0.5), (-3.5, 3.5));
        assert_eq!(b.z_range(0.5), (-2.5, 2.5));
    }

    #[test]
    fn narrow_range_collapses_to_midpoint() {
        let b = TableBounds::new(1.0, 1.4, 0.0, 10.0);
        assert_eq!(b.x_range(0.5), (1.2, 1.2));
    }

    #[test]
    fn from_view_scales_with_aspect() {
        let view = ViewSpec {
            fov_y_degrees: 90.0,
            aspect: 2.0,
            camera_height: 3.0,
            margin: 0.0,
        };
        let b = TableBounds::from_view(&view);
        assert!((b.max_z - 3.0).abs() < 1e-4);
        assert!((b.max_x - 6.0).abs() < 1e-4);
        assert!(b.is_valid());
    }

    #[test]
    fn from_view_margin_never_inverts() {
        let view = ViewSpec {
            fov_y_degrees: 10.0,
            aspect: 1.0,
            camera_height: 1.0,
            margin: 5.0,
        };
        let b = TableBounds::from_view(&view);
        assert!(b.is_valid());
        assert_eq!(b.width(), 0.0);
    }

    #[test]
    fn invalid_bounds() {
        assert!(!TableBounds::new(1.0, -1.0, 0.0, 1.0).is_valid());
        assert!(!TableBounds::new(f32::NAN, 1.0, 0.0, 1.0).is_valid());
    }
}
