// Box overlap tests on parry bounding volumes

use crate::core::Rect;
use parry2d::bounding_volume::{Aabb, BoundingVolume};
use parry2d::math::Point;

/// Convert a screen-space rectangle into a parry bounding box
pub fn to_aabb(rect: &Rect) -> Aabb {
    let min = rect.min();
    let max = rect.max();
    Aabb::new(Point::new(min.x, min.y), Point::new(max.x, max.y))
}

/// Inclusive axis-aligned overlap test
///
/// Edges that merely touch count as overlapping: `a.max.x >= b.min.x`,
/// `a.min.x <= b.max.x`, and the same on the y axis.
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    to_aabb(a).intersects(&to_aabb(b))
}
