//! Overlap tests between positioned sprites
//!
//! Two sprites collide when their boxes intersect and, if both carry opacity
//! masks, at least one pixel in the intersection is solid in both. A sprite
//! without a mask is treated as fully solid.

use glam::IVec2;

use super::sprite::Sprite;

/// Axis-aligned rectangle in screen space (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    /// Exclusive
    pub max: IVec2,
}

impl Rect {
    pub fn new(pos: IVec2, width: i32, height: i32) -> Self {
        Self {
            min: pos,
            max: pos + IVec2::new(width.max(0), height.max(0)),
        }
    }

    pub fn of(sprite: &Sprite, pos: IVec2) -> Self {
        Self::new(pos, sprite.width, sprite.height)
    }

    /// Intersection, or `None` if the rectangles do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min.x < max.x && min.y < max.y).then_some(Rect { min, max })
    }
}

/// Whether sprite `a` at `pos_a` overlaps sprite `b` at `pos_b`
pub fn sprites_collide(a: &Sprite, pos_a: IVec2, b: &Sprite, pos_b: IVec2) -> bool {
    let Some(overlap) = Rect::of(a, pos_a).intersection(&Rect::of(b, pos_b)) else {
        return false;
    };

    if a.mask.is_none() && b.mask.is_none() {
        return true;
    }

    for y in overlap.min.y..overlap.max.y {
        for x in overlap.min.x..overlap.max.x {
            let solid_a = a
                .mask
                .as_ref()
                .is_none_or(|m| m.is_solid(x - pos_a.x, y - pos_a.y));
            let solid_b = b
                .mask
                .as_ref()
                .is_none_or(|m| m.is_solid(x - pos_b.x, y - pos_b.y));
            if solid_a && solid_b {
                return true;
            }
        }
    }
    false
}
