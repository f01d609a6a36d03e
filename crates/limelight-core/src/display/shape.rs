// Copyright 2025 the Limelight authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `RectShape`: a filled-rectangle leaf node.

use crate::display::object::{
    DisplayObject, Drawable, HitContext, HitTestable, ObjectBase,
};
use crate::events::MouseEvent;
use crate::math::{resolve_paint, Paint, Transform2D};
use crate::surface::RenderSurface;

/// A leaf node that paints a filled rectangle and hit-tests as its bounds.
pub struct RectShape {
    base: ObjectBase,
    /// Width of the rectangle in local units.
    pub width: f64,
    /// Height of the rectangle in local units.
    pub height: f64,
    /// Fill paint; resolved once per draw.
    pub paint: Paint,
    /// When true, a hit during a pointer-move requests the hand cursor.
    pub use_hand_cursor: bool,
}

impl RectShape {
    /// Creates a shape of the given size at the local origin.
    pub fn new(width: f64, height: f64, paint: Paint) -> Self {
        Self {
            base: ObjectBase::new(),
            width,
            height,
            paint,
            use_hand_cursor: false,
        }
    }

    /// Whether a global-space point falls inside this shape's bounds under
    /// the accumulated transform.
    fn contains(&self, transform: Transform2D, px: f64, py: f64) -> bool {
        let t = transform.compose(self.base.local_transform());
        let (x0, y0) = t.apply(0.0, 0.0);
        let (x1, y1) = t.apply(self.width, self.height);
        // Negative scales flip the edges.
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        px >= left && px < right && py >= top && py < bottom
    }
}

impl DisplayObject for RectShape {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_hit_testable(&mut self) -> Option<&mut dyn HitTestable> {
        Some(self)
    }
}

impl Drawable for RectShape {
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        surface.translate(self.base.x, self.base.y);
        surface.scale(self.base.scale_x, self.base.scale_y);
        surface.fill_rect(0.0, 0.0, self.width, self.height, resolve_paint(Some(&self.paint)));
        surface.restore();
    }
}

impl HitTestable for RectShape {
    fn hit_test(
        &mut self,
        event: &mut MouseEvent,
        transform: Transform2D,
        ctx: &mut HitContext,
    ) -> bool {
        if !self.contains(transform, event.offset_x, event.offset_y) {
            return false;
        }
        event.target = Some(self.base.object_index());
        if self.use_hand_cursor {
            ctx.use_hand_cursor = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MouseEventKind;
    use crate::math::Rgba;

    fn event_at(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(MouseEventKind::MouseMove, x, y)
    }

    #[test]
    fn contains_respects_position_and_scale() {
        let mut shape = RectShape::new(10.0, 10.0, Paint::Rgba(Rgba::RED));
        shape.base_mut().x = 5.0;
        shape.base_mut().y = 5.0;

        let doubled = Transform2D::new(0.0, 0.0, 2.0, 2.0);
        // Global bounds under 2x parent scale: (10, 10) to (30, 30).
        assert!(shape.contains(doubled, 10.0, 10.0));
        assert!(shape.contains(doubled, 29.9, 29.9));
        assert!(!shape.contains(doubled, 30.0, 30.0));
        assert!(!shape.contains(doubled, 9.9, 10.0));
    }

    #[test]
    fn contains_handles_negative_scale() {
        let shape = RectShape::new(10.0, 10.0, Paint::Rgba(Rgba::RED));
        let mirrored = Transform2D::new(0.0, 0.0, -1.0, 1.0);
        // Bounds flip to (-10, 0) .. (0, 10).
        assert!(shape.contains(mirrored, -5.0, 5.0));
        assert!(!shape.contains(mirrored, 5.0, 5.0));
    }

    #[test]
    fn hit_sets_target_and_cursor_signal() {
        let mut shape = RectShape::new(20.0, 20.0, Paint::Rgba(Rgba::BLUE));
        shape.use_hand_cursor = true;
        let mut ctx = HitContext::default();
        let mut event = event_at(10.0, 10.0);
        assert!(shape.hit_test(&mut event, Transform2D::IDENTITY, &mut ctx));
        assert_eq!(event.target, Some(shape.base().object_index()));
        assert!(ctx.use_hand_cursor);
    }

    #[test]
    fn miss_leaves_event_untouched() {
        let mut shape = RectShape::new(20.0, 20.0, Paint::Rgba(Rgba::BLUE));
        shape.use_hand_cursor = true;
        let mut ctx = HitContext::default();
        let mut event = event_at(100.0, 100.0);
        assert!(!shape.hit_test(&mut event, Transform2D::IDENTITY, &mut ctx));
        assert_eq!(event.target, None);
        assert!(!ctx.use_hand_cursor);
    }
}
