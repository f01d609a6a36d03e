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

//! `Sprite`: the general-purpose container node.

use crate::display::object::{
    DisplayObject, Drawable, HitContext, HitTestable, NodeHandle, ObjectBase, Parent,
};
use crate::error::DisplayListError;
use crate::events::MouseEvent;
use crate::math::Transform2D;
use crate::surface::RenderSurface;

/// A container node with its own ordered child list.
///
/// Children follow the same contract as the stage's direct children:
/// insertion order is paint order (later children paint over earlier ones)
/// and hit-testing walks the exact reverse, stopping at the first child that
/// accepts the event.
#[derive(Default)]
pub struct Sprite {
    base: ObjectBase,
    children: Vec<NodeHandle>,
}

impl Sprite {
    /// Creates an empty sprite at the origin with identity scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sprite at a position.
    pub fn at(x: f64, y: f64) -> Self {
        let mut sprite = Self::new();
        sprite.base.x = x;
        sprite.base.y = y;
        sprite
    }

    /// Appends a child to the end of the child list (on top of its siblings)
    /// and takes ownership of it.
    ///
    /// # Errors
    /// [`DisplayListError::AlreadyAttached`] if the child is already in the
    /// tree; a node may appear at most once.
    pub fn add_child(&mut self, child: NodeHandle) -> Result<(), DisplayListError> {
        let mut node = child.borrow_mut();
        if node.base().parent != Parent::Detached {
            return Err(DisplayListError::AlreadyAttached {
                index: node.base().object_index(),
            });
        }
        node.base_mut().parent = Parent::Object(self.base.object_index());
        drop(node);
        self.children.push(child);
        Ok(())
    }

    /// Removes a child and clears its parent link. The object itself is not
    /// destroyed; ownership of its remaining lifetime reverts to the caller.
    ///
    /// # Errors
    /// [`DisplayListError::ChildNotFound`] if the child is not in this
    /// sprite's child list.
    pub fn remove_child(&mut self, child: &NodeHandle) -> Result<(), DisplayListError> {
        let index = child.borrow().base().object_index();
        let position = self
            .children
            .iter()
            .position(|c| c.borrow().base().object_index() == index)
            .ok_or(DisplayListError::ChildNotFound { index })?;
        let removed = self.children.remove(position);
        removed.borrow_mut().base_mut().parent = Parent::Detached;
        Ok(())
    }

    /// The number of direct children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }
}

impl DisplayObject for Sprite {
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

impl Drawable for Sprite {
    /// Paints the children in insertion order inside this sprite's local
    /// coordinate space.
    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        surface.translate(self.base.x, self.base.y);
        surface.scale(self.base.scale_x, self.base.scale_y);
        for child in &self.children {
            let node = child.borrow();
            if let Some(drawable) = node.as_drawable() {
                drawable.draw(surface);
            }
        }
        surface.restore();
    }
}

impl HitTestable for Sprite {
    /// Composes this sprite's local transform into its copy of `transform`,
    /// then walks the children topmost-first; the first child to accept the
    /// event wins.
    fn hit_test(
        &mut self,
        event: &mut MouseEvent,
        transform: Transform2D,
        ctx: &mut HitContext,
    ) -> bool {
        let local = transform.compose(self.base.local_transform());
        for child in self.children.iter().rev() {
            let mut node = child.borrow_mut();
            if let Some(target) = node.as_hit_testable() {
                // `local` is Copy: each child gets its own value, so a child
                // mutating its transform cannot affect the next sibling.
                if target.hit_test(event, local, ctx) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RectShape;
    use crate::events::MouseEventKind;
    use crate::math::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shape(x: f64, y: f64, w: f64, h: f64) -> Rc<RefCell<RectShape>> {
        let mut s = RectShape::new(w, h, Rgba::WHITE.into());
        s.base_mut().x = x;
        s.base_mut().y = y;
        Rc::new(RefCell::new(s))
    }

    #[test]
    fn add_child_sets_parent_to_container() {
        let mut sprite = Sprite::new();
        let child = shape(0.0, 0.0, 10.0, 10.0);
        sprite.add_child(child.clone()).unwrap();
        assert_eq!(
            child.borrow().base().parent,
            Parent::Object(sprite.base().object_index())
        );
    }

    #[test]
    fn double_attach_is_rejected() {
        let mut a = Sprite::new();
        let mut b = Sprite::new();
        let child = shape(0.0, 0.0, 10.0, 10.0);
        a.add_child(child.clone()).unwrap();
        let err = b.add_child(child.clone()).unwrap_err();
        assert!(matches!(err, DisplayListError::AlreadyAttached { .. }));
    }

    #[test]
    fn hit_test_composes_nested_transforms() {
        // Sprite at (100, 100) scaled 2x, child rect at local (10, 10),
        // 20x20. Global footprint: (120, 120) to (160, 160).
        let mut sprite = Sprite::at(100.0, 100.0);
        sprite.base_mut().scale_x = 2.0;
        sprite.base_mut().scale_y = 2.0;
        let child = shape(10.0, 10.0, 20.0, 20.0);
        sprite.add_child(child.clone()).unwrap();

        let mut ctx = HitContext::default();
        let mut hit = MouseEvent::new(MouseEventKind::MouseDown, 130.0, 130.0);
        assert!(sprite.hit_test(&mut hit, Transform2D::IDENTITY, &mut ctx));
        assert_eq!(hit.target, Some(child.borrow().base().object_index()));

        let mut miss = MouseEvent::new(MouseEventKind::MouseDown, 110.0, 110.0);
        assert!(!sprite.hit_test(&mut miss, Transform2D::IDENTITY, &mut ctx));
        assert_eq!(miss.target, None);
    }

    #[test]
    fn topmost_overlapping_child_wins() {
        let mut sprite = Sprite::new();
        let below = shape(0.0, 0.0, 50.0, 50.0);
        let above = shape(0.0, 0.0, 50.0, 50.0);
        sprite.add_child(below.clone()).unwrap();
        sprite.add_child(above.clone()).unwrap();

        let mut ctx = HitContext::default();
        let mut event = MouseEvent::new(MouseEventKind::MouseUp, 25.0, 25.0);
        assert!(sprite.hit_test(&mut event, Transform2D::IDENTITY, &mut ctx));
        assert_eq!(event.target, Some(above.borrow().base().object_index()));
    }

    #[test]
    fn remove_child_detaches_and_errors_when_absent() {
        let mut sprite = Sprite::new();
        let child = shape(0.0, 0.0, 10.0, 10.0);
        sprite.add_child(child.clone()).unwrap();
        let handle: NodeHandle = child.clone();
        sprite.remove_child(&handle).unwrap();
        assert_eq!(child.borrow().base().parent, Parent::Detached);
        assert_eq!(sprite.num_children(), 0);

        let err = sprite.remove_child(&handle).unwrap_err();
        assert!(matches!(err, DisplayListError::ChildNotFound { .. }));
    }
}
