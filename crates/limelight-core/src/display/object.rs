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

//! The display-object base state and the capability traits dispatch checks.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::MouseEvent;
use crate::math::Transform2D;
use crate::surface::RenderSurface;

/// Shared handle to a node in the scene tree.
///
/// The engine is single-threaded by contract, so `Rc<RefCell<..>>` is the
/// ownership model: the stage (or a container) holds one handle per child,
/// and the application keeps its own handles to the nodes it wants to mutate
/// between frames.
pub type NodeHandle = Rc<RefCell<dyn DisplayObject>>;

/// Process-wide creation counter backing object identity.
static NEXT_OBJECT_INDEX: AtomicU64 = AtomicU64::new(0);

/// Who currently owns a display object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent {
    /// Not attached to anything; the object does not participate in
    /// rendering or dispatch.
    #[default]
    Detached,
    /// Attached directly to the stage (the tree root).
    Stage,
    /// Attached to a container node, identified by its object index.
    Object(u64),
}

/// State every display object carries: identity, ownership and the local
/// transform components.
///
/// Object indices are handed out by a process-wide counter, strictly
/// increasing across every object kind that embeds an `ObjectBase`, and never
/// reused.
#[derive(Debug)]
pub struct ObjectBase {
    index: u64,
    /// The current owner of this object. Managed by `add_child`/`remove_child`.
    pub parent: Parent,
    /// Local x position, relative to the owner's coordinate space.
    pub x: f64,
    /// Local y position, relative to the owner's coordinate space.
    pub y: f64,
    /// Local horizontal scale factor.
    pub scale_x: f64,
    /// Local vertical scale factor.
    pub scale_y: f64,
}

impl ObjectBase {
    /// Creates a fresh base with the next object index and an identity local
    /// transform.
    pub fn new() -> Self {
        Self {
            index: NEXT_OBJECT_INDEX.fetch_add(1, Ordering::Relaxed),
            parent: Parent::Detached,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// The creation-order identity of this object.
    #[inline]
    pub fn object_index(&self) -> u64 {
        self.index
    }

    /// This object's local transform components as a [`Transform2D`].
    #[inline]
    pub fn local_transform(&self) -> Transform2D {
        Transform2D::new(self.x, self.y, self.scale_x, self.scale_y)
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Out-of-band signals a hit-test may raise while an event travels the tree.
///
/// The one signal today is the cursor affordance: a node that wants the
/// pointing-hand cursor over it sets `use_hand_cursor` when it accepts a
/// `mouse_move`. The stage folds the flag back into its own state after the
/// traversal, and the driver switches the platform cursor from there.
#[derive(Debug, Default)]
pub struct HitContext {
    /// Set by any node in the dispatch pass that wants the hand cursor.
    pub use_hand_cursor: bool,
}

/// A node participating in the scene tree.
///
/// Capabilities are discovered through the `as_*` methods rather than by
/// probing for attributes: a node that can be painted returns itself from
/// [`as_drawable`](DisplayObject::as_drawable), a node that takes part in
/// mouse dispatch returns itself from
/// [`as_hit_testable`](DisplayObject::as_hit_testable). Both default to
/// `None`, and dispatch silently skips nodes without the capability.
pub trait DisplayObject {
    /// Shared base state (identity, parent, local transform).
    fn base(&self) -> &ObjectBase;

    /// Mutable access to the shared base state.
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// The drawable capability, if this node can paint itself.
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    /// The hit-testable capability, if this node takes part in mouse
    /// dispatch.
    fn as_hit_testable(&mut self) -> Option<&mut dyn HitTestable> {
        None
    }
}

/// The "can be painted" capability.
pub trait Drawable: DisplayObject {
    /// Paints this node onto the active surface.
    ///
    /// Called once per tick while the frame is open, in paint order. Must be
    /// synchronous and return promptly; a slow draw stalls the whole tick.
    fn draw(&self, surface: &mut dyn RenderSurface);
}

/// The "participates in mouse dispatch" capability.
pub trait HitTestable: DisplayObject {
    /// Tests whether `event` lands on this node (or, for containers, any of
    /// its children), given the transform accumulated from the root down to
    /// this node's owner.
    ///
    /// Contract:
    /// - `transform` arrives **by value**; the implementation composes its
    ///   own local components into it before testing or recursing, and its
    ///   mutations never reach a sibling.
    /// - On acceptance the implementation sets `event.target` to the
    ///   accepting node's object index and returns `true`, which stops the
    ///   traversal at every level above.
    /// - Containers recurse over their children in reverse insertion order
    ///   (topmost painted first) and stop at the first child that accepts.
    fn hit_test(
        &mut self,
        event: &mut MouseEvent,
        transform: Transform2D,
        ctx: &mut HitContext,
    ) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        base: ObjectBase,
    }

    impl DisplayObject for Plain {
        fn base(&self) -> &ObjectBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ObjectBase {
            &mut self.base
        }
    }

    #[test]
    fn object_indices_strictly_increase() {
        let objects: Vec<ObjectBase> = (0..16).map(|_| ObjectBase::new()).collect();
        for pair in objects.windows(2) {
            assert!(pair[0].object_index() < pair[1].object_index());
        }
    }

    #[test]
    fn indices_are_unique_across_kinds() {
        // Interleave plain nodes with other base allocations; every index
        // must still be distinct.
        let mut seen = std::collections::HashSet::new();
        for _ in 0..8 {
            let plain = Plain {
                base: ObjectBase::new(),
            };
            let loose = ObjectBase::new();
            assert!(seen.insert(plain.base().object_index()));
            assert!(seen.insert(loose.object_index()));
        }
    }

    #[test]
    fn fresh_objects_are_detached_with_identity_transform() {
        let base = ObjectBase::new();
        assert_eq!(base.parent, Parent::Detached);
        assert_eq!(base.local_transform(), Transform2D::IDENTITY);
    }

    #[test]
    fn capabilities_default_to_absent() {
        let mut plain = Plain {
            base: ObjectBase::new(),
        };
        assert!(plain.as_drawable().is_none());
        assert!(plain.as_hit_testable().is_none());
    }
}
