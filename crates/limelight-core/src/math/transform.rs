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

//! The translate/scale coordinate transform accumulated down the scene tree.

/// A 2D translate-and-scale transform.
///
/// This is the coordinate space handed down the tree during hit-testing: each
/// container composes its own local components into the transform it received
/// before recursing into its children.
///
/// The type is `Copy` on purpose. Every fan-out point of the dispatch
/// recursion passes the transform **by value**, so a callee mutating its copy
/// can never leak that mutation into a sibling's traversal. This value
/// discipline is load-bearing for dispatch correctness, not an optimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Accumulated x translation, in surface pixels.
    pub x: f64,
    /// Accumulated y translation, in surface pixels.
    pub y: f64,
    /// Accumulated horizontal scale factor.
    pub scale_x: f64,
    /// Accumulated vertical scale factor.
    pub scale_y: f64,
}

impl Transform2D {
    /// The identity transform `{0, 0, 1, 1}` — the coordinate space of the
    /// surface itself.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Creates a transform from explicit components.
    #[inline]
    pub const fn new(x: f64, y: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            x,
            y,
            scale_x,
            scale_y,
        }
    }

    /// Composes a child's local transform into this (parent) transform.
    ///
    /// The child's translation is scaled by the parent's scale before being
    /// added, and the scales multiply:
    ///
    /// ```
    /// use limelight_core::math::Transform2D;
    ///
    /// let parent = Transform2D::new(10.0, 20.0, 2.0, 2.0);
    /// let child = Transform2D::new(5.0, 0.0, 0.5, 1.0);
    /// let composed = parent.compose(child);
    /// assert_eq!(composed, Transform2D::new(20.0, 20.0, 1.0, 2.0));
    /// ```
    #[inline]
    pub fn compose(self, local: Transform2D) -> Self {
        Self {
            x: self.x + local.x * self.scale_x,
            y: self.y + local.y * self.scale_y,
            scale_x: self.scale_x * local.scale_x,
            scale_y: self.scale_y * local.scale_y,
        }
    }

    /// Maps a point from the local space described by this transform into
    /// global (surface) space.
    #[inline]
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x + px * self.scale_x, self.y + py * self.scale_y)
    }
}

impl Default for Transform2D {
    /// Returns the identity transform.
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn identity_is_neutral_for_compose() {
        let t = Transform2D::new(3.0, -4.0, 2.0, 0.5);
        assert_eq!(Transform2D::IDENTITY.compose(t), t);
        assert_eq!(t.compose(Transform2D::IDENTITY), t);
    }

    #[test]
    fn compose_scales_child_translation() {
        let parent = Transform2D::new(100.0, 50.0, 2.0, 3.0);
        let child = Transform2D::new(10.0, 10.0, 1.0, 1.0);
        let composed = parent.compose(child);
        assert!(approx_eq(composed.x, 120.0));
        assert!(approx_eq(composed.y, 80.0));
        assert!(approx_eq(composed.scale_x, 2.0));
        assert!(approx_eq(composed.scale_y, 3.0));
    }

    #[test]
    fn compose_is_associative() {
        let a = Transform2D::new(1.0, 2.0, 2.0, 2.0);
        let b = Transform2D::new(3.0, 4.0, 0.5, 1.5);
        let c = Transform2D::new(-2.0, 0.5, 3.0, 0.25);
        let left = a.compose(b).compose(c);
        let right = a.compose(b.compose(c));
        assert!(approx_eq(left.x, right.x));
        assert!(approx_eq(left.y, right.y));
        assert!(approx_eq(left.scale_x, right.scale_x));
        assert!(approx_eq(left.scale_y, right.scale_y));
    }

    #[test]
    fn apply_maps_local_points() {
        let t = Transform2D::new(10.0, 20.0, 2.0, 0.5);
        let (gx, gy) = t.apply(5.0, 8.0);
        assert!(approx_eq(gx, 20.0));
        assert!(approx_eq(gy, 24.0));
    }

    #[test]
    fn copies_do_not_alias() {
        let original = Transform2D::IDENTITY;
        let mut copy = original;
        copy.x = 99.0;
        copy.scale_x = 7.0;
        assert_eq!(original, Transform2D::IDENTITY);
    }
}
