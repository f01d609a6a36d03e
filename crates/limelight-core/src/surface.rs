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

//! The abstract painting capability the engine drives once per tick.

use crate::math::Rgba;

/// A surface the stage paints onto.
///
/// Any painting backend (a CPU framebuffer, a GPU canvas, a recording fake in
/// tests) implements this trait; the engine core never knows which one it is
/// talking to.
///
/// The per-tick call sequence is fixed: `begin_frame`, `set_antialiasing`,
/// exactly one of `fill_rect`/`erase_rect` over the full surface, the draw
/// traversal, `end_frame`. All calls are synchronous and happen on the one
/// UI thread.
///
/// The state-stack operations (`save`/`translate`/`scale`/`restore`) exist
/// for nested drawing: a container saves, applies its local transform, draws
/// its children in their own coordinate space and restores. `fill_rect` and
/// `erase_rect` are interpreted under the current accumulated state.
pub trait RenderSurface {
    /// Opens a frame. Nothing may be painted outside an open frame.
    fn begin_frame(&mut self);

    /// Closes the frame and hands it to the presentation layer.
    fn end_frame(&mut self);

    /// Sets the antialiasing rendering hint for the current frame.
    fn set_antialiasing(&mut self, enabled: bool);

    /// Fills an axis-aligned rectangle with a resolved color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    /// Erases an axis-aligned rectangle back to the surface's cleared state.
    fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Pushes the current transform state.
    fn save(&mut self);

    /// Pops back to the most recently saved transform state.
    ///
    /// Unbalanced restores are a caller bug; implementations may ignore a
    /// restore with nothing saved.
    fn restore(&mut self);

    /// Translates the current coordinate space.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Scales the current coordinate space.
    fn scale(&mut self, sx: f64, sy: f64);
}
