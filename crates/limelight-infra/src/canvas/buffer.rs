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

//! A CPU framebuffer with a transform state stack.
//!
//! All of the engine's actual rasterization happens here, on the CPU, in
//! plain RGBA8. The GPU side of the canvas only ever uploads and blits the
//! finished frame, which keeps every paint operation unit-testable without a
//! graphics device.

use limelight_core::math::{Rgba, Transform2D};

/// An RGBA8 framebuffer with save/restore transform state.
///
/// Coordinates given to the paint operations are interpreted under the
/// current accumulated transform, mirroring how containers drive the
/// surface: save, translate/scale into local space, paint, restore.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    current: Transform2D,
    stack: Vec<Transform2D>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            current: Transform2D::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA8 value of one pixel. Panics if out of bounds; callers are
    /// tests and debug tooling.
    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[offset..offset + 4]);
        out
    }

    /// Resets the transform state for a new frame. Pixel contents are left
    /// alone; the stage's background pass overwrites or erases them.
    pub fn reset_state(&mut self) {
        self.current = Transform2D::IDENTITY;
        self.stack.clear();
    }

    /// Pushes the current transform.
    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Pops back to the most recently saved transform. A restore with
    /// nothing saved is ignored.
    pub fn restore(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    /// Translates the current coordinate space.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current = self.current.compose(Transform2D::new(dx, dy, 1.0, 1.0));
    }

    /// Scales the current coordinate space.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current = self.current.compose(Transform2D::new(0.0, 0.0, sx, sy));
    }

    /// Fills an axis-aligned rectangle, source-over blended, under the
    /// current transform. Fully transparent fills are a no-op.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let src = color.to_rgba8();
        if src[3] == 0 {
            return;
        }
        let (x0, y0, x1, y1) = self.device_bounds(x, y, width, height);
        for py in y0..y1 {
            for px in x0..x1 {
                let offset = (py * self.width as usize + px) * 4;
                blend_over(&mut self.pixels[offset..offset + 4], src);
            }
        }
    }

    /// Erases an axis-aligned rectangle back to transparent black, under the
    /// current transform. Unlike a black fill this removes coverage.
    pub fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, y0, x1, y1) = self.device_bounds(x, y, width, height);
        for py in y0..y1 {
            for px in x0..x1 {
                let offset = (py * self.width as usize + px) * 4;
                self.pixels[offset..offset + 4].fill(0);
            }
        }
    }

    /// Maps a local-space rectangle to clipped device-pixel bounds,
    /// half-open on the right and bottom. Negative scales flip the corners.
    fn device_bounds(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> (usize, usize, usize, usize) {
        let (ax, ay) = self.current.apply(x, y);
        let (bx, by) = self.current.apply(x + width, y + height);
        let (left, right) = if ax <= bx { (ax, bx) } else { (bx, ax) };
        let (top, bottom) = if ay <= by { (ay, by) } else { (by, ay) };

        let x0 = left.round().clamp(0.0, self.width as f64) as usize;
        let x1 = right.round().clamp(0.0, self.width as f64) as usize;
        let y0 = top.round().clamp(0.0, self.height as f64) as usize;
        let y1 = bottom.round().clamp(0.0, self.height as f64) as usize;
        (x0, y0, x1, y1)
    }
}

/// Source-over blend of one RGBA8 pixel.
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    let inv = 255 - sa;
    for channel in 0..3 {
        let blended = (src[channel] as u32 * sa + dst[channel] as u32 * inv + 127) / 255;
        dst[channel] = blended as u8;
    }
    dst[3] = (sa + dst[3] as u32 * inv / 255) as u8;
}
