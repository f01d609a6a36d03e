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

//! The concrete render surface: CPU rasterization, GPU presentation.

pub mod buffer;
pub mod present;

use anyhow::Result;

use limelight_core::math::Rgba;
use limelight_core::surface::RenderSurface;

use crate::platform::window::AppWindow;
use buffer::PixelBuffer;
use present::Presenter;

/// The render surface handed to the stage every tick.
///
/// Paint operations go to a CPU [`PixelBuffer`]; `end_frame` uploads the
/// finished pixels through the [`Presenter`]. Splitting the two keeps all
/// rasterization logic testable off-GPU.
pub struct Canvas {
    buffer: PixelBuffer,
    presenter: Presenter,
    antialiasing: bool,
}

impl Canvas {
    /// Creates the canvas for a window at the stage dimensions.
    ///
    /// Blocks on GPU initialization; called once at startup from the
    /// application loop.
    pub fn new(window: &AppWindow, width: u32, height: u32) -> Result<Self> {
        let presenter = pollster::block_on(Presenter::new(window, width, height))?;
        Ok(Self {
            buffer: PixelBuffer::new(width, height),
            presenter,
            antialiasing: true,
        })
    }

    /// The current antialiasing hint.
    ///
    /// The CPU rasterizer paints axis-aligned rectangles, which have no
    /// edges to smooth, so the hint is recorded but changes nothing today.
    pub fn antialiasing(&self) -> bool {
        self.antialiasing
    }
}

impl RenderSurface for Canvas {
    fn begin_frame(&mut self) {
        self.buffer.reset_state();
    }

    fn end_frame(&mut self) {
        if let Err(e) = self.presenter.present(self.buffer.pixels()) {
            log::error!("Failed to present frame: {e:#}");
        }
    }

    fn set_antialiasing(&mut self, enabled: bool) {
        self.antialiasing = enabled;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.buffer.fill_rect(x, y, width, height, color);
    }

    fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.buffer.erase_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.buffer.save();
    }

    fn restore(&mut self) {
        self.buffer.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.buffer.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.buffer.scale(sx, sy);
    }
}
