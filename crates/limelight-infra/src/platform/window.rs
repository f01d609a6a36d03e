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

//! A `winit`-based application window.

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{CursorIcon, Window},
};

/// A wrapper around a `winit::window::Window`.
///
/// The engine's surface is fixed-size, so the window is created non-resizable
/// at the stage dimensions and never changes afterwards. An `Arc` inside
/// allows cheap cloning; the presenter keeps its own handle for the lifetime
/// of the surface.
#[derive(Debug, Clone)]
pub struct AppWindow {
    inner: Arc<Window>,
}

/// A builder for creating [`AppWindow`] instances.
pub struct AppWindowBuilder {
    title: String,
    width: u32,
    height: u32,
}

impl AppWindowBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Limelight".to_string(),
            width: 800,
            height: 600,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the fixed inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builds the window on the given event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<AppWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(false)
            .with_visible(true);

        let window = event_loop.create_window(window_attributes)?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(AppWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for AppWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HasWindowHandle for AppWindow {
    /// Provides the raw window handle required by graphics backends.
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for AppWindow {
    /// Provides the raw display handle required by graphics backends.
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

impl AppWindow {
    /// Physical dimensions (width, height) of the window's inner area.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    /// The display's scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// Requests that the window be redrawn.
    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Switches between the pointing-hand cursor and the default arrow.
    ///
    /// Driven by the stage's hand-cursor state after every pointer-move
    /// dispatch.
    pub fn set_hand_cursor(&self, hand: bool) {
        self.inner.set_cursor(cursor_icon_for(hand));
    }

    /// Clones a reference-counted handle to the underlying window.
    pub fn clone_handle_arc(&self) -> Arc<Window> {
        self.inner.clone()
    }
}

/// The platform cursor for a hand-cursor state.
fn cursor_icon_for(hand: bool) -> CursorIcon {
    if hand {
        CursorIcon::Pointer
    } else {
        CursorIcon::Default
    }
}
