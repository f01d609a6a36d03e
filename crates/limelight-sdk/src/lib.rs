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

//! The public-facing SDK for the Limelight engine.
//!
//! One call, [`init`], opens a fixed-size window, hands the application a
//! configured [`Stage`] to build its scene on, and runs the timer-driven
//! render loop until the window closes.
//!
//! ```no_run
//! use limelight_core::{Rgba, Stage};
//!
//! limelight_sdk::init(16, "Demo", 640, 480, |stage: &mut Stage| {
//!     stage.background_color = Some(Rgba::WHITE.into());
//! })
//! .unwrap();
//! ```

#![warn(missing_docs)]

use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use limelight_core::events::MouseEventKind;
use limelight_core::stage::{FrameTimer, Stage};
use limelight_infra::platform::input::{InputTranslator, StageInput};
use limelight_infra::platform::window::AppWindowBuilder;
use limelight_infra::{AppWindow, Canvas};

/// The internal state of the running engine, managed by the winit event
/// loop. Window, canvas and timer exist only after `resumed`.
struct AppState<F: FnOnce(&mut Stage)> {
    setup: Option<F>,
    title: String,
    width: u32,
    height: u32,
    speed_ms: u64,
    stage: Stage,
    window: Option<AppWindow>,
    canvas: Option<Canvas>,
    translator: InputTranslator,
    timer: Option<Rc<FrameTimer>>,
    next_tick: Instant,
}

impl<F: FnOnce(&mut Stage)> ApplicationHandler for AppState<F> {
    /// Initializes everything that needs a live window: the window itself,
    /// the canvas, the frame timer, and finally the application's scene.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Initializing window and engine systems...");

        let window = match AppWindowBuilder::new()
            .with_title(self.title.clone())
            .with_dimensions(self.width, self.height)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let canvas = match Canvas::new(&window, self.width, self.height) {
            Ok(canvas) => canvas,
            Err(e) => {
                log::error!("Failed to initialize the canvas: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let timer = Rc::new(FrameTimer::new(Duration::from_millis(self.speed_ms)));
        self.stage
            .configure_surface(self.speed_ms, self.width, self.height);
        self.stage.install_timer(timer.clone());

        // The application builds its scene exactly once, before the first
        // tick.
        if let Some(setup) = self.setup.take() {
            setup(&mut self.stage);
        }

        self.next_tick = Instant::now() + timer.interval();
        self.window = Some(window);
        self.canvas = Some(canvas);
        self.timer = Some(timer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(canvas) = self.canvas.as_mut() {
                    self.stage.run_frame(canvas);
                }
            }
            other => {
                let Some(input) = self.translator.translate(&other) else {
                    return;
                };
                match input {
                    StageInput::Mouse(mut event) => {
                        let kind = event.kind;
                        let hand = self.stage.enter_mouse_event(&mut event);
                        // The affordance only changes while the pointer
                        // moves; presses reuse whatever cursor is showing.
                        if kind == MouseEventKind::MouseMove {
                            if let Some(window) = &self.window {
                                window.set_hand_cursor(hand);
                            }
                        }
                    }
                    StageInput::Keyboard(event) => {
                        self.stage.dispatch_keyboard(&event);
                    }
                }
            }
        }
    }

    /// Schedules the next render tick.
    ///
    /// The interval is re-read from the live timer on every re-arm, so a
    /// `set_frame_rate` call takes effect at the next tick and an in-flight
    /// tick is never rewound.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(timer) = &self.timer else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_tick {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_tick = now + timer.interval();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

/// Opens a window and runs a stage until the window closes.
///
/// * `speed_ms` - initial render interval in milliseconds per tick.
/// * `title` - window title.
/// * `width`/`height` - fixed surface dimensions in pixels.
/// * `setup` - called exactly once, after the stage is configured and before
///   the first frame, to build the scene.
///
/// Blocks the calling thread for the lifetime of the application.
///
/// # Errors
/// Fails if the event loop cannot be created or exits abnormally. Window
/// and GPU initialization failures are logged and end the loop cleanly.
pub fn init<F>(speed_ms: u64, title: &str, width: u32, height: u32, setup: F) -> Result<()>
where
    F: FnOnce(&mut Stage),
{
    log::info!("Limelight SDK: starting...");
    let event_loop = EventLoop::new()?;

    // The state is mostly empty here; `resumed` fills it in once the
    // platform hands us a live event loop.
    let mut state = AppState {
        setup: Some(setup),
        title: title.to_string(),
        width,
        height,
        speed_ms,
        stage: Stage::new(),
        window: None,
        canvas: None,
        translator: InputTranslator::new(),
        timer: None,
        next_tick: Instant::now(),
    };

    event_loop.run_app(&mut state)?;

    log::info!("Limelight SDK: event loop finished.");
    Ok(())
}
