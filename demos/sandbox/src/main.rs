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

// Limelight sandbox
// A small interactive scene: a keyboard-driven square, a nested container
// and a hand-cursor hot zone.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use limelight_core::display::{RectShape, Sprite};
use limelight_core::DisplayObject;
use limelight_core::events::KeyboardEventKind;
use limelight_core::keycode::KeyCode;
use limelight_core::math::{Paint, Rgba};
use limelight_core::stage::Stage;

const STAGE_WIDTH: u32 = 640;
const STAGE_HEIGHT: u32 = 480;
const PLAYER_STEP: f64 = 10.0;

fn build_scene(stage: &mut Stage) {
    stage.background_color = Some(Paint::named("lightgray"));

    // A nested container: everything inside inherits its position and the
    // 2x scale.
    let mut panel = Sprite::at(400.0, 60.0);
    panel.base_mut().scale_x = 2.0;
    panel.base_mut().scale_y = 2.0;

    let mut backdrop = RectShape::new(80.0, 80.0, Paint::named("steelblue"));
    backdrop.base_mut().x = 0.0;
    panel
        .add_child(Rc::new(RefCell::new(backdrop)))
        .expect("fresh node");

    let mut hot_zone = RectShape::new(40.0, 40.0, Paint::named("gold"));
    hot_zone.base_mut().x = 20.0;
    hot_zone.base_mut().y = 20.0;
    hot_zone.use_hand_cursor = true;
    panel
        .add_child(Rc::new(RefCell::new(hot_zone)))
        .expect("fresh node");

    stage
        .add_child(Rc::new(RefCell::new(panel)))
        .expect("fresh node");

    // The keyboard-driven square. The scene keeps its own handle so the
    // listener can move it between frames.
    let mut square = RectShape::new(50.0, 50.0, Rgba::from_hex("#DC143C").unwrap().into());
    square.base_mut().x = 100.0;
    square.base_mut().y = 200.0;
    let player = Rc::new(RefCell::new(square));
    stage.add_child(player.clone()).expect("fresh node");

    stage.add_event_listener(
        KeyboardEventKind::KeyDown,
        Rc::new(move |event| {
            let (dx, dy) = match event.key_code {
                KeyCode::ArrowLeft => (-PLAYER_STEP, 0.0),
                KeyCode::ArrowRight => (PLAYER_STEP, 0.0),
                KeyCode::ArrowUp => (0.0, -PLAYER_STEP),
                KeyCode::ArrowDown => (0.0, PLAYER_STEP),
                _ => {
                    log::debug!("Unhandled key: {:?} ({:?})", event.key_code, event.key_text);
                    return;
                }
            };
            let mut square = player.borrow_mut();
            let base = square.base_mut();
            base.x = (base.x + dx).clamp(0.0, (STAGE_WIDTH as f64) - 50.0);
            base.y = (base.y + dy).clamp(0.0, (STAGE_HEIGHT as f64) - 50.0);
        }),
    );
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    limelight_sdk::init(16, "Limelight Sandbox", STAGE_WIDTH, STAGE_HEIGHT, build_scene)?;
    Ok(())
}
