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

//! Translation from `winit` window events to the engine's input events.
//!
//! This module is the adapter between the windowing backend and the engine:
//! the core crate never sees a `winit` type. The translator is stateful
//! because pointer events need context the raw stream does not carry: button
//! presses have no position of their own, and double clicks have to be
//! synthesized from press timing.

use std::time::{Duration, Instant};

use limelight_core::events::{KeyboardEvent, KeyboardEventKind, MouseEvent, MouseEventKind};
use limelight_core::keycode::KeyCode;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, KeyCode as WinitKeyCode, NamedKey, PhysicalKey};

/// Two presses within this window and [`DOUBLE_CLICK_SLOP`] of each other
/// count as a double click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Maximum pointer travel, in surface pixels, between the two presses of a
/// double click.
const DOUBLE_CLICK_SLOP: f64 = 4.0;

/// An input event ready for stage dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum StageInput {
    /// A pointer event, dispatched structurally through the scene tree.
    Mouse(MouseEvent),
    /// A keyboard event, broadcast through the stage's listener registry.
    Keyboard(KeyboardEvent),
}

/// Stateful translator from `winit` window events to [`StageInput`].
///
/// One translator exists per window. It tracks the last known cursor
/// position (stamped onto button events, which arrive without one) and the
/// last press (for double-click synthesis).
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor_x: f64,
    cursor_y: f64,
    last_press: Option<(Instant, f64, f64)>,
}

impl InputTranslator {
    /// Creates a translator with no cursor history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a window event into an engine input event.
    ///
    /// Returns `None` for events that are not user input (resize, focus,
    /// close) and for auto-repeated key presses: holding a key produces one
    /// `key_down`, not a stream.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<StageInput> {
        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => translate_key(
                key_event.state,
                key_event.repeat,
                key_event.physical_key,
                &key_event.logical_key,
            ),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x;
                self.cursor_y = position.y;
                Some(StageInput::Mouse(MouseEvent::new(
                    MouseEventKind::MouseMove,
                    self.cursor_x,
                    self.cursor_y,
                )))
            }
            WindowEvent::MouseInput { state, .. } => {
                let kind = match state {
                    ElementState::Pressed => self.classify_press(Instant::now()),
                    ElementState::Released => MouseEventKind::MouseUp,
                };
                Some(StageInput::Mouse(MouseEvent::new(
                    kind,
                    self.cursor_x,
                    self.cursor_y,
                )))
            }
            _ => None,
        }
    }

    /// Decides whether a press at the current cursor position is the second
    /// half of a double click.
    ///
    /// A qualifying second press consumes the stored first press, so a triple
    /// click is a double click followed by a fresh single click.
    fn classify_press(&mut self, now: Instant) -> MouseEventKind {
        if let Some((when, x, y)) = self.last_press {
            let close_in_time = now.duration_since(when) <= DOUBLE_CLICK_WINDOW;
            let close_in_space = (self.cursor_x - x).abs() <= DOUBLE_CLICK_SLOP
                && (self.cursor_y - y).abs() <= DOUBLE_CLICK_SLOP;
            if close_in_time && close_in_space {
                self.last_press = None;
                return MouseEventKind::MouseDoubleClick;
            }
        }
        self.last_press = Some((now, self.cursor_x, self.cursor_y));
        MouseEventKind::MouseDown
    }
}

/// Translates one keyboard transition into a stage event.
///
/// Auto-repeat is filtered here: a held key produces its one `key_down` on
/// the first press and nothing for the repeats, while the eventual release
/// still produces its `key_up`.
fn translate_key(
    state: ElementState,
    repeat: bool,
    physical: PhysicalKey,
    logical: &Key,
) -> Option<StageInput> {
    let PhysicalKey::Code(keycode) = physical else {
        return None;
    };
    let key_code = map_key_code(keycode);
    let key_text = key_text_of(logical);
    match state {
        ElementState::Pressed if !repeat => Some(StageInput::Keyboard(KeyboardEvent {
            kind: KeyboardEventKind::KeyDown,
            key_code,
            key_text,
        })),
        ElementState::Released => Some(StageInput::Keyboard(KeyboardEvent {
            kind: KeyboardEventKind::KeyUp,
            key_code,
            key_text,
        })),
        _ => None,
    }
}

/// The text a logical key contributes to a keyboard event.
///
/// Printable keys carry their character, space carries `" "`, everything
/// else (modifiers, function keys, arrows) carries the empty string.
fn key_text_of(key: &Key) -> String {
    match key {
        Key::Character(text) => text.to_string(),
        Key::Named(NamedKey::Space) => " ".to_string(),
        _ => String::new(),
    }
}

/// Maps a `winit` physical key code to the engine's key code.
fn map_key_code(keycode: WinitKeyCode) -> KeyCode {
    match keycode {
        WinitKeyCode::Backquote => KeyCode::Backquote,
        WinitKeyCode::Backslash => KeyCode::Backslash,
        WinitKeyCode::BracketLeft => KeyCode::BracketLeft,
        WinitKeyCode::BracketRight => KeyCode::BracketRight,
        WinitKeyCode::Comma => KeyCode::Comma,
        WinitKeyCode::Digit0 => KeyCode::Digit0,
        WinitKeyCode::Digit1 => KeyCode::Digit1,
        WinitKeyCode::Digit2 => KeyCode::Digit2,
        WinitKeyCode::Digit3 => KeyCode::Digit3,
        WinitKeyCode::Digit4 => KeyCode::Digit4,
        WinitKeyCode::Digit5 => KeyCode::Digit5,
        WinitKeyCode::Digit6 => KeyCode::Digit6,
        WinitKeyCode::Digit7 => KeyCode::Digit7,
        WinitKeyCode::Digit8 => KeyCode::Digit8,
        WinitKeyCode::Digit9 => KeyCode::Digit9,
        WinitKeyCode::Equal => KeyCode::Equal,
        WinitKeyCode::KeyA => KeyCode::KeyA,
        WinitKeyCode::KeyB => KeyCode::KeyB,
        WinitKeyCode::KeyC => KeyCode::KeyC,
        WinitKeyCode::KeyD => KeyCode::KeyD,
        WinitKeyCode::KeyE => KeyCode::KeyE,
        WinitKeyCode::KeyF => KeyCode::KeyF,
        WinitKeyCode::KeyG => KeyCode::KeyG,
        WinitKeyCode::KeyH => KeyCode::KeyH,
        WinitKeyCode::KeyI => KeyCode::KeyI,
        WinitKeyCode::KeyJ => KeyCode::KeyJ,
        WinitKeyCode::KeyK => KeyCode::KeyK,
        WinitKeyCode::KeyL => KeyCode::KeyL,
        WinitKeyCode::KeyM => KeyCode::KeyM,
        WinitKeyCode::KeyN => KeyCode::KeyN,
        WinitKeyCode::KeyO => KeyCode::KeyO,
        WinitKeyCode::KeyP => KeyCode::KeyP,
        WinitKeyCode::KeyQ => KeyCode::KeyQ,
        WinitKeyCode::KeyR => KeyCode::KeyR,
        WinitKeyCode::KeyS => KeyCode::KeyS,
        WinitKeyCode::KeyT => KeyCode::KeyT,
        WinitKeyCode::KeyU => KeyCode::KeyU,
        WinitKeyCode::KeyV => KeyCode::KeyV,
        WinitKeyCode::KeyW => KeyCode::KeyW,
        WinitKeyCode::KeyX => KeyCode::KeyX,
        WinitKeyCode::KeyY => KeyCode::KeyY,
        WinitKeyCode::KeyZ => KeyCode::KeyZ,
        WinitKeyCode::Minus => KeyCode::Minus,
        WinitKeyCode::Period => KeyCode::Period,
        WinitKeyCode::Quote => KeyCode::Quote,
        WinitKeyCode::Semicolon => KeyCode::Semicolon,
        WinitKeyCode::Slash => KeyCode::Slash,
        WinitKeyCode::AltLeft => KeyCode::AltLeft,
        WinitKeyCode::AltRight => KeyCode::AltRight,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::CapsLock => KeyCode::CapsLock,
        WinitKeyCode::ContextMenu => KeyCode::ContextMenu,
        WinitKeyCode::ControlLeft => KeyCode::ControlLeft,
        WinitKeyCode::ControlRight => KeyCode::ControlRight,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::SuperLeft => KeyCode::MetaLeft,
        WinitKeyCode::SuperRight => KeyCode::MetaRight,
        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Delete => KeyCode::Delete,
        WinitKeyCode::End => KeyCode::End,
        WinitKeyCode::Home => KeyCode::Home,
        WinitKeyCode::Insert => KeyCode::Insert,
        WinitKeyCode::PageDown => KeyCode::PageDown,
        WinitKeyCode::PageUp => KeyCode::PageUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::NumLock => KeyCode::NumLock,
        WinitKeyCode::Numpad0 => KeyCode::Numpad0,
        WinitKeyCode::Numpad1 => KeyCode::Numpad1,
        WinitKeyCode::Numpad2 => KeyCode::Numpad2,
        WinitKeyCode::Numpad3 => KeyCode::Numpad3,
        WinitKeyCode::Numpad4 => KeyCode::Numpad4,
        WinitKeyCode::Numpad5 => KeyCode::Numpad5,
        WinitKeyCode::Numpad6 => KeyCode::Numpad6,
        WinitKeyCode::Numpad7 => KeyCode::Numpad7,
        WinitKeyCode::Numpad8 => KeyCode::Numpad8,
        WinitKeyCode::Numpad9 => KeyCode::Numpad9,
        WinitKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        WinitKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,
        WinitKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        WinitKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        WinitKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        WinitKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,
        WinitKeyCode::PrintScreen => KeyCode::PrintScreen,
        WinitKeyCode::ScrollLock => KeyCode::ScrollLock,
        WinitKeyCode::Pause => KeyCode::Pause,
        _ => KeyCode::Unidentified,
    }
}
