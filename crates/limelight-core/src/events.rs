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

//! The engine-internal event shapes dispatched through the tree.

use crate::keycode::KeyCode;

/// The kind of a pointer event entering the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// A button was pressed.
    MouseDown,
    /// The pointer moved.
    MouseMove,
    /// A button was released.
    MouseUp,
    /// Two presses in quick succession at the same spot.
    MouseDoubleClick,
}

impl MouseEventKind {
    /// The wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseEventKind::MouseDown => "mouse_down",
            MouseEventKind::MouseMove => "mouse_move",
            MouseEventKind::MouseUp => "mouse_up",
            MouseEventKind::MouseDoubleClick => "mouse_dbclick",
        }
    }
}

/// A pointer event travelling through the scene tree.
///
/// `target` starts out empty and is filled in by the node that accepts the
/// event during hit-testing. If no node accepts, the event is dropped and
/// `target` stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Pointer x position in surface coordinates.
    pub offset_x: f64,
    /// Pointer y position in surface coordinates.
    pub offset_y: f64,
    /// What happened.
    pub kind: MouseEventKind,
    /// Object index of the node that accepted the event, once one has.
    pub target: Option<u64>,
}

impl MouseEvent {
    /// Creates a fresh, untargeted pointer event.
    pub fn new(kind: MouseEventKind, offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            kind,
            target: None,
        }
    }
}

/// The kind of a keyboard event.
///
/// This is the complete set of kinds the keyboard registry accepts; pointer
/// events never go through the registry, they are dispatched structurally
/// through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    /// First press of a key (auto-repeat is filtered before dispatch).
    KeyDown,
    /// Release of a key.
    KeyUp,
}

impl KeyboardEventKind {
    /// The wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyboardEventKind::KeyDown => "key_down",
            KeyboardEventKind::KeyUp => "key_up",
        }
    }
}

/// A keyboard event broadcast to the stage's listener registry.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardEvent {
    /// What happened.
    pub kind: KeyboardEventKind,
    /// The physical key.
    pub key_code: KeyCode,
    /// The text the key produces, if any ("a", " ", "" for modifiers).
    pub key_text: String,
}
