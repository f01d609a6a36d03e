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

//! # Limelight Core
//!
//! The retained-mode scene-graph engine: display-object data model, the
//! [`Stage`](stage::Stage) render/dispatch driver, coordinate transforms and
//! the abstract capability surfaces the engine calls into.
//!
//! Everything in this crate is backend-agnostic and single-threaded: the
//! stage, its children and the dispatch algorithms all live on the one UI
//! thread the application loop runs on.

#![warn(missing_docs)]

pub mod display;
pub mod error;
pub mod events;
pub mod keycode;
pub mod math;
pub mod stage;
pub mod surface;

pub use display::{DisplayObject, Drawable, HitContext, HitTestable, NodeHandle, ObjectBase, Parent};
pub use error::DisplayListError;
pub use events::{KeyboardEvent, KeyboardEventKind, MouseEvent, MouseEventKind};
pub use keycode::KeyCode;
pub use math::{resolve_paint, Gradient, Paint, Rgba, Transform2D};
pub use stage::{FrameTimer, KeyboardListener, Stage};
pub use surface::RenderSurface;
