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

//! # Limelight Infra
//!
//! Concrete implementations of the platform-facing seams: `winit` windowing
//! and input translation, the CPU pixel canvas and its `wgpu` presentation
//! path. Nothing in `limelight-core` knows these backends exist.

#![warn(missing_docs)]

pub mod canvas;
pub mod platform;

pub use canvas::Canvas;
pub use platform::input::{InputTranslator, StageInput};
pub use platform::window::{AppWindow, AppWindowBuilder};
