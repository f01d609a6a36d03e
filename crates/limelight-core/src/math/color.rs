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

//! The `Rgba` color type, the `Paint` color-like input, and paint resolution.

/// A color with `f32` RGBA components in the `[0, 1]` range.
///
/// This is the surface's native color representation: everything a caller can
/// hand to the engine (named colors, hex strings, gradients, nothing at all)
/// resolves to one of these before it reaches a backend.
///
/// `#[repr(C)]` keeps the memory layout predictable for backends that copy
/// color data into pixel buffers or GPU uploads.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `Rgba` with explicit components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Rgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses a `#RRGGBB` or `#RRGGBBAA` hex string (leading `#` optional).
    ///
    /// Returns `None` if the string is not valid hex of the right length.
    ///
    /// # Example
    /// ```
    /// use limelight_core::math::Rgba;
    /// let c = Rgba::from_hex("#FF0000").unwrap();
    /// assert_eq!(c, Rgba::RED);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| -> Option<f32> {
            u8::from_str_radix(hex.get(range)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if hex.len() == 8 { channel(6..8)? } else { 1.0 };
        Some(Self { r, g, b, a })
    }

    /// Looks up a color by its well-known name (case-insensitive).
    ///
    /// The table covers the common CSS color keywords. Returns `None` for
    /// unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, hex)| Self::from_hex(hex))
    }

    /// Converts to 8-bit RGBA channels.
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Rgba {
    /// Returns fully transparent black, the color of "nothing to paint".
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Well-known color names, resolved the way the platform's named-color lookup
/// would resolve them.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("silver", "#C0C0C0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("white", "#FFFFFF"),
    ("maroon", "#800000"),
    ("red", "#FF0000"),
    ("purple", "#800080"),
    ("fuchsia", "#FF00FF"),
    ("magenta", "#FF00FF"),
    ("green", "#008000"),
    ("lime", "#00FF00"),
    ("olive", "#808000"),
    ("yellow", "#FFFF00"),
    ("navy", "#000080"),
    ("blue", "#0000FF"),
    ("teal", "#008080"),
    ("aqua", "#00FFFF"),
    ("cyan", "#00FFFF"),
    ("orange", "#FFA500"),
    ("brown", "#A52A2A"),
    ("pink", "#FFC0CB"),
    ("gold", "#FFD700"),
    ("indigo", "#4B0082"),
    ("violet", "#EE82EE"),
    ("coral", "#FF7F50"),
    ("crimson", "#DC143C"),
    ("khaki", "#F0E68C"),
    ("lavender", "#E6E6FA"),
    ("salmon", "#FA8072"),
    ("sienna", "#A0522D"),
    ("tan", "#D2B48C"),
    ("tomato", "#FF6347"),
    ("turquoise", "#40E0D0"),
    ("wheat", "#F5DEB3"),
    ("beige", "#F5F5DC"),
    ("ivory", "#FFFFF0"),
    ("snow", "#FFFAFA"),
    ("plum", "#DDA0DD"),
    ("orchid", "#DA70D6"),
    ("skyblue", "#87CEEB"),
    ("steelblue", "#4682B4"),
    ("slategray", "#708090"),
    ("seagreen", "#2E8B57"),
    ("forestgreen", "#228B22"),
    ("darkgreen", "#006400"),
    ("darkblue", "#00008B"),
    ("darkred", "#8B0000"),
    ("darkgray", "#A9A9A9"),
    ("lightgray", "#D3D3D3"),
    ("lightblue", "#ADD8E6"),
    ("lightgreen", "#90EE90"),
];

/// A gradient-like paint: an ordered list of color stops.
///
/// The engine's surfaces paint in flat colors, so a gradient *resolves* to a
/// single representative color (its first stop). The stop list is kept intact
/// for backends that can do better.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    stops: Vec<(f32, Rgba)>,
}

impl Gradient {
    /// Creates an empty gradient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a color stop at `offset` (clamped to `[0, 1]`).
    pub fn add_color_stop(&mut self, offset: f32, color: Rgba) -> &mut Self {
        self.stops.push((offset.clamp(0.0, 1.0), color));
        self
    }

    /// The ordered color stops.
    pub fn stops(&self) -> &[(f32, Rgba)] {
        &self.stops
    }

    /// The single color this gradient resolves to on flat-color surfaces.
    pub fn resolved(&self) -> Rgba {
        self.stops
            .first()
            .map(|(_, color)| *color)
            .unwrap_or(Rgba::TRANSPARENT)
    }
}

/// A color-like input: everything a caller may hand to the engine where a
/// color is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// An already-resolved color; passed through untouched.
    Rgba(Rgba),
    /// A gradient-like object exposing a resolved value.
    Gradient(Gradient),
    /// A named or `#RRGGBB[AA]` string color, resolved at paint time.
    Named(String),
}

impl Paint {
    /// Convenience constructor for a named/string paint.
    pub fn named(name: impl Into<String>) -> Self {
        Paint::Named(name.into())
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Rgba(color)
    }
}

/// Resolves a color-like input to the surface's native color.
///
/// `None` (no paint at all) and unknown color names both resolve to
/// [`Rgba::TRANSPARENT`]; named strings go through the hex parser first, then
/// the name table.
pub fn resolve_paint(paint: Option<&Paint>) -> Rgba {
    match paint {
        None => Rgba::TRANSPARENT,
        Some(Paint::Rgba(color)) => *color,
        Some(Paint::Gradient(gradient)) => gradient.resolved(),
        Some(Paint::Named(name)) => Rgba::from_hex(name)
            .or_else(|| Rgba::from_name(name))
            .unwrap_or(Rgba::TRANSPARENT),
    }
}
