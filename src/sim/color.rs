//! RGB colors and color mixing
//!
//! Colors are clamped to [0, 255] at construction. Mixing is a floor average so
//! merges produce the same color on every platform.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::COLOR_JITTER;

/// Default threshold for [`Color::is_near_white`]
pub const NEAR_WHITE_THRESHOLD: u8 = 240;

/// Base hues for random ball colors
const VIBRANT_HUES: [(i32, i32, i32); 8] = [
    (255, 100, 100), // Red
    (100, 255, 100), // Green
    (100, 100, 255), // Blue
    (255, 255, 100), // Yellow
    (255, 100, 255), // Magenta
    (100, 255, 255), // Cyan
    (255, 150, 50),  // Orange
    (150, 50, 255),  // Violet
];

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    /// Build a color, clamping every channel into [0, 255]
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Floor average of two colors, channel by channel
    pub fn mix(a: Color, b: Color) -> Color {
        let avg = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as i32;
        Color::new(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b))
    }

    /// True when every channel is at or above `threshold`
    pub fn is_near_white(&self, threshold: u8) -> bool {
        self.r >= threshold && self.g >= threshold && self.b >= threshold
    }

    /// One of the eight base hues with ±30 jitter per channel
    pub fn random_vibrant<R: Rng>(rng: &mut R) -> Color {
        let (r, g, b) = VIBRANT_HUES[rng.random_range(0..VIBRANT_HUES.len())];
        let mut jitter = || rng.random_range(-COLOR_JITTER..=COLOR_JITTER);
        Color::new(r + jitter(), g + jitter(), b + jitter())
    }

    /// Lighter shade used for the specular dot
    pub fn highlight(&self) -> Color {
        Color {
            r: self.r.saturating_add(60),
            g: self.g.saturating_add(60),
            b: self.b.saturating_add(60),
        }
    }

    /// Darker shade used for the rim
    pub fn outline(&self) -> Color {
        Color {
            r: self.r.saturating_sub(40),
            g: self.g.saturating_sub(40),
            b: self.b.saturating_sub(40),
        }
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
