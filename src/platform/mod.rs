//! Platform abstraction layer
//!
//! The two capability sets a host supplies to run a session:
//! - Input: which keys are held or were just pressed this frame
//! - Canvas: draw sprites, text and rectangles, then present the frame

use crate::sim::{SpriteId, TickInput};

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Pause,
    Quit,
}

/// Per-frame keyboard state
pub trait InputSource {
    /// Key is down this frame
    fn is_held(&self, key: Key) -> bool;
    /// Key went down since the previous frame
    fn just_pressed(&self, key: Key) -> bool;
}

impl TickInput {
    /// Sample a host's keyboard into tick input
    pub fn poll<I: InputSource + ?Sized>(input: &I) -> Self {
        Self {
            left: input.is_held(Key::Left),
            right: input.is_held(Key::Right),
            pause: input.just_pressed(Key::Pause),
            quit: input.is_held(Key::Quit),
        }
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 128, 0);
    pub const ORANGE: Rgba = Rgba::rgb(255, 165, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
}

/// Drawing surface
pub trait Canvas {
    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, color: Rgba, size: u32, x: i32, y: i32);
    fn fill_rect(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32);
    /// Outline only
    fn draw_rect(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32);
    /// Rendered width of `text` at `size`, for centring
    fn text_width(&self, text: &str, size: u32) -> i32;
    /// Show the finished frame
    fn present(&mut self);
}
