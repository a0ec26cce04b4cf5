//! Fuel Rush - A lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, timers, game state)
//! - `renderer`: Snapshot to draw-call translation
//! - `platform`: Input and drawing capabilities a host provides
//! - `settings`: Session configuration
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default window dimensions
    pub const WINDOW_WIDTH: i32 = 840;
    pub const WINDOW_HEIGHT: i32 = 650;

    /// Target frame time (~60 FPS)
    pub const FRAME_MS: u64 = 16;

    /// How long the end screen stays up
    pub const GAME_OVER_DELAY_MS: u64 = 2500;

    /// Fuel that fills the HUD bar
    pub const FUEL_BAR_FULL: i32 = 100;
    /// At or below this the fuel bar turns red
    pub const FUEL_LOW_THRESHOLD: i32 = 20;
}
