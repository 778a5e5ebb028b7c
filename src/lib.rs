//! Tile Runner - simulation core of an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain generation, physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Session settings loaded from JSON
//! - `assets`: Sprite manifest and preload table (rendering lives outside this crate)

pub mod assets;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Square tile size used for all terrain and entity sizing
    pub const TILE_WIDTH: f32 = 32.0;
    /// Vertical distance between two platform tiers
    pub const TIER_SPACING: f32 = 64.0;
    /// Highest platform tier
    pub const MAX_TIER: u32 = 4;

    /// Scroll speed (pixels per frame)
    pub const INITIAL_SCROLL_SPEED: u32 = 6;
    pub const MAX_SCROLL_SPEED: u32 = 15;
    /// Speed-up fires after `cadence * speed * SPEED_RAMP_FACTOR` ticks
    pub const SPEED_RAMP_FACTOR: u32 = 20;

    /// Player sprite frame size
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 96.0;
    pub const PLAYER_SPAWN_X: f32 = 64.0;
    pub const PLAYER_SPAWN_Y: f32 = 250.0;

    /// Vertical physics (per frame)
    pub const GRAVITY: f32 = 1.0;
    pub const JUMP_IMPULSE: f32 = -10.0;
    pub const JUMP_HOLD_FRAMES: u32 = 12;

    /// Landing angle gate (degrees, tile center to player center)
    pub const LANDING_ANGLE_MIN: f32 = -130.0;
    pub const LANDING_ANGLE_MAX: f32 = -50.0;
    /// How far the player's feet sink into a tile after landing
    pub const LANDING_SINK: f32 = 5.0;
    /// Enemy hit distance is `player width - tile width * this`
    pub const ENEMY_HIT_TILE_FRACTION: f32 = 0.5;

    pub const STARTING_LIVES: u8 = 3;
}
