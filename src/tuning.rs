//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance passes never touch the
//! simulation code. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bounds accepted from configuration
const SCROLL_SPEED_LIMIT: u32 = 64;
const SPEED_RAMP_FACTOR_LIMIT: u32 = 1000;

/// Balance and geometry values for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub tile_width: f32,
    pub tier_spacing: f32,

    pub initial_scroll_speed: u32,
    pub max_scroll_speed: u32,
    pub speed_ramp_factor: u32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_spawn: (f32, f32),

    pub gravity: f32,
    /// Upward (negative) launch velocity
    pub jump_impulse: f32,
    pub jump_hold_frames: u32,

    /// Landing accepted when the angle lies strictly inside this range (degrees)
    pub landing_angle: (f32, f32),
    pub landing_sink: f32,
    pub enemy_hit_tile_fraction: f32,

    pub starting_lives: u8,

    /// Parallax layer speeds as a fraction of scroll speed (sky, backdrop, ground backdrop)
    pub parallax: [f32; 3],

    /// Distance milestones (generator steps)
    pub distance_milestones: [u64; 3],
    /// Jump-count milestone
    pub jump_milestone: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tile_width: TILE_WIDTH,
            tier_spacing: TIER_SPACING,

            initial_scroll_speed: INITIAL_SCROLL_SPEED,
            max_scroll_speed: MAX_SCROLL_SPEED,
            speed_ramp_factor: SPEED_RAMP_FACTOR,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_spawn: (PLAYER_SPAWN_X, PLAYER_SPAWN_Y),

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            jump_hold_frames: JUMP_HOLD_FRAMES,

            landing_angle: (LANDING_ANGLE_MIN, LANDING_ANGLE_MAX),
            landing_sink: LANDING_SINK,
            enemy_hit_tile_fraction: ENEMY_HIT_TILE_FRACTION,

            starting_lives: STARTING_LIVES,

            parallax: [0.2, 0.4, 0.6],

            distance_milestones: [1000, 2000, 3000],
            jump_milestone: 10,
        }
    }
}

impl Tuning {
    /// Y coordinate of the lowest terrain row (water line)
    #[inline]
    pub fn baseline(&self) -> f32 {
        self.canvas_height - self.tile_width
    }

    /// Y coordinate of a terrain tile on the given tier
    #[inline]
    pub fn tier_y(&self, tier: u32) -> f32 {
        self.baseline() - tier as f32 * self.tier_spacing
    }

    /// X coordinate where freshly generated entities appear
    #[inline]
    pub fn spawn_x(&self, scroll_speed: u32) -> f32 {
        self.canvas_width + self.tile_width % scroll_speed.max(1) as f32
    }

    /// Frames between generator steps: `floor(tile / speed)`, at least 1
    #[inline]
    pub fn spawn_cadence(&self, scroll_speed: u32) -> u32 {
        ((self.tile_width / scroll_speed.max(1) as f32).floor() as u32).max(1)
    }

    /// Swept distance at or below which an enemy hits the player
    #[inline]
    pub fn enemy_hit_distance(&self) -> f32 {
        self.player_width - self.tile_width * self.enemy_hit_tile_fraction
    }

    /// Clamp nonsensical values to safe ones, warning about each fix
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.tile_width.is_nan() || self.tile_width <= 0.0 {
            log::warn!("tile_width {} invalid, using {}", self.tile_width, defaults.tile_width);
            self.tile_width = defaults.tile_width;
        }
        if self.canvas_width.is_nan()
            || self.canvas_width <= 0.0
            || self.canvas_height.is_nan()
            || self.canvas_height <= self.tile_width
        {
            log::warn!(
                "canvas {}x{} invalid, using {}x{}",
                self.canvas_width,
                self.canvas_height,
                defaults.canvas_width,
                defaults.canvas_height
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        if self.max_scroll_speed == 0 {
            log::warn!("max_scroll_speed must be positive, using {}", defaults.max_scroll_speed);
            self.max_scroll_speed = defaults.max_scroll_speed;
        }
        if self.max_scroll_speed > SCROLL_SPEED_LIMIT {
            log::warn!("max_scroll_speed {} clamped to {}", self.max_scroll_speed, SCROLL_SPEED_LIMIT);
            self.max_scroll_speed = SCROLL_SPEED_LIMIT;
        }
        if self.speed_ramp_factor == 0 || self.speed_ramp_factor > SPEED_RAMP_FACTOR_LIMIT {
            let factor = self.speed_ramp_factor.clamp(1, SPEED_RAMP_FACTOR_LIMIT);
            log::warn!("speed_ramp_factor {} clamped to {}", self.speed_ramp_factor, factor);
            self.speed_ramp_factor = factor;
        }
        if self.initial_scroll_speed == 0 || self.initial_scroll_speed > self.max_scroll_speed {
            let speed = self.initial_scroll_speed.clamp(1, self.max_scroll_speed);
            log::warn!("initial_scroll_speed {} clamped to {}", self.initial_scroll_speed, speed);
            self.initial_scroll_speed = speed;
        }
        if self.landing_angle.0 >= self.landing_angle.1 {
            log::warn!("landing_angle {:?} is empty, using {:?}", self.landing_angle, defaults.landing_angle);
            self.landing_angle = defaults.landing_angle;
        }
        if self.jump_impulse > 0.0 {
            log::warn!("jump_impulse must point up, flipping {}", self.jump_impulse);
            self.jump_impulse = -self.jump_impulse;
        }
        if self.gravity < 0.0 {
            log::warn!("gravity must point down, flipping {}", self.gravity);
            self.gravity = -self.gravity;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let t = Tuning::default();
        assert_eq!(t.baseline(), 448.0);
        assert_eq!(t.tier_y(2), 320.0);
        assert_eq!(t.spawn_x(6), 802.0);
        assert_eq!(t.spawn_cadence(6), 5);
        assert_eq!(t.spawn_cadence(15), 2);
        assert_eq!(t.enemy_hit_distance(), 44.0);
    }

    #[test]
    fn test_cadence_never_zero() {
        let t = Tuning::default();
        assert_eq!(t.spawn_cadence(0), 32);
        assert_eq!(t.spawn_cadence(64), 1);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let t = Tuning {
            tile_width: 0.0,
            initial_scroll_speed: 40,
            landing_angle: (-50.0, -130.0),
            jump_impulse: 10.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(t.tile_width, TILE_WIDTH);
        assert_eq!(t.initial_scroll_speed, MAX_SCROLL_SPEED);
        assert_eq!(t.landing_angle, (LANDING_ANGLE_MIN, LANDING_ANGLE_MAX));
        assert_eq!(t.jump_impulse, -10.0);
    }

    #[test]
    fn test_sanitized_bounds_speed_and_ramp() {
        let t = Tuning {
            max_scroll_speed: u32::MAX,
            initial_scroll_speed: u32::MAX,
            speed_ramp_factor: u32::MAX,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.max_scroll_speed, SCROLL_SPEED_LIMIT);
        assert_eq!(t.initial_scroll_speed, SCROLL_SPEED_LIMIT);
        assert_eq!(t.speed_ramp_factor, SPEED_RAMP_FACTOR_LIMIT);

        let t = Tuning {
            speed_ramp_factor: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.speed_ramp_factor, 1);
    }

    #[test]
    fn test_sanitized_keeps_good_values() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }
}
