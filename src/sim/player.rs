//! Player controller: vertical physics, variable-height jump, animation state
//!
//! The player never moves horizontally; the world scrolls past instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::{DrawCommand, SpriteKind};
use crate::tuning::Tuning;

/// Frames per animation step at the initial scroll speed
pub const DEFAULT_FRAME_SPEED: u32 = 4;

/// Which animation the player is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    Walk,
    Jump,
    Fall,
}

/// A looping run of sprite-sheet frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    first_frame: u32,
    last_frame: u32,
    /// Ticks each frame is held
    pub frame_speed: u32,
    current: u32,
    counter: u32,
}

impl Animation {
    pub fn new(first_frame: u32, last_frame: u32, frame_speed: u32) -> Self {
        debug_assert!(first_frame <= last_frame);
        Self {
            first_frame,
            last_frame: last_frame.max(first_frame),
            frame_speed: frame_speed.max(1),
            current: 0,
            counter: 0,
        }
    }

    fn len(&self) -> u32 {
        self.last_frame - self.first_frame + 1
    }

    /// Advance playback by one tick
    pub fn update(&mut self) {
        let speed = self.frame_speed.max(1);
        if self.counter + 1 >= speed {
            self.current = (self.current + 1) % self.len();
        }
        self.counter = (self.counter + 1) % speed;
    }

    /// Sprite-sheet index of the frame currently shown
    pub fn frame(&self) -> u32 {
        self.first_frame + self.current
    }

    pub fn set_frame_speed(&mut self, frame_speed: u32) {
        self.frame_speed = frame_speed.max(1);
        self.counter %= self.frame_speed;
    }
}

/// The player actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub jump_hold_frames: u32,
    pub is_jumping: bool,
    pub is_falling: bool,
    /// Frames left in which holding jump keeps the impulse going
    pub jump_hold: u32,
    pub anim_state: AnimState,
    pub walk_anim: Animation,
    pub jump_anim: Animation,
    pub fall_anim: Animation,
    spawn: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let spawn = Vec2::new(tuning.player_spawn.0, tuning.player_spawn.1);
        Self {
            body: Body::new(spawn, Vec2::new(tuning.player_width, tuning.player_height)),
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            jump_hold_frames: tuning.jump_hold_frames,
            is_jumping: false,
            is_falling: false,
            jump_hold: 0,
            anim_state: AnimState::Walk,
            walk_anim: Animation::new(0, 15, DEFAULT_FRAME_SPEED),
            jump_anim: Animation::new(15, 15, DEFAULT_FRAME_SPEED),
            fall_anim: Animation::new(11, 11, DEFAULT_FRAME_SPEED),
            spawn,
        }
    }

    /// Re-center at the spawn point and clear velocity and flags
    pub fn reset(&mut self) {
        self.body.pos = self.spawn;
        self.body.vel = Vec2::ZERO;
        self.is_jumping = false;
        self.is_falling = false;
        self.jump_hold = 0;
        self.anim_state = AnimState::Walk;
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.body.vel.y
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.body.vel.y != 0.0
    }

    /// Advance one frame of physics. Returns true when a new jump started.
    pub fn update(&mut self, jump_intent: bool) -> bool {
        if self.is_falling || self.is_jumping {
            self.body.vel.y += self.gravity;
        }

        let mut jumped = false;
        if jump_intent && self.body.vel.y == 0.0 && !self.is_jumping {
            self.is_jumping = true;
            self.body.vel.y = self.jump_impulse;
            self.jump_hold = self.jump_hold_frames;
            jumped = true;
        }

        if jump_intent && self.jump_hold > 0 {
            self.body.vel.y = self.jump_impulse;
        }
        self.jump_hold = self.jump_hold.saturating_sub(1);

        self.body.advance();

        self.anim_state = if self.body.vel.y > 0.0 {
            AnimState::Fall
        } else if self.body.vel.y < 0.0 {
            AnimState::Jump
        } else {
            AnimState::Walk
        };
        self.current_anim_mut().update();

        jumped
    }

    /// Stop on top of a surface whose top edge is at `surface_y`
    pub fn land(&mut self, surface_y: f32, sink: f32) {
        self.is_jumping = false;
        self.is_falling = false;
        self.body.pos.y = surface_y - self.body.size.y + sink;
        self.body.vel.y = 0.0;
    }

    pub fn current_anim(&self) -> &Animation {
        match self.anim_state {
            AnimState::Walk => &self.walk_anim,
            AnimState::Jump => &self.jump_anim,
            AnimState::Fall => &self.fall_anim,
        }
    }

    fn current_anim_mut(&mut self) -> &mut Animation {
        match self.anim_state {
            AnimState::Walk => &mut self.walk_anim,
            AnimState::Jump => &mut self.jump_anim,
            AnimState::Fall => &mut self.fall_anim,
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand {
            sprite: SpriteKind::Player,
            frame: self.current_anim().frame(),
            pos: self.body.pos,
        });
    }
}
