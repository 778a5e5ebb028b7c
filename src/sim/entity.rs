//! World entities: terrain, water, decorations and enemies
//!
//! Every entity is one tile-sized [`Body`] tagged with an [`EntityKind`].
//! Behavior is shared (scroll + draw); only the sprite differs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Opaque sprite identifier handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Background,
    Sky,
    Backdrop,
    BackdropGround,
    Player,
    Grass,
    GrassMid1,
    GrassMid2,
    Bridge,
    Box,
    Cliff,
    Water,
    Plant,
    Bush1,
    Bush2,
    Spikes,
    Slime,
}

/// Terrain tile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Flat ground (tiers 0-1), first variant
    FlatA,
    /// Flat ground (tiers 0-1), second variant
    FlatB,
    /// Raised grass (tier 2)
    Raised,
    /// Bridge (tier 3)
    Bridge,
    /// Box (tier 4)
    Box,
    /// Edge tile hinting at an upcoming drop
    Cliff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    Plant,
    BushLeft,
    BushRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Spikes,
    Slime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Terrain(TerrainKind),
    Water,
    Decoration(DecorationKind),
    Enemy(EnemyKind),
}

impl EntityKind {
    pub fn sprite(self) -> SpriteKind {
        match self {
            EntityKind::Terrain(TerrainKind::FlatA) => SpriteKind::GrassMid1,
            EntityKind::Terrain(TerrainKind::FlatB) => SpriteKind::GrassMid2,
            EntityKind::Terrain(TerrainKind::Raised) => SpriteKind::Grass,
            EntityKind::Terrain(TerrainKind::Bridge) => SpriteKind::Bridge,
            EntityKind::Terrain(TerrainKind::Box) => SpriteKind::Box,
            EntityKind::Terrain(TerrainKind::Cliff) => SpriteKind::Cliff,
            EntityKind::Water => SpriteKind::Water,
            EntityKind::Decoration(DecorationKind::Plant) => SpriteKind::Plant,
            EntityKind::Decoration(DecorationKind::BushLeft) => SpriteKind::Bush1,
            EntityKind::Decoration(DecorationKind::BushRight) => SpriteKind::Bush2,
            EntityKind::Enemy(EnemyKind::Spikes) => SpriteKind::Spikes,
            EntityKind::Enemy(EnemyKind::Slime) => SpriteKind::Slime,
        }
    }
}

/// A draw request: sprite, animation frame and top-left position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: SpriteKind,
    /// Sprite-sheet frame (0 for single-image sprites)
    pub frame: u32,
    pub pos: Vec2,
}

impl DrawCommand {
    pub fn new(sprite: SpriteKind, pos: Vec2) -> Self {
        Self { sprite, frame: 0, pos }
    }
}

/// A positioned, typed world object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, tile_width: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(tile_width)),
            kind,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.body.pos.y
    }

    /// Scroll left at world speed for one frame
    pub fn update(&mut self, scroll_speed: u32) {
        self.body.vel = Vec2::new(-(scroll_speed as f32), 0.0);
        self.body.advance();
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::new(self.kind.sprite(), self.body.pos));
    }

    /// Whether the entity has fully left the screen on the left
    #[inline]
    pub fn is_offscreen(&self, tile_width: f32) -> bool {
        self.body.pos.x < -tile_width
    }
}
