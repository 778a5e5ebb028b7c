//! Procedural track generator
//!
//! Terrain is run-length encoded: a gap of empty columns, then a run of tiles
//! at one height tier. One generator step produces at most one terrain column.
//! Gaps are bounded by the current scroll speed so every gap stays jumpable,
//! and runs are long enough to host their decorations.
//!
//! The generator state is a plain value: [`TrackState::step`] takes the current
//! state and returns the next one together with whatever it emitted.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{DecorationKind, EnemyKind, Entity, EntityKind, TerrainKind};
use crate::consts::MAX_TIER;
use crate::tuning::Tuning;

/// Run state at session start
pub const START_HEIGHT: u32 = 2;
pub const START_LENGTH: u32 = 15;

/// A run's last tile becomes a cliff edge with probability 1 in this
const CLIFF_ODDS: u32 = 4;
/// Decorations appear after this score, with probability 1 in `DECORATION_ODDS`
const DECORATION_MIN_SCORE: u64 = 40;
const DECORATION_ODDS: u32 = 21;
/// A bush pair needs this many tiles left in the run
const BUSH_MIN_REMAINING: u32 = 3;

const ENEMY_MIN_SCORE: u64 = 100;
const ENEMY_CHANCE: f64 = 0.04;
const MAX_LIVE_ENEMIES: usize = 3;
const ENEMY_MIN_REMAINING: u32 = 6;
/// Enemy spacing: at least this many tiles behind the previous one...
const ENEMY_FAR_TILES: f32 = 3.0;
/// ...or closer than this many (tight clusters)
const ENEMY_NEAR_TILES: f32 = 1.0;

/// Run-length generator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    /// Height tier of the current run (0..=4)
    pub platform_height: u32,
    /// Tiles remaining in the current run
    pub platform_length: u32,
    /// Empty columns remaining before the next run
    pub gap_length: u32,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            platform_height: START_HEIGHT,
            platform_length: START_LENGTH,
            gap_length: 0,
        }
    }
}

/// World facts the generator reads but never writes
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub tuning: &'a Tuning,
    pub scroll_speed: u32,
    pub score: u64,
    pub enemies_enabled: bool,
    pub live_enemies: usize,
    /// X of the most recently spawned live enemy
    pub last_enemy_x: Option<f32>,
}

/// What a generator step produced
#[derive(Debug, Clone)]
pub enum TrackStep {
    /// An empty column was consumed
    Gap,
    /// One terrain tile, plus anything placed on top of it
    Tile {
        terrain: Entity,
        decorations: Vec<Entity>,
        enemy: Option<Entity>,
    },
    /// A new gap and run were drawn; nothing emitted
    NewRun,
}

impl TrackState {
    /// Advance the generator by one column
    pub fn step<R: Rng + ?Sized>(self, ctx: &SpawnContext<'_>, rng: &mut R) -> (Self, TrackStep) {
        debug_assert!(self.platform_height <= MAX_TIER);

        if self.gap_length > 0 {
            let next = Self {
                gap_length: self.gap_length - 1,
                ..self
            };
            return (next, TrackStep::Gap);
        }

        if self.platform_length > 0 {
            let (next, terrain) = self.emit_tile(ctx, rng);
            let decorations = next.place_decorations(ctx, rng);
            let enemy = if ctx.enemies_enabled {
                next.place_enemy(ctx, rng)
            } else {
                None
            };
            return (
                next,
                TrackStep::Tile {
                    terrain,
                    decorations,
                    enemy,
                },
            );
        }

        (self.new_run(ctx.scroll_speed, rng), TrackStep::NewRun)
    }

    /// Emit one more tile of the current run without consuming a gap.
    ///
    /// Used when the scroll speed changes so the seam at the new cadence
    /// never opens an unplanned hole.
    pub fn extend_run<R: Rng + ?Sized>(self, ctx: &SpawnContext<'_>, rng: &mut R) -> (Self, Entity) {
        self.emit_tile(ctx, rng)
    }

    /// Tile variant for the current tier
    pub fn terrain_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> TerrainKind {
        let kind = match self.platform_height {
            0 | 1 => {
                if rng.random_bool(0.5) {
                    TerrainKind::FlatA
                } else {
                    TerrainKind::FlatB
                }
            }
            2 => TerrainKind::Raised,
            3 => TerrainKind::Bridge,
            _ => TerrainKind::Box,
        };

        if self.platform_length == 1
            && self.platform_height < 3
            && rng.random_range(0..CLIFF_ODDS) == 0
        {
            return TerrainKind::Cliff;
        }
        kind
    }

    fn emit_tile<R: Rng + ?Sized>(self, ctx: &SpawnContext<'_>, rng: &mut R) -> (Self, Entity) {
        let kind = self.terrain_kind(rng);
        let pos = Vec2::new(
            ctx.tuning.spawn_x(ctx.scroll_speed),
            ctx.tuning.tier_y(self.platform_height),
        );
        let next = Self {
            platform_length: self.platform_length.saturating_sub(1),
            ..self
        };
        (
            next,
            Entity::new(EntityKind::Terrain(kind), pos, ctx.tuning.tile_width),
        )
    }

    /// Draw the next gap and run.
    ///
    /// The height is a biased walk: the draw ceiling rises by up to two tiers
    /// above the current one, so terrain climbs gradually but can drop anywhere.
    /// Adding the delta to the height directly would only ever climb and pin
    /// every run to the top tier.
    fn new_run<R: Rng + ?Sized>(self, speed: u32, rng: &mut R) -> Self {
        let speed = speed.max(1);
        let gap_length = rng.random_range(speed.saturating_sub(2)..=speed);
        let ceiling = self.platform_height + rng.random_range(0..=2);
        let platform_height = rng.random_range(0..=ceiling).min(MAX_TIER);
        let platform_length = rng.random_range((speed / 2).max(1)..=speed.saturating_mul(4));

        log::debug!(
            "new run: gap={} height={} length={}",
            gap_length,
            platform_height,
            platform_length
        );

        Self {
            platform_height,
            platform_length,
            gap_length,
        }
    }

    /// Top-of-tile y for things standing on the current run
    fn surface_y(&self, tuning: &Tuning) -> f32 {
        tuning.tier_y(self.platform_height) - tuning.tile_width
    }

    fn place_decorations<R: Rng + ?Sized>(&self, ctx: &SpawnContext<'_>, rng: &mut R) -> Vec<Entity> {
        let mut out = Vec::new();
        if ctx.score > DECORATION_MIN_SCORE
            && rng.random_range(0..DECORATION_ODDS) == 0
            && self.platform_height < 3
        {
            let tile = ctx.tuning.tile_width;
            let x = ctx.tuning.spawn_x(ctx.scroll_speed);
            let y = self.surface_y(ctx.tuning);

            if rng.random_bool(0.5) {
                out.push(Entity::new(
                    EntityKind::Decoration(DecorationKind::Plant),
                    Vec2::new(x, y),
                    tile,
                ));
            } else if self.platform_length >= BUSH_MIN_REMAINING {
                out.push(Entity::new(
                    EntityKind::Decoration(DecorationKind::BushLeft),
                    Vec2::new(x, y),
                    tile,
                ));
                out.push(Entity::new(
                    EntityKind::Decoration(DecorationKind::BushRight),
                    Vec2::new(x + tile, y),
                    tile,
                ));
            }
        }
        out
    }

    fn place_enemy<R: Rng + ?Sized>(&self, ctx: &SpawnContext<'_>, rng: &mut R) -> Option<Entity> {
        let tile = ctx.tuning.tile_width;
        let spaced = match ctx.last_enemy_x {
            Some(last_x) => {
                let behind = ctx.tuning.canvas_width - last_x;
                behind >= tile * ENEMY_FAR_TILES || behind < tile * ENEMY_NEAR_TILES
            }
            None => true,
        };

        if ctx.score > ENEMY_MIN_SCORE
            && rng.random_bool(ENEMY_CHANCE)
            && ctx.live_enemies < MAX_LIVE_ENEMIES
            && self.platform_length >= ENEMY_MIN_REMAINING
            && spaced
        {
            let kind = if rng.random_bool(0.5) {
                EnemyKind::Spikes
            } else {
                EnemyKind::Slime
            };
            let pos = Vec2::new(ctx.tuning.spawn_x(ctx.scroll_speed), self.surface_y(ctx.tuning));
            return Some(Entity::new(EntityKind::Enemy(kind), pos, tile));
        }
        None
    }
}
