//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` is one frame)
//! - Seeded RNG only
//! - Stable iteration order (entity queues are ordered by spawn time)
//! - No rendering or platform dependencies; frames come out as draw commands

pub mod background;
pub mod body;
pub mod collision;
pub mod entity;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;
pub mod track;
pub mod world;

pub use body::Body;
pub use collision::{GroundContact, enemy_hit, fell_out, ground_contact};
pub use entity::{DecorationKind, DrawCommand, EnemyKind, Entity, EntityKind, SpriteKind, TerrainKind};
pub use player::{AnimState, Animation, Player};
pub use progression::{Milestone, Progression};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameOutput, TickInput, tick};
pub use track::{SpawnContext, TrackState, TrackStep};
pub use world::World;
