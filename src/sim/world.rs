//! Entity queues and their per-frame updates
//!
//! Each queue is ordered by spawn time, which is also ascending x, so only
//! the head can ever scroll off screen.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{GroundContact, enemy_hit, ground_contact};
use super::entity::{DrawCommand, Entity, EntityKind, TerrainKind};
use super::player::Player;
use super::track::TrackStep;
use crate::tuning::Tuning;

/// Initial runway length and tile overlap
const RUNWAY_TILES: usize = 30;
const RUNWAY_OVERLAP: f32 = 3.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub ground: VecDeque<Entity>,
    pub water: VecDeque<Entity>,
    pub decorations: VecDeque<Entity>,
    pub enemies: VecDeque<Entity>,
}

impl World {
    pub fn clear(&mut self) {
        self.ground.clear();
        self.water.clear();
        self.decorations.clear();
        self.enemies.clear();
    }

    /// Lay the starting runway on `tier` and a full row of water tiles
    pub fn lay_initial_track(&mut self, tuning: &Tuning, tier: u32) {
        let tile = tuning.tile_width;
        let y = tuning.tier_y(tier);
        for i in 0..RUNWAY_TILES {
            self.ground.push_back(Entity::new(
                EntityKind::Terrain(TerrainKind::Raised),
                Vec2::new(i as f32 * (tile - RUNWAY_OVERLAP), y),
                tile,
            ));
        }

        let water_tiles = (tuning.canvas_width / tile).floor() as usize + 2;
        for i in 0..water_tiles {
            self.water.push_back(Entity::new(
                EntityKind::Water,
                Vec2::new(i as f32 * tile, tuning.baseline()),
                tile,
            ));
        }
    }

    /// Scroll water; the head tile wraps to the tail so the floor never breaks
    pub fn update_water(&mut self, speed: u32, tile_width: f32, out: &mut Vec<DrawCommand>) {
        for w in &mut self.water {
            w.update(speed);
            w.draw(out);
        }

        if self.water.front().is_some_and(|w| w.is_offscreen(tile_width)) {
            if let Some(mut head) = self.water.pop_front() {
                let tail_x = self.water.back().map_or(head.x(), |t| t.x());
                head.body.pos.x = tail_x + tile_width;
                self.water.push_back(head);
            }
        }
    }

    pub fn update_decorations(&mut self, speed: u32, tile_width: f32, out: &mut Vec<DrawCommand>) {
        scroll_and_prune(&mut self.decorations, speed, tile_width, out);
    }

    /// Scroll terrain and resolve landings against the player
    ///
    /// The player is assumed to be falling until some tile catches them.
    pub fn update_ground(&mut self, player: &mut Player, speed: u32, tuning: &Tuning, out: &mut Vec<DrawCommand>) {
        player.is_falling = true;
        for g in &mut self.ground {
            g.update(speed);
            g.draw(out);

            if let GroundContact::Landing { surface_y } = ground_contact(&player.body, &g.body, tuning) {
                player.land(surface_y, tuning.landing_sink);
            }
        }
        prune_head(&mut self.ground, tuning.tile_width);
    }

    /// Scroll enemies; returns true if any of them touched the player
    pub fn update_enemies(&mut self, player: &Player, speed: u32, tuning: &Tuning, out: &mut Vec<DrawCommand>) -> bool {
        let mut hit = false;
        for e in &mut self.enemies {
            e.update(speed);
            e.draw(out);
            hit |= enemy_hit(&player.body, &e.body, tuning);
        }
        prune_head(&mut self.enemies, tuning.tile_width);
        hit
    }

    /// Queue whatever a generator step emitted
    pub fn spawn(&mut self, step: TrackStep) {
        if let TrackStep::Tile {
            terrain,
            decorations,
            enemy,
        } = step
        {
            self.ground.push_back(terrain);
            self.decorations.extend(decorations);
            self.enemies.extend(enemy);
        }
    }

    pub fn last_enemy_x(&self) -> Option<f32> {
        self.enemies.back().map(Entity::x)
    }
}

fn scroll_and_prune(queue: &mut VecDeque<Entity>, speed: u32, tile_width: f32, out: &mut Vec<DrawCommand>) {
    for e in queue.iter_mut() {
        e.update(speed);
        e.draw(out);
    }
    prune_head(queue, tile_width);
}

fn prune_head(queue: &mut VecDeque<Entity>, tile_width: f32) {
    if queue.front().is_some_and(|e| e.is_offscreen(tile_width)) {
        queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyKind;
    use proptest::prelude::*;

    fn world() -> (World, Tuning) {
        let tuning = Tuning::default();
        let mut w = World::default();
        w.lay_initial_track(&tuning, 2);
        (w, tuning)
    }

    #[test]
    fn test_initial_track() {
        let (w, tuning) = world();
        assert_eq!(w.ground.len(), 30);
        assert_eq!(w.ground[1].x(), 29.0);
        assert!(w.ground.iter().all(|g| g.y() == tuning.tier_y(2)));
        assert_eq!(w.water.len(), 27);
        assert!(w.water.iter().all(|t| t.y() == 448.0));
    }

    #[test]
    fn test_water_recycles_without_gaps() {
        let (mut w, tuning) = world();
        let mut out = Vec::new();
        for _ in 0..500 {
            w.update_water(7, tuning.tile_width, &mut out);
            assert_eq!(w.water.len(), 27);
            for pair in w.water.iter().collect::<Vec<_>>().windows(2) {
                assert_eq!(pair[1].x() - pair[0].x(), tuning.tile_width);
            }
        }
        assert!(w.water[0].x() >= -tuning.tile_width);
    }

    #[test]
    fn test_ground_head_pruned() {
        let (mut w, tuning) = world();
        let mut player = Player::new(&tuning);
        let mut out = Vec::new();
        // First tile sits at x=0: it needs to pass -32
        for _ in 0..6 {
            w.update_ground(&mut player, 6, &tuning, &mut out);
        }
        assert_eq!(w.ground.len(), 29);
        assert_eq!(out.len(), 6 * 30);
    }

    #[test]
    fn test_ground_lands_falling_player() {
        let (mut w, tuning) = world();
        let mut player = Player::new(&tuning);
        let mut out = Vec::new();
        player.is_falling = true;
        player.body.vel.y = 4.0;
        w.update_ground(&mut player, 6, &tuning, &mut out);
        assert!(!player.is_falling);
        assert_eq!(player.dy(), 0.0);
        assert_eq!(player.body.pos.y, 320.0 - 96.0 + 5.0);
    }

    #[test]
    fn test_ground_leaves_player_falling_over_gap() {
        let tuning = Tuning::default();
        let mut w = World::default();
        let mut player = Player::new(&tuning);
        let mut out = Vec::new();
        w.update_ground(&mut player, 6, &tuning, &mut out);
        assert!(player.is_falling);
    }

    #[test]
    fn test_enemy_hit_reported() {
        let tuning = Tuning::default();
        let mut w = World::default();
        let player = Player::new(&tuning);
        w.enemies.push_back(Entity::new(
            EntityKind::Enemy(EnemyKind::Slime),
            Vec2::new(90.0, 270.0),
            32.0,
        ));
        let mut out = Vec::new();
        assert!(w.update_enemies(&player, 6, &tuning, &mut out));
        assert_eq!(w.last_enemy_x(), Some(84.0));
    }

    proptest! {
        #[test]
        fn prop_every_entity_scrolls_by_speed(speed in 1u32..=15, frames in 1usize..60) {
            let (mut w, tuning) = world();
            let mut player = Player::new(&tuning);
            let mut out = Vec::new();
            for _ in 0..frames {
                let before: Vec<f32> = w.ground.iter().map(Entity::x).collect();
                let pruned = w.ground.front().is_some_and(|g| g.x() - (speed as f32) < -tuning.tile_width);
                w.update_ground(&mut player, speed, &tuning, &mut out);
                let after: Vec<f32> = w.ground.iter().map(Entity::x).collect();
                let skip = usize::from(pruned);
                for (b, a) in before.iter().skip(skip).zip(after.iter()) {
                    prop_assert_eq!(*a, *b - speed as f32);
                }
            }
        }

        #[test]
        fn prop_water_count_invariant(speed in 1u32..=15, frames in 1usize..400) {
            let (mut w, tuning) = world();
            let mut out = Vec::new();
            let count = w.water.len();
            for _ in 0..frames {
                w.update_water(speed, tuning.tile_width, &mut out);
            }
            prop_assert_eq!(w.water.len(), count);
            let xs: Vec<f32> = w.water.iter().map(Entity::x).collect();
            for pair in xs.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], tuning.tile_width);
            }
        }
    }
}
