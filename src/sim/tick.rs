//! Per-frame simulation step
//!
//! One call to [`tick`] runs a whole frame to completion. Update order is
//! fixed: background, water, decorations, player, ground, enemies. Ground
//! collision needs the player's post-physics position, and the enemy and
//! floor checks must see the same settled position.

use serde::Serialize;

use super::collision::fell_out;
use super::entity::DrawCommand;
use super::progression::Progression;
use super::state::{GameEvent, GamePhase, GameState};
use super::track::SpawnContext;
use super::world::World;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump held (level-triggered)
    pub jump: bool,
    /// Idle/demo mode - AI decides when to jump
    pub idle_mode: bool,
}

/// Everything a frame produced for the outside world
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameOutput {
    pub draws: Vec<DrawCommand>,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameOutput {
    let mut out = FrameOutput {
        draws: Vec::new(),
        events: state.drain_events(),
    };

    if state.stopped || state.phase != GamePhase::Playing {
        return out;
    }

    let jump = if input.idle_mode {
        autopilot_jump(state)
    } else {
        input.jump
    };

    let speed = state.progression.scroll_speed;
    let tile_width = state.tuning.tile_width;

    state.background.advance(speed);
    state.background.draw(&mut out.draws);

    state.world.update_water(speed, tile_width, &mut out.draws);
    state.world.update_decorations(speed, tile_width, &mut out.draws);

    if state.player.update(jump) {
        state.progression.on_jump();
    }
    state.player.draw(&mut out.draws);
    if fell_out(&state.player.body, &state.tuning) {
        state.on_hit(&mut out.events);
    }

    state
        .world
        .update_ground(&mut state.player, speed, &state.tuning, &mut out.draws);

    if state.enemies_enabled
        && state
            .world
            .update_enemies(&state.player, speed, &state.tuning, &mut out.draws)
    {
        state.on_hit(&mut out.events);
    }

    if state.progression.spawn_due(&state.tuning) {
        generator_step(state, &mut out.events);
    }

    let airborne = state.player.is_airborne();
    if let Some(new_speed) = state.progression.try_speed_up(&state.tuning, airborne) {
        on_speed_up(state, new_speed, &mut out.events);
    }

    state.progression.ticker += 1;
    out
}

fn spawn_context<'a>(
    tuning: &'a Tuning,
    progression: &Progression,
    world: &World,
    enemies_enabled: bool,
) -> SpawnContext<'a> {
    SpawnContext {
        tuning,
        scroll_speed: progression.scroll_speed,
        score: progression.score,
        enemies_enabled,
        live_enemies: world.enemies.len(),
        last_enemy_x: world.last_enemy_x(),
    }
}

/// Count distance and let the track generator produce the next column
fn generator_step(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let reached = state.progression.on_generator_step(&state.tuning);
    events.push(GameEvent::ScoreChanged(state.progression.score));
    for milestone in reached {
        log::info!("Milestone reached: {}", milestone.id());
        events.push(GameEvent::MilestoneReached(milestone));
    }

    let ctx = spawn_context(
        &state.tuning,
        &state.progression,
        &state.world,
        state.enemies_enabled,
    );
    let (next, step) = state.track.step(&ctx, &mut state.rng);
    state.track = next;
    state.world.spawn(step);
}

fn on_speed_up(state: &mut GameState, new_speed: u32, events: &mut Vec<GameEvent>) {
    let frame_speed = state.progression.walk_frame_speed(&state.tuning);
    state.player.walk_anim.set_frame_speed(frame_speed);
    events.push(GameEvent::SpeedChanged(new_speed));
    log::info!("Scroll speed up: {} (score {})", new_speed, state.progression.score);

    // The cadence just changed; close the seam so no accidental hole opens
    if state.track.gap_length == 0 {
        let ctx = spawn_context(
            &state.tuning,
            &state.progression,
            &state.world,
            state.enemies_enabled,
        );
        let (next, tile) = state.track.extend_run(&ctx, &mut state.rng);
        state.track = next;
        state.world.ground.push_back(tile);
    }
}

/// Demo-mode AI: jump at gaps, steps up and enemies; hold while rising
fn autopilot_jump(state: &GameState) -> bool {
    let player = &state.player;
    if player.is_jumping {
        return player.dy() < 0.0;
    }
    if player.is_airborne() {
        return false;
    }

    let tile = state.tuning.tile_width;
    let feet = player.body.pos.y + player.body.size.y - state.tuning.landing_sink;
    let front = player.body.pos.x + player.body.size.x;
    let lookahead = front + tile * 1.5;

    // Nearest terrain column ahead of the player's front edge
    let ahead = state
        .world
        .ground
        .iter()
        .filter(|g| g.x() + tile >= front && g.x() <= lookahead)
        .min_by(|a, b| a.x().total_cmp(&b.x()));

    let gap_ahead = ahead.is_none();
    let step_up = ahead.is_some_and(|g| g.y() < feet - tile / 2.0);
    let enemy_ahead = state
        .world
        .enemies
        .iter()
        .any(|e| e.x() > player.body.pos.x && e.x() < front + tile * 3.0);

    gap_ahead || step_up || enemy_ahead
}
