//! Game state and session lifecycle
//!
//! Everything the simulation mutates lives in [`GameState`]; there is no
//! module-level state. Sessions are (re)started through the explicit
//! lifecycle methods here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::player::{DEFAULT_FRAME_SPEED, Player};
use super::progression::{Milestone, Progression};
use super::track::TrackState;
use super::world::World;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet (menu)
    Ready,
    /// Active gameplay
    Playing,
    /// Player was hit with lives to spare; waiting for `continue_game`
    AwaitingContinue,
    /// Player was hit with no lives left; waiting for `restart`
    GameOver,
}

/// Notifications for UI collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    MilestoneReached(Milestone),
    LivesChanged(u8),
    SpeedChanged(u32),
    AwaitingContinue { score: u64 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Set by `stop_session` and on every hit; checked at the top of each frame
    pub stopped: bool,
    pub lives: u8,
    pub enemies_enabled: bool,
    pub player: Player,
    pub progression: Progression,
    pub track: TrackState,
    pub world: World,
    pub background: Background,
    /// Events raised outside a frame, handed out with the next frame's output
    pub(crate) pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game; call `start_session(false)` to begin playing
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            stopped: true,
            lives: tuning.starting_lives,
            enemies_enabled: false,
            player: Player::new(&tuning),
            progression: Progression::new(&tuning),
            track: TrackState::default(),
            world: World::default(),
            background: Background::new(tuning.parallax, tuning.canvas_width),
            pending_events: Vec::new(),
            tuning,
        }
    }

    /// Toggle enemy spawning and enemy collisions
    pub fn set_enemies_enabled(&mut self, enabled: bool) {
        if self.phase == GamePhase::Playing && enabled != self.enemies_enabled {
            log::warn!("Enemies {} mid-session", if enabled { "enabled" } else { "disabled" });
        }
        self.enemies_enabled = enabled;
    }

    /// Start (or resume after a continue) a session
    ///
    /// Clears the world and re-lays the runway either way. Only a fresh start
    /// resets score and scroll speed.
    pub fn start_session(&mut self, continuing: bool) {
        self.world.clear();
        self.player.reset();
        self.progression.reset(&self.tuning, continuing);
        self.player
            .walk_anim
            .set_frame_speed(if continuing {
                self.progression.walk_frame_speed(&self.tuning)
            } else {
                DEFAULT_FRAME_SPEED
            });
        self.track = TrackState::default();
        self.world.lay_initial_track(&self.tuning, self.track.platform_height);
        self.background.reset();
        self.stopped = false;
        self.phase = GamePhase::Playing;

        log::info!(
            "Session started (continuing: {}, speed: {}, score: {}, lives: {})",
            continuing,
            self.progression.scroll_speed,
            self.progression.score,
            self.lives
        );
    }

    /// Halt the frame loop; takes effect before the next frame
    pub fn stop_session(&mut self) {
        self.stopped = true;
        log::info!("Session stopped");
    }

    /// Spend a life and resume from AwaitingContinue
    pub fn continue_game(&mut self) {
        if self.phase != GamePhase::AwaitingContinue || self.lives == 0 {
            log::warn!("Continue ignored in phase {:?} with {} lives", self.phase, self.lives);
            return;
        }
        self.lives -= 1;
        self.pending_events.push(GameEvent::LivesChanged(self.lives));
        self.start_session(true);
    }

    /// Start over with full lives
    pub fn restart(&mut self) {
        self.lives = self.tuning.starting_lives;
        self.pending_events.push(GameEvent::LivesChanged(self.lives));
        self.start_session(false);
    }

    /// Hit handling shared by enemy contact and falling out of the world
    pub(crate) fn on_hit(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.stopped = true;
        let score = self.progression.score;
        if self.lives > 0 {
            self.phase = GamePhase::AwaitingContinue;
            events.push(GameEvent::AwaitingContinue { score });
            log::info!("Hit! Awaiting continue ({} lives left)", self.lives);
        } else {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver { score });
            log::info!("Game over at score {}", score);
        }
    }

    /// Take events raised outside a frame
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(lives: u8) -> GameState {
        let mut state = GameState::new(Tuning::default(), 42);
        state.start_session(false);
        state.lives = lives;
        state
    }

    #[test]
    fn test_new_game_waits_in_ready() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.stopped);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_start_session_lays_track() {
        let state = playing(3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.stopped);
        assert_eq!(state.world.ground.len(), 30);
        assert_eq!(state.world.water.len(), 27);
        assert_eq!(state.track, TrackState::default());
    }

    #[test]
    fn test_hit_with_lives_awaits_continue() {
        let mut state = playing(2);
        let mut events = Vec::new();
        state.on_hit(&mut events);
        assert_eq!(state.phase, GamePhase::AwaitingContinue);
        assert!(state.stopped);
        assert_eq!(state.lives, 2);
        assert_eq!(events, vec![GameEvent::AwaitingContinue { score: 0 }]);

        state.continue_game();
        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::LivesChanged(1)]);
    }

    #[test]
    fn test_hit_without_lives_is_game_over() {
        let mut state = playing(0);
        let mut events = Vec::new();
        state.on_hit(&mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);

        // A second hit in the same frame changes nothing
        state.on_hit(&mut events);
        assert_eq!(events.len(), 1);

        // No lives left: continue is refused
        state.continue_game();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_lives_score_and_speed() {
        let mut state = playing(0);
        state.progression.score = 900;
        state.progression.scroll_speed = 11;
        let mut events = Vec::new();
        state.on_hit(&mut events);

        state.restart();
        assert_eq!(state.lives, 3);
        assert_eq!(state.progression.score, 0);
        assert_eq!(state.progression.scroll_speed, 6);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_continue_keeps_score_and_speed() {
        let mut state = playing(3);
        state.progression.score = 250;
        state.progression.scroll_speed = 8;
        let mut events = Vec::new();
        state.on_hit(&mut events);
        state.continue_game();
        assert_eq!(state.progression.score, 250);
        assert_eq!(state.progression.scroll_speed, 8);
        assert_eq!(state.player.walk_anim.frame_speed, 3);
        assert_eq!(state.player.body.pos.x, 64.0);
    }

    #[test]
    fn test_continue_ignored_while_playing() {
        let mut state = playing(3);
        state.continue_game();
        assert_eq!(state.lives, 3);
        assert!(state.drain_events().is_empty());
    }
}
