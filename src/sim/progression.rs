//! Score, difficulty ramp and one-shot milestones

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// One-shot achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    /// Distance milestone by index into `Tuning::distance_milestones`
    Distance(u8),
    Jumps,
}

impl Milestone {
    /// Stable identifier for UI collaborators
    pub fn id(&self) -> &'static str {
        match self {
            Milestone::Distance(0) => "distance-1",
            Milestone::Distance(1) => "distance-2",
            Milestone::Distance(_) => "distance-3",
            Milestone::Jumps => "jumps",
        }
    }
}

/// Latched milestone flags; once set they never clear within a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneLatch {
    distance: [bool; 3],
    jumps: bool,
}

impl MilestoneLatch {
    pub fn is_reached(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::Distance(i) => self.distance.get(i as usize).copied().unwrap_or(false),
            Milestone::Jumps => self.jumps,
        }
    }
}

/// Tick-driven progression counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    /// Generator steps taken (distance run)
    pub score: u64,
    /// Frames since the last speed increase
    pub ticker: u32,
    pub scroll_speed: u32,
    pub jump_count: u32,
    pub milestones: MilestoneLatch,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            ticker: 0,
            scroll_speed: tuning.initial_scroll_speed,
            jump_count: 0,
            milestones: MilestoneLatch::default(),
        }
    }

    /// Reset for a new session. A continued session keeps score and speed.
    pub fn reset(&mut self, tuning: &Tuning, continuing: bool) {
        self.ticker = 0;
        self.jump_count = 0;
        if !continuing {
            self.score = 0;
            self.scroll_speed = tuning.initial_scroll_speed;
        }
    }

    /// Frames between generator steps at the current speed
    #[inline]
    pub fn spawn_cadence(&self, tuning: &Tuning) -> u32 {
        tuning.spawn_cadence(self.scroll_speed)
    }

    /// Whether the generator fires on this frame
    #[inline]
    pub fn spawn_due(&self, tuning: &Tuning) -> bool {
        self.ticker % self.spawn_cadence(tuning) == 0
    }

    /// Count one generator step and report milestones crossed by it
    pub fn on_generator_step(&mut self, tuning: &Tuning) -> Vec<Milestone> {
        self.score += 1;

        let mut reached = Vec::new();
        for (i, &threshold) in tuning.distance_milestones.iter().enumerate() {
            if self.score >= threshold && !self.milestones.distance[i] {
                self.milestones.distance[i] = true;
                reached.push(Milestone::Distance(i as u8));
            }
        }
        if self.jump_count >= tuning.jump_milestone && !self.milestones.jumps {
            self.milestones.jumps = true;
            reached.push(Milestone::Jumps);
        }
        reached
    }

    pub fn on_jump(&mut self) {
        self.jump_count += 1;
    }

    /// Raise the scroll speed once enough ticks passed, but only while airborne
    ///
    /// Changing pace mid-stride looks like a stutter, so a grounded player
    /// defers the speed-up. Returns the new speed when it fired.
    pub fn try_speed_up(&mut self, tuning: &Tuning, airborne: bool) -> Option<u32> {
        let threshold = self
            .spawn_cadence(tuning)
            .saturating_mul(self.scroll_speed)
            .saturating_mul(tuning.speed_ramp_factor);
        if self.ticker > threshold && airborne {
            self.scroll_speed = (self.scroll_speed + 1).min(tuning.max_scroll_speed);
            self.ticker = 0;
            return Some(self.scroll_speed);
        }
        None
    }

    /// Walk animation ticks per frame for the current speed
    pub fn walk_frame_speed(&self, tuning: &Tuning) -> u32 {
        self.spawn_cadence(tuning).saturating_sub(1).max(1)
    }
}
