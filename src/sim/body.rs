//! Kinematic body: an axis-aligned rectangle with a per-frame velocity
//!
//! Positions are top-left corners in canvas space (y grows downward).
//! Owners set `vel` each frame, then call [`Body::advance`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and extent of a moving rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Move by one frame of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Swept proximity: minimum distance between the two centers over the coming frame
    ///
    /// Both centers are linearly interpolated along their velocities and sampled at
    /// fractions `0, 1/m, 2/m, ...` below 1, where `m` is the largest velocity
    /// component of either body. Sampling along the path keeps thin tiles from
    /// being skipped at high scroll speed. When neither body moves by a full
    /// pixel the check degrades to the current distance.
    pub fn proximity(&self, other: &Body) -> f32 {
        let max = self
            .vel
            .abs()
            .max_element()
            .max(other.vel.abs().max_element());

        let offset = self.center() - other.center();
        let rel_vel = self.vel - other.vel;

        if max <= 1.0 {
            return offset.length();
        }

        let slice = 1.0 / max;
        let samples = max.ceil() as u32;
        let mut min_dist_sq = f32::INFINITY;
        for i in 0..samples {
            let t = i as f32 * slice;
            if t >= 1.0 {
                break;
            }
            min_dist_sq = min_dist_sq.min((offset + rel_vel * t).length_squared());
        }
        min_dist_sq.sqrt()
    }

    /// Angle (degrees) of the vector from `other`'s center to this body's center
    ///
    /// Canvas y points down, so a body directly above `other` sits at -90°.
    pub fn angle_from(&self, other: &Body) -> f32 {
        let d = self.center() - other.center();
        d.y.atan2(d.x).to_degrees()
    }
}
