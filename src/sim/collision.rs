//! Collision detection between the player and the world
//!
//! The tricky part: the player and the terrain both move every frame, so a
//! single end-of-frame distance check can miss thin tiles at high scroll
//! speed. All checks here use the swept [`Body::proximity`] instead.

use super::body::Body;
use crate::tuning::Tuning;

/// Result of testing the player against one terrain tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundContact {
    /// Out of reach
    Miss,
    /// Player is on top of the tile; its top edge is `surface_y`
    Landing { surface_y: f32 },
    /// Within reach but beside or below the tile. No response: the player keeps falling.
    Side,
}

impl GroundContact {
    #[inline]
    pub fn is_landing(&self) -> bool {
        matches!(self, GroundContact::Landing { .. })
    }
}

/// Check whether the player lands on a terrain tile
///
/// Reach is half the player height plus half the tile. Above-versus-beside is
/// decided by the angle from the tile's center to the player's center, which
/// must fall strictly inside `tuning.landing_angle`.
pub fn ground_contact(player: &Body, tile: &Body, tuning: &Tuning) -> GroundContact {
    let reach = player.size.y / 2.0 + tuning.tile_width / 2.0;
    if player.proximity(tile) > reach {
        return GroundContact::Miss;
    }

    let angle = player.angle_from(tile);
    let (min, max) = tuning.landing_angle;
    if angle > min && angle < max {
        GroundContact::Landing { surface_y: tile.pos.y }
    } else {
        GroundContact::Side
    }
}

/// Check whether an enemy touches the player
pub fn enemy_hit(player: &Body, enemy: &Body, tuning: &Tuning) -> bool {
    player.proximity(enemy) <= tuning.enemy_hit_distance()
}

/// Check whether the player dropped through the bottom of the screen
pub fn fell_out(player: &Body, tuning: &Tuning) -> bool {
    player.pos.y + player.size.y >= tuning.canvas_height
}
