//! Sprite manifest and asset preloading
//!
//! The simulation only ever names sprites by [`SpriteKind`]. This module maps
//! those to image files and builds the handle table a renderer draws from.
//! Loading happens once, up front: the table is immutable afterwards, so
//! nothing in the frame loop ever waits on I/O.

use std::collections::HashMap;

use glam::Vec2;
use serde::Serialize;

use crate::sim::entity::SpriteKind;

/// One manifest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetEntry {
    pub sprite: SpriteKind,
    /// Short identifier, stable across builds
    pub key: &'static str,
    pub path: &'static str,
}

const fn entry(sprite: SpriteKind, key: &'static str, path: &'static str) -> AssetEntry {
    AssetEntry { sprite, key, path }
}

/// Every sprite the game draws, in load order
pub const MANIFEST: [AssetEntry; 17] = [
    entry(SpriteKind::Background, "bg", "imgs/bg.png"),
    entry(SpriteKind::Sky, "sky", "imgs/sky.png"),
    entry(SpriteKind::Backdrop, "backdrop", "imgs/backdrop.png"),
    entry(SpriteKind::BackdropGround, "backdrop2", "imgs/backdrop_ground.png"),
    entry(SpriteKind::Grass, "grass", "imgs/grass.png"),
    entry(SpriteKind::Player, "avatar_normal", "imgs/running.png"),
    entry(SpriteKind::Water, "water", "imgs/water.png"),
    entry(SpriteKind::GrassMid1, "grass1", "imgs/grassMid1.png"),
    entry(SpriteKind::GrassMid2, "grass2", "imgs/grassMid2.png"),
    entry(SpriteKind::Bridge, "bridge", "imgs/bridge.png"),
    entry(SpriteKind::Plant, "plant", "imgs/plant.png"),
    entry(SpriteKind::Bush1, "bush1", "imgs/bush1.png"),
    entry(SpriteKind::Bush2, "bush2", "imgs/bush2.png"),
    entry(SpriteKind::Cliff, "cliff", "imgs/grassCliffRight.png"),
    entry(SpriteKind::Spikes, "spikes", "imgs/spikes.png"),
    entry(SpriteKind::Box, "box", "imgs/boxCoin.png"),
    entry(SpriteKind::Slime, "slime", "imgs/enemy.png"),
];

/// Manifest entry for a sprite
pub fn entry_for(sprite: SpriteKind) -> Option<&'static AssetEntry> {
    MANIFEST.iter().find(|e| e.sprite == sprite)
}

/// Uniform grid of animation frames in one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub frame_width: f32,
    pub frame_height: f32,
    pub frames_per_row: u32,
}

impl SpriteSheet {
    /// Sheet layout for an image of `image_width` pixels
    pub fn new(frame_width: f32, frame_height: f32, image_width: f32) -> Self {
        let frames_per_row = (image_width / frame_width).floor().max(1.0) as u32;
        Self {
            frame_width,
            frame_height,
            frames_per_row,
        }
    }

    /// Source rectangle (top-left, size) of a frame within the sheet
    pub fn frame_rect(&self, frame: u32) -> (Vec2, Vec2) {
        let row = frame / self.frames_per_row;
        let col = frame % self.frames_per_row;
        (
            Vec2::new(col as f32 * self.frame_width, row as f32 * self.frame_height),
            Vec2::new(self.frame_width, self.frame_height),
        )
    }
}

/// Backend that turns an image path into a drawable handle
pub trait AssetLoader {
    type Handle;
    type Error;

    fn load(&mut self, entry: &AssetEntry) -> Result<Self::Handle, Self::Error>;
}

/// Loaded handles, one per manifest entry
#[derive(Debug)]
pub struct AssetTable<H> {
    handles: HashMap<SpriteKind, H>,
}

impl<H> AssetTable<H> {
    pub fn get(&self, sprite: SpriteKind) -> Option<&H> {
        self.handles.get(&sprite)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Load every manifest entry, reporting `(loaded, total)` after each one
///
/// Stops at the first failure; a half-loaded table is never handed out.
pub fn preload<L, F>(loader: &mut L, mut progress: F) -> Result<AssetTable<L::Handle>, L::Error>
where
    L: AssetLoader,
    F: FnMut(usize, usize),
{
    let total = MANIFEST.len();
    let mut handles = HashMap::with_capacity(total);
    for (i, entry) in MANIFEST.iter().enumerate() {
        let handle = loader.load(entry)?;
        handles.insert(entry.sprite, handle);
        progress(i + 1, total);
        log::debug!("Loaded asset {} ({}/{})", entry.key, i + 1, total);
    }
    log::info!("All {} assets loaded", total);
    Ok(AssetTable { handles })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out the path itself as the handle
    struct PathLoader {
        fail_on: Option<&'static str>,
    }

    impl AssetLoader for PathLoader {
        type Handle = &'static str;
        type Error = String;

        fn load(&mut self, entry: &AssetEntry) -> Result<Self::Handle, Self::Error> {
            if self.fail_on == Some(entry.key) {
                return Err(format!("missing {}", entry.path));
            }
            Ok(entry.path)
        }
    }

    #[test]
    fn test_manifest_covers_every_sprite() {
        let mut keys: Vec<&str> = MANIFEST.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 17);
        assert_eq!(entry_for(SpriteKind::Player).map(|e| e.path), Some("imgs/running.png"));
        assert_eq!(entry_for(SpriteKind::Cliff).map(|e| e.key), Some("cliff"));
    }

    #[test]
    fn test_preload_reports_progress() {
        let mut loader = PathLoader { fail_on: None };
        let mut reports = Vec::new();
        let table = preload(&mut loader, |done, total| reports.push((done, total))).unwrap();
        assert_eq!(table.len(), 17);
        assert_eq!(reports.first(), Some(&(1, 17)));
        assert_eq!(reports.last(), Some(&(17, 17)));
        assert_eq!(table.get(SpriteKind::Slime), Some(&"imgs/enemy.png"));
    }

    #[test]
    fn test_preload_stops_on_failure() {
        let mut loader = PathLoader { fail_on: Some("water") };
        let mut calls = 0;
        let result = preload(&mut loader, |_, _| calls += 1);
        assert_eq!(result.unwrap_err(), "missing imgs/water.png");
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_frame_rect() {
        // running.png: 4 frames of 60x96 per row
        let sheet = SpriteSheet::new(60.0, 96.0, 240.0);
        assert_eq!(sheet.frames_per_row, 4);
        assert_eq!(sheet.frame_rect(0).0, Vec2::ZERO);
        assert_eq!(sheet.frame_rect(5).0, Vec2::new(60.0, 96.0));
        assert_eq!(sheet.frame_rect(15).0, Vec2::new(180.0, 288.0));
        assert_eq!(sheet.frame_rect(11).1, Vec2::new(60.0, 96.0));
    }
}
