//! Parallax background layers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, SpriteKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub sprite: SpriteKind,
    pub x: f32,
    /// Fraction of the scroll speed this layer moves at
    pub factor: f32,
}

/// Static backdrop plus three scrolling layers, each tiled twice across the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub layers: [ParallaxLayer; 3],
    width: f32,
}

impl Background {
    pub fn new(factors: [f32; 3], canvas_width: f32) -> Self {
        let layer = |sprite, factor| ParallaxLayer { sprite, x: 0.0, factor };
        Self {
            layers: [
                layer(SpriteKind::Sky, factors[0]),
                layer(SpriteKind::Backdrop, factors[1]),
                layer(SpriteKind::BackdropGround, factors[2]),
            ],
            width: canvas_width,
        }
    }

    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.x = 0.0;
        }
    }

    /// Scroll every layer, wrapping once a copy has fully left the screen
    pub fn advance(&mut self, scroll_speed: u32) {
        for layer in &mut self.layers {
            layer.x -= layer.factor * scroll_speed as f32;
            if layer.x + self.width <= 0.0 {
                layer.x += self.width;
            }
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::new(SpriteKind::Background, Vec2::ZERO));
        for layer in &self.layers {
            out.push(DrawCommand::new(layer.sprite, Vec2::new(layer.x, 0.0)));
            out.push(DrawCommand::new(layer.sprite, Vec2::new(layer.x + self.width, 0.0)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_scroll_at_their_factor() {
        let mut bg = Background::new([0.25, 0.5, 0.75], 800.0);
        bg.advance(8);
        let xs: Vec<f32> = bg.layers.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![-2.0, -4.0, -6.0]);
    }

    #[test]
    fn test_layers_wrap() {
        let mut bg = Background::new([0.5, 0.5, 0.5], 100.0);
        for _ in 0..50 {
            bg.advance(4);
            for layer in &bg.layers {
                assert!(layer.x <= 0.0 && layer.x > -100.0);
            }
        }
        bg.reset();
        assert!(bg.layers.iter().all(|l| l.x == 0.0));
    }

    #[test]
    fn test_draw_covers_canvas_twice() {
        let bg = Background::new([0.2, 0.4, 0.6], 800.0);
        let mut out = Vec::new();
        bg.draw(&mut out);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].sprite, SpriteKind::Background);
        assert_eq!(out[2].pos.x, 800.0);
    }
}
