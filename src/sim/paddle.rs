//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Bounded, Rect};
use crate::consts::PADDLE_FLOOR_MARGIN;
use crate::settings::Settings;

/// Horizontal-only paddle near the bottom of the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per second
    pub speed: f32,
    /// Right edge of travel (window width)
    pub travel: f32,
}

impl Paddle {
    /// Paddle centered horizontally, raised above the floor
    pub fn new(settings: &Settings) -> Self {
        let width = settings.paddle.width;
        let height = settings.paddle.height;
        Self {
            pos: Vec2::new(
                (settings.window_width() - width) / 2.0,
                settings.window_height() - height - PADDLE_FLOOR_MARGIN,
            ),
            width,
            height,
            speed: settings.effective_paddle_speed(),
            travel: settings.window_width(),
        }
    }

    /// Move by `direction * speed * dt` and clamp to the window
    ///
    /// `direction` is -1, 0 or +1.
    pub fn update(&mut self, dt: f32, direction: i8) {
        let direction = direction.signum() as f32;
        self.pos.x += direction * self.speed * dt;
        self.pos.x = self.pos.x.clamp(0.0, (self.travel - self.width).max(0.0));
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

impl Bounded for Paddle {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}
