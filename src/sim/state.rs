//! Game state and core simulation types
//!
//! One `GameState` is one play session. Restarting throws it away and builds
//! a new one; nothing carries over.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::level::Level;
use super::paddle::Paddle;
use crate::layout::LevelLayout;
use crate::settings::{BrickPalette, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen; ball rides the paddle until the player starts
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, won or lost
    GameOver,
}

/// Something the audio/visual layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball served from the paddle
    Launch,
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball bounced off a side or the top wall
    WallHit,
    /// Brick took a hit and survived
    BrickDamaged { remaining: u32 },
    /// Brick destroyed
    BrickDestroyed { points: u64 },
    /// Ball fell past the floor
    BallLost { lives_left: u32 },
    /// Last brick cleared
    Victory,
    /// Out of lives
    GameOver,
}

/// Where a session's bricks come from
#[derive(Debug, Clone, Default)]
pub enum LevelSource {
    /// Fill the configured grid with seeded random strengths
    #[default]
    Procedural,
    /// Use a pre-built layout
    Layout(LevelLayout),
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub level: Level,
    pub palette: BrickPalette,
    /// Window size; the bottom edge is the floor
    pub arena: Vec2,
    pub score: u64,
    pub lives: u32,
    pub victory: bool,
    /// Simulation frame counter
    pub frames: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session at the menu
    pub fn new(settings: &Settings, source: &LevelSource, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(settings);
        let ball = Ball::new(settings, &paddle);
        let level = match source {
            LevelSource::Procedural => Level::procedural(settings, &mut rng),
            LevelSource::Layout(layout) => Level::from_layout(layout, &settings.bricks.colors),
        };

        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            paddle,
            ball,
            level,
            palette: settings.bricks.colors.clone(),
            arena: Vec2::new(settings.window_width(), settings.window_height()),
            score: 0,
            lives: settings.initial_lives,
            victory: false,
            frames: 0,
            events: Vec::new(),
        }
    }

    pub fn floor(&self) -> f32 {
        self.arena.y
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallState;

    #[test]
    fn test_new_session() {
        let settings = Settings::default();
        let state = GameState::new(&settings, &LevelSource::Procedural, 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(!state.victory);
        assert_eq!(state.level.len(), 60);
        assert_eq!(state.ball.state, BallState::Stuck);
        assert_eq!(state.floor(), 600.0);
    }

    #[test]
    fn test_layout_source() {
        let settings = Settings::default();
        let state = GameState::new(&settings, &LevelSource::Layout(LevelLayout::default()), 1);
        assert!(state.level.is_empty());
    }
}
