//! Arcanoid - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Per-frame simulation (paddle, ball, bricks, collisions, game state)
//! - `settings`: Validated game configuration loaded from JSON
//! - `layout`: Level layout files (load, generate, save)
//! - `engine`: Session ownership, frame pacing, input/presentation seams

pub mod engine;
pub mod error;
pub mod layout;
pub mod settings;
pub mod sim;

pub use engine::{Engine, FrameInput, InputSource, Presenter};
pub use error::{ConfigError, LevelLoadError};
pub use settings::{Difficulty, Rgb, Settings};

/// Gameplay constants that are tuning choices rather than configuration
pub mod consts {
    /// Gap between a stuck ball's bottom edge and the paddle top
    pub const STUCK_GAP: f32 = 4.0;
    /// Gap left between the ball and a surface it was pushed out of
    pub const SEPARATION_GAP: f32 = 1.0;
    /// Distance between the paddle bottom and the window floor
    pub const PADDLE_FLOOR_MARGIN: f32 = 30.0;

    /// Maximum paddle deflection, measured from vertical (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 70.0;
    /// Launch angle range, measured from horizontal (degrees)
    pub const LAUNCH_ANGLE_MIN_DEG: f32 = 30.0;
    pub const LAUNCH_ANGLE_MAX_DEG: f32 = 150.0;

    /// Score awarded per point of a brick's initial strength
    pub const POINTS_PER_STRENGTH: u64 = 50;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
