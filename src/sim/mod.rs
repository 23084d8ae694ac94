//! Simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Frame time is an explicit input
//! - Seeded RNG only
//! - Stable iteration order (bricks keep their build order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod brick;
pub mod collision;
pub mod level;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallState, WallContact};
pub use brick::{Brick, HitOutcome};
pub use collision::{CollisionResult, rect_collision, reflect_velocity, resolve_ball_rect};
pub use level::{GridCell, Level, grid_cells};
pub use paddle::Paddle;
pub use rect::{Bounded, Rect};
pub use state::{GameEvent, GamePhase, GameState, LevelSource};
pub use tick::{TickInput, tick};
