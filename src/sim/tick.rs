//! Per-frame simulation step
//!
//! Order within a playing frame: serve, paddle, ball and walls, paddle
//! bounce, one brick collision, win check, floor check.

use super::brick::HitOutcome;
use super::collision::resolve_ball_rect;
use super::rect::Bounded;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle direction: -1 left, 0 still, +1 right
    pub direction: i8,
    /// Serve the ball if it is stuck
    pub launch: bool,
    /// Leave the menu
    pub start: bool,
}

impl TickInput {
    /// Direction from held keys; both held cancel out
    pub fn direction_from_keys(left: bool, right: bool) -> i8 {
        match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.frames += 1;

    match state.phase {
        GamePhase::Menu => {
            if !input.start {
                state.ball.reset(&state.paddle);
                return;
            }
            log::info!("Session {} started", state.seed);
            state.phase = GamePhase::Playing;
        }
        GamePhase::GameOver => {
            state.ball.reset(&state.paddle);
            return;
        }
        GamePhase::Playing => {}
    }

    if input.launch && state.ball.launch(&mut state.rng) {
        log::debug!("Ball launched with velocity {:?}", state.ball.vel);
        state.events.push(GameEvent::Launch);
    }

    state.paddle.update(dt, input.direction);

    let contact = state.ball.update(dt, &state.paddle, state.arena);
    if contact.any() {
        state.events.push(GameEvent::WallHit);
    }

    // Only deflect a ball that is still coming down
    if state.ball.vel.y > 0.0 && state.ball.bounds().intersects(&state.paddle.bounds()) {
        state.ball.bounce_off_paddle(&state.paddle);
        state.events.push(GameEvent::PaddleHit);
    }

    collide_bricks(state);

    if state.level.is_empty() {
        log::info!("Level cleared with score {}", state.score);
        state.victory = true;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Victory);
        return;
    }

    if state.ball.below(state.floor()) {
        lose_life(state);
    }
}

/// Resolve the first brick the ball overlaps, if any
///
/// At most one brick is handled per frame, even when the ball touches several.
fn collide_bricks(state: &mut GameState) {
    let ball_bounds = state.ball.bounds();
    let Some(index) = state
        .level
        .bricks
        .iter()
        .position(|brick| brick.bounds().intersects(&ball_bounds))
    else {
        return;
    };

    let rect = state.level.bricks[index].rect;
    let result = resolve_ball_rect(&mut state.ball, &rect);
    log::debug!("Brick {} hit, normal {:?}", index, result.normal);

    match state.level.bricks[index].hit(&state.palette) {
        HitOutcome::Damaged { remaining } => {
            state.events.push(GameEvent::BrickDamaged { remaining });
        }
        HitOutcome::Destroyed => {
            let brick = state.level.remove(index);
            state.score += brick.points;
            state.events.push(GameEvent::BrickDestroyed {
                points: brick.points,
            });
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::BallLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        log::info!("Game over with score {}", state.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        return;
    }

    log::info!("Ball lost, {} lives left", state.lives);
    state.ball.reset(&state.paddle);
}
