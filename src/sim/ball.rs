//! The ball: rides the paddle until served, then flies freely

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::rect::{Bounded, Rect};
use crate::consts::*;
use crate::settings::Settings;

/// Ball state - riding the paddle or in free flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Sitting on the paddle with zero velocity, waiting for a serve
    Stuck,
    /// Free ballistic motion
    Launched,
}

/// Which walls a ball touched during an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed magnitude kept through every bounce
    pub speed: f32,
    pub state: BallState,
}

impl Ball {
    /// New ball stuck to the given paddle
    pub fn new(settings: &Settings, paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: settings.ball.radius,
            speed: settings.effective_ball_speed(),
            state: BallState::Stuck,
        };
        ball.reset(paddle);
        ball
    }

    pub fn is_launched(&self) -> bool {
        self.state == BallState::Launched
    }

    /// Back onto the paddle, motionless
    pub fn reset(&mut self, paddle: &Paddle) {
        self.state = BallState::Stuck;
        self.vel = Vec2::ZERO;
        self.stick_to(paddle);
    }

    /// Center above the paddle with the bottom edge `STUCK_GAP` above its top
    pub fn stick_to(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(
            paddle.center_x(),
            paddle.top() - STUCK_GAP - self.radius,
        );
    }

    /// Serve at a random upward angle between 30° and 150° from horizontal
    ///
    /// Does nothing once the ball is already in flight.
    pub fn launch<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_launched() {
            return false;
        }
        let angle = rng
            .random_range(LAUNCH_ANGLE_MIN_DEG..=LAUNCH_ANGLE_MAX_DEG)
            .to_radians();
        self.vel = Vec2::new(angle.cos(), -angle.sin()) * self.speed;
        self.state = BallState::Launched;
        true
    }

    /// Advance one frame inside a window of `arena` size
    ///
    /// The floor is left open; losing the ball is the caller's call.
    pub fn update(&mut self, dt: f32, paddle: &Paddle, arena: Vec2) -> WallContact {
        let mut contact = WallContact::default();
        if !self.is_launched() {
            self.stick_to(paddle);
            return contact;
        }

        self.pos += self.vel * dt;

        if self.pos.x - self.radius <= 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
            contact.side = true;
        } else if self.pos.x + self.radius >= arena.x {
            self.pos.x = arena.x - self.radius;
            self.vel.x = -self.vel.x;
            contact.side = true;
        }

        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
            contact.top = true;
        }

        contact
    }

    /// Deflect upward at an angle set by where the ball struck the paddle
    ///
    /// Center hits go straight up; edge hits leave at `MAX_BOUNCE_ANGLE_DEG`
    /// from vertical. Speed is preserved.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        let half_width = paddle.width / 2.0;
        let offset = ((self.pos.x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);
        let angle = offset * MAX_BOUNCE_ANGLE_DEG.to_radians();

        self.vel = Vec2::new(angle.sin(), -angle.cos()) * self.speed;
        self.pos.y = paddle.top() - SEPARATION_GAP - self.radius;
    }

    /// Has the ball's top edge dropped past the floor?
    pub fn below(&self, floor: f32) -> bool {
        self.pos.y - self.radius > floor
    }
}

impl Bounded for Ball {
    fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    fn setup() -> (Paddle, Ball) {
        let settings = Settings::default();
        let paddle = Paddle::new(&settings);
        let ball = Ball::new(&settings, &paddle);
        (paddle, ball)
    }

    #[test]
    fn test_reset_sits_on_paddle() {
        let (paddle, ball) = setup();
        assert_eq!(ball.state, BallState::Stuck);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos.x, paddle.center_x());
        assert!((ball.bounds().bottom() - (paddle.top() - STUCK_GAP)).abs() < 1e-4);
    }

    #[test]
    fn test_stuck_ball_tracks_paddle() {
        let (mut paddle, mut ball) = setup();
        paddle.update(0.1, 1);
        ball.update(0.1, &paddle, ARENA);
        assert_eq!(ball.pos.x, paddle.center_x());
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_launch_upward_at_speed() {
        let (_, mut ball) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(ball.launch(&mut rng));
        assert!(ball.is_launched());
        assert!(ball.vel.y < 0.0);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);

        // A second serve is ignored
        let vel = ball.vel;
        assert!(!ball.launch(&mut rng));
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_launch_angle_range() {
        let (paddle, mut ball) = setup();
        let mut rng = Pcg32::seed_from_u64(42);
        let min_rise = LAUNCH_ANGLE_MIN_DEG.to_radians().sin() * ball.speed;
        for _ in 0..200 {
            ball.reset(&paddle);
            ball.launch(&mut rng);
            assert!(-ball.vel.y >= min_rise - 1e-3);
        }
    }

    #[test]
    fn test_left_wall_bounce() {
        let (paddle, mut ball) = setup();
        ball.state = BallState::Launched;
        ball.pos = Vec2::new(ball.radius - 2.0, 300.0);
        ball.vel = Vec2::new(300.0, -400.0);
        let contact = ball.update(0.0, &paddle, ARENA);
        assert!(contact.side);
        assert_eq!(ball.vel, Vec2::new(-300.0, -400.0));
        assert_eq!(ball.bounds().left(), 0.0);
    }

    #[test]
    fn test_right_and_top_wall_bounce() {
        let (paddle, mut ball) = setup();
        ball.state = BallState::Launched;
        ball.pos = Vec2::new(795.0, 5.0);
        ball.vel = Vec2::new(300.0, -400.0);
        let contact = ball.update(0.01, &paddle, ARENA);
        assert!(contact.side && contact.top);
        assert_eq!(ball.vel, Vec2::new(-300.0, 400.0));
        assert_eq!(ball.bounds().right(), 800.0);
        assert_eq!(ball.bounds().top(), 0.0);
    }

    #[test]
    fn test_floor_is_open() {
        let (paddle, mut ball) = setup();
        ball.state = BallState::Launched;
        ball.pos = Vec2::new(400.0, 590.0);
        ball.vel = Vec2::new(0.0, 300.0);
        let contact = ball.update(0.1, &paddle, ARENA);
        assert!(!contact.any());
        assert!(ball.below(600.0));
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_center_paddle_bounce_goes_straight_up() {
        let (paddle, mut ball) = setup();
        ball.state = BallState::Launched;
        ball.pos = Vec2::new(paddle.center_x(), paddle.top());
        ball.vel = Vec2::new(120.0, 280.0);
        ball.bounce_off_paddle(&paddle);
        assert!(ball.vel.x.abs() < 1e-4);
        assert!((ball.vel.y + ball.speed).abs() < 1e-3);
        assert!((ball.bounds().bottom() - (paddle.top() - SEPARATION_GAP)).abs() < 1e-4);
    }

    #[test]
    fn test_edge_paddle_bounce_caps_angle() {
        let (paddle, mut ball) = setup();
        ball.state = BallState::Launched;
        ball.pos = Vec2::new(paddle.pos.x + paddle.width + 50.0, paddle.top());
        ball.vel = Vec2::new(0.0, 300.0);
        ball.bounce_off_paddle(&paddle);
        let angle = ball.vel.x.atan2(-ball.vel.y).to_degrees();
        assert!((angle - MAX_BOUNCE_ANGLE_DEG).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_keeps_speed_and_goes_up(
            offset in -200.0f32..200.0,
            vx in -500.0f32..500.0,
            vy in 1.0f32..500.0,
        ) {
            let (paddle, mut ball) = setup();
            ball.state = BallState::Launched;
            ball.pos = Vec2::new(paddle.center_x() + offset, paddle.top());
            ball.vel = Vec2::new(vx, vy);
            ball.bounce_off_paddle(&paddle);
            prop_assert!(ball.vel.y < 0.0);
            prop_assert!((ball.vel.length() - ball.speed).abs() < 1e-2);
        }

        #[test]
        fn prop_wall_bounces_keep_speed(
            angle in 0.0f32..std::f32::consts::TAU,
            x in -20.0f32..820.0,
            y in -20.0f32..580.0,
        ) {
            let (paddle, mut ball) = setup();
            ball.state = BallState::Launched;
            ball.pos = Vec2::new(x, y);
            ball.vel = Vec2::new(angle.cos(), angle.sin()) * ball.speed;
            for _ in 0..10 {
                ball.update(1.0 / 60.0, &paddle, ARENA);
            }
            prop_assert!((ball.vel.length() - ball.speed).abs() < 1e-2);
        }
    }
}
