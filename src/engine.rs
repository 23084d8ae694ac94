//! Session ownership and the frame loop
//!
//! The engine owns the current `GameState` and drives it once per frame:
//! poll input, update, then hand the frame and its events to a presenter.
//! Drawing, audio and the window live behind `Presenter` and `InputSource`.

use std::thread;
use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MAX_FRAME_DT;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, LevelSource, TickInput, tick};

/// Raw controls sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Start from the menu / launch the ball
    pub serve: bool,
    /// New session; only honored after game over
    pub restart: bool,
    pub quit: bool,
}

impl FrameInput {
    fn to_tick_input(self) -> TickInput {
        TickInput {
            direction: TickInput::direction_from_keys(self.left, self.right),
            launch: self.serve,
            start: self.serve,
        }
    }
}

/// Source of player controls
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> FrameInput;
}

/// Text overlay and HUD values for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub difficulty: String,
    /// Centered banner: title and hint line
    pub banner: Option<(String, String)>,
}

impl Hud {
    pub fn new(state: &GameState, settings: &Settings) -> Self {
        let banner = match state.phase {
            GamePhase::Menu => Some((
                settings.title.clone(),
                "Press SPACE to serve the ball".to_string(),
            )),
            GamePhase::Playing => None,
            GamePhase::GameOver => {
                let title = if state.victory { "You win!" } else { "Game over" };
                Some((
                    title.to_string(),
                    "Press R to restart or ESC to exit".to_string(),
                ))
            }
        };
        Self {
            score: state.score,
            lives: state.lives,
            difficulty: settings.difficulty.name.clone(),
            banner,
        }
    }
}

/// Receiver of frames and sound cues
pub trait Presenter {
    /// Draw the current frame; called every frame in every phase
    fn present(&mut self, state: &GameState, settings: &Settings, hud: &Hud);

    /// React to a gameplay event (sound, flash, ...)
    fn play(&mut self, _event: GameEvent) {}
}

/// How the loop measures frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep to the target rate and measure real elapsed time
    RealTime,
    /// No sleeping; every frame advances exactly 1 / fps
    Fixed,
}

/// Frame timer capped to a target rate
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    pacing: Pacing,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, pacing: Pacing) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            pacing,
            last: Instant::now(),
        }
    }

    /// Wait out the rest of the frame and return its length in seconds
    pub fn tick(&mut self) -> f32 {
        if self.pacing == Pacing::Fixed {
            return self.frame.as_secs_f32().min(MAX_FRAME_DT);
        }
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT)
    }
}

/// Totals reported when the loop ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u64,
    pub lives: u32,
    pub victory: bool,
    pub sessions: u32,
}

/// Owner of one game session at a time
pub struct Engine {
    settings: Settings,
    source: LevelSource,
    /// Produces each session's seed
    seeds: Pcg32,
    state: GameState,
    sessions: u32,
}

impl Engine {
    pub fn new(settings: Settings, source: LevelSource, seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&settings, &source, seeds.next_u64());
        log::info!(
            "{} {} ready (difficulty: {}, seed: {})",
            settings.title,
            settings.version,
            settings.difficulty.name,
            seed
        );
        Self {
            settings,
            source,
            seeds,
            state,
            sessions: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of sessions started so far, including the current one
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Replace the session with a brand new one at the menu
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.settings, &self.source, self.seeds.next_u64());
        self.sessions += 1;
        log::info!("Restarted (session {})", self.sessions);
    }

    /// Run one frame; returns false once the player quits
    pub fn step<P: Presenter>(&mut self, input: &FrameInput, dt: f32, presenter: &mut P) -> bool {
        if input.quit {
            log::info!("Quit requested");
            self.present(presenter);
            return false;
        }

        if input.restart && self.state.phase == GamePhase::GameOver {
            self.restart();
        } else {
            tick(&mut self.state, &input.to_tick_input(), dt);
        }

        for event in self.state.drain_events() {
            presenter.play(event);
        }
        self.present(presenter);
        true
    }

    fn present<P: Presenter>(&self, presenter: &mut P) {
        let hud = Hud::new(&self.state, &self.settings);
        presenter.present(&self.state, &self.settings, &hud);
    }

    /// Loop until quit or `max_frames` frames have run
    pub fn run<I, P>(
        &mut self,
        input: &mut I,
        presenter: &mut P,
        pacing: Pacing,
        max_frames: Option<u64>,
    ) -> RunSummary
    where
        I: InputSource,
        P: Presenter,
    {
        let mut clock = FrameClock::new(self.settings.window.fps, pacing);
        let mut frames = 0u64;

        loop {
            if max_frames.is_some_and(|max| frames >= max) {
                log::info!("Frame limit reached");
                break;
            }
            let dt = clock.tick();
            let controls = input.poll(&self.state);
            frames += 1;
            if !self.step(&controls, dt, presenter) {
                break;
            }
        }

        RunSummary {
            frames,
            score: self.state.score,
            lives: self.state.lives,
            victory: self.state.victory,
            sessions: self.sessions,
        }
    }
}

/// Computer player for headless runs
///
/// Serves immediately, chases the ball with a slowly drifting aim offset so
/// rallies do not settle into a loop, and quits (or restarts) at game over.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub restart_on_game_over: bool,
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> FrameInput {
        if state.phase == GamePhase::GameOver {
            return FrameInput {
                restart: self.restart_on_game_over,
                quit: !self.restart_on_game_over,
                ..Default::default()
            };
        }

        let time = state.frames as f32 * 0.01;
        let aim = (time.sin() * 0.3 + (time * 0.7).sin() * 0.15) * state.paddle.width / 2.0;
        let target = state.ball.pos.x + aim;
        let center = state.paddle.center_x();
        let deadzone = state.paddle.width * 0.1;

        FrameInput {
            left: target < center - deadzone,
            right: target > center + deadzone,
            serve: !state.ball.is_launched(),
            ..Default::default()
        }
    }
}

/// Presenter that narrates the game through the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_hud: Option<Hud>,
}

impl Presenter for LogPresenter {
    fn present(&mut self, _state: &GameState, _settings: &Settings, hud: &Hud) {
        if self.last_hud.as_ref() == Some(hud) {
            return;
        }
        match &hud.banner {
            Some((title, hint)) => log::info!(
                "[{}] {} | Score: {}  Lives: {}  Difficulty: {}",
                title,
                hint,
                hud.score,
                hud.lives,
                hud.difficulty
            ),
            None => log::debug!(
                "Score: {}  Lives: {}  Difficulty: {}",
                hud.score,
                hud.lives,
                hud.difficulty
            ),
        }
        self.last_hud = Some(hud.clone());
    }

    fn play(&mut self, event: GameEvent) {
        match event {
            GameEvent::Victory | GameEvent::GameOver => log::info!("Event: {:?}", event),
            _ => log::debug!("Event: {:?}", event),
        }
    }
}
