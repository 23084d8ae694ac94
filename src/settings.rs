//! Game settings
//!
//! Loaded once at startup from a JSON config file. Every field is required
//! unless marked `#[serde(default)]`; anything absent or mistyped aborts the
//! launch with a `ConfigError`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An RGB color, written as `[r, g, b]` in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// How procedurally built bricks get their strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrengthPolicy {
    /// Uniform sample in the configured strength range
    #[default]
    Random,
    /// Difficulty base strength plus a bonus per row from the bottom
    Ramp,
}

impl StrengthPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthPolicy::Random => "random",
            StrengthPolicy::Ramp => "ramp",
        }
    }
}

/// Window and frame pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub background_color: Rgb,
    pub text_color: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Pixels per second before the difficulty multiplier
    pub speed: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSettings {
    pub radius: f32,
    /// Pixels per second before the difficulty multiplier
    pub speed: f32,
    pub color: Rgb,
}

/// Strength tier to color mapping
///
/// Keys are strengths; a strength with no exact entry uses the nearest
/// tier at or below it, and anything outside the table clamps to its ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrickPalette {
    colors: BTreeMap<u32, Rgb>,
}

impl BrickPalette {
    pub fn new(colors: BTreeMap<u32, Rgb>) -> Self {
        Self { colors }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Tier used to display a brick with the given strength
    pub fn tier_for(&self, strength: u32) -> u32 {
        let (Some(&lowest), Some(&highest)) =
            (self.colors.keys().next(), self.colors.keys().next_back())
        else {
            return strength;
        };
        if strength < lowest || strength > highest {
            log::debug!(
                "Strength {} outside palette [{}, {}], clamping",
                strength,
                lowest,
                highest
            );
        }
        let clamped = strength.clamp(lowest, highest);
        self.colors
            .range(..=clamped)
            .next_back()
            .map(|(&tier, _)| tier)
            .unwrap_or(lowest)
    }

    /// Color for a tier (clamped the same way as `tier_for`)
    pub fn color(&self, tier: u32) -> Rgb {
        let tier = self.tier_for(tier);
        self.colors.get(&tier).copied().unwrap_or(Rgb::WHITE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickSettings {
    pub rows: u32,
    pub cols: u32,
    pub height: f32,
    pub padding: f32,
    pub top_offset: f32,
    pub strength_min: u32,
    pub strength_max: u32,
    pub colors: BrickPalette,
    /// Colors cycled by row for grid bricks; empty means color by strength tier
    #[serde(default)]
    pub row_colors: Vec<Rgb>,
    #[serde(default)]
    pub strength_policy: StrengthPolicy,
}

impl BrickSettings {
    /// Width of one grid cell so that `cols` bricks and their padding fill the window
    pub fn brick_width(&self, window_width: u32) -> f32 {
        let available = window_width as f32 - self.padding * 2.0;
        let cols = self.cols.max(1) as f32;
        ((available - (cols - 1.0) * self.padding) / cols).floor()
    }

    pub fn clamp_strength(&self, strength: u32) -> u32 {
        strength.clamp(self.strength_min, self.strength_max)
    }
}

/// Resolved difficulty profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    #[serde(skip)]
    pub name: String,
    #[serde(default = "unit_multiplier")]
    pub ball_speed: f32,
    #[serde(default = "unit_multiplier")]
    pub paddle_speed: f32,
    #[serde(default = "base_brick_strength")]
    pub brick_strength: u32,
}

fn unit_multiplier() -> f32 {
    1.0
}

fn base_brick_strength() -> u32 {
    1
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            name: "medium".to_string(),
            ball_speed: 1.0,
            paddle_speed: 1.0,
            brick_strength: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GameSection {
    title: String,
    version: String,
    initial_lives: u32,
}

/// On-disk layout of the config file
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    game: GameSection,
    window: WindowSettings,
    paddle: PaddleSettings,
    ball: BallSettings,
    bricks: BrickSettings,
    difficulty: BTreeMap<String, Difficulty>,
}

/// Complete, validated game settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    pub version: String,
    pub initial_lives: u32,
    pub window: WindowSettings,
    pub paddle: PaddleSettings,
    pub ball: BallSettings,
    pub bricks: BrickSettings,
    /// The difficulty this session was launched with
    pub difficulty: Difficulty,
    /// All difficulty names the config defines (lowercase)
    pub difficulty_names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let colors = BTreeMap::from([
            (1, Rgb(80, 200, 120)),
            (2, Rgb(240, 200, 60)),
            (3, Rgb(220, 70, 70)),
        ]);
        Self {
            title: "Arcanoid".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            initial_lives: 3,
            window: WindowSettings {
                width: 800,
                height: 600,
                fps: 60,
                background_color: Rgb(10, 10, 30),
                text_color: Rgb(230, 230, 230),
            },
            paddle: PaddleSettings {
                width: 100.0,
                height: 15.0,
                speed: 400.0,
                color: Rgb(200, 200, 255),
            },
            ball: BallSettings {
                radius: 8.0,
                speed: 300.0,
                color: Rgb::WHITE,
            },
            bricks: BrickSettings {
                rows: 6,
                cols: 10,
                height: 20.0,
                padding: 5.0,
                top_offset: 60.0,
                strength_min: 1,
                strength_max: 3,
                colors: BrickPalette::new(colors),
                row_colors: Vec::new(),
                strength_policy: StrengthPolicy::Random,
            },
            difficulty: Difficulty::default(),
            difficulty_names: vec!["medium".to_string()],
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON config file
    pub fn load(path: &Path, difficulty: &str) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let settings = Self::from_json(&json, difficulty)?;
        log::info!(
            "Loaded config {} (difficulty: {}, available: {})",
            path.display(),
            settings.difficulty.name,
            settings.difficulty_names.join(", ")
        );
        Ok(settings)
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str, difficulty: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;

        // Difficulty keys are matched case-insensitively
        let difficulties: BTreeMap<String, Difficulty> = file
            .difficulty
            .into_iter()
            .map(|(name, mut profile)| {
                let name = name.to_lowercase();
                profile.name = name.clone();
                (name, profile)
            })
            .collect();

        let key = difficulty.to_lowercase();
        let Some(selected) = difficulties.get(&key).cloned() else {
            return Err(ConfigError::UnknownDifficulty {
                requested: difficulty.to_string(),
                available: difficulties.keys().cloned().collect(),
            });
        };

        let settings = Self {
            title: file.game.title,
            version: file.game.version,
            initial_lives: file.game.initial_lives,
            window: file.window,
            paddle: file.paddle,
            ball: file.ball,
            bricks: file.bricks,
            difficulty: selected,
            difficulty_names: difficulties.into_keys().collect(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges that the JSON types alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {}", value),
                })
            }
        }

        positive("window.width", self.window.width as f32)?;
        positive("window.height", self.window.height as f32)?;
        positive("window.fps", self.window.fps as f32)?;
        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        positive("ball.radius", self.ball.radius)?;
        positive("ball.speed", self.ball.speed)?;
        positive("bricks.rows", self.bricks.rows as f32)?;
        positive("bricks.cols", self.bricks.cols as f32)?;
        positive("bricks.height", self.bricks.height)?;
        non_negative("bricks.padding", self.bricks.padding)?;
        non_negative("bricks.top_offset", self.bricks.top_offset)?;
        positive("bricks.strength_min", self.bricks.strength_min as f32)?;
        positive("game.initial_lives", self.initial_lives as f32)?;
        positive("difficulty.ball_speed", self.difficulty.ball_speed)?;
        positive("difficulty.paddle_speed", self.difficulty.paddle_speed)?;

        if self.paddle.width > self.window.width as f32 {
            return Err(ConfigError::Invalid {
                field: "paddle.width",
                reason: "paddle is wider than the window".to_string(),
            });
        }
        if self.bricks.strength_min > self.bricks.strength_max {
            return Err(ConfigError::Invalid {
                field: "bricks.strength_min",
                reason: format!(
                    "strength range is empty: {} > {}",
                    self.bricks.strength_min, self.bricks.strength_max
                ),
            });
        }
        if self.bricks.colors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "bricks.colors",
                reason: "at least one strength tier color is required".to_string(),
            });
        }
        positive(
            "bricks.cols",
            self.bricks.brick_width(self.window.width),
        )?;
        Ok(())
    }

    /// Paddle speed after the difficulty multiplier
    pub fn effective_paddle_speed(&self) -> f32 {
        self.paddle.speed * self.difficulty.paddle_speed
    }

    /// Ball speed after the difficulty multiplier
    pub fn effective_ball_speed(&self) -> f32 {
        self.ball.speed * self.difficulty.ball_speed
    }

    pub fn window_width(&self) -> f32 {
        self.window.width as f32
    }

    pub fn window_height(&self) -> f32 {
        self.window.height as f32
    }
}
