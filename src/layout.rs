//! Level layout files
//!
//! A layout is a JSON document `{ "bricks": [ { x, y, width, height,
//! strength, color }, ... ] }`. Loading validates every entry before
//! anything is built; a single bad descriptor rejects the whole file.
//! The generator writes the same schema.

use std::fs;
use std::io;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LevelLoadError;
use crate::settings::{Rgb, Settings};
use crate::sim::level::{grid_cells, ramp_strength, row_color};

fn default_color() -> Rgb {
    Rgb::WHITE
}

/// One brick in a layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickDescriptor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub strength: u32,
    #[serde(default = "default_color")]
    pub color: Rgb,
}

impl BrickDescriptor {
    fn validate(&self) -> Result<(), String> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(format!("position ({}, {}) is not finite", self.x, self.y));
        }
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(format!(
                "size {}x{} is not finite",
                self.width, self.height
            ));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(format!(
                "size {}x{} must be positive",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

/// An ordered list of bricks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub bricks: Vec<BrickDescriptor>,
}

impl LevelLayout {
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}

/// Parse and validate a layout document
pub fn parse_layout(json: &str) -> Result<LevelLayout, LevelLoadError> {
    let doc: Value = serde_json::from_str(json)?;
    let Some(entries) = doc.get("bricks").and_then(Value::as_array) else {
        return Err(LevelLoadError::MissingBricks);
    };

    let mut bricks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let desc = BrickDescriptor::deserialize(entry).map_err(|err| {
            LevelLoadError::InvalidBrick {
                index,
                reason: err.to_string(),
            }
        })?;
        desc.validate()
            .map_err(|reason| LevelLoadError::InvalidBrick { index, reason })?;
        bricks.push(desc);
    }

    Ok(LevelLayout { bricks })
}

/// Read a layout file
pub fn load_layout(path: &Path) -> Result<LevelLayout, LevelLoadError> {
    let json = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LevelLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let layout = parse_layout(&json)?;
    log::info!("Loaded level {} ({} bricks)", path.display(), layout.len());
    Ok(layout)
}

/// Write a layout file as pretty-printed JSON
pub fn save_layout(path: &Path, layout: &LevelLayout) -> Result<(), LevelLoadError> {
    let json = serde_json::to_string_pretty(layout)?;
    fs::write(path, json).map_err(|source| LevelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Level written to {} ({} bricks)", path.display(), layout.len());
    Ok(())
}

/// Randomly populate the configured grid
///
/// `density` is clamped to `[0, 1]`; each cell is kept with that
/// probability. Strengths always follow the difficulty ramp so harder
/// profiles write tougher files. Colors come from `row_colors` when set,
/// otherwise from the strength tier. Same seed, same layout.
pub fn generate_layout(settings: &Settings, density: f64, seed: u64) -> LevelLayout {
    let density = density.clamp(0.0, 1.0);
    let mut rng = Pcg32::seed_from_u64(seed);
    let palette = &settings.bricks.colors;

    let mut bricks = Vec::new();
    for cell in grid_cells(settings) {
        if rng.random::<f64>() >= density {
            continue;
        }
        let strength = ramp_strength(settings, cell.row);
        bricks.push(BrickDescriptor {
            x: cell.rect.left(),
            y: cell.rect.top(),
            width: cell.rect.width(),
            height: cell.rect.height(),
            strength,
            color: row_color(settings, cell.row).unwrap_or_else(|| palette.color(strength)),
        });
    }

    log::info!(
        "Generated layout: {} bricks (density {:.2}, seed {})",
        bricks.len(),
        density,
        seed
    );
    LevelLayout { bricks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StrengthPolicy;

    #[test]
    fn test_parse_valid_layout() {
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 50, "height": 15, "strength": 2, "color": [1, 2, 3] },
            { "x": 70, "y": 20, "width": 50, "height": 15, "strength": 1 }
        ] }"#;
        let layout = parse_layout(json).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.bricks[0].color, Rgb(1, 2, 3));
        assert_eq!(layout.bricks[1].color, Rgb::WHITE);
    }

    #[test]
    fn test_missing_bricks_list() {
        let err = parse_layout(r#"{ "blocks": [] }"#).unwrap_err();
        assert!(matches!(err, LevelLoadError::MissingBricks));
        let err = parse_layout(r#"{ "bricks": 5 }"#).unwrap_err();
        assert!(matches!(err, LevelLoadError::MissingBricks));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_layout("{ bricks: ").unwrap_err();
        assert!(matches!(err, LevelLoadError::Malformed(_)));
    }

    #[test]
    fn test_missing_field_rejects_whole_file() {
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 50, "height": 15, "strength": 2 },
            { "x": 70, "width": 50, "height": 15, "strength": 1 }
        ] }"#;
        match parse_layout(json).unwrap_err() {
            LevelLoadError::InvalidBrick { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("y"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_type_rejected() {
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 50, "height": 15, "strength": "tough" }
        ] }"#;
        assert!(matches!(
            parse_layout(json).unwrap_err(),
            LevelLoadError::InvalidBrick { index: 0, .. }
        ));
    }

    #[test]
    fn test_negative_strength_rejected() {
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 50, "height": 15, "strength": -1 }
        ] }"#;
        assert!(matches!(
            parse_layout(json).unwrap_err(),
            LevelLoadError::InvalidBrick { index: 0, .. }
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 0, "height": 15, "strength": 1 }
        ] }"#;
        assert!(matches!(
            parse_layout(json).unwrap_err(),
            LevelLoadError::InvalidBrick { index: 0, .. }
        ));
    }

    #[test]
    fn test_infinite_size_rejected() {
        // Overflows f32 on parse
        let json = r#"{ "bricks": [
            { "x": 10, "y": 20, "width": 1e39, "height": 15, "strength": 1 }
        ] }"#;
        assert!(matches!(
            parse_layout(json).unwrap_err(),
            LevelLoadError::InvalidBrick { index: 0, .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_layout(Path::new("/nonexistent/level.json")).unwrap_err();
        assert!(matches!(err, LevelLoadError::NotFound { .. }));
    }

    #[test]
    fn test_generate_full_density() {
        let settings = Settings::default();
        let layout = generate_layout(&settings, 1.0, 123);
        assert_eq!(layout.len(), 60);
        assert!(layout.bricks.iter().all(|b| (1..=3).contains(&b.strength)));
    }

    #[test]
    fn test_generate_density_is_clamped() {
        let settings = Settings::default();
        assert_eq!(generate_layout(&settings, 7.5, 1).len(), 60);
        assert!(generate_layout(&settings, -2.0, 1).is_empty());
    }

    #[test]
    fn test_generate_partial_density_is_seeded() {
        let settings = Settings::default();
        let a = generate_layout(&settings, 0.5, 77);
        let b = generate_layout(&settings, 0.5, 77);
        assert_eq!(a, b);
        assert!(a.len() < 60);
    }

    #[test]
    fn test_generate_follows_difficulty() {
        let mut easy = Settings::default();
        easy.bricks.strength_policy = StrengthPolicy::Random;
        let mut hard = easy.clone();
        hard.difficulty.brick_strength = 2;
        let strengths = |s: &Settings| {
            generate_layout(s, 1.0, 42)
                .bricks
                .iter()
                .map(|b| b.strength)
                .collect::<Vec<_>>()
        };
        let (easy, hard) = (strengths(&easy), strengths(&hard));
        assert_ne!(easy, hard);
        // Bottom row: base strength, clamped into [1, 3]
        assert_eq!(easy[59], 1);
        assert_eq!(hard[59], 2);
        assert!(hard.iter().zip(&easy).all(|(h, e)| h >= e));
    }

    #[test]
    fn test_generate_huge_base_strength_clamps() {
        let mut settings = Settings::default();
        settings.difficulty.brick_strength = u32::MAX;
        let layout = generate_layout(&settings, 1.0, 8);
        assert!(layout.bricks.iter().all(|b| b.strength == 3));
    }

    #[test]
    fn test_generate_uses_row_colors() {
        let mut settings = Settings::default();
        settings.bricks.row_colors = vec![Rgb(1, 1, 1), Rgb(2, 2, 2)];
        let layout = generate_layout(&settings, 1.0, 4);
        assert_eq!(layout.bricks[0].color, Rgb(1, 1, 1));
        assert_eq!(layout.bricks[10].color, Rgb(2, 2, 2));
        assert_eq!(layout.bricks[20].color, Rgb(1, 1, 1));

        let tiered = generate_layout(&Settings::default(), 1.0, 4);
        let palette = &settings.bricks.colors;
        assert!(tiered.bricks.iter().all(|b| b.color == palette.color(b.strength)));
    }

    #[test]
    fn test_save_then_load() {
        let settings = Settings::default();
        let layout = generate_layout(&settings, 0.85, 5);
        let path = std::env::temp_dir().join(format!("arcanoid-layout-{}.json", std::process::id()));
        save_layout(&path, &layout).unwrap();
        let loaded = load_layout(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, layout);
    }
}
