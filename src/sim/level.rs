//! Level construction
//!
//! A level is the ordered set of live bricks. It is built either as a full
//! procedural grid or from a pre-validated layout, and only ever shrinks.

use rand::Rng;

use super::brick::Brick;
use super::rect::Rect;
use crate::layout::LevelLayout;
use crate::settings::{BrickPalette, Rgb, Settings, StrengthPolicy};

/// A grid cell position and its rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub rect: Rect,
}

/// Every cell of the configured brick grid, row by row from the top
pub fn grid_cells(settings: &Settings) -> impl Iterator<Item = GridCell> + '_ {
    let bricks = &settings.bricks;
    let width = bricks.brick_width(settings.window.width);
    (0..bricks.rows).flat_map(move |row| {
        (0..bricks.cols).map(move |col| {
            let x = bricks.padding + col as f32 * (width + bricks.padding);
            let y = bricks.top_offset + row as f32 * (bricks.height + bricks.padding);
            GridCell {
                row,
                col,
                rect: Rect::new(x, y, width, bricks.height),
            }
        })
    })
}

/// Strength for a brick in `row`, per the configured policy
///
/// Always inside `[strength_min, strength_max]`.
pub fn cell_strength<R: Rng>(settings: &Settings, row: u32, rng: &mut R) -> u32 {
    let bricks = &settings.bricks;
    match bricks.strength_policy {
        StrengthPolicy::Random => rng.random_range(bricks.strength_min..=bricks.strength_max),
        StrengthPolicy::Ramp => ramp_strength(settings, row),
    }
}

/// Difficulty base strength plus one per row above the bottom row
///
/// Top rows are the toughest. Clamped into `[strength_min, strength_max]`.
pub fn ramp_strength(settings: &Settings, row: u32) -> u32 {
    let bricks = &settings.bricks;
    let bonus = bricks.rows.saturating_sub(row + 1);
    bricks.clamp_strength(settings.difficulty.brick_strength.saturating_add(bonus))
}

/// Fixed color for bricks in `row` when the config cycles row colors
pub fn row_color(settings: &Settings, row: u32) -> Option<Rgb> {
    let colors = &settings.bricks.row_colors;
    if colors.is_empty() {
        return None;
    }
    Some(colors[row as usize % colors.len()])
}

/// The live bricks of one session
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Fill every cell of the configured grid
    pub fn procedural<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let palette = &settings.bricks.colors;
        let bricks: Vec<Brick> = grid_cells(settings)
            .map(|cell| {
                let strength = cell_strength(settings, cell.row, rng);
                match row_color(settings, cell.row) {
                    Some(color) => Brick::with_color(cell.rect, strength, color, palette),
                    None => Brick::new(cell.rect, strength, palette),
                }
            })
            .collect();
        log::info!(
            "Built {}x{} grid ({} bricks, {} strength)",
            settings.bricks.rows,
            settings.bricks.cols,
            bricks.len(),
            settings.bricks.strength_policy.as_str()
        );
        Self { bricks }
    }

    /// Bricks exactly as a layout describes them
    pub fn from_layout(layout: &LevelLayout, palette: &BrickPalette) -> Self {
        let bricks: Vec<Brick> = layout
            .bricks
            .iter()
            .map(|desc| {
                let rect = Rect::new(desc.x, desc.y, desc.width, desc.height);
                Brick::with_color(rect, desc.strength, desc.color, palette)
            })
            .collect();
        log::info!("Built level from layout ({} bricks)", bricks.len());
        Self { bricks }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Remove a destroyed brick, keeping the others in order
    pub fn remove(&mut self, index: usize) -> Brick {
        self.bricks.remove(index)
    }
}
