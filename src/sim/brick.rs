//! Destructible bricks

use serde::{Deserialize, Serialize};

use super::rect::{Bounded, Rect};
use crate::consts::POINTS_PER_STRENGTH;
use crate::settings::{BrickPalette, Rgb};

/// Result of striking a brick once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still standing with the given strength left
    Damaged { remaining: u32 },
    /// Out of strength; remove it from the level
    Destroyed,
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Remaining hit points
    pub strength: u32,
    /// Score for destroying it
    pub points: u64,
    /// Display tier derived from strength
    pub tier: u32,
    /// Layout-supplied color that overrides the tier color
    pub color: Option<Rgb>,
}

impl Brick {
    /// A brick whose color follows its strength tier
    pub fn new(rect: Rect, strength: u32, palette: &BrickPalette) -> Self {
        let strength = strength.max(1);
        Self {
            rect,
            strength,
            points: POINTS_PER_STRENGTH * strength as u64,
            tier: palette.tier_for(strength),
            color: None,
        }
    }

    /// A brick with a fixed color
    pub fn with_color(rect: Rect, strength: u32, color: Rgb, palette: &BrickPalette) -> Self {
        Self {
            color: Some(color),
            ..Self::new(rect, strength, palette)
        }
    }

    /// Take one hit
    pub fn hit(&mut self, palette: &BrickPalette) -> HitOutcome {
        self.strength = self.strength.saturating_sub(1);
        if self.strength == 0 {
            return HitOutcome::Destroyed;
        }
        self.tier = palette.tier_for(self.strength);
        HitOutcome::Damaged {
            remaining: self.strength,
        }
    }

    /// Color to draw with
    pub fn display_color(&self, palette: &BrickPalette) -> Rgb {
        self.color.unwrap_or_else(|| palette.color(self.tier))
    }
}

impl Bounded for Brick {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn palette() -> BrickPalette {
        Settings::default().bricks.colors
    }

    #[test]
    fn test_points_follow_initial_strength() {
        let brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), 3, &palette());
        assert_eq!(brick.points, 150);
        assert_eq!(brick.tier, 3);
    }

    #[test]
    fn test_hit_downgrades_tier() {
        let palette = palette();
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), 3, &palette);
        assert_eq!(brick.hit(&palette), HitOutcome::Damaged { remaining: 2 });
        assert_eq!(brick.tier, 2);
        assert_eq!(brick.display_color(&palette), palette.color(2));
    }

    #[test]
    fn test_fixed_color_survives_hits() {
        let palette = palette();
        let red = Rgb(255, 0, 0);
        let mut brick = Brick::with_color(Rect::new(0.0, 0.0, 10.0, 10.0), 2, red, &palette);
        brick.hit(&palette);
        assert_eq!(brick.display_color(&palette), red);
    }

    #[test]
    fn test_zero_strength_is_lifted() {
        let brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0, &palette());
        assert_eq!(brick.strength, 1);
    }

    #[test]
    fn test_strength_beyond_palette_clamps_tier() {
        let brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), 7, &palette());
        assert_eq!(brick.tier, 3);
    }

    proptest! {
        #[test]
        fn prop_destroyed_after_exactly_n_hits(n in 1u32..20) {
            let palette = palette();
            let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), n, &palette);
            for i in 1..n {
                prop_assert_eq!(brick.hit(&palette), HitOutcome::Damaged { remaining: n - i });
            }
            prop_assert_eq!(brick.hit(&palette), HitOutcome::Destroyed);
            prop_assert_eq!(brick.strength, 0);
        }
    }
}
