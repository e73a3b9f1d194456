use std::time::Duration;

use ratatui::style::{Color, Style};

/// Fixed simulation tick interval in milliseconds (~30 Hz).
pub const TICK_INTERVAL_MS: u64 = 33;

/// Number of food items kept on the board.
pub const INITIAL_FOOD_COUNT: usize = 5;

/// Glyph for the border ring.
pub const GLYPH_BORDER: char = '█';

/// Glyph shared by food and snake cells; they differ by colour only.
pub const GLYPH_CELL: char = '■';

/// Glyph written over a cell that was vacated.
pub const GLYPH_EMPTY: char = ' ';

pub const FOOD_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Green;

#[must_use]
pub fn border_style() -> Style {
    Style::default()
}

#[must_use]
pub fn food_style() -> Style {
    Style::default().fg(FOOD_COLOR)
}

#[must_use]
pub fn snake_style() -> Style {
    Style::default().fg(SNAKE_COLOR)
}

/// Tunables for one game session.
///
/// Everything except the seed is fixed; the seed only exists so runs can be
/// replayed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub food_count: usize,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            food_count: INITIAL_FOOD_COUNT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{GameConfig, INITIAL_FOOD_COUNT};

    #[test]
    fn defaults_match_fixed_behavior() {
        let config = GameConfig::default();

        assert_eq!(config.food_count, INITIAL_FOOD_COUNT);
        assert_eq!(config.tick_interval, Duration::from_millis(33));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seed_override_keeps_other_defaults() {
        let config = GameConfig::with_seed(Some(9));

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.food_count, 5);
    }
}
