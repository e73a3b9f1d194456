use rand::Rng;
use rand::rngs::StdRng;
use ratatui::style::Style;
use tracing::debug;

use crate::config::{GLYPH_BORDER, GLYPH_CELL, GLYPH_EMPTY, border_style, food_style, snake_style};
use crate::error::{GameError, Result};
use crate::geometry::{GridSize, Location};
use crate::input::Direction;
use crate::snake::Snake;
use crate::surface::Surface;

/// The play field: snake, food and the surface they are drawn on.
///
/// The outermost ring of the surface is the border. Bounds follow the surface
/// size, so a resize moves the walls but never the snake or the food.
pub struct Board<S: Surface> {
    surface: S,
    pub snake: Snake,
    pub foods: Vec<Location>,
    rng: StdRng,
}

impl<S: Surface> Board<S> {
    /// Creates a board with a one-cell snake in the centre heading left.
    pub fn new(surface: S, rng: StdRng) -> Self {
        let snake = Snake::new(surface.size().center(), Direction::Left);
        Self::with_snake(surface, snake, rng)
    }

    /// Creates a board around an existing snake.
    pub fn with_snake(mut surface: S, snake: Snake, rng: StdRng) -> Self {
        surface.clear();
        let mut board = Self {
            surface,
            snake,
            foods: Vec::new(),
            rng,
        };
        board.draw_border();
        board
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.surface.size()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Places one food on a random free interior cell.
    ///
    /// Gives up after `width * height` rejected samples.
    pub fn create_food(&mut self) -> Result<Location> {
        let bounds = self.bounds();
        if bounds.has_no_interior() {
            return Err(GameError::NoFreeCell);
        }

        let max_x = i32::from(bounds.width) - 1;
        let max_y = i32::from(bounds.height) - 1;

        for _ in 0..bounds.total_cells() {
            let candidate = Location::new(
                self.rng.gen_range(1..max_x),
                self.rng.gen_range(1..max_y),
            );

            if self.snake.is_in(candidate) || self.foods.contains(&candidate) {
                continue;
            }

            debug!(x = candidate.x, y = candidate.y, "food placed");
            self.foods.push(candidate);
            return Ok(candidate);
        }

        Err(GameError::NoFreeCell)
    }

    /// Removes the food at `location`. Returns false when there was none.
    pub fn eat_food_at(&mut self, location: Location) -> bool {
        let Some(index) = self.foods.iter().position(|food| *food == location) else {
            return false;
        };

        self.foods.remove(index);
        true
    }

    /// Blanks a single cell, leaving the rest of the frame untouched.
    pub fn clear_cell(&mut self, location: Location) {
        self.surface.set_cell(location, GLYPH_EMPTY, Style::default());
    }

    /// Redraws border, food and snake, then flushes to the screen.
    pub fn draw(&mut self) -> Result<()> {
        self.draw_border();

        for food in &self.foods {
            self.surface.set_cell(*food, GLYPH_CELL, food_style());
        }

        for segment in self.snake.segments() {
            self.surface.set_cell(*segment, GLYPH_CELL, snake_style());
        }

        self.surface.show()?;
        Ok(())
    }

    /// Adopts a new surface size: clears and redraws the border only.
    pub fn resize(&mut self, size: GridSize) {
        debug!(width = size.width, height = size.height, "surface resized");
        self.surface.resize(size);
        self.surface.clear();
        self.draw_border();
    }

    fn draw_border(&mut self) {
        let bounds = self.bounds();
        let right = i32::from(bounds.width) - 1;
        let bottom = i32::from(bounds.height) - 1;

        for x in 0..i32::from(bounds.width) {
            self.surface
                .set_cell(Location::new(x, 0), GLYPH_BORDER, border_style());
            self.surface
                .set_cell(Location::new(x, bottom), GLYPH_BORDER, border_style());
        }

        for y in 0..i32::from(bounds.height) {
            self.surface
                .set_cell(Location::new(0, y), GLYPH_BORDER, border_style());
            self.surface
                .set_cell(Location::new(right, y), GLYPH_BORDER, border_style());
        }
    }
}
