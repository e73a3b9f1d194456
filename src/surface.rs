use std::io;

use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::geometry::{GridSize, Location};

/// The display operations the game needs from a terminal.
pub trait Surface {
    /// Current size in character cells.
    fn size(&self) -> GridSize;

    /// Writes one glyph. Cells outside the surface are ignored.
    fn set_cell(&mut self, at: Location, glyph: char, style: Style);

    /// Blanks every cell.
    fn clear(&mut self);

    /// Pushes pending cell changes to the screen.
    fn show(&mut self) -> io::Result<()>;

    /// Adopts a new size reported by the terminal.
    fn resize(&mut self, size: GridSize);
}

/// Retained cell canvas drawn through a ratatui terminal.
///
/// Cells persist between frames until overwritten or cleared; every
/// [`Surface::show`] copies the whole canvas into the frame and lets ratatui
/// diff it against the screen.
pub struct Canvas<B: Backend> {
    terminal: Terminal<B>,
    cells: Buffer,
}

impl<B: Backend> Canvas<B> {
    pub fn new(terminal: Terminal<B>) -> io::Result<Self> {
        let size = terminal.size()?;
        let cells = Buffer::empty(Rect::new(0, 0, size.width, size.height));

        Ok(Self { terminal, cells })
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }

    /// Returns the glyph currently held at `at`, if it lies on the canvas.
    #[must_use]
    pub fn symbol_at(&self, at: Location) -> Option<&str> {
        let position = to_cell(at)?;
        self.cells.cell(position).map(|cell| cell.symbol())
    }
}

impl<B: Backend> Surface for Canvas<B> {
    fn size(&self) -> GridSize {
        GridSize {
            width: self.cells.area.width,
            height: self.cells.area.height,
        }
    }

    fn set_cell(&mut self, at: Location, glyph: char, style: Style) {
        let Some(position) = to_cell(at) else {
            return;
        };

        if let Some(cell) = self.cells.cell_mut(position) {
            cell.set_char(glyph).set_style(style);
        }
    }

    fn clear(&mut self) {
        self.cells.reset();
    }

    fn show(&mut self) -> io::Result<()> {
        let cells = &self.cells;
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(cells.area);
            let target = frame.buffer_mut();

            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(source), Some(destination)) =
                        (cells.cell((x, y)), target.cell_mut((x, y)))
                    {
                        *destination = source.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    fn resize(&mut self, size: GridSize) {
        self.cells.resize(Rect::new(0, 0, size.width, size.height));
    }
}

fn to_cell(at: Location) -> Option<(u16, u16)> {
    let x = u16::try_from(at.x).ok()?;
    let y = u16::try_from(at.y).ok()?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::{Color, Style};

    use super::{Canvas, Surface};
    use crate::geometry::{GridSize, Location};

    fn canvas(width: u16, height: u16) -> Canvas<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test terminal should build");
        Canvas::new(terminal).expect("canvas should build")
    }

    #[test]
    fn size_follows_terminal() {
        let canvas = canvas(12, 7);

        assert_eq!(
            canvas.size(),
            GridSize {
                width: 12,
                height: 7
            }
        );
    }

    #[test]
    fn set_cell_and_show_reach_the_backend() {
        let mut canvas = canvas(5, 5);

        canvas.set_cell(Location::new(2, 3), '■', Style::default().fg(Color::Red));
        canvas.show().expect("show should succeed");

        let screen = canvas.backend().buffer();
        let cell = screen.cell((2, 3)).expect("cell should exist");
        assert_eq!(cell.symbol(), "■");
        assert_eq!(cell.fg, Color::Red);
    }

    #[test]
    fn out_of_range_cells_are_ignored() {
        let mut canvas = canvas(4, 4);

        canvas.set_cell(Location::new(-1, 0), 'x', Style::default());
        canvas.set_cell(Location::new(4, 0), 'x', Style::default());
        canvas.set_cell(Location::new(0, 9), 'x', Style::default());

        assert_eq!(canvas.symbol_at(Location::new(-1, 0)), None);
        assert_eq!(canvas.symbol_at(Location::new(0, 0)), Some(" "));
    }

    #[test]
    fn clear_blanks_cells() {
        let mut canvas = canvas(4, 4);
        canvas.set_cell(Location::new(1, 1), '█', Style::default());

        canvas.clear();

        assert_eq!(canvas.symbol_at(Location::new(1, 1)), Some(" "));
    }

    #[test]
    fn resize_changes_reported_size() {
        let mut canvas = canvas(10, 10);
        canvas.backend_mut().resize(6, 4);

        canvas.resize(GridSize {
            width: 6,
            height: 4,
        });
        canvas.show().expect("show after resize should succeed");

        assert_eq!(
            canvas.size(),
            GridSize {
                width: 6,
                height: 4
            }
        );
        assert_eq!(canvas.symbol_at(Location::new(7, 7)), None);
    }
}
