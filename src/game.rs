use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{self, EventSource, KeyMap, Signal};
use crate::surface::Surface;

/// High-level gameplay state.
///
/// The only transitions are `Initial -> Running` on start and
/// `Running -> Lost` on a collision. `Paused` is never entered.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Initial,
    Running,
    Paused,
    Lost,
}

/// What the snake ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of a single simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continue,
    GameOver(DeathReason),
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Lost { reason: DeathReason, score: u32 },
    Quit { score: u32 },
}

/// One game session: the board plus the state machine driving it.
pub struct Game<S: Surface> {
    pub board: Board<S>,
    pub status: GameStatus,
    pub score: u32,
    pub tick_count: u64,
    config: GameConfig,
}

impl<S: Surface> Game<S> {
    #[must_use]
    pub fn new(board: Board<S>, config: GameConfig) -> Self {
        Self {
            board,
            status: GameStatus::Initial,
            score: 0,
            tick_count: 0,
            config,
        }
    }

    /// Places the initial food, spawns the input listener and runs the tick
    /// loop until the game is lost, the player quits, or a fatal error occurs.
    pub fn start<E>(&mut self, events: E, keymap: KeyMap) -> Result<Outcome>
    where
        E: EventSource + Send + 'static,
    {
        self.place_initial_food()?;
        self.status = GameStatus::Running;

        let bounds = self.board.bounds();
        info!(
            width = bounds.width,
            height = bounds.height,
            foods = self.config.food_count,
            "game started"
        );

        let signals = input::spawn_listener(events, keymap, self.board.snake.steering())?;
        self.run(&signals)
    }

    /// Fills the board up to the configured food count.
    pub fn place_initial_food(&mut self) -> Result<()> {
        for _ in 0..self.config.food_count {
            self.board.create_food()?;
        }
        Ok(())
    }

    /// Fixed-interval loop: apply pending signals, `update`, `render`.
    ///
    /// Ticks missed while a frame overran are dropped, not replayed.
    pub fn run(&mut self, signals: &Receiver<Signal>) -> Result<Outcome> {
        let interval = self.config.tick_interval;
        let mut next_tick = Instant::now() + interval;

        loop {
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
                next_tick += interval;
            } else {
                next_tick = now + interval;
            }

            if let Some(outcome) = self.drain_signals(signals) {
                return Ok(outcome);
            }

            if let TickOutcome::GameOver(reason) = self.update()? {
                return Ok(Outcome::Lost {
                    reason,
                    score: self.score,
                });
            }

            self.render()?;
        }
    }

    fn drain_signals(&mut self, signals: &Receiver<Signal>) -> Option<Outcome> {
        loop {
            match signals.try_recv() {
                Ok(Signal::Resize(size)) => self.board.resize(size),
                Ok(Signal::Quit) => {
                    info!(score = self.score, "player quit");
                    return Some(Outcome::Quit { score: self.score });
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// A collision leaves snake and food untouched and marks the game lost.
    /// Running out of room for replacement food is a fatal error.
    pub fn update(&mut self) -> Result<TickOutcome> {
        let snake = &self.board.snake;
        let tail = snake.tail();
        let next_head = snake.next_head();

        let collision = if snake.is_in(next_head) {
            Some(DeathReason::SelfCollision)
        } else if !self.board.bounds().is_interior(next_head) {
            Some(DeathReason::WallCollision)
        } else {
            None
        };

        if let Some(reason) = collision {
            self.status = GameStatus::Lost;
            info!(?reason, score = self.score, "game over");
            return Ok(TickOutcome::GameOver(reason));
        }

        self.tick_count += 1;
        self.board.snake.move_to(next_head);

        if self.board.eat_food_at(next_head) {
            self.board.snake.grow(tail);
            self.score += 1;
            debug!(score = self.score, len = self.board.snake.len(), "food eaten");

            self.board.clear_cell(next_head);
            self.board.create_food()?;
        } else {
            self.board.clear_cell(tail);
        }

        Ok(TickOutcome::Continue)
    }

    pub fn render(&mut self) -> Result<()> {
        self.board.draw()
    }
}
