use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::geometry::GridSize;
use crate::snake::Steering;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub(crate) fn to_bits(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Up,
            _ => Self::Down,
        }
    }
}

/// What a single terminal event means to the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputCommand {
    Steer(Direction),
    Resize(GridSize),
    Quit,
}

/// Signals the listener hands over to the tick loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Signal {
    Resize(GridSize),
    Quit,
}

/// Immutable key binding table handed to the listener.
#[derive(Debug, Clone)]
pub struct KeyMap {
    directions: HashMap<KeyCode, Direction>,
    quit: Vec<(KeyCode, KeyModifiers)>,
}

impl KeyMap {
    #[must_use]
    pub fn new(
        directions: HashMap<KeyCode, Direction>,
        quit: Vec<(KeyCode, KeyModifiers)>,
    ) -> Self {
        Self { directions, quit }
    }

    /// Maps a raw terminal event to a game command, if it has one.
    #[must_use]
    pub fn translate(&self, event: &Event) -> Option<InputCommand> {
        match event {
            Event::Resize(width, height) => Some(InputCommand::Resize(GridSize {
                width: *width,
                height: *height,
            })),
            Event::Key(key) => self.translate_key(key),
            _ => None,
        }
    }

    fn translate_key(&self, key: &KeyEvent) -> Option<InputCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let is_quit = self
            .quit
            .iter()
            .any(|(code, modifiers)| key.code == *code && key.modifiers.contains(*modifiers));
        if is_quit {
            return Some(InputCommand::Quit);
        }

        self.directions
            .get(&key.code)
            .copied()
            .map(InputCommand::Steer)
    }
}

impl Default for KeyMap {
    /// Arrow keys and WASD steer; Esc and Ctrl+C quit.
    fn default() -> Self {
        let directions = HashMap::from([
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('A'), Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
            (KeyCode::Char('D'), Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('W'), Direction::Up),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('S'), Direction::Down),
        ]);
        let quit = vec![
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ];

        Self::new(directions, quit)
    }
}

/// Blocking source of terminal events.
pub trait EventSource {
    /// Waits for the next event.
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads events straight from the crossterm terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Spawns the input listener thread.
///
/// Steering is applied directly through `steering`; resize and quit are
/// forwarded on the returned channel. The thread runs until quit, until the
/// event source fails, or until the receiver is dropped.
pub fn spawn_listener<E>(
    source: E,
    keymap: KeyMap,
    steering: Steering,
) -> io::Result<Receiver<Signal>>
where
    E: EventSource + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    thread::Builder::new()
        .name("input-listener".to_owned())
        .spawn(move || listen(source, &keymap, &steering, &sender))?;

    Ok(receiver)
}

fn listen<E: EventSource>(
    mut source: E,
    keymap: &KeyMap,
    steering: &Steering,
    sender: &Sender<Signal>,
) {
    loop {
        let event = match source.next_event() {
            Ok(event) => event,
            Err(error) => {
                warn!(%error, "input listener stopped");
                return;
            }
        };

        match keymap.translate(&event) {
            Some(InputCommand::Steer(direction)) => {
                if steering.try_steer(direction) {
                    debug!(?direction, "heading changed");
                } else {
                    debug!(?direction, "reversal rejected");
                }
            }
            Some(InputCommand::Resize(size)) => {
                if sender.send(Signal::Resize(size)).is_err() {
                    return;
                }
            }
            Some(InputCommand::Quit) => {
                let _ = sender.send(Signal::Quit);
                return;
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{spawn_listener, Direction, EventSource, InputCommand, KeyMap, Signal};
    use crate::geometry::GridSize;
    use crate::snake::Steering;

    struct Scripted(VecDeque<Event>);

    impl EventSource for Scripted {
        fn next_event(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn direction_bits_are_stable() {
        for direction in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ] {
            assert_eq!(Direction::from_bits(direction.to_bits()), direction);
        }
    }

    #[test]
    fn arrows_and_wasd_steer() {
        let keymap = KeyMap::default();

        assert_eq!(
            keymap.translate(&key(KeyCode::Left)),
            Some(InputCommand::Steer(Direction::Left))
        );
        assert_eq!(
            keymap.translate(&key(KeyCode::Down)),
            Some(InputCommand::Steer(Direction::Down))
        );
        assert_eq!(
            keymap.translate(&key(KeyCode::Char('w'))),
            Some(InputCommand::Steer(Direction::Up))
        );
        assert_eq!(
            keymap.translate(&Event::Key(KeyEvent::new(
                KeyCode::Char('D'),
                KeyModifiers::SHIFT
            ))),
            Some(InputCommand::Steer(Direction::Right))
        );
        assert_eq!(keymap.translate(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let keymap = KeyMap::default();

        assert_eq!(keymap.translate(&key(KeyCode::Esc)), Some(InputCommand::Quit));
        assert_eq!(
            keymap.translate(&Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(InputCommand::Quit)
        );
        assert_eq!(keymap.translate(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let keymap = KeyMap::default();
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));

        assert_eq!(keymap.translate(&release), None);
    }

    #[test]
    fn resize_event_carries_new_size() {
        let keymap = KeyMap::default();

        assert_eq!(
            keymap.translate(&Event::Resize(80, 24)),
            Some(InputCommand::Resize(GridSize {
                width: 80,
                height: 24
            }))
        );
    }

    #[test]
    fn listener_steers_and_forwards_signals() {
        let steering = Steering::new(Direction::Left, 1);
        let events = Scripted(VecDeque::from([
            key(KeyCode::Up),
            Event::Resize(30, 12),
            key(KeyCode::Esc),
            key(KeyCode::Down),
        ]));

        let receiver = spawn_listener(events, KeyMap::default(), steering.clone())
            .expect("listener thread should spawn");

        let timeout = Duration::from_secs(2);
        assert_eq!(
            receiver.recv_timeout(timeout),
            Ok(Signal::Resize(GridSize {
                width: 30,
                height: 12
            }))
        );
        assert_eq!(receiver.recv_timeout(timeout), Ok(Signal::Quit));

        // Quit stops the listener, so the trailing Down is never applied.
        assert!(receiver.recv_timeout(timeout).is_err());
        assert_eq!(steering.direction(), Direction::Up);
    }
}
