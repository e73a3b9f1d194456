use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::geometry::Location;
use crate::input::Direction;

/// Heading cell shared between the tick loop and the input listener.
///
/// Holds the current direction and the body length last published by the
/// snake, so the listener can apply the anti-reversal rule without touching
/// the body itself.
#[derive(Debug, Clone)]
pub struct Steering {
    inner: Arc<SteeringCell>,
}

#[derive(Debug)]
struct SteeringCell {
    direction: AtomicU8,
    body_len: AtomicUsize,
}

impl Steering {
    #[must_use]
    pub fn new(direction: Direction, body_len: usize) -> Self {
        Self {
            inner: Arc::new(SteeringCell {
                direction: AtomicU8::new(direction.to_bits()),
                body_len: AtomicUsize::new(body_len),
            }),
        }
    }

    /// Returns the current heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        Direction::from_bits(self.inner.direction.load(Ordering::Acquire))
    }

    /// Overwrites the heading unconditionally; last write wins.
    pub fn set_direction(&self, direction: Direction) {
        self.inner
            .direction
            .store(direction.to_bits(), Ordering::Release);
    }

    /// Returns whether `direction` may replace the current heading.
    ///
    /// A one-cell snake may turn anywhere. A longer one may not reverse.
    #[must_use]
    pub fn is_valid_direction(&self, direction: Direction) -> bool {
        reversal_allowed(self.body_len(), self.direction(), direction)
    }

    /// Validates and applies `direction` as one atomic step.
    ///
    /// Returns false when the change was rejected as a reversal.
    pub fn try_steer(&self, direction: Direction) -> bool {
        let body_len = self.body_len();
        self.inner
            .direction
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                reversal_allowed(body_len, Direction::from_bits(bits), direction)
                    .then_some(direction.to_bits())
            })
            .is_ok()
    }

    fn body_len(&self) -> usize {
        self.inner.body_len.load(Ordering::Acquire)
    }

    fn publish_len(&self, len: usize) {
        self.inner.body_len.store(len, Ordering::Release);
    }
}

fn reversal_allowed(body_len: usize, current: Direction, next: Direction) -> bool {
    body_len <= 1 || next != current.opposite()
}

/// Snake body and heading. The tail is the front of the body, the head the back.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Location>,
    steering: Steering,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Location, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            steering: Steering::new(direction, 1),
        }
    }

    /// Creates a snake from explicit body segments (front is tail, back is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Location>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        let steering = Steering::new(direction, segments.len());
        Some(Self {
            body: VecDeque::from(segments),
            steering,
        })
    }

    /// Returns the head position one step ahead along the current heading.
    #[must_use]
    pub fn next_head(&self) -> Location {
        self.head().step(self.direction())
    }

    /// Slides the snake so `new_head` becomes the head and the tail drops off.
    pub fn move_to(&mut self, new_head: Location) {
        self.body.push_back(new_head);
        let _ = self.body.pop_front();
    }

    /// Puts `old_tail` back behind the body, undoing this tick's tail removal.
    pub fn grow(&mut self, old_tail: Location) {
        self.body.push_front(old_tail);
        self.steering.publish_len(self.body.len());
    }

    /// Returns true if any segment occupies `location`.
    #[must_use]
    pub fn is_in(&self, location: Location) -> bool {
        self.body.contains(&location)
    }

    #[must_use]
    pub fn head(&self) -> Location {
        self.body[self.body.len() - 1]
    }

    #[must_use]
    pub fn tail(&self) -> Location {
        self.body[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Location> {
        self.body.iter()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.steering.direction()
    }

    pub fn set_direction(&self, direction: Direction) {
        self.steering.set_direction(direction);
    }

    #[must_use]
    pub fn is_valid_direction(&self, direction: Direction) -> bool {
        self.steering.is_valid_direction(direction)
    }

    /// Returns a handle to the shared heading for the input listener.
    #[must_use]
    pub fn steering(&self) -> Steering {
        self.steering.clone()
    }
}
