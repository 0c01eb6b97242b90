use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside a `grid_size` square.
    #[must_use]
    pub fn is_within_bounds(self, grid_size: u16) -> bool {
        let size = i32::from(grid_size);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns the neighbouring cell `steps` cells away in `direction`,
    /// without any wrapping.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }

    /// Returns this position wrapped into a `grid_size` square on both axes.
    #[must_use]
    pub fn wrapped(self, grid_size: u16) -> Self {
        let size = i32::from(grid_size);
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// Snake body, head first.
///
/// Values are never edited in place by the engine; each move builds a new
/// body through [`Snake::advanced`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Creates a straight snake of `len` cells whose head is at `head` and
    /// whose body trails away opposite to `heading`.
    #[must_use]
    pub fn straight(head: Position, heading: Direction, len: usize) -> Self {
        let trail = heading.opposite();
        let body = (0..len.max(1))
            .map(|step| head.offset(trail, step as i32))
            .collect();

        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if `position` hits a segment that is still present after
    /// the next move. The tail is excluded unless the snake is growing, since
    /// it vacates its cell on a non-growing move.
    #[must_use]
    pub fn blocks(&self, position: Position, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|segment| *segment == position)
    }

    /// Returns a new snake with `head` prepended, dropping the tail unless
    /// `grow` is set.
    #[must_use]
    pub fn advanced(&self, head: Position, grow: bool) -> Self {
        let mut body = self.body.clone();
        body.push_front(head);
        if !grow {
            let _ = body.pop_back();
        }
        Self { body }
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
