use std::collections::VecDeque;

use super::direction::Direction;
use super::point::Point;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Point>,
    /// Current direction of movement
    heading: Direction,
    /// Set once a heading change was accepted this tick
    direction_locked: bool,
    /// Cell the tail left on the last advance
    vacated: Option<Point>,
}

impl Snake {
    /// Create a new snake with the head at `head` and the remaining
    /// `length - 1` segments laid out behind it
    pub fn new(head: Point, heading: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        let (dx, dy) = heading.delta();
        let mut prev = head;
        for _ in 1..length {
            prev = prev.moved_by(-dx, -dy);
            body.push_back(prev);
        }

        Self {
            body,
            heading,
            direction_locked: false,
            vacated: None,
        }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    /// Cell released by the tail during the last `advance`
    pub fn vacated(&self) -> Option<Point> {
        self.vacated
    }

    /// Segments from head to tail
    pub fn body(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// Check if the head shares a cell with any other segment
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Request a new heading.
    ///
    /// Ignored when a change was already accepted this tick, when the
    /// request reverses the current heading, or when it is not a direction
    /// at all. Returns whether the heading changed.
    pub fn change_direction(&mut self, requested: Option<Direction>) -> bool {
        let Some(direction) = requested else {
            return false;
        };
        if self.direction_locked || self.heading.is_opposite(direction) {
            return false;
        }

        self.heading = direction;
        self.direction_locked = true;
        true
    }

    /// Move one cell along the heading. The tail slot is dropped and a new
    /// head pushed in front, so every other segment keeps its cell and the
    /// old head becomes the neck. O(1) per tick.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.heading);
        self.vacated = self.body.pop_back();
        self.body.push_front(new_head);
        self.direction_locked = false;
    }

    /// Add a segment on the head cell; the next `advance` turns it into
    /// the new tail.
    pub fn grow(&mut self) {
        let head = self.head();
        self.body.push_back(head);
    }
}
