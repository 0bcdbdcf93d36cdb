/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Recognized input tokens and the heading each one requests.
/// Letters are matched case-insensitively by [`Direction::from_key`].
const KEY_MAP: [(&str, Direction); 8] = [
    ("ArrowLeft", Direction::Left),
    ("ArrowRight", Direction::Right),
    ("ArrowUp", Direction::Up),
    ("ArrowDown", Direction::Down),
    ("a", Direction::Left),
    ("d", Direction::Right),
    ("w", Direction::Up),
    ("s", Direction::Down),
];

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Resolve a raw key identifier to a heading.
    ///
    /// Returns `None` for anything outside the key table.
    pub fn from_key(key: &str) -> Option<Direction> {
        KEY_MAP.iter().find_map(|(name, direction)| {
            let matched = if name.len() == 1 {
                name.eq_ignore_ascii_case(key)
            } else {
                *name == key
            };
            matched.then_some(*direction)
        })
    }
}
