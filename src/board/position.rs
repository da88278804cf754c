use std::fmt;
use std::str::FromStr;

/// A cell coordinate. Row 0 is the northern edge, column 0 the western edge.
///
/// Coordinates are signed so that a cursor walking a move template may step
/// off the board before the range check rejects it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Compass direction, used both for single steps and for a figure's facing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Turns a direction written for a north-facing figure into the absolute
    /// direction for a figure facing `facing`.
    pub fn rotate(self, facing: Direction) -> Direction {
        Self::ALL[(self as usize + facing as usize) % 4]
    }

    pub fn opposite(self) -> Direction {
        self.rotate(Direction::South)
    }

    pub fn from_code(code: char) -> Option<Direction> {
        match code {
            'n' => Some(Direction::North),
            'e' => Some(Direction::East),
            's' => Some(Direction::South),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

type ParseError = &'static str;
impl FromStr for Direction {
    type Err = ParseError;
    fn from_str(direction: &str) -> Result<Self, Self::Err> {
        match direction {
            "north" | "n" => Ok(Direction::North),
            "east" | "e" => Ok(Direction::East),
            "south" | "s" => Ok(Direction::South),
            "west" | "w" => Ok(Direction::West),
            _ => Err("invalid direction; options are: north, east, south, west"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_offsets() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.step(Direction::North), Position::new(2, 1));
        assert_eq!(origin.step(Direction::East), Position::new(3, 2));
        assert_eq!(origin.step(Direction::South), Position::new(2, 3));
        assert_eq!(origin.step(Direction::West), Position::new(1, 2));
    }

    #[test]
    fn test_rotate_is_identity_when_facing_north() {
        for direction in Direction::ALL.iter() {
            assert_eq!(direction.rotate(Direction::North), *direction);
        }
    }

    #[test]
    fn test_rotate_by_facing() {
        assert_eq!(Direction::North.rotate(Direction::South), Direction::South);
        assert_eq!(Direction::East.rotate(Direction::South), Direction::West);
        assert_eq!(Direction::North.rotate(Direction::East), Direction::East);
        assert_eq!(Direction::West.rotate(Direction::West), Direction::South);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::from_str("south").unwrap(), Direction::South);
        assert_eq!(Direction::from_str("w").unwrap(), Direction::West);
        assert!(Direction::from_str("up").is_err());
    }
}
