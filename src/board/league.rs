use std::fmt;
use std::str::FromStr;

/// The side a figure belongs to. Players are numbered from 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum League {
    Nobody,
    Player(u8),
}

impl League {
    pub fn is_nobody(&self) -> bool {
        matches!(self, League::Nobody)
    }

    /// The player after this one in a game of `players` players.
    /// `Nobody` never takes a turn, so it hands over to the first player.
    pub fn next(&self, players: u8) -> League {
        match self {
            League::Player(n) if players > 0 => League::Player(n % players + 1),
            _ => League::Player(1),
        }
    }
}

impl Default for League {
    fn default() -> Self {
        League::Nobody
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            League::Nobody => write!(f, "nobody"),
            League::Player(n) => write!(f, "player {}", n),
        }
    }
}

// used for parsing cli args and setup files
type ParseError = &'static str;
impl FromStr for League {
    type Err = ParseError;
    fn from_str(league: &str) -> Result<Self, Self::Err> {
        match league {
            "nobody" | "0" => Ok(League::Nobody),
            n => match n.parse::<u8>() {
                Ok(n) if n > 0 => Ok(League::Player(n)),
                _ => Err("invalid league; options are: nobody or a player number from 1"),
            },
        }
    }
}

/// The type of a figure, identified by its symbol. `FigureKind::EMPTY` marks a
/// placeholder that occupies nothing and can never move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct FigureKind(pub char);

impl FigureKind {
    pub const EMPTY: FigureKind = FigureKind('.');

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn symbol(&self) -> char {
        self.0
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
