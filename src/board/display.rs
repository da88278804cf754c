use std::fmt;

use super::{Board, League, Position};

/// Plain text dump of the grid: player 1 upper case, other players lower
/// case, figures of nobody as their own symbol, empty cells as `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..i32::from(self.height()) {
            let row: String = (0..i32::from(self.width()))
                .map(|x| match self.figure(Position::new(x, y)) {
                    None => '.',
                    Some(figure) if figure.is_empty() => '.',
                    Some(figure) => match figure.league() {
                        League::Player(1) => figure.kind().symbol().to_ascii_uppercase(),
                        League::Player(_) => figure.kind().symbol().to_ascii_lowercase(),
                        League::Nobody => figure.kind().symbol(),
                    },
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        match self.outcome() {
            Some(outcome) => write!(f, "{}", outcome),
            None => write!(f, "{} to move", self.turn()),
        }
    }
}
