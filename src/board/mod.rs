pub mod error;
pub mod event;
pub mod league;
pub mod position;

mod display;


use std::sync::Arc;

use log::{debug, trace};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::figure::{Figure, MoveTemplate};
use crate::rules::{Disposition, Permissive, Rules, TurnEnd};
use crate::search::Choice;

pub use error::BoardError;
pub use event::{BoardEvent, Outcome, StateChange};
pub use league::{FigureKind, League};
pub use position::{Direction, Position};

/// A fixed-size grid of figures plus whose turn it is.
///
/// Cloning a board deep-copies its figures (their move templates are shared)
/// and yields a silent board: clones do not record events, so hypothetical
/// exploration never reaches whoever listens to the original.
#[derive(Debug)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Option<Figure>>,
    turn: League,
    players: u8,
    outcome: Option<Outcome>,
    rules: Arc<dyn Rules>,
    events: Vec<BoardEvent>,
    listening: bool,
}

impl Board {
    /// An empty two-player board with [`Permissive`] rules, player 1 to move.
    pub fn new(width: u16, height: u16) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            turn: League::Player(1),
            players: 2,
            outcome: None,
            rules: Arc::new(Permissive),
            events: Vec::new(),
            listening: true,
        })
    }

    pub fn with_rules(mut self, rules: Arc<dyn Rules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_players(mut self, players: u8) -> Self {
        self.players = players.max(1);
        self
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn players(&self) -> u8 {
        self.players
    }

    pub fn turn(&self) -> League {
        self.turn
    }

    pub fn set_turn(&mut self, league: League) {
        self.turn = league;
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn rules(&self) -> &dyn Rules {
        self.rules.as_ref()
    }

    pub fn in_range(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let (width, height) = (i32::from(self.width), i32::from(self.height));
        if position.x < 0 || position.y < 0 || position.x >= width || position.y >= height {
            return None;
        }
        Some((position.y * width + position.x) as usize)
    }

    fn checked_index(&self, position: Position) -> Result<usize, BoardError> {
        self.index(position)
            .ok_or(BoardError::OutOfRange { position })
    }

    /// The figure placed on `position`, if any. Out-of-range positions hold
    /// nothing.
    pub fn figure(&self, position: Position) -> Option<&Figure> {
        self.index(position)
            .and_then(|index| self.cells[index].as_ref())
    }

    /// All placed figures in row-major order.
    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.cells.iter().flatten()
    }

    pub fn figures_of(&self, league: League) -> impl Iterator<Item = &Figure> {
        self.figures().filter(move |figure| figure.league() == league)
    }

    /// Puts `figure` on `position`, returning whatever stood there before.
    pub fn place(
        &mut self,
        position: Position,
        mut figure: Figure,
    ) -> Result<Option<Figure>, BoardError> {
        let index = self.checked_index(position)?;
        figure.set_position(position);
        let event = BoardEvent::FigurePlaced {
            position,
            league: figure.league(),
            kind: figure.kind(),
        };
        let previous = self.cells[index].replace(figure);
        self.emit(event);
        Ok(previous)
    }

    pub fn remove(&mut self, position: Position) -> Result<Option<Figure>, BoardError> {
        let index = self.checked_index(position)?;
        let removed = self.cells[index].take();
        if let Some(figure) = &removed {
            let event = BoardEvent::FigureRemoved {
                position,
                league: figure.league(),
                kind: figure.kind(),
            };
            self.emit(event);
        }
        Ok(removed)
    }

    /// Exchanges the contents of two cells and updates the figures' stored
    /// positions. Symmetric, and a no-op when `a == b`.
    ///
    /// Fails without touching the board if either figure's stored position
    /// disagrees with its cell.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let first = self.checked_index(a)?;
        let second = self.checked_index(b)?;
        if first == second {
            return Ok(());
        }

        for &(cell, index) in [(a, first), (b, second)].iter() {
            if let Some(figure) = &self.cells[index] {
                if figure.position() != cell {
                    return Err(BoardError::MisplacedFigure {
                        cell,
                        claimed: figure.position(),
                    });
                }
            }
        }

        self.cells.swap(first, second);
        if let Some(figure) = self.cells[first].as_mut() {
            figure.set_position(a);
        }
        if let Some(figure) = self.cells[second].as_mut() {
            figure.set_position(b);
        }
        Ok(())
    }

    /// Commits `template` for the figure on `source`.
    ///
    /// The figure's own checks run first (see [`Figure::move_figure`]). On
    /// success the rules decide what happens to a beaten occupant, the two
    /// cells are swapped, and the rules decide how the turn ends. Returns the
    /// destination, or `None` when the path is blocked or the rules veto it.
    pub fn make_move(
        &mut self,
        source: Position,
        template: &MoveTemplate,
    ) -> Result<Option<Position>, BoardError> {
        if let Some(outcome) = self.outcome {
            return Err(BoardError::GameOver { outcome });
        }
        self.checked_index(source)?;
        let rules = Arc::clone(&self.rules);

        let figure = self
            .figure(source)
            .ok_or(BoardError::NoFigure { position: source })?;
        let destination = match figure.move_figure(self, template)? {
            Some(destination) => destination,
            None => return Ok(None),
        };

        let disposition = match self.figure(destination) {
            Some(occupant) if destination != source && !occupant.is_empty() => {
                Some(rules.beaten(self, figure, occupant))
            }
            _ => None,
        };
        if disposition == Some(Disposition::Discard) {
            self.remove(destination)?;
        }

        self.swap(source, destination)?;
        self.emit(BoardEvent::MovePerformed {
            source,
            destination,
            template: template.clone(),
        });

        let turn_end = match self.figure(destination) {
            Some(mover) => rules.moved(self, mover),
            None => TurnEnd::NextTurn,
        };
        match turn_end {
            TurnEnd::Continue => {}
            TurnEnd::NextTurn => {
                self.turn = self.turn.next(self.players);
                let next = self.turn;
                self.emit(BoardEvent::StateChanged(StateChange::EndOfTurn { next }));
            }
            TurnEnd::GameOver(outcome) => {
                self.outcome = Some(outcome);
                self.emit(BoardEvent::StateChanged(StateChange::EndOfGame(outcome)));
            }
        }

        Ok(Some(destination))
    }

    /// Every successor state reachable by one move of the league to move.
    ///
    /// Each choice carries its own private board, advanced by
    /// [`make_move`](Self::make_move) on a clone. Moves the rules veto are
    /// left out; a finished game has no successors.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn expand(&self) -> Result<Vec<Choice>, BoardError> {
        let mut choices = Vec::new();
        if self.is_over() {
            return Ok(choices);
        }

        let turn = self.turn;
        for figure in self.figures_of(turn).filter(|figure| figure.can_move()) {
            let source = figure.position();
            for possible in figure.possible_moves(self)? {
                let mut state = self.clone();
                match state.make_move(source, &possible.template)? {
                    Some(destination) => {
                        debug_assert_eq!(destination, possible.destination);
                        choices.push(Choice::new(state, source, destination, possible.template));
                    }
                    None => trace!(
                        "{} from {} dropped by the rules",
                        possible.template,
                        source
                    ),
                }
            }
        }

        debug!("expanded {} choices for {}", choices.len(), turn);
        Ok(choices)
    }

    /// Starts recording events. New boards listen from the start; clones
    /// don't until told to.
    pub fn listen(&mut self) {
        self.listening = true;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    fn emit(&mut self, event: BoardEvent) {
        if self.listening {
            self.events.push(event);
        }
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            turn: self.turn,
            players: self.players,
            outcome: self.outcome,
            rules: Arc::clone(&self.rules),
            events: Vec::new(),
            listening: false,
        }
    }
}

/// Boards compare by placement and game state; rules and events are ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.turn == other.turn
            && self.players == other.players
            && self.outcome == other.outcome
            && self.cells == other.cells
    }
}
