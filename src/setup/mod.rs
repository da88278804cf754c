//! A plain text format for describing a starting position and the way each
//! kind of figure moves.
//!
//! ```text
//! # comments start with '#'
//! rules opposing-beats
//! turn 1
//! kind P n x/nw x/ne
//! kind N jnj/ne jnj/nw
//! layout
//! .nn.
//! pppp
//! ....
//! PPPP
//! .NN.
//! ```
//!
//! A comment is a `#` standing on its own, followed by a space or the end of
//! the line; a `#` inside a layout row is an obstacle. After `layout` a row
//! holding nothing but `#` is a single obstacle, not a comment.
//!
//! `kind` gives a letter and the move templates of that kind of figure.
//! Every row after `layout` is one board row, north first: upper case letters
//! are player 1 figures facing north, lower case letters player 2 figures
//! facing south, `#` is an immovable obstacle and `.` an empty cell.

use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::board::{Board, BoardError, Direction, FigureKind, League, Position};
use crate::figure::{Figure, MoveTemplate, TemplateError};
use crate::rules::{OpposingBeats, Permissive, Rules};

// Layout rows use '#' for obstacles, so only a free-standing '#' opens a comment.
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|\s)#(\s|$)").expect("comment pattern is valid"));
static KIND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^kind\s+([A-Za-z])\s+(.+)$").expect("kind pattern is valid"));
static RULES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rules\s+(\S+)$").expect("rules pattern is valid"));
static TURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^turn\s+(\S+)$").expect("turn pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("line {line}: unrecognised directive {text:?}")]
    UnknownDirective { line: usize, text: String },
    #[error("line {line}: kind {symbol:?} is defined twice")]
    DuplicateKind { line: usize, symbol: char },
    #[error("line {line}: {source}")]
    Template {
        line: usize,
        #[source]
        source: TemplateError,
    },
    #[error("line {line}: unknown rules {name:?}; options are: permissive, opposing-beats")]
    UnknownRules { line: usize, name: String },
    #[error("line {line}: invalid turn {text:?}; expected 1 or 2")]
    InvalidTurn { line: usize, text: String },
    #[error("setup has no layout rows")]
    MissingLayout,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("layout is larger than {}x{}", u16::MAX, u16::MAX)]
    LayoutTooLarge,
    #[error("layout row {row}: unknown figure {symbol:?}")]
    UnknownFigure { row: usize, symbol: char },
    #[error(transparent)]
    Board(#[from] BoardError),
}

type SetupResult<T> = Result<T, SetupError>;

/// Parses a setup description into a two-player board.
pub fn parse_setup(text: &str) -> SetupResult<Board> {
    let mut kinds: FxHashMap<char, Arc<[MoveTemplate]>> = FxHashMap::default();
    let mut rules: Arc<dyn Rules> = Arc::new(Permissive);
    let mut turn = League::Player(1);
    let mut rows: Vec<&str> = Vec::new();
    let mut in_layout = false;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw.trim(), in_layout).trim();
        if line.is_empty() {
            continue;
        }

        if in_layout {
            rows.push(line);
        } else if line == "layout" {
            in_layout = true;
        } else if let Some(captures) = KIND.captures(line) {
            let symbol = captures[1]
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_default();
            let moves = parse_templates(&captures[2], line_number)?;
            if kinds.insert(symbol, moves.into()).is_some() {
                return Err(SetupError::DuplicateKind {
                    line: line_number,
                    symbol,
                });
            }
        } else if let Some(captures) = RULES.captures(line) {
            rules = parse_rules(&captures[1], line_number)?;
        } else if let Some(captures) = TURN.captures(line) {
            turn = match League::from_str(&captures[1]) {
                Ok(League::Player(n)) if n <= 2 => League::Player(n),
                _ => {
                    return Err(SetupError::InvalidTurn {
                        line: line_number,
                        text: captures[1].to_string(),
                    })
                }
            };
        } else {
            return Err(SetupError::UnknownDirective {
                line: line_number,
                text: line.to_string(),
            });
        }
    }

    let mut board = build_layout(&rows, &kinds)?.with_rules(rules);
    board.set_turn(turn);
    // Placing the figures is setup, not play.
    board.drain_events();
    Ok(board)
}

impl FromStr for Board {
    type Err = SetupError;
    fn from_str(setup: &str) -> Result<Self, Self::Err> {
        parse_setup(setup)
    }
}

/// `line` is already trimmed. A lone `#` is a comment before the layout and a
/// row of one obstacle inside it.
fn strip_comment(line: &str, in_layout: bool) -> &str {
    if in_layout && line == "#" {
        return line;
    }
    COMMENT.find(line).map_or(line, |comment| &line[..comment.start()])
}

fn parse_templates(templates: &str, line: usize) -> SetupResult<Vec<MoveTemplate>> {
    templates
        .split_whitespace()
        .map(|template| {
            MoveTemplate::parse(template).map_err(|source| SetupError::Template { line, source })
        })
        .collect()
}

fn parse_rules(name: &str, line: usize) -> SetupResult<Arc<dyn Rules>> {
    match name {
        "permissive" => Ok(Arc::new(Permissive)),
        "opposing-beats" => Ok(Arc::new(OpposingBeats)),
        _ => Err(SetupError::UnknownRules {
            line,
            name: name.to_string(),
        }),
    }
}

fn build_layout(rows: &[&str], kinds: &FxHashMap<char, Arc<[MoveTemplate]>>) -> SetupResult<Board> {
    let expected = rows
        .first()
        .map(|row| row.chars().count())
        .ok_or(SetupError::MissingLayout)?;
    let width = u16::try_from(expected).map_err(|_| SetupError::LayoutTooLarge)?;
    let height = u16::try_from(rows.len()).map_err(|_| SetupError::LayoutTooLarge)?;
    let mut board = Board::new(width, height)?;

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != expected {
            return Err(SetupError::RaggedLayout {
                row: y + 1,
                found,
                expected,
            });
        }
        for (x, symbol) in row.chars().enumerate() {
            if let Some(figure) = parse_cell(symbol, y + 1, kinds)? {
                board.place(Position::new(x as i32, y as i32), figure)?;
            }
        }
    }
    Ok(board)
}

fn parse_cell(
    symbol: char,
    row: usize,
    kinds: &FxHashMap<char, Arc<[MoveTemplate]>>,
) -> SetupResult<Option<Figure>> {
    let (league, facing) = match symbol {
        '.' => return Ok(None),
        '#' => return Ok(Some(Figure::obstacle(FigureKind('#')))),
        c if c.is_ascii_uppercase() => (League::Player(1), Direction::North),
        c if c.is_ascii_lowercase() => (League::Player(2), Direction::South),
        _ => return Err(SetupError::UnknownFigure { row, symbol }),
    };
    let kind = symbol.to_ascii_uppercase();
    let moves = kinds
        .get(&kind)
        .ok_or(SetupError::UnknownFigure { row, symbol })?;
    Ok(Some(Figure::new(
        league,
        FigureKind(kind),
        facing,
        Arc::clone(moves),
    )))
}
