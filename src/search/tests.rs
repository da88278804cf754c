//! Tests for the adversary searches on small hand-built boards.
//!
//! Test coverage:
//! - Depth semantics, node and evaluation counts on a two-ply line
//! - Pruned and probabilistic search agree with plain minimax
//! - Positions without moves
//! - Root preferences, custom expanders and cancellation
//! - Tie-accepting preferences only ever compare exact values
//! - Reproducibility of the probabilistic search under a seeded generator

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::*;
use crate::board::{Board, BoardError, Direction, FigureKind, League, Outcome, Position};
use crate::figure::{Figure, MoveTemplate};
use crate::setup::parse_setup;

fn figure(league: League, codes: &[&str]) -> Figure {
    let moves: Vec<MoveTemplate> = codes
        .iter()
        .map(|code| MoveTemplate::parse(code).unwrap())
        .collect();
    Figure::new(league, FigureKind('F'), Direction::North, moves)
}

/// Player 1 has a single move; player 2 answers by moving one or two cells,
/// after which player 1 is stuck.
fn two_ply_line() -> Board {
    let mut board = Board::new(3, 2).unwrap();
    board
        .place(Position::new(0, 0), figure(League::Player(1), &["e"]))
        .unwrap();
    board
        .place(Position::new(2, 0), Figure::obstacle(FigureKind('#')))
        .unwrap();
    board
        .place(Position::new(0, 1), figure(League::Player(2), &["e", "ee"]))
        .unwrap();
    board
}

fn second_player_column(board: &Board) -> f64 {
    match board.figures_of(League::Player(2)).next() {
        Some(figure) if figure.position().x == 1 => 3.0,
        Some(figure) if figure.position().x == 2 => 7.0,
        _ => 0.0,
    }
}

const MELEE: &str = "
    rules opposing-beats
    kind K n s e w xn xs xe xw /ne /nw
    kind N jnj/ne jnj/nw jsj/se
    layout
    .k.n
    ....
    .#..
    K..N
";

/// Rewards advancing player 1 figures and material, with a little noise from
/// the columns so that few positions tie.
fn positional(board: &Board) -> f64 {
    if let Some(outcome) = board.outcome() {
        return match outcome {
            Outcome::Draw => 0.0,
            outcome if outcome.winner() == Some(League::Player(1)) => 100.0,
            _ => -100.0,
        };
    }
    board
        .figures()
        .filter(|figure| figure.can_move())
        .map(|figure| {
            let position = figure.position();
            let score = 10.0 + f64::from(3 - position.y) + 0.25 * f64::from(position.x);
            if figure.league() == League::Player(1) {
                score
            } else {
                -score
            }
        })
        .sum()
}

#[test]
fn test_two_ply_line_takes_minimum_reply() {
    let board = two_ply_line();
    let mut search = AlphaBetaPruning::new(2, |board: &Board| second_player_column(board));

    let choice = search.solve(&board).unwrap().unwrap();
    assert_eq!(choice.source(), Position::new(0, 0));
    assert_eq!(choice.destination(), Position::new(1, 0));
    assert_eq!(choice.utility(), 3.0);

    let stats = search.stats();
    assert_eq!(stats.evaluations(), 2);
    assert_eq!(stats.nodes(), 4);
    assert_eq!(stats.last_utility(), Some(3.0));
    assert!(stats.last_duration().is_some());
}

#[test]
fn test_depth_zero_still_looks_one_ply_ahead() {
    let board = two_ply_line();
    let mut search = AlphaBetaPruning::new(0, |board: &Board| second_player_column(board));

    let choice = search.solve(&board).unwrap().unwrap();
    assert_eq!(choice.utility(), 0.0);
    assert_eq!(search.stats().nodes(), 2);
    assert_eq!(search.stats().evaluations(), 1);
}

#[test]
fn test_search_leaves_board_untouched() {
    let board = parse_setup(MELEE).unwrap();
    let before = board.clone();
    AlphaBetaPruning::new(2, positional).solve(&board).unwrap();
    assert_eq!(board, before);
    assert!(board.events().is_empty());
}

#[test]
fn test_alpha_beta_agrees_with_minimax() {
    let board = parse_setup(MELEE).unwrap();
    for depth in 0..4 {
        let mut pruned = AlphaBetaPruning::new(depth, positional);
        let mut full = Minimax::new(depth, positional);

        let expected = full.solve(&board).unwrap().unwrap();
        let actual = pruned.solve(&board).unwrap().unwrap();
        assert_eq!(actual.utility(), expected.utility(), "depth {}", depth);
        assert!(pruned.stats().nodes() <= full.stats().nodes());
    }
}

#[test]
fn test_alpha_beta_prunes() {
    let board = parse_setup(MELEE).unwrap();
    let mut pruned = AlphaBetaPruning::new(3, positional);
    let mut full = Minimax::new(3, positional);
    pruned.solve(&board).unwrap();
    full.solve(&board).unwrap();

    assert!(pruned.stats().cutoffs() > 0);
    assert!(pruned.stats().nodes() < full.stats().nodes());
}

#[test]
fn test_second_player_searches_for_itself() {
    let mut board = parse_setup(MELEE).unwrap();
    board.set_turn(League::Player(2));
    let opponent = |board: &Board| -positional(board);

    let mut pruned = AlphaBetaPruning::new(2, opponent);
    let mut full = Minimax::new(2, opponent);
    let choice = pruned.solve(&board).unwrap().unwrap();
    assert_eq!(choice.utility(), full.solve(&board).unwrap().unwrap().utility());
    assert_eq!(
        board.figure(choice.source()).unwrap().league(),
        League::Player(2)
    );
}

#[test]
fn test_no_moves_yields_none() {
    let mut board = Board::new(1, 1).unwrap();
    board
        .place(Position::new(0, 0), figure(League::Player(1), &["n"]))
        .unwrap();

    let mut search = AlphaBetaPruning::new(3, positional);
    assert_eq!(search.solve(&board).unwrap().map(|c| c.source()), None);
    assert_eq!(search.stats().nodes(), 1);
    assert_eq!(search.stats().last_utility(), None);

    let mut rng = StdRng::seed_from_u64(1);
    let mut probabilistic = ProbabilisticAlphaBetaPruning::new(3, positional, &mut rng);
    assert!(probabilistic.solve(&board).unwrap().is_none());
}

#[test]
fn test_finished_game_yields_none() {
    let mut board = parse_setup("rules opposing-beats\nkind K xe\nlayout\nKk").unwrap();
    board
        .make_move(Position::new(0, 0), &MoveTemplate::parse("xe").unwrap())
        .unwrap();
    assert!(board.is_over());
    assert!(AlphaBetaPruning::new(2, positional)
        .solve(&board)
        .unwrap()
        .is_none());
}

#[test]
fn test_search_finds_winning_capture() {
    let board = parse_setup("rules opposing-beats\nkind K n s xe e\nlayout\n..\nKk").unwrap();
    let choice = AlphaBetaPruning::new(2, positional)
        .solve(&board)
        .unwrap()
        .unwrap();
    assert_eq!(choice.template().code(), "xe");
    assert_eq!(choice.utility(), 100.0);
    assert!(choice.state().is_over());
}

#[test]
fn test_preference_decides_ties() {
    let board = parse_setup(MELEE).unwrap();
    let flat = |_: &Board| 0.0;
    let expanded = board.expand().unwrap();

    let first = AlphaBetaPruning::new(0, flat).solve(&board).unwrap().unwrap();
    assert_eq!(first.template(), expanded[0].template());
    assert_eq!(first.source(), expanded[0].source());

    let last = AlphaBetaPruning::new(0, flat)
        .with_preference(|candidate: &Choice, best: &Choice| candidate.utility() >= best.utility())
        .solve(&board)
        .unwrap()
        .unwrap();
    let tail = expanded.last().unwrap();
    assert_eq!(last.template(), tail.template());
    assert_eq!(last.source(), tail.source());
}

/// Player 1 can step east, worth 5, or south, worth 1. Player 2 has a reply
/// that changes nothing, so every root child is searched one ply deep.
fn east_or_south() -> Board {
    let mut board = Board::new(4, 3).unwrap();
    board
        .place(Position::new(0, 0), figure(League::Player(1), &["e", "s"]))
        .unwrap();
    board
        .place(Position::new(3, 2), figure(League::Player(2), &["n"]))
        .unwrap();
    board
}

fn first_player_step(board: &Board) -> f64 {
    match board.figures_of(League::Player(1)).next() {
        Some(figure) if figure.position().x == 1 => 5.0,
        Some(figure) if figure.position().y == 1 => 1.0,
        _ => 0.0,
    }
}

#[test]
fn test_tie_accepting_preference_sees_exact_values() {
    let board = east_or_south();
    let expected = Minimax::new(1, first_player_step)
        .solve(&board)
        .unwrap()
        .unwrap();
    assert_eq!(expected.destination(), Position::new(1, 0));

    let choice = AlphaBetaPruning::new(1, first_player_step)
        .with_preference(|candidate: &Choice, best: &Choice| candidate.utility() >= best.utility())
        .solve(&board)
        .unwrap()
        .unwrap();
    assert_eq!(choice.destination(), expected.destination());
    assert_eq!(choice.template().code(), "e");
    assert_eq!(choice.utility(), 5.0);
}

/// Accepts ties but claims bounded values are good enough.
struct LastOfEqual;

impl Preference for LastOfEqual {
    fn prefers(&mut self, candidate: &Choice, best: &Choice) -> bool {
        candidate.utility() >= best.utility()
    }

    fn needs_exact_values(&self) -> bool {
        false
    }
}

#[test]
fn test_bounded_root_child_is_never_offered() {
    let board = east_or_south();
    let mut search = AlphaBetaPruning::new(1, first_player_step).with_preference(LastOfEqual);

    let choice = search.solve(&board).unwrap().unwrap();
    assert_eq!(choice.destination(), Position::new(1, 0));
    assert_eq!(choice.utility(), 5.0);
    assert_eq!(search.stats().last_utility(), Some(5.0));
}

struct FirstOnly {
    calls: usize,
}

impl Expander for FirstOnly {
    fn expand(&mut self, board: &Board) -> Result<Vec<Choice>, BoardError> {
        self.calls += 1;
        let mut successors = board.expand()?;
        successors.truncate(1);
        Ok(successors)
    }
}

#[test]
fn test_custom_expander() {
    let board = parse_setup(MELEE).unwrap();
    let mut search =
        AlphaBetaPruning::new(2, positional).with_expander(FirstOnly { calls: 0 });

    let choice = search.solve(&board).unwrap().unwrap();
    let expected = &board.expand().unwrap()[0];
    assert_eq!(choice.source(), expected.source());
    assert_eq!(choice.template(), expected.template());
    // a single line: root, then one node per ply
    assert_eq!(search.stats().nodes(), 4);
}

#[test]
fn test_cancelled_search_still_answers() {
    let board = parse_setup(MELEE).unwrap();
    let cancel = Arc::new(AtomicBool::new(true));
    let mut search = AlphaBetaPruning::new(4, positional).with_cancellation(Arc::clone(&cancel));

    let choice = search.solve(&board).unwrap();
    assert!(choice.is_some());
    let successors = board.expand().unwrap().len();
    assert_eq!(search.stats().nodes(), successors + 1);
    assert_eq!(search.stats().evaluations(), successors);
}

#[test]
fn test_teleport_surfaces_as_error() {
    let board = parse_setup("kind K t\nlayout\nK.").unwrap();
    let result = AlphaBetaPruning::new(1, positional).solve(&board);
    assert!(matches!(result, Err(SearchError::Board(BoardError::Figure(_)))));
}

#[test]
fn test_probabilistic_default_matches_alpha_beta() {
    let board = parse_setup(MELEE).unwrap();
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut probabilistic = ProbabilisticAlphaBetaPruning::new(2, positional, &mut rng);
        let mut deterministic = AlphaBetaPruning::new(2, positional);

        let chosen = probabilistic.solve(&board).unwrap().unwrap();
        let best = deterministic.solve(&board).unwrap().unwrap();
        assert_eq!(chosen.utility(), best.utility(), "seed {}", seed);
    }
}

#[test]
fn test_probabilistic_is_reproducible() {
    let board = parse_setup(MELEE).unwrap();
    let randomness = ProbabilisticConfig {
        improve_probability: 0.8,
        fluctuate_probability: 0.5,
        fluctuate_threshold: -1.0,
    };
    let play = |seed: u64| {
        let mut search =
            ProbabilisticAlphaBetaPruning::new(2, positional, StdRng::seed_from_u64(seed))
                .with_randomness(randomness)
                .unwrap();
        let choice = search.solve(&board).unwrap().unwrap();
        (choice.source(), choice.destination(), choice.template().code())
    };

    assert_eq!(play(42), play(42));
}

#[test]
fn test_probabilistic_never_improving_keeps_first_shuffled() {
    let board = parse_setup(MELEE).unwrap();
    let randomness = ProbabilisticConfig {
        improve_probability: 0.0,
        fluctuate_probability: 0.0,
        fluctuate_threshold: 0.0,
    };
    let mut search = ProbabilisticAlphaBetaPruning::new(1, positional, StdRng::seed_from_u64(3))
        .with_randomness(randomness)
        .unwrap();

    let choice = search.solve(&board).unwrap().unwrap();

    // the root shuffle is the first use of the generator
    let mut shuffled = board.expand().unwrap();
    shuffled.shuffle(&mut StdRng::seed_from_u64(3));
    assert_eq!(choice.source(), shuffled[0].source());
    assert_eq!(choice.template(), shuffled[0].template());
    assert_eq!(choice.destination(), shuffled[0].destination());
}

#[test]
fn test_probabilistic_rejects_invalid_randomness() {
    let search = ProbabilisticAlphaBetaPruning::new(1, positional, StdRng::seed_from_u64(0));
    let result = search.with_randomness(ProbabilisticConfig {
        improve_probability: 1.5,
        ..ProbabilisticConfig::default()
    });
    assert!(matches!(
        result,
        Err(ConfigError::ProbabilityOutOfRange { .. })
    ));
}

#[test]
fn test_stats_reset_between_searches() {
    let board = two_ply_line();
    let mut search = AlphaBetaPruning::new(2, |board: &Board| second_player_column(board));
    search.solve(&board).unwrap();
    let first = search.stats().clone();
    search.solve(&board).unwrap();
    assert_eq!(search.stats().nodes(), first.nodes());

    search.set_max_depth(0);
    search.solve(&board).unwrap();
    assert_eq!(search.stats().nodes(), 2);
}
