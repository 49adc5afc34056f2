//! Property tests for the rules engine, the random opponent and the game
//! state machine.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tictactoe::board::{Board, Cell, Mark};
use tictactoe::game::{Game, TickOutcome};
use tictactoe::movegen::{play_random, random_move};
use tictactoe::rules::{evaluate_winner, winning_line, LINES};

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::Occupied(Mark::X)),
        Just(Cell::Occupied(Mark::O)),
    ]
}

fn board_strategy() -> impl Strategy<Value = Board> {
    proptest::array::uniform9(cell_strategy()).prop_map(Board::from_cells)
}

fn mark_strategy() -> impl Strategy<Value = Mark> {
    prop_oneof![Just(Mark::X), Just(Mark::O)]
}

proptest! {
    #[test]
    fn completed_line_is_reported(
        board in board_strategy(),
        line_idx in 0..LINES.len(),
        mark in mark_strategy(),
    ) {
        let mut board = board;
        for &i in &LINES[line_idx] {
            board = board.with_mark(i, mark).unwrap();
        }
        let (found_line, found_mark) = winning_line(board.cells()).unwrap();
        // The reported line is complete and no earlier line is.
        let pos = LINES.iter().position(|l| *l == found_line).unwrap();
        prop_assert!(pos <= line_idx);
        for &i in &found_line {
            prop_assert_eq!(board.get(i), Some(Cell::Occupied(found_mark)));
        }
        if pos == line_idx {
            prop_assert_eq!(found_mark, mark);
        }
    }

    #[test]
    fn winner_implies_a_complete_line(board in board_strategy()) {
        let has_line = LINES.iter().any(|&[a, b, c]| {
            let ca = board.cells()[a];
            !ca.is_empty() && ca == board.cells()[b] && ca == board.cells()[c]
        });
        prop_assert_eq!(evaluate_winner(board.cells()).is_some(), has_line);
    }

    #[test]
    fn random_move_picks_only_empty_cells(board in board_strategy(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        match random_move(&board, &mut rng) {
            Some(i) => prop_assert_eq!(board.get(i), Some(Cell::Empty)),
            None => prop_assert!(board.is_full()),
        }
    }

    #[test]
    fn play_random_changes_at_most_one_cell(
        board in board_strategy(),
        mark in mark_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (next, index) = play_random(&board, mark, &mut rng);
        let changed: Vec<usize> = (0..9).filter(|&i| board.get(i) != next.get(i)).collect();
        match index {
            Some(i) => {
                prop_assert_eq!(changed, vec![i]);
                prop_assert_eq!(next.get(i), Some(Cell::Occupied(mark)));
            }
            None => {
                prop_assert!(board.is_full());
                prop_assert!(changed.is_empty());
            }
        }
    }

    #[test]
    fn history_pointer_stays_in_bounds(
        actions in proptest::collection::vec((0usize..4, 0usize..12), 0..60),
        seed in any::<u64>(),
    ) {
        let mut game = Game::with_turn_seconds(2);
        let mut rng = SmallRng::seed_from_u64(seed);
        for (kind, arg) in actions {
            match kind {
                0 => { let _ = game.apply_move(arg); }
                1 => { let _ = game.jump_to(arg); }
                2 => { game.tick(&mut rng); }
                _ => { game.toggle_mode(); }
            }
            prop_assert!(game.current_move() < game.history().len());
            prop_assert_eq!(game.history()[0], Board::empty());
            prop_assert!(game.time_left() >= 1 && game.time_left() <= 2);
        }
    }

    #[test]
    fn move_after_jump_truncates_history(
        moves in proptest::collection::vec(0usize..9, 1..10),
        target_seed in any::<usize>(),
        next in 0usize..9,
    ) {
        let mut game = Game::new();
        for &i in &moves {
            game.apply_move(i).unwrap();
        }
        let target = target_seed % game.history().len();
        game.jump_to(target).unwrap();
        prop_assert_eq!(game.history().len(), moves.len() + 1);

        game.apply_move(next).unwrap();
        prop_assert_eq!(game.history().len(), target + 2);
        prop_assert_eq!(game.current_move(), target + 1);
    }

    #[test]
    fn jump_restores_turn_parity(
        moves in proptest::collection::vec(0usize..9, 0..6),
        timeouts in 0usize..4,
        target_seed in any::<usize>(),
        seed in any::<u64>(),
    ) {
        let mut game = Game::with_turn_seconds(1);
        let mut rng = SmallRng::seed_from_u64(seed);
        for &i in &moves {
            game.apply_move(i).unwrap();
        }
        for _ in 0..timeouts {
            game.tick(&mut rng);
        }
        let target = target_seed % game.history().len();
        game.jump_to(target).unwrap();
        prop_assert_eq!(game.forfeits(), 0);
        prop_assert_eq!(game.active_player(), Mark::for_ply(target));
    }

    #[test]
    fn scores_count_winning_moves(
        cells in proptest::collection::vec(0usize..9, 0..40),
    ) {
        let mut game = Game::new();
        let mut expected = [0u32; 2];
        for i in cells {
            let outcome = game.apply_move(i).unwrap();
            // Every move that leaves a line on the board scores for its mover,
            // including moves made after the game was already won.
            if evaluate_winner(game.board().cells()).is_some() {
                expected[if outcome.mark == Mark::X { 0 } else { 1 }] += 1;
                prop_assert!(outcome.scored);
            } else {
                prop_assert!(!outcome.scored);
            }
        }
        prop_assert_eq!(game.scores().x, expected[0]);
        prop_assert_eq!(game.scores().o, expected[1]);
    }

    #[test]
    fn computer_timeout_fills_exactly_one_empty_cell(
        opening in proptest::collection::vec(0usize..9, 0..4),
        seed in any::<u64>(),
    ) {
        let mut game = Game::with_turn_seconds(1);
        game.toggle_mode();
        for i in opening {
            game.apply_move(i).unwrap();
        }
        if game.active_player() == Mark::X {
            game.apply_move(8).unwrap();
        }
        let before = *game.board();
        let move_before = game.current_move();
        let mut rng = SmallRng::seed_from_u64(seed);

        match game.tick(&mut rng) {
            TickOutcome::ComputerMoved(m) => {
                let i = m.index.unwrap();
                prop_assert_eq!(before.get(i), Some(Cell::Empty));
                prop_assert_eq!(game.board().get(i), Some(Cell::Occupied(Mark::O)));
                prop_assert_eq!(before.empty_cells().len() - 1, game.board().empty_cells().len());
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
        prop_assert_eq!(game.current_move(), move_before + 1);
        prop_assert_eq!(game.time_left(), 1);
    }
}
