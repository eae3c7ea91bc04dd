use std::collections::HashMap;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::RngCore;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use trinode::board::{GameState, Side};
use trinode::eval::{Evaluator, Score, WIN_SCORE};
use trinode::rules::{all_moves, check_win};
use trinode::search::{Bound, Deadline, Searcher, INF, TERMINAL_DEPTH, ZOBRIST};
use trinode::{AIEngine, EngineConfig};

/// Play up to `plies` random legal moves from the start, stopping at a win.
fn random_walk(seed: u64, plies: usize) -> Vec<GameState> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut state = GameState::new();
    let mut seen = vec![state];
    for _ in 0..plies {
        if check_win(&state).is_some() {
            break;
        }
        let moves = all_moves(&state, state.turn());
        if moves.is_empty() {
            break;
        }
        let mv = moves[(rng.next_u64() % moves.len() as u64) as usize];
        state = state.apply(&mv);
        seen.push(state);
    }
    seen
}

fn random_position(seed: u64, plies: usize) -> GameState {
    *random_walk(seed, plies).last().unwrap()
}

/// Full-width minimax with the searcher's leaf rules
fn minimax(state: &GameState, depth: u32, engine_side: Side, eval: &Evaluator) -> Score {
    if let Some(win) = check_win(state) {
        return if win.side == engine_side { WIN_SCORE } else { -WIN_SCORE };
    }
    if depth == 0 {
        return eval.evaluate(state, engine_side);
    }
    let moves = all_moves(state, state.turn());
    if moves.is_empty() {
        return eval.evaluate(state, engine_side);
    }
    let values = moves
        .iter()
        .map(|mv| minimax(&state.apply(mv), depth - 1, engine_side, eval));
    if state.turn() == engine_side {
        values.max().unwrap()
    } else {
        values.min().unwrap()
    }
}

/// Every position the search can visit within `depth` plies of `root`
fn reachable(root: &GameState, depth: u32, out: &mut HashMap<u64, GameState>) {
    out.insert(root.hash(), *root);
    if depth == 0 || check_win(root).is_some() {
        return;
    }
    for mv in all_moves(root, root.turn()) {
        reachable(&root.apply(&mv), depth - 1, out);
    }
}

fn searcher(engine_side: Side, use_tt: bool) -> Searcher {
    let config = EngineConfig {
        use_tt,
        ..EngineConfig::default()
    };
    let mut s = Searcher::with_config(&config);
    s.set_engine_side(engine_side);
    s
}

fn side_from(bit: bool) -> Side {
    if bit {
        Side::First
    } else {
        Side::Second
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_reachable_states_keep_invariants(seed in any::<u64>(), plies in 0usize..40) {
        for state in random_walk(seed, plies) {
            prop_assert_eq!(state.occupied().count(), 6);
            for side in Side::BOTH {
                prop_assert_eq!(state.occupied_by(side).count(), 3);
            }
            prop_assert_eq!(state.hash(), ZOBRIST.hash(&state));

            for mv in all_moves(&state, state.turn()) {
                let child = state.apply(&mv);
                prop_assert_eq!(child.hash(), ZOBRIST.hash(&child));
                prop_assert_eq!(child.turn(), state.turn().opponent());
            }
        }
    }

    #[test]
    fn prop_depth_zero_is_evaluate(seed in any::<u64>(), plies in 0usize..30, first in any::<bool>()) {
        let state = random_position(seed, plies);
        prop_assume!(check_win(&state).is_none());
        let side = side_from(first);
        let mut s = searcher(side, true);
        let maximizing = state.turn() == side;
        let score = s.search(&state, 0, -INF, INF, maximizing, Deadline::none()).unwrap();
        prop_assert_eq!(score, s.evaluator().evaluate(&state, side));
    }

    #[test]
    fn prop_alphabeta_equals_minimax(
        seed in any::<u64>(),
        plies in 0usize..30,
        depth in 1u32..=4,
        first in any::<bool>()
    ) {
        let state = random_position(seed, plies);
        let side = side_from(first);
        let maximizing = state.turn() == side;
        let expected = minimax(&state, depth, side, &Evaluator::default());

        let mut plain = searcher(side, false);
        let got = plain.search(&state, depth, -INF, INF, maximizing, Deadline::none()).unwrap();
        prop_assert_eq!(got, expected);

        let mut cached = searcher(side, true);
        let got = cached.search(&state, depth, -INF, INF, maximizing, Deadline::none()).unwrap();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_table_bounds_hold(seed in any::<u64>(), plies in 0usize..30, first in any::<bool>()) {
        const DEPTH: u32 = 4;
        let root = random_position(seed, plies);
        let side = side_from(first);
        let eval = Evaluator::default();

        let mut s = searcher(side, true);
        s.search(&root, DEPTH, -INF, INF, root.turn() == side, Deadline::none()).unwrap();

        let mut positions = HashMap::new();
        reachable(&root, DEPTH, &mut positions);

        for entry in s.tt().iter() {
            let state = positions.get(&entry.hash).copied();
            prop_assert!(state.is_some(), "entry for a position the search never visits");
            let state = state.unwrap();

            if entry.depth == TERMINAL_DEPTH {
                let win = check_win(&state);
                prop_assert!(win.is_some());
                let expected = if win.unwrap().side == side { WIN_SCORE } else { -WIN_SCORE };
                prop_assert_eq!(entry.score, expected);
                continue;
            }

            let truth = minimax(&state, entry.depth, side, &eval);
            match entry.bound {
                Bound::Exact => prop_assert_eq!(entry.score, truth),
                Bound::Lower => prop_assert!(entry.score <= truth, "lower bound {} overstates {}", entry.score, truth),
                Bound::Upper => prop_assert!(entry.score >= truth, "upper bound {} understates {}", entry.score, truth),
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]

    #[test]
    fn prop_chosen_move_is_legal(seed in any::<u64>(), plies in 0usize..30) {
        let state = random_position(seed, plies);
        prop_assume!(check_win(&state).is_none());

        let side = state.turn();
        let mut engine = AIEngine::new();
        let result = engine.choose_move(&state, side, 4, 200);
        let mv = result.best_move;
        prop_assert!(mv.is_some());
        prop_assert!(all_moves(&state, side).contains(&mv.unwrap()));
    }

    #[test]
    fn prop_deadline_overrun_is_bounded(seed in any::<u64>(), plies in 0usize..30) {
        let state = random_position(seed, plies);
        prop_assume!(check_win(&state).is_none());

        let budget = Duration::from_millis(20);
        let mut engine = AIEngine::new();
        let start = Instant::now();
        let result = engine.choose_move(&state, state.turn(), 64, budget.as_millis() as u64);
        let elapsed = start.elapsed();

        prop_assert!(result.best_move.is_some());
        prop_assert!(elapsed < budget + Duration::from_millis(250), "took {:?}", elapsed);
    }
}
