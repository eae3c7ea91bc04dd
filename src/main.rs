//! Self-play demo
//!
//! Runs the engine against itself from the start position and prints the
//! post-game analysis. Set `RUST_LOG=debug` to watch each search iteration.

use trinode::eval::score_points;
use trinode::{EngineConfig, Session};

/// Plies before the demo calls it a draw
const MAX_PLIES: usize = 40;

fn main() {
    env_logger::init();

    println!("===========================================");
    println!("       Trinode self-play v{}", env!("CARGO_PKG_VERSION"));
    println!("===========================================\n");

    let config = EngineConfig::with_limits(6, 300);
    let mut session = Session::new(config);

    for ply in 0..MAX_PLIES {
        let side = session.state().turn();
        session.set_engine_side(Some(side));

        let result = match session.engine_move() {
            Ok(Some(result)) => result,
            Ok(None) => {
                println!("  {side} has no move");
                break;
            }
            Err(e) => {
                eprintln!("  engine move rejected: {e}");
                break;
            }
        };

        if let Some(mv) = result.best_move {
            println!(
                "  {:>2}. {:<12} {:>7.1}  depth {} {:?} {}ms {} nodes",
                ply + 1,
                mv.to_string(),
                score_points(result.score),
                result.depth,
                result.search_type,
                result.time_ms,
                result.nodes()
            );
        }

        if let Some(win) = session.winner() {
            println!(
                "\n  {} wins on {}-{}-{}",
                win.side, win.line[0], win.line[1], win.line[2]
            );
            break;
        }
    }
    if session.winner().is_none() {
        println!("\n  No winner after {MAX_PLIES} plies");
    }

    println!("\n--- Analysis ---");
    for entry in session.analyze() {
        let verdict = if entry.regret == 0 { "best" } else { "inaccurate" };
        println!(
            "  {:>2}. {:<12} regret {:>6.1}  ({verdict}, best {})",
            entry.ply + 1,
            entry.mv.to_string(),
            score_points(entry.regret),
            entry.best
        );
    }

    println!("\n  TT usage: {}%", session.engine().tt_stats().usage_percent);
}
