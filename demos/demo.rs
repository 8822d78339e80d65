//! Full demo of the drill engine.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Every level**: one drill per built-in grade level with fixed seeds,
//!    printing the first few problems with their answers.
//! 2. **A timed run**: a `DrillSession` is started, a few answers revealed,
//!    and the countdown driven to zero with `tick()`; the JSON view is printed
//!    at the end.
//!
//! Set `LOG_LEVEL=debug` to see per-operation sampling logs, and
//! `DRILL_LEVELS_PATH=levels.toml` to load a custom level table.

use arith_drill_gen::{
    generate_drill, load_level_table_from_env, to_drill_view, DrillRequest, DrillSession,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info,arith_drill_gen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() {
    init_tracing();
    let table = load_level_table_from_env();

    // ── Every level ──────────────────────────────────────────────────────────
    println!();
    println!("══ One drill per level ══");
    for level in table.keys().collect::<Vec<_>>() {
        let set = generate_drill(DrillRequest::new(level).with_seed(1000 + level as u64), &table);
        println!();
        println!("━━ Level {level}: {}  ID: {}  {} problems, {} s ━━",
            set.profile_name, set.set_id, set.len(), set.time_budget_seconds);
        for (i, p) in set.iter().take(8).enumerate() {
            println!("  {:>2}. [{:<8}] {}", i + 1, p.kind().to_string(), p.display_with_answer());
        }
    }

    // ── A timed run ──────────────────────────────────────────────────────────
    println!();
    println!("══ Timed run: level 5, seed 7 ══");
    let mut session = DrillSession::new(table, 5, Some(7));
    session.advance(); // start
    for _ in 0..3 {
        session.advance(); // reveal
    }
    for _ in 0..session.state().countdown().initial_seconds() {
        session.tick();
    }
    let state = session.state();
    println!("  Phase: {}  Timer: {}", state.phase(), state.countdown().display());
    if let Some(outcome) = state.outcome() {
        println!("  {outcome}");
    }

    let view = to_drill_view(state);
    match serde_json::to_string_pretty(&view["questions"][0]) {
        Ok(json) => println!("\n  First question view:\n{json}"),
        Err(e) => eprintln!("failed to render view: {e}"),
    }
}
