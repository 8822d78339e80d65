//! Reveal/progress state machine and the single drill controller.
//!
//! ```text
//! NotStarted --Start--> Running --Reveal (last)--> Completed
//!                       Running --TimeExpired----> TimedOut
//! any phase  --Retry(set)--> NotStarted
//! ```
//!
//! [`transition`] is pure: the countdown is a plain value advanced by `Tick`
//! events from an external one-second clock, and retries carry their freshly
//! generated [`ProblemSet`]. [`DrillSession`] owns the RNG and level table
//! and is the only place new sets are generated.

use std::fmt;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::drill_engine::{
    generator::{generate_problem_set, make_rng},
    levels::LevelTable,
    models::ProblemSet,
};

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    initial_seconds: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new(initial_seconds: u32) -> Self {
        Countdown { initial_seconds, remaining: initial_seconds, running: false }
    }

    /// Begin ticking. Restarting an already running countdown replaces the
    /// old tick source instead of adding a second one.
    pub fn start(&mut self) {
        self.stop();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and restore the full budget.
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.initial_seconds;
    }

    /// Advance one second. Returns `true` exactly when this tick expires the
    /// countdown; the countdown stops itself at zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            return true;
        }
        false
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `m:ss`, e.g. `"2:00"`, `"0:07"`.
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillPhase {
    NotStarted,
    Running,
    Completed,
    TimedOut,
}

impl fmt::Display for DrillPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillPhase::NotStarted => write!(f, "not started"),
            DrillPhase::Running    => write!(f, "running"),
            DrillPhase::Completed  => write!(f, "completed"),
            DrillPhase::TimedOut   => write!(f, "timed out"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DrillEvent {
    Start,
    /// Reveal the answer under the cursor and advance.
    Reveal,
    /// One second of the external clock.
    Tick,
    TimeExpired,
    /// Replace the problems and start over.
    Retry(ProblemSet),
}

/// How a finished drill ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Completed { total: usize },
    TimedOut { solved: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed { total } => write!(f, "All {} problems complete! Well done.", total),
            Outcome::TimedOut { solved } => write!(f, "Time's up! You solved {} problems.", solved),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillState {
    phase: DrillPhase,
    problems: ProblemSet,
    cursor: usize,
    countdown: Countdown,
}

impl DrillState {
    pub fn new(problems: ProblemSet) -> Self {
        let countdown = Countdown::new(problems.time_budget_seconds);
        DrillState { phase: DrillPhase::NotStarted, problems, cursor: 0, countdown }
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn problems(&self) -> &ProblemSet {
        &self.problems
    }

    /// Number of answers revealed by the student, in order.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Index of the problem the next `Reveal` will show, while running.
    pub fn current_index(&self) -> Option<usize> {
        (self.phase == DrillPhase::Running && self.cursor < self.problems.len()).then_some(self.cursor)
    }

    /// Whether problem `index` currently shows its answer.
    pub fn is_revealed(&self, index: usize) -> bool {
        match self.phase {
            DrillPhase::TimedOut => index < self.problems.len(),
            _ => index < self.cursor,
        }
    }

    /// Problems are hidden until the drill starts.
    pub fn problems_visible(&self) -> bool {
        self.phase != DrillPhase::NotStarted
    }

    /// Accepts student input only while running.
    pub fn is_interactive(&self) -> bool {
        self.phase == DrillPhase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            DrillPhase::Completed => Some(Outcome::Completed { total: self.problems.len() }),
            DrillPhase::TimedOut => Some(Outcome::TimedOut { solved: self.cursor }),
            _ => None,
        }
    }

    /// Consume an event and return the next state. Events that do not apply
    /// to the current phase leave the state unchanged.
    pub fn apply(mut self, event: DrillEvent) -> Self {
        match (self.phase, event) {
            (DrillPhase::NotStarted, DrillEvent::Start) => {
                self.phase = DrillPhase::Running;
                self.countdown.start();
            }
            (DrillPhase::Running, DrillEvent::Reveal) => {
                if self.cursor < self.problems.len() {
                    self.cursor += 1;
                }
                if self.cursor >= self.problems.len() {
                    self.phase = DrillPhase::Completed;
                    self.countdown.stop();
                }
            }
            (DrillPhase::Running, DrillEvent::Tick) => {
                if self.countdown.tick() {
                    return self.apply(DrillEvent::TimeExpired);
                }
            }
            (DrillPhase::Running, DrillEvent::TimeExpired) => {
                self.phase = DrillPhase::TimedOut;
                self.countdown.stop();
            }
            (_, DrillEvent::Retry(problems)) => {
                self.countdown.stop();
                return DrillState::new(problems);
            }
            (phase, event) => {
                trace!(target: "arith_drill_gen", %phase, ?event, "event ignored");
            }
        }
        self
    }
}

/// Pure transition function: `(state, event) → state`.
pub fn transition(state: DrillState, event: DrillEvent) -> DrillState {
    state.apply(event)
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the level table, the active level, the RNG, and the drill state.
/// All mutation happens through its methods, one discrete input at a time.
pub struct DrillSession {
    table: LevelTable,
    level: u32,
    rng: StdRng,
    state: DrillState,
}

impl DrillSession {
    /// Open a session on `level` (unknown → the table's default).
    pub fn new(table: LevelTable, level: u32, rng_seed: Option<u64>) -> Self {
        let level = table.resolve_key(level);
        let mut rng = make_rng(rng_seed);
        let state = DrillState::new(generate_problem_set(table.resolve(level), &mut rng));
        DrillSession { table, level, rng, state }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    fn dispatch(&mut self, event: DrillEvent) {
        // `apply` consumes the state; swap a cheap placeholder in meanwhile.
        let placeholder = DrillState::new(ProblemSet {
            set_id: String::new(),
            profile_name: String::new(),
            time_budget_seconds: 0,
            problems: Vec::new(),
        });
        let current = std::mem::replace(&mut self.state, placeholder);
        self.state = transition(current, event);
    }

    pub fn start(&mut self) {
        self.dispatch(DrillEvent::Start);
    }

    pub fn reveal(&mut self) {
        self.dispatch(DrillEvent::Reveal);
    }

    /// Keyboard/pointer input: starts the drill, or reveals the next answer.
    pub fn advance(&mut self) {
        match self.state.phase() {
            DrillPhase::NotStarted => self.start(),
            _ => self.reveal(),
        }
    }

    pub fn tick(&mut self) {
        self.dispatch(DrillEvent::Tick);
    }

    pub fn expire(&mut self) {
        self.dispatch(DrillEvent::TimeExpired);
    }

    /// Stop the countdown and start over with a fresh set for the same level.
    pub fn retry(&mut self) {
        let problems = generate_problem_set(self.table.resolve(self.level), &mut self.rng);
        debug!(target: "arith_drill_gen", level = self.level, set_id = %problems.set_id, "retry");
        self.dispatch(DrillEvent::Retry(problems));
    }

    /// Switch to `level` and start over. Unknown levels are ignored and
    /// `false` is returned.
    pub fn change_level(&mut self, level: u32) -> bool {
        if !self.table.contains(level) {
            debug!(target: "arith_drill_gen", level, "level change ignored: unknown level");
            return false;
        }
        self.level = level;
        self.retry();
        true
    }
}
