use serde_json::{json, Value};

use crate::drill_engine::{
    helpers::{number_str, stacked},
    models::{Answer, Formula, Fraction, Problem},
    session::DrillState,
};

/// A fraction as a stacked `{numerator, denominator}` pair, or a plain
/// integer text when the denominator is 1.
fn fraction_part(f: Fraction) -> Value {
    match stacked(f) {
        Some((numerator, denominator)) => json!({
            "type": "fraction",
            "numerator": numerator,
            "denominator": denominator
        }),
        None => json!({ "type": "text", "text": f.numerator.to_string() }),
    }
}

fn text_part(text: String) -> Value {
    json!({ "type": "text", "text": text })
}

fn operand_parts(formula: &Formula) -> [Value; 2] {
    match *formula {
        Formula::Integer { a, b, .. } => [text_part(a.to_string()), text_part(b.to_string())],
        Formula::Decimal { a, b, .. } => [text_part(number_str(a)), text_part(number_str(b))],
        Formula::Fraction { a, b, .. } => [fraction_part(a), fraction_part(b)],
    }
}

fn answer_part(answer: &Answer) -> Value {
    match *answer {
        Answer::Integer(n) => text_part(n.to_string()),
        Answer::Decimal(x) => text_part(number_str(x)),
        Answer::Fraction(f) => fraction_part(f),
    }
}

/// One list entry: ids, formula parts, answer, and reveal/current flags.
fn question(index: usize, problem: &Problem, revealed: bool, current: bool) -> Value {
    let [a, b] = operand_parts(&problem.formula);
    json!({
        "id": format!("question-{index}"),
        "answer_id": format!("answer-{index}"),
        "kind": problem.kind().to_string(),
        "operation": problem.operation,
        "display_formula": problem.display_formula(),
        "operands": [a, b],
        "operator": problem.formula.operator().glyph().to_string(),
        "answer": answer_part(&problem.answer),
        "answer_text": problem.answer.to_string(),
        "revealed": revealed,
        "current": current
    })
}

/// Map a drill state to a JSON document a UI can render directly.
///
/// Answers are always included; `revealed` tells the UI which to show.
pub fn to_drill_view(state: &DrillState) -> Value {
    let set = state.problems();
    let countdown = state.countdown();
    let current = state.current_index();

    let questions: Vec<Value> = set
        .iter()
        .enumerate()
        .map(|(i, p)| question(i, p, state.is_revealed(i), current == Some(i)))
        .collect();

    json!({
        "set_id": set.set_id,
        "profile": set.profile_name,
        "phase": state.phase(),
        "visible": state.problems_visible(),
        "interactive": state.is_interactive(),
        "timer": countdown.display(),
        "timer_seconds": countdown.remaining(),
        "cursor": state.cursor(),
        "total": set.len(),
        "outcome": state.outcome().map(|o| o.to_string()),
        "questions": questions
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::{
        models::{OperationKind, Operator, ProblemSet},
        session::{transition, DrillEvent},
    };

    fn sample_state() -> DrillState {
        let problems = vec![
            Problem {
                operation: OperationKind::Mul,
                formula: Formula::Integer { a: 6, op: Operator::Mul, b: 7 },
                answer: Answer::Integer(42),
            },
            Problem {
                operation: OperationKind::FractionSum,
                formula: Formula::Fraction {
                    a: Fraction::new(1, 2), op: Operator::Add, b: Fraction::new(1, 3),
                },
                answer: Answer::Fraction(Fraction::new(5, 6)),
            },
        ];
        DrillState::new(ProblemSet {
            set_id: "PS-0000BEEF".to_string(),
            profile_name: "Grade 5".to_string(),
            time_budget_seconds: 120,
            problems,
        })
    }

    #[test]
    fn view_before_start_hides_everything() {
        let view = to_drill_view(&sample_state());
        assert_eq!(view["phase"], "not_started");
        assert_eq!(view["visible"], false);
        assert_eq!(view["timer"], "2:00");
        assert_eq!(view["outcome"], Value::Null);
        assert_eq!(view["questions"].as_array().map(Vec::len), Some(2));
        assert_eq!(view["questions"][0]["revealed"], false);
        assert_eq!(view["questions"][0]["current"], false);
    }

    #[test]
    fn view_tracks_reveal_cursor() {
        let state = transition(transition(sample_state(), DrillEvent::Start), DrillEvent::Reveal);
        let view = to_drill_view(&state);
        let q0 = &view["questions"][0];
        let q1 = &view["questions"][1];
        assert_eq!(q0["id"], "question-0");
        assert_eq!(q0["display_formula"], "6×7");
        assert_eq!(q0["answer"]["text"], "42");
        assert_eq!(q0["revealed"], true);
        assert_eq!(q1["current"], true);
        assert_eq!(q1["operator"], "＋");
        assert_eq!(q1["operands"][0]["numerator"], 1);
        assert_eq!(q1["operands"][0]["denominator"], 2);
        assert_eq!(q1["answer"]["type"], "fraction");
        assert_eq!(q1["answer"]["denominator"], 6);
        assert_eq!(q1["operation"], "fraction_sum");
    }

    #[test]
    fn completed_view_reports_outcome() {
        let mut state = transition(sample_state(), DrillEvent::Start);
        state = transition(state, DrillEvent::Reveal);
        state = transition(state, DrillEvent::Reveal);
        let view = to_drill_view(&state);
        assert_eq!(view["phase"], "completed");
        assert_eq!(view["interactive"], false);
        assert_eq!(view["outcome"], "All 2 problems complete! Well done.");
    }
}
