use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Operators and numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// ASCII symbol used in evaluator formulas (`+ - * /`).
    pub fn ascii(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Full-width glyph shown to the student.
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => '＋',
            Operator::Sub => '－',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }

    pub fn from_ascii(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A fraction `numerator / denominator`. Generated operands are proper
/// fractions; answers are always reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Fraction { numerator, denominator }
    }

    /// True when the fraction should be rendered as a plain integer.
    pub fn is_whole(self) -> bool {
        self.denominator == 1
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

// ---------------------------------------------------------------------------
// Operation kinds and their per-level parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Sum,
    Sub,
    Mul,
    Div,
    DecimalSum,
    DecimalSub,
    DecimalMul,
    DecimalDiv,
    FractionSum,
    FractionSub,
    FractionMul,
    FractionDiv,
}

impl OperationKind {
    pub const ALL: [OperationKind; 12] = [
        OperationKind::Sum,
        OperationKind::Sub,
        OperationKind::Mul,
        OperationKind::Div,
        OperationKind::DecimalSum,
        OperationKind::DecimalSub,
        OperationKind::DecimalMul,
        OperationKind::DecimalDiv,
        OperationKind::FractionSum,
        OperationKind::FractionSub,
        OperationKind::FractionMul,
        OperationKind::FractionDiv,
    ];

    pub fn operator(self) -> Operator {
        match self {
            OperationKind::Sum | OperationKind::DecimalSum | OperationKind::FractionSum => Operator::Add,
            OperationKind::Sub | OperationKind::DecimalSub | OperationKind::FractionSub => Operator::Sub,
            OperationKind::Mul | OperationKind::DecimalMul | OperationKind::FractionMul => Operator::Mul,
            OperationKind::Div | OperationKind::DecimalDiv | OperationKind::FractionDiv => Operator::Div,
        }
    }

    pub fn family(self) -> ProblemKind {
        match self {
            OperationKind::Sum | OperationKind::Sub | OperationKind::Mul | OperationKind::Div => {
                ProblemKind::Integer
            }
            OperationKind::DecimalSum
            | OperationKind::DecimalSub
            | OperationKind::DecimalMul
            | OperationKind::DecimalDiv => ProblemKind::Decimal,
            OperationKind::FractionSum
            | OperationKind::FractionSub
            | OperationKind::FractionMul
            | OperationKind::FractionDiv => ProblemKind::Fraction,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Sum         => "Addition",
            OperationKind::Sub         => "Subtraction",
            OperationKind::Mul         => "Multiplication",
            OperationKind::Div         => "Division",
            OperationKind::DecimalSum  => "Decimal Addition",
            OperationKind::DecimalSub  => "Decimal Subtraction",
            OperationKind::DecimalMul  => "Decimal Multiplication",
            OperationKind::DecimalDiv  => "Decimal Division",
            OperationKind::FractionSum => "Fraction Addition",
            OperationKind::FractionSub => "Fraction Subtraction",
            OperationKind::FractionMul => "Fraction Multiplication",
            OperationKind::FractionDiv => "Fraction Division",
        };
        write!(f, "{}", s)
    }
}

/// Operand range for integer problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerSpec {
    pub min: i64,
    pub max: i64,
    pub amount: usize,
}

/// Operand range and precision for decimal sum, difference and division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalSpec {
    pub decimal_places: u32,
    pub min: f64,
    pub max: f64,
    pub amount: usize,
}

/// Decimal multiplication: a decimal operand times a small integer factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalMulSpec {
    pub decimal_places: u32,
    pub min: f64,
    pub max: f64,
    pub int_factor_min: i64,
    pub int_factor_max: i64,
    pub amount: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionSpec {
    pub max_denominator: i64,
    pub amount: usize,
}

/// Borrow-free view of one enabled operation and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationSpec {
    Integer(IntegerSpec),
    Decimal(DecimalSpec),
    DecimalMul(DecimalMulSpec),
    Fraction(FractionSpec),
}

/// Decimal specs may ask for at most this many places.
pub const MAX_DECIMAL_PLACES: u32 = 6;

impl OperationSpec {
    pub fn amount(&self) -> usize {
        match self {
            OperationSpec::Integer(s) => s.amount,
            OperationSpec::Decimal(s) => s.amount,
            OperationSpec::DecimalMul(s) => s.amount,
            OperationSpec::Fraction(s) => s.amount,
        }
    }

    /// Why this spec cannot be generated from, or `None` when it can.
    pub fn invalid_reason(&self) -> Option<String> {
        match *self {
            OperationSpec::Integer(s) if s.min > s.max => {
                Some(format!("min {} > max {}", s.min, s.max))
            }
            OperationSpec::Decimal(s) => decimal_range_reason(s.decimal_places, s.min, s.max),
            OperationSpec::DecimalMul(s) => decimal_range_reason(s.decimal_places, s.min, s.max)
                .or_else(|| {
                    (s.int_factor_min > s.int_factor_max).then(|| {
                        format!("int_factor_min {} > int_factor_max {}", s.int_factor_min, s.int_factor_max)
                    })
                }),
            OperationSpec::Fraction(s) if s.max_denominator < 2 => {
                Some(format!("max_denominator {} must be at least 2", s.max_denominator))
            }
            _ => None,
        }
    }
}

fn decimal_range_reason(places: u32, min: f64, max: f64) -> Option<String> {
    if places == 0 {
        Some("decimal_places must be at least 1".into())
    } else if places > MAX_DECIMAL_PLACES {
        Some(format!("decimal_places {places} exceeds {MAX_DECIMAL_PLACES}"))
    } else if !(min <= max) {
        Some(format!("min {min} > max {max}"))
    } else {
        None
    }
}

/// One optional spec per operation kind. `None` means disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Operations {
    pub sum: Option<IntegerSpec>,
    pub sub: Option<IntegerSpec>,
    pub mul: Option<IntegerSpec>,
    pub div: Option<IntegerSpec>,
    pub decimal_sum: Option<DecimalSpec>,
    pub decimal_sub: Option<DecimalSpec>,
    pub decimal_mul: Option<DecimalMulSpec>,
    pub decimal_div: Option<DecimalSpec>,
    pub fraction_sum: Option<FractionSpec>,
    pub fraction_sub: Option<FractionSpec>,
    pub fraction_mul: Option<FractionSpec>,
    pub fraction_div: Option<FractionSpec>,
}

impl Operations {
    pub fn get(&self, kind: OperationKind) -> Option<OperationSpec> {
        match kind {
            OperationKind::Sum         => self.sum.map(OperationSpec::Integer),
            OperationKind::Sub         => self.sub.map(OperationSpec::Integer),
            OperationKind::Mul         => self.mul.map(OperationSpec::Integer),
            OperationKind::Div         => self.div.map(OperationSpec::Integer),
            OperationKind::DecimalSum  => self.decimal_sum.map(OperationSpec::Decimal),
            OperationKind::DecimalSub  => self.decimal_sub.map(OperationSpec::Decimal),
            OperationKind::DecimalMul  => self.decimal_mul.map(OperationSpec::DecimalMul),
            OperationKind::DecimalDiv  => self.decimal_div.map(OperationSpec::Decimal),
            OperationKind::FractionSum => self.fraction_sum.map(OperationSpec::Fraction),
            OperationKind::FractionSub => self.fraction_sub.map(OperationSpec::Fraction),
            OperationKind::FractionMul => self.fraction_mul.map(OperationSpec::Fraction),
            OperationKind::FractionDiv => self.fraction_div.map(OperationSpec::Fraction),
        }
    }

    /// Enabled operations in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = (OperationKind, OperationSpec)> + '_ {
        OperationKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|spec| (kind, spec)))
    }

    /// Sum of the `amount` of every enabled operation.
    pub fn total_amount(&self) -> usize {
        self.enabled().map(|(_, spec)| spec.amount()).sum()
    }
}

/// A named difficulty level: question count, countdown length, and the
/// operations that feed its problem pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    pub question_count: usize,
    pub time_budget_seconds: u32,
    #[serde(default)]
    pub operations: Operations,
}

// ---------------------------------------------------------------------------
// Generated problems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Integer,
    Decimal,
    Fraction,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Integer  => write!(f, "integer"),
            ProblemKind::Decimal  => write!(f, "decimal"),
            ProblemKind::Fraction => write!(f, "fraction"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    Integer { a: i64, op: Operator, b: i64 },
    /// `places` is the precision operands were rounded to.
    Decimal { a: f64, op: Operator, b: f64, places: u32 },
    Fraction { a: Fraction, op: Operator, b: Fraction },
}

impl Formula {
    pub fn operator(&self) -> Operator {
        match *self {
            Formula::Integer { op, .. } | Formula::Decimal { op, .. } | Formula::Fraction { op, .. } => op,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Integer(i64),
    Decimal(f64),
    Fraction(Fraction),
}

impl Answer {
    /// Stacked numerator/denominator pair, if this answer is a proper fraction.
    pub fn as_fraction(&self) -> Option<Fraction> {
        match *self {
            Answer::Fraction(frac) if !frac.is_whole() => Some(frac),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(n) => write!(f, "{}", n),
            Answer::Decimal(x) => write!(f, "{}", x),
            Answer::Fraction(frac) => write!(f, "{}", frac),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub operation: OperationKind,
    pub formula: Formula,
    /// Precomputed canonical answer; renderers never recompute it.
    pub answer: Answer,
}

impl Problem {
    pub fn kind(&self) -> ProblemKind {
        match self.formula {
            Formula::Integer { .. } => ProblemKind::Integer,
            Formula::Decimal { .. } => ProblemKind::Decimal,
            Formula::Fraction { .. } => ProblemKind::Fraction,
        }
    }
}

/// The ordered problems of one drill run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSet {
    pub set_id: String,
    pub profile_name: String,
    pub time_budget_seconds: u32,
    pub problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }
}

/// Request for one generated drill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillRequest {
    pub level: u32,
    pub rng_seed: Option<u64>,
}

impl DrillRequest {
    /// Entropy-seeded request for `level`.
    pub fn new(level: u32) -> Self {
        DrillRequest { level, rng_seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}
