//! Operation registry and dispatcher.
//!
//! Every calculation type is a variant of the closed [`CalculationType`]
//! enumeration. Dispatch is a `match` over the variant, so a tag that parses
//! is guaranteed to have an operation behind it. Adding an operation means
//! adding a variant, its tag in [`CalculationType::as_str`], its
//! preconditions in [`CalculationType::check_operands`] and its arm in
//! `evaluate`.
//!
//! The dispatcher is pure: no I/O, no shared state, safe to call from any
//! number of threads.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Factorials from this value upwards overflow `f64`.
const FACTORIAL_OVERFLOW_THRESHOLD: f64 = 171.0;

/// Calculation type tag.
///
/// Tags are matched case-insensitively when parsed and rendered lower-case.
///
/// # Examples
/// ```
/// use calculator_backend::domain::CalculationType;
///
/// let kind: CalculationType = "FloorDiv".parse().expect("known tag");
/// assert_eq!(kind, CalculationType::FloorDiv);
/// assert_eq!(kind.as_str(), "floordiv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`; `b` must be non-zero.
    Div,
    /// `a ^ b` with native floating-point exponentiation.
    Power,
    /// Floored modulus (the result takes the sign of `b`); `b` must be non-zero.
    Mod,
    /// `floor(a / b)`; `b` must be non-zero.
    FloorDiv,
    /// Square root of `a`; `b` is ignored.
    Sqrt,
    /// Logarithm of `a` in base `b`.
    Log,
    /// Factorial of `a`; `b` is ignored.
    Factorial,
    /// `|a - b|`
    AbsDiff,
}

/// Precondition that an operand violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainViolation {
    /// `sqrt` of a negative number.
    NegativeRadicand,
    /// `log` of a non-positive number.
    NonPositiveLogArgument,
    /// `log` with a base that is non-positive or one.
    InvalidLogBase,
    /// `factorial` of a negative or fractional number.
    NonNaturalFactorial,
}

impl DomainViolation {
    /// Client-facing description of the violated precondition.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NegativeRadicand => "Square root of negative number is not allowed.",
            Self::NonPositiveLogArgument => "Logarithm is only defined for a > 0.",
            Self::InvalidLogBase => "Logarithm base must be > 0 and != 1.",
            Self::NonNaturalFactorial => "Factorial is only defined for non-negative integers.",
        }
    }

    /// Operand the precondition applies to.
    #[must_use]
    pub const fn operand(self) -> &'static str {
        match self {
            Self::InvalidLogBase => "b",
            Self::NegativeRadicand | Self::NonPositiveLogArgument | Self::NonNaturalFactorial => {
                "a"
            }
        }
    }
}

/// Failures reported by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    /// The tag does not name a known operation.
    #[error("Invalid calculation type: {tag}")]
    InvalidOperationType {
        /// Tag as supplied by the caller.
        tag: String,
    },
    /// `div`, `mod` or `floordiv` with a zero divisor.
    #[error("{}", .operation.division_by_zero_message())]
    DivisionByZero {
        /// Operation that was attempted.
        operation: CalculationType,
    },
    /// An operand lies outside the operation's domain.
    #[error("{}", .violation.message())]
    InvalidDomain {
        /// Operation that was attempted.
        operation: CalculationType,
        /// Precondition that failed.
        violation: DomainViolation,
    },
}

impl CalculationError {
    /// Stable machine-readable code for adapters.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidOperationType { .. } => "invalid_operation_type",
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::InvalidDomain { .. } => "invalid_domain",
        }
    }

    /// Request field the failure relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidOperationType { .. } => "type",
            Self::DivisionByZero { .. } => "b",
            Self::InvalidDomain { violation, .. } => violation.operand(),
        }
    }
}

impl CalculationType {
    /// Every supported calculation type, in tag order.
    pub const ALL: [Self; 11] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Power,
        Self::Mod,
        Self::FloorDiv,
        Self::Sqrt,
        Self::Log,
        Self::Factorial,
        Self::AbsDiff,
    ];

    /// Canonical lower-case tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Power => "power",
            Self::Mod => "mod",
            Self::FloorDiv => "floordiv",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Factorial => "factorial",
            Self::AbsDiff => "absdiff",
        }
    }

    const fn division_by_zero_message(self) -> &'static str {
        match self {
            Self::Mod => "Modulus by zero is not allowed.",
            Self::FloorDiv => "Floor division by zero is not allowed.",
            _ => "Division by zero is not allowed.",
        }
    }

    /// Check the operation's domain preconditions without computing.
    ///
    /// Request validation and [`CalculationType::apply`] both go through this
    /// function, so the two layers always agree on what is accepted.
    ///
    /// # Errors
    /// Returns the first violated precondition.
    pub fn check_operands(self, a: f64, b: f64) -> Result<(), CalculationError> {
        let invalid = |violation| CalculationError::InvalidDomain {
            operation: self,
            violation,
        };
        match self {
            Self::Div | Self::Mod | Self::FloorDiv if b == 0.0 => {
                Err(CalculationError::DivisionByZero { operation: self })
            }
            Self::Sqrt if a < 0.0 => Err(invalid(DomainViolation::NegativeRadicand)),
            Self::Log if a <= 0.0 => Err(invalid(DomainViolation::NonPositiveLogArgument)),
            Self::Log if b <= 0.0 || b == 1.0 => Err(invalid(DomainViolation::InvalidLogBase)),
            Self::Factorial if a < 0.0 || a.fract() != 0.0 => {
                Err(invalid(DomainViolation::NonNaturalFactorial))
            }
            _ => Ok(()),
        }
    }

    /// Check preconditions and compute the result.
    ///
    /// # Errors
    /// Returns [`CalculationError::DivisionByZero`] or
    /// [`CalculationError::InvalidDomain`] when a precondition fails.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::CalculationType;
    ///
    /// assert_eq!(CalculationType::Power.apply(2.0, 3.0), Ok(8.0));
    /// assert!(CalculationType::Div.apply(5.0, 0.0).is_err());
    /// ```
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalculationError> {
        self.check_operands(a, b)?;
        Ok(self.evaluate(a, b))
    }

    fn evaluate(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Power => a.powf(b),
            Self::Mod => floored_mod(a, b),
            Self::FloorDiv => (a / b).floor(),
            // Normalises sqrt(-0.0) to +0.0.
            Self::Sqrt => a.sqrt().abs(),
            Self::Log => a.log(b),
            Self::Factorial => factorial(a),
            Self::AbsDiff => (a - b).abs(),
        }
    }
}

fn floored_mod(a: f64, b: f64) -> f64 {
    let remainder = a % b;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        remainder + b
    } else {
        remainder
    }
}

/// Factorial of a non-negative integral value; saturates to infinity.
fn factorial(n: f64) -> f64 {
    if n >= FACTORIAL_OVERFLOW_THRESHOLD {
        return f64::INFINITY;
    }
    let mut product = 1.0;
    let mut factor = 2.0;
    while factor <= n {
        product *= factor;
        factor += 1.0;
    }
    product
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = CalculationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CalculationError::InvalidOperationType {
                tag: tag.to_owned(),
            })
    }
}

/// Look up `tag` and apply the operation to `(a, b)`.
///
/// # Errors
/// Returns [`CalculationError::InvalidOperationType`] for an unknown tag and
/// otherwise whatever [`CalculationType::apply`] reports.
///
/// # Examples
/// ```
/// use calculator_backend::domain::compute;
///
/// assert_eq!(compute(5.0, 3.0, "add"), Ok(8.0));
/// assert_eq!(compute(10.0, 7.0, "ABSDIFF"), Ok(3.0));
/// assert!(compute(1.0, 2.0, "xyz").is_err());
/// ```
pub fn compute(a: f64, b: f64, tag: &str) -> Result<f64, CalculationError> {
    tag.parse::<CalculationType>()?.apply(a, b)
}

#[cfg(test)]
mod tests {
    //! Dispatcher scenarios; algebraic properties live in `tests/calculation_properties.rs`.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, 3.0, "add", 8.0)]
    #[case(5.0, 3.0, "sub", 2.0)]
    #[case(5.0, 3.0, "mul", 15.0)]
    #[case(6.0, 3.0, "div", 2.0)]
    #[case(2.0, 3.0, "power", 8.0)]
    #[case(10.0, 3.0, "mod", 1.0)]
    #[case(-7.0, 3.0, "mod", 2.0)]
    #[case(7.0, -3.0, "mod", -2.0)]
    #[case(10.0, 3.0, "floordiv", 3.0)]
    #[case(-7.0, 2.0, "floordiv", -4.0)]
    #[case(9.0, 0.0, "sqrt", 3.0)]
    #[case(5.0, 0.0, "factorial", 120.0)]
    #[case(0.0, 0.0, "factorial", 1.0)]
    #[case(10.0, 7.0, "absdiff", 3.0)]
    #[case(7.0, 10.0, "absdiff", 3.0)]
    fn computes_expected_result(
        #[case] a: f64,
        #[case] b: f64,
        #[case] tag: &str,
        #[case] expected: f64,
    ) {
        let result = compute(a, b, tag).expect("valid operands");
        assert_eq!(result, expected, "{tag}({a}, {b})");
    }

    #[rstest]
    #[case(100.0, 10.0, 2.0)]
    #[case(8.0, 2.0, 3.0)]
    #[case(1.0, 5.0, 0.0)]
    fn log_is_approximately_correct(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
        let result = compute(a, b, "log").expect("valid operands");
        assert!((result - expected).abs() < 1e-9, "log_{b}({a}) = {result}");
    }

    #[rstest]
    #[case("ADD")]
    #[case("Add")]
    #[case("aDd")]
    fn tags_are_case_insensitive(#[case] tag: &str) {
        assert_eq!(compute(1.0, 2.0, tag), Ok(3.0));
    }

    #[rstest]
    #[case("xyz")]
    #[case("")]
    #[case(" add")]
    #[case("division")]
    fn unknown_tags_fail(#[case] tag: &str) {
        let err = compute(1.0, 2.0, tag).expect_err("unknown tag");
        assert_eq!(
            err,
            CalculationError::InvalidOperationType {
                tag: tag.to_owned()
            }
        );
        assert_eq!(err.to_string(), format!("Invalid calculation type: {tag}"));
    }

    #[rstest]
    #[case("div", "Division by zero is not allowed.")]
    #[case("mod", "Modulus by zero is not allowed.")]
    #[case("floordiv", "Floor division by zero is not allowed.")]
    fn zero_divisor_fails(#[case] tag: &str, #[case] message: &str) {
        let err = compute(5.0, 0.0, tag).expect_err("zero divisor");
        assert!(matches!(err, CalculationError::DivisionByZero { .. }));
        assert_eq!(err.to_string(), message);
        assert_eq!(err.field(), "b");
    }

    #[rstest]
    #[case(-1.0, 0.0, "sqrt", DomainViolation::NegativeRadicand)]
    #[case(0.0, 10.0, "log", DomainViolation::NonPositiveLogArgument)]
    #[case(-5.0, 10.0, "log", DomainViolation::NonPositiveLogArgument)]
    #[case(10.0, 1.0, "log", DomainViolation::InvalidLogBase)]
    #[case(10.0, 0.0, "log", DomainViolation::InvalidLogBase)]
    #[case(10.0, -2.0, "log", DomainViolation::InvalidLogBase)]
    #[case(-1.0, 0.0, "factorial", DomainViolation::NonNaturalFactorial)]
    #[case(2.5, 0.0, "factorial", DomainViolation::NonNaturalFactorial)]
    fn out_of_domain_operands_fail(
        #[case] a: f64,
        #[case] b: f64,
        #[case] tag: &str,
        #[case] expected: DomainViolation,
    ) {
        let err = compute(a, b, tag).expect_err("out of domain");
        match err {
            CalculationError::InvalidDomain { violation, .. } => assert_eq!(violation, expected),
            other => panic!("expected InvalidDomain, got {other:?}"),
        }
    }

    #[rstest]
    fn log_checks_argument_before_base() {
        let err = compute(0.0, 1.0, "log").expect_err("both invalid");
        assert_eq!(err.to_string(), "Logarithm is only defined for a > 0.");
    }

    #[rstest]
    fn power_follows_native_semantics_for_negative_bases() {
        let result = compute(-8.0, 1.0 / 3.0, "power").expect("power has no precondition");
        assert!(result.is_nan());
    }

    #[rstest]
    fn sqrt_of_negative_zero_is_positive_zero() {
        let root = compute(-0.0, 0.0, "sqrt").expect("zero is in range");
        assert_eq!(root, 0.0);
        assert!(root.is_sign_positive());
    }

    #[rstest]
    fn factorial_saturates_beyond_f64_range() {
        let result = compute(171.0, 0.0, "factorial").expect("integral operand");
        assert!(result.is_infinite());
        let largest = compute(170.0, 0.0, "factorial").expect("integral operand");
        assert!(largest.is_finite());
    }

    #[rstest]
    fn every_type_round_trips_through_its_tag() {
        for kind in CalculationType::ALL {
            assert_eq!(kind.as_str().parse::<CalculationType>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[rstest]
    fn serialises_as_lower_case_tag() {
        let value = serde_json::to_value(CalculationType::FloorDiv).expect("serialise");
        assert_eq!(value, serde_json::json!("floordiv"));
    }
}
