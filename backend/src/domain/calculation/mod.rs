//! Calculation records and the arithmetic they are built from.
//!
//! A [`Calculation`] is only ever constructed from a [`CalculationInput`]
//! whose operands passed [`CalculationType::check_operands`], so a stored
//! `result` always equals `compute(a, b, type)` at the time of writing.

mod operation;

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use self::operation::{CalculationError, CalculationType, DomainViolation, compute};
use super::UserId;

/// Stable calculation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalculationId(Uuid);

impl CalculationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operands and operation of a calculation, checked against the operation's
/// preconditions.
///
/// # Examples
/// ```
/// use calculator_backend::domain::{CalculationInput, CalculationType};
///
/// let input = CalculationInput::try_from_parts(6.0, 3.0, "div").expect("valid");
/// assert_eq!(input.kind(), CalculationType::Div);
/// assert!(CalculationInput::try_from_parts(6.0, 0.0, "div").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    a: f64,
    b: f64,
    kind: CalculationType,
}

impl CalculationInput {
    /// Validate operands for an already parsed type.
    ///
    /// # Errors
    /// Returns the violated precondition.
    pub fn new(a: f64, b: f64, kind: CalculationType) -> Result<Self, CalculationError> {
        kind.check_operands(a, b)?;
        Ok(Self { a, b, kind })
    }

    /// Parse the type tag and validate operands.
    ///
    /// # Errors
    /// Returns [`CalculationError::InvalidOperationType`] for unknown tags and
    /// the violated precondition otherwise.
    pub fn try_from_parts(a: f64, b: f64, tag: &str) -> Result<Self, CalculationError> {
        Self::new(a, b, tag.parse()?)
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub fn kind(&self) -> CalculationType {
        self.kind
    }
}

/// Failures when turning an input into a stored record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationRecordError {
    /// A dispatcher precondition failed.
    #[error(transparent)]
    Operation(#[from] CalculationError),
    /// The operation succeeded but produced NaN or an infinity.
    #[error("Result is not a finite real number.")]
    NonFiniteResult { operation: CalculationType },
}

/// Fields of a calculation as persisted by a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCalculation {
    pub id: CalculationId,
    pub owner: Option<UserId>,
    pub a: f64,
    pub b: f64,
    pub kind: CalculationType,
    pub result: f64,
    pub created_at: DateTime<Utc>,
}

/// A persisted calculation with its cached result.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    id: CalculationId,
    owner: Option<UserId>,
    input: CalculationInput,
    result: f64,
    created_at: DateTime<Utc>,
}

fn evaluate(input: CalculationInput) -> Result<f64, CalculationRecordError> {
    let result = input.kind.apply(input.a, input.b)?;
    if !result.is_finite() {
        return Err(CalculationRecordError::NonFiniteResult {
            operation: input.kind,
        });
    }
    Ok(result)
}

impl Calculation {
    /// Compute the result and build a new record.
    ///
    /// # Errors
    /// Returns [`CalculationRecordError::NonFiniteResult`] when the operation
    /// overflows or leaves the real numbers.
    pub fn create(
        id: CalculationId,
        owner: Option<UserId>,
        input: CalculationInput,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CalculationRecordError> {
        let result = evaluate(input)?;
        Ok(Self {
            id,
            owner,
            input,
            result,
            created_at,
        })
    }

    /// Rebuild a record from storage without recomputing the result.
    ///
    /// # Errors
    /// Fails when the stored operands no longer satisfy their preconditions.
    pub fn restore(stored: StoredCalculation) -> Result<Self, CalculationError> {
        let StoredCalculation {
            id,
            owner,
            a,
            b,
            kind,
            result,
            created_at,
        } = stored;
        Ok(Self {
            id,
            owner,
            input: CalculationInput::new(a, b, kind)?,
            result,
            created_at,
        })
    }

    /// Replace the operands and recompute; identity, owner and creation time
    /// are kept.
    ///
    /// # Errors
    /// See [`Calculation::create`].
    pub fn with_input(self, input: CalculationInput) -> Result<Self, CalculationRecordError> {
        let result = evaluate(input)?;
        Ok(Self {
            input,
            result,
            ..self
        })
    }

    #[must_use]
    pub fn id(&self) -> CalculationId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    #[must_use]
    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.input.a
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.input.b
    }

    #[must_use]
    pub fn kind(&self) -> CalculationType {
        self.input.kind
    }

    #[must_use]
    pub fn result(&self) -> f64 {
        self.result
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&Calculation> for StoredCalculation {
    fn from(value: &Calculation) -> Self {
        Self {
            id: value.id,
            owner: value.owner.clone(),
            a: value.a(),
            b: value.b(),
            kind: value.kind(),
            result: value.result,
            created_at: value.created_at,
        }
    }
}
