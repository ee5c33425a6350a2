//! Aggregate views over stored calculations.

use std::collections::BTreeMap;

use super::{Calculation, CalculationId, CalculationType};

/// Default number of rows returned by the recent listing.
pub const RECENT_DEFAULT: u32 = 10;
/// Upper bound for the recent listing.
pub const RECENT_MAX: u32 = 100;

/// Number of rows to return from the recent listing, clamped to
/// `1..=RECENT_MAX`.
///
/// # Examples
/// ```
/// use calculator_backend::domain::RecentLimit;
///
/// assert_eq!(RecentLimit::new(None).get(), 10);
/// assert_eq!(RecentLimit::new(Some(0)).get(), 1);
/// assert_eq!(RecentLimit::new(Some(500)).get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentLimit(u32);

impl RecentLimit {
    #[must_use]
    pub fn new(requested: Option<i64>) -> Self {
        let value = requested.map_or(i64::from(RECENT_DEFAULT), |raw| {
            raw.clamp(1, i64::from(RECENT_MAX))
        });
        Self(u32::try_from(value).unwrap_or(RECENT_DEFAULT))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for RecentLimit {
    fn default() -> Self {
        Self(RECENT_DEFAULT)
    }
}

/// Summary statistics over every stored calculation.
///
/// ## Invariants
/// - `counts_by_type` sums to `total_calculations`.
/// - Averages and `last_calculation_id` are `None` iff there are no records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub total_calculations: u64,
    pub counts_by_type: BTreeMap<CalculationType, u64>,
    pub average_a: Option<f64>,
    pub average_b: Option<f64>,
    pub last_calculation_id: Option<CalculationId>,
}

impl ReportSummary {
    /// Fold a full set of records into a summary.
    #[must_use]
    pub fn from_calculations<'a, I>(calculations: I) -> Self
    where
        I: IntoIterator<Item = &'a Calculation>,
    {
        let mut summary = Self::default();
        let mut sum_a = 0.0;
        let mut sum_b = 0.0;
        let mut newest: Option<&Calculation> = None;
        for calc in calculations {
            summary.total_calculations += 1;
            *summary.counts_by_type.entry(calc.kind()).or_default() += 1;
            sum_a += calc.a();
            sum_b += calc.b();
            if newest.is_none_or(|current| calc.created_at() >= current.created_at()) {
                newest = Some(calc);
            }
        }
        if summary.total_calculations > 0 {
            #[expect(clippy::cast_precision_loss, reason = "row counts fit comfortably")]
            let count = summary.total_calculations as f64;
            summary.average_a = Some(sum_a / count);
            summary.average_b = Some(sum_b / count);
        }
        summary.last_calculation_id = newest.map(Calculation::id);
        summary
    }

    /// Type with the highest count; ties go to the earliest tag.
    #[must_use]
    pub fn most_used_type(&self) -> Option<CalculationType> {
        self.counts_by_type
            .iter()
            .fold(None, |best: Option<(CalculationType, u64)>, (&kind, &count)| {
                match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((kind, count)),
                }
            })
            .map(|(kind, _)| kind)
    }
}
