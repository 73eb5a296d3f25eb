use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};
use crate::session::{Field, LoanInputs};

/// Per-field "required" flags raised by a submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub amount_missing: bool,
    pub term_missing: bool,
    pub rate_missing: bool,
    pub method_missing: bool,
}

impl ValidationErrors {
    pub fn any(&self) -> bool {
        self.amount_missing || self.term_missing || self.rate_missing || self.method_missing
    }

    pub fn is_missing(&self, field: Field) -> bool {
        match field {
            Field::Amount => self.amount_missing,
            Field::Term => self.term_missing,
            Field::Rate => self.rate_missing,
            Field::Method => self.method_missing,
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Amount => self.amount_missing = false,
            Field::Term => self.term_missing = false,
            Field::Rate => self.rate_missing = false,
            Field::Method => self.method_missing = false,
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.missing_fields().iter().map(|field| field.name()).collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

/// Flags every empty text field and an unselected payment method.
pub fn validate(inputs: &LoanInputs) -> ValidationErrors {
    ValidationErrors {
        amount_missing: inputs.amount.is_empty(),
        term_missing: inputs.term.is_empty(),
        rate_missing: inputs.rate.is_empty(),
        method_missing: inputs.method.is_none(),
    }
}

/// Presence check that fails with the full set of missing flags.
pub fn require_all(inputs: &LoanInputs) -> Result<()> {
    let errors = validate(inputs);
    if errors.any() {
        return Err(CalculatorError::MissingInput(errors));
    }
    Ok(())
}

/// Magnitude check applied to parsed values right before calculating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeGuard {
    /// Rejects only when amount, term and rate are all non-positive at once.
    #[default]
    AllNonPositive,
    /// Rejects when any one of them is non-positive.
    AnyNonPositive,
}

impl MagnitudeGuard {
    // `!(x > 0.0)` also treats NaN as non-positive.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn check(self, amount: f64, term: f64, rate: f64) -> Result<()> {
        let non_positive = [!(amount > 0.0), !(term > 0.0), !(rate > 0.0)];
        let rejected = match self {
            MagnitudeGuard::AllNonPositive => non_positive.iter().all(|&flag| flag),
            MagnitudeGuard::AnyNonPositive => non_positive.iter().any(|&flag| flag),
        };

        if rejected {
            Err(CalculatorError::InvalidMagnitude)
        } else {
            Ok(())
        }
    }
}
