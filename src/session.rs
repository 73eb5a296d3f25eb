//! Form session: inputs, validation flags and the last result, advanced by a
//! single transition function over a closed set of events.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculator::{self, CalculationResult, PaymentMethod};
use crate::error::{CalculatorError, Result};
use crate::sanitizer::{
    accept_keystroke, accept_term_keystroke, format_amount, format_for_display, parse_field,
    strip_grouping_separators,
};
use crate::validator::{require_all, validate, MagnitudeGuard, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Term,
    Rate,
    Method,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Amount, Field::Term, Field::Rate, Field::Method];

    pub fn name(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Term => "term",
            Field::Rate => "rate",
            Field::Method => "method",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Amount => Field::Term,
            Field::Term => Field::Rate,
            Field::Rate => Field::Method,
            Field::Method => Field::Amount,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Field::Amount => Field::Method,
            Field::Term => Field::Amount,
            Field::Rate => Field::Term,
            Field::Method => Field::Rate,
        }
    }
}

/// Raw form values. Text fields always hold canonical field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub amount: String,
    pub term: String,
    pub rate: String,
    pub method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Empty,
    Editing,
    SubmittedValid,
    SubmittedInvalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Amount(String),
    Term(String),
    Rate(String),
    Method(PaymentMethod),
    Submit,
    Clear,
}

/// Why the last submit attempt produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitFailure {
    MissingInput,
    InvalidMagnitude,
    InvalidNumber(&'static str),
}

impl SubmitFailure {
    fn from_error(err: &CalculatorError) -> Self {
        match err {
            CalculatorError::MissingInput(_) => SubmitFailure::MissingInput,
            CalculatorError::InvalidNumber { field, .. } => SubmitFailure::InvalidNumber(*field),
            // compute yields nothing else besides a magnitude rejection
            _ => SubmitFailure::InvalidMagnitude,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub inputs: LoanInputs,
    pub errors: ValidationErrors,
    pub result: Option<CalculationResult>,
    pub failure: Option<SubmitFailure>,
    guard: MagnitudeGuard,
}

impl Session {
    pub fn new(guard: MagnitudeGuard) -> Self {
        Self {
            guard,
            ..Default::default()
        }
    }

    pub fn guard(&self) -> MagnitudeGuard {
        self.guard
    }

    /// Advances the session by one event.
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::Amount(raw) => {
                let candidate = strip_grouping_separators(&raw);
                let accepted = accept_keystroke(&self.inputs.amount, &candidate);
                log_rejection(Field::Amount, &self.inputs.amount, &candidate, &accepted);
                self.inputs.amount = accepted;
                self.mark_edited(Field::Amount);
            }
            Event::Term(raw) => {
                let accepted = accept_term_keystroke(&self.inputs.term, &raw);
                log_rejection(Field::Term, &self.inputs.term, &raw, &accepted);
                self.inputs.term = accepted;
                self.mark_edited(Field::Term);
            }
            Event::Rate(raw) => {
                let accepted = accept_keystroke(&self.inputs.rate, &raw);
                log_rejection(Field::Rate, &self.inputs.rate, &raw, &accepted);
                self.inputs.rate = accepted;
                self.mark_edited(Field::Rate);
            }
            Event::Method(method) => {
                self.inputs.method = Some(method);
                self.mark_edited(Field::Method);
            }
            Event::Submit => return self.submit(),
            Event::Clear => {
                debug!("Clearing session");
                return Session::new(self.guard);
            }
        }
        self
    }

    /// In-place variant of [`Session::apply`].
    pub fn dispatch(&mut self, event: Event) {
        *self = std::mem::take(self).apply(event);
    }

    fn mark_edited(&mut self, field: Field) {
        self.errors.clear(field);
        self.failure = None;
        self.state = SessionState::Editing;
    }

    fn submit(mut self) -> Self {
        self.errors = validate(&self.inputs);

        match compute(&self.inputs, self.guard) {
            Ok(result) => {
                info!(
                    monthly_payment = result.monthly_payment,
                    total_repaid = result.total_repaid,
                    "Calculated repayments"
                );
                self.result = Some(result);
                self.failure = None;
                self.state = SessionState::SubmittedValid;
            }
            Err(err) => {
                warn!("Submit rejected: {}", err);
                self.failure = Some(SubmitFailure::from_error(&err));
                self.state = SessionState::SubmittedInvalid;
            }
        }
        self
    }

    /// Field text as it should be shown; the amount is grouped in thousands.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Amount => format_for_display(&self.inputs.amount),
            Field::Term => self.inputs.term.clone(),
            Field::Rate => self.inputs.rate.clone(),
            Field::Method => String::new(),
        }
    }

    /// Monthly payment and total repaid, rounded and grouped for display.
    pub fn formatted_result(&self) -> Option<(String, String)> {
        self.result.map(|result| {
            (
                format_amount(result.monthly_payment),
                format_amount(result.total_repaid),
            )
        })
    }
}

fn log_rejection(field: Field, current: &str, candidate: &str, accepted: &str) {
    if accepted == current && accepted != candidate {
        debug!(field = field.name(), candidate, "Rejected keystroke");
    }
}

/// Validates and calculates in one step, as a submit does.
pub fn compute(inputs: &LoanInputs, guard: MagnitudeGuard) -> Result<CalculationResult> {
    require_all(inputs)?;
    let Some(method) = inputs.method else {
        return Err(CalculatorError::MissingInput(validate(inputs)));
    };

    let amount = parse_field(Field::Amount.name(), &inputs.amount)?;
    let term = parse_field(Field::Term.name(), &inputs.term)?;
    let rate = parse_field(Field::Rate.name(), &inputs.rate)?;

    guard.check(amount, term, rate)?;

    Ok(calculator::calculate(method, amount, term, rate))
}
