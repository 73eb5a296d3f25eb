pub mod calculator;
pub mod config;
pub mod error;
pub mod locale;
pub mod logger;
pub mod sanitizer;
pub mod session;
pub mod validator;

pub use calculator::{calculate, calculate_interest, calculate_repay, CalculationResult, PaymentMethod};
pub use config::CliConfig;
pub use error::{CalculatorError, Result};
pub use locale::{Locale, LocaleBundle};
pub use session::{Event, Field, LoanInputs, Session, SessionState, SubmitFailure};
pub use validator::{validate, MagnitudeGuard, ValidationErrors};
