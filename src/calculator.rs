//! Monthly payment formulas.
//!
//! Inputs are assumed to have passed validation already; nothing here clamps
//! or rejects values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Repayment,
    InterestOnly,
}

impl PaymentMethod {
    pub fn toggled(self) -> Self {
        match self {
            PaymentMethod::Repayment => PaymentMethod::InterestOnly,
            PaymentMethod::InterestOnly => PaymentMethod::Repayment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub monthly_payment: f64,
    pub total_repaid: f64,
}

/// Level monthly payment of an amortizing loan.
///
/// A zero rate falls back to straight-line repayment, `amount / months`.
pub fn calculate_repay(amount: f64, years: f64, annual_rate_percent: f64) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let num_payments = years * 12.0;

    if monthly_rate == 0.0 {
        return amount / num_payments;
    }

    let growth = (1.0 + monthly_rate).powf(num_payments);
    amount * (monthly_rate * growth) / (growth - 1.0)
}

/// Monthly payment when only interest is paid.
pub fn calculate_interest(amount: f64, annual_rate_percent: f64) -> f64 {
    amount * (annual_rate_percent / 100.0 / 12.0)
}

/// Monthly payment and total over the whole term for the chosen method.
pub fn calculate(
    method: PaymentMethod,
    amount: f64,
    years: f64,
    annual_rate_percent: f64,
) -> CalculationResult {
    let monthly_payment = match method {
        PaymentMethod::Repayment => calculate_repay(amount, years, annual_rate_percent),
        PaymentMethod::InterestOnly => calculate_interest(amount, annual_rate_percent),
    };

    CalculationResult {
        monthly_payment,
        total_repaid: monthly_payment * years * 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn repayment_golden_scenario() {
        let monthly = calculate_repay(200_000.0, 25.0, 5.25);
        assert_eq!(monthly.round(), 1198.0);
        assert!((monthly - 1198.4954).abs() < 1e-3);
    }

    #[test]
    fn zero_rate_is_straight_line() {
        assert_close(calculate_repay(120_000.0, 10.0, 0.0), 1_000.0);
        assert_close(calculate_repay(200_000.0, 25.0, 0.0), 200_000.0 / 300.0);
    }

    #[test]
    fn repayment_covers_more_than_principal() {
        let monthly = calculate_repay(100_000.0, 30.0, 6.5);
        assert!(monthly * 360.0 > 100_000.0);
        assert!((monthly - 632.07).abs() < 0.01);
    }

    #[test]
    fn interest_only_payment() {
        assert_close(calculate_interest(200_000.0, 5.25), 875.0);
        assert_close(calculate_interest(200_000.0, 0.0), 0.0);
    }

    #[test]
    fn totals_scale_with_term() {
        let repay = calculate(PaymentMethod::Repayment, 200_000.0, 25.0, 5.25);
        assert_close(repay.total_repaid, repay.monthly_payment * 300.0);

        let interest = calculate(PaymentMethod::InterestOnly, 200_000.0, 25.0, 5.25);
        assert_close(interest.monthly_payment, 875.0);
        assert_close(interest.total_repaid, 262_500.0);
    }

    #[test]
    fn toggling_method() {
        assert_eq!(PaymentMethod::Repayment.toggled(), PaymentMethod::InterestOnly);
        assert_eq!(PaymentMethod::InterestOnly.toggled(), PaymentMethod::Repayment);
    }
}
