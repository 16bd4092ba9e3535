//! Loan payment estimation and amortization.
//!
//! Everything here is pure arithmetic over `f64`. Intermediate values keep full
//! precision; monetary outputs are rounded to cents only when a
//! [`PaymentResult`] or [`AmortizationEntry`] is assembled.
//!
//! # Formula
//!
//! With `P` the financed amount, `r` the monthly rate and `n` the term:
//!
//! ```text
//! payment = P * r * (1 + r)^n / ((1 + r)^n - 1)     (r > 0)
//! payment = P / n                                   (r = 0)
//! ```

use super::InvalidInput;

/// Longest accepted loan term (50 years).
pub const MAX_LOAN_TERM_MONTHS: u32 = 600;

/// Largest accepted price, down payment, or trade-in value.
pub const MAX_AMOUNT: f64 = 1e12;

/// Largest accepted annual percentage rate.
pub const MAX_INTEREST_RATE: f64 = 100.0;

/// Raw loan parameters as received from a client.
///
/// `loan_term_months` is kept as `f64` so that fractional or negative terms
/// surface as [`InvalidInput`] instead of a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    /// Annual percentage rate, e.g. `5.99`.
    pub interest_rate: f64,
    pub loan_term_months: f64,
}

/// Payment breakdown for a set of [`LoanTerms`]. Monetary fields are in cents
/// precision.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub loan_term_months: u32,
    pub monthly_payment: f64,
    pub total_payments: f64,
    pub total_interest: f64,
    /// Down payment as a share of the vehicle price, one decimal place.
    pub down_payment_percent: String,
    pub apr_estimate: f64,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Validated loan with the derived quantities at full precision.
#[derive(Debug, Clone, Copy)]
struct Loan {
    vehicle_price: f64,
    down_payment: f64,
    trade_in_value: f64,
    interest_rate: f64,
    principal: f64,
    monthly_rate: f64,
    months: u32,
}

impl Loan {
    fn from_terms(terms: &LoanTerms) -> Result<Self, InvalidInput> {
        let vehicle_price = amount("vehiclePrice", terms.vehicle_price, MAX_AMOUNT)?;
        let down_payment = amount("downPayment", terms.down_payment, MAX_AMOUNT)?;
        let trade_in_value = amount("tradeInValue", terms.trade_in_value, MAX_AMOUNT)?;
        let interest_rate = amount("interestRate", terms.interest_rate, MAX_INTEREST_RATE)?;
        let months = loan_term(terms.loan_term_months)?;

        Ok(Self {
            vehicle_price,
            down_payment,
            trade_in_value,
            interest_rate,
            principal: (vehicle_price - down_payment - trade_in_value).max(0.0),
            monthly_rate: interest_rate / 100.0 / 12.0,
            months,
        })
    }

    fn monthly_payment(&self) -> f64 {
        if self.principal == 0.0 {
            return 0.0;
        }

        let n = f64::from(self.months);
        if self.monthly_rate == 0.0 {
            return self.principal / n;
        }

        // 1 - (1 + r)^-n, computed without cancellation for small r. It lies in
        // (0, 1] for every r > 0, so the quotient stays finite.
        let discount = -(-n * self.monthly_rate.ln_1p()).exp_m1();
        if discount == 0.0 {
            return self.principal / n;
        }

        self.principal * self.monthly_rate / discount
    }
}

/// Computes the monthly payment, total paid, and total interest for a loan.
///
/// # Errors
///
/// Returns [`InvalidInput`] if any amount or the rate is negative, not
/// finite, or above [`MAX_AMOUNT`] / [`MAX_INTEREST_RATE`], or if the term is
/// not a whole number in `1..=600`.
///
/// # Examples
///
/// ```
/// use dealership::domain::finance::{calculate_payment, LoanTerms};
///
/// let result = calculate_payment(&LoanTerms {
///     vehicle_price: 20_000.0,
///     down_payment: 2_000.0,
///     trade_in_value: 0.0,
///     interest_rate: 6.0,
///     loan_term_months: 60.0,
/// })
/// .unwrap();
///
/// assert_eq!(result.loan_amount, 18_000.0);
/// assert_eq!(result.monthly_payment, 347.99);
/// ```
pub fn calculate_payment(terms: &LoanTerms) -> Result<PaymentResult, InvalidInput> {
    let loan = Loan::from_terms(terms)?;

    let monthly_payment = loan.monthly_payment();
    let total_payments = monthly_payment * f64::from(loan.months);
    let total_interest = (total_payments - loan.principal).max(0.0);
    ensure_finite(&[monthly_payment, total_payments, total_interest])?;

    let down_payment_percent = if loan.vehicle_price > 0.0 {
        format!("{:.1}", loan.down_payment / loan.vehicle_price * 100.0)
    } else {
        "0.0".to_string()
    };

    Ok(PaymentResult {
        vehicle_price: round_cents(loan.vehicle_price),
        down_payment: round_cents(loan.down_payment),
        trade_in_value: round_cents(loan.trade_in_value),
        loan_amount: round_cents(loan.principal),
        interest_rate: loan.interest_rate,
        loan_term_months: loan.months,
        monthly_payment: round_cents(monthly_payment),
        total_payments: round_cents(total_payments),
        total_interest: round_cents(total_interest),
        down_payment_percent,
        apr_estimate: loan.interest_rate,
    })
}

/// Builds the month-by-month amortization schedule for a loan.
///
/// Balances are carried at full precision and rounded per entry. The last
/// month absorbs any floating-point residue so the final balance is exactly
/// zero. A zero loan amount yields an empty schedule.
///
/// # Errors
///
/// Same validation as [`calculate_payment`].
pub fn amortization_schedule(terms: &LoanTerms) -> Result<Vec<AmortizationEntry>, InvalidInput> {
    let loan = Loan::from_terms(terms)?;
    if loan.principal == 0.0 {
        return Ok(Vec::new());
    }

    let payment = loan.monthly_payment();
    ensure_finite(&[payment])?;
    let mut balance = loan.principal;
    let mut schedule = Vec::with_capacity(loan.months as usize);

    for month in 1..=loan.months {
        let interest = balance * loan.monthly_rate;
        let (principal, paid) = if month == loan.months {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };
        balance -= principal;

        schedule.push(AmortizationEntry {
            month,
            payment: round_cents(paid),
            principal: round_cents(principal),
            interest: round_cents(interest),
            balance: if month == loan.months {
                0.0
            } else {
                round_cents(balance)
            },
        });
    }

    Ok(schedule)
}

fn amount(field: &'static str, value: f64, max: f64) -> Result<f64, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::new(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(InvalidInput::new(field, "must not be negative"));
    }
    if value > max {
        return Err(InvalidInput::new(field, format!("must not exceed {max}")));
    }
    Ok(value)
}

fn loan_term(value: f64) -> Result<u32, InvalidInput> {
    const FIELD: &str = "loanTermMonths";

    if !value.is_finite() || value.fract() != 0.0 {
        return Err(InvalidInput::new(FIELD, "must be a whole number of months"));
    }
    if value <= 0.0 {
        return Err(InvalidInput::new(FIELD, "must be greater than zero"));
    }
    if value > f64::from(MAX_LOAN_TERM_MONTHS) {
        return Err(InvalidInput::new(
            FIELD,
            format!("must not exceed {MAX_LOAN_TERM_MONTHS} months"),
        ));
    }

    Ok(value as u32)
}

fn ensure_finite(values: &[f64]) -> Result<(), InvalidInput> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(InvalidInput::new("loanAmount", "is out of the computable range"))
    }
}

/// Rounds half away from zero to two decimal places.
fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid emitting -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(price: f64, down: f64, trade: f64, rate: f64, months: f64) -> LoanTerms {
        LoanTerms {
            vehicle_price: price,
            down_payment: down,
            trade_in_value: trade,
            interest_rate: rate,
            loan_term_months: months,
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_standard_sixty_month_loan() {
        let result = calculate_payment(&terms(20_000.0, 2_000.0, 0.0, 6.0, 60.0)).unwrap();

        assert_eq!(result.loan_amount, 18_000.0);
        assert_eq!(result.loan_term_months, 60);
        assert_eq!(result.monthly_payment, 347.99);
        assert_eq!(result.total_payments, 20_879.43);
        assert_eq!(result.total_interest, 2_879.43);
        assert_eq!(result.down_payment_percent, "10.0");
        assert_eq!(result.apr_estimate, 6.0);
    }

    #[test]
    fn test_totals_use_unrounded_monthly_payment() {
        let result = calculate_payment(&terms(20_000.0, 2_000.0, 0.0, 6.0, 60.0)).unwrap();

        // 347.99 * 60 would be 20879.40
        assert_ne!(result.total_payments, result.monthly_payment * 60.0);
    }

    #[test]
    fn test_loan_amount_subtracts_down_payment_and_trade_in() {
        let result = calculate_payment(&terms(30_000.0, 5_000.0, 7_500.0, 4.5, 48.0)).unwrap();
        assert_eq!(result.loan_amount, 17_500.0);
    }

    #[test]
    fn test_loan_amount_clamped_at_zero() {
        let result = calculate_payment(&terms(10_000.0, 8_000.0, 5_000.0, 7.0, 36.0)).unwrap();

        assert_eq!(result.loan_amount, 0.0);
        assert_eq!(result.monthly_payment, 0.0);
        assert_eq!(result.total_payments, 0.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = calculate_payment(&terms(24_000.0, 0.0, 0.0, 0.0, 48.0)).unwrap();

        assert_eq!(result.monthly_payment, 500.0);
        assert_eq!(result.total_payments, 24_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_rate_payments_cover_loan_within_rounding() {
        let result = calculate_payment(&terms(10_000.0, 0.0, 0.0, 0.0, 72.0)).unwrap();

        assert_close(result.monthly_payment * 72.0, result.loan_amount, 72.0 * 0.005);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_tiny_rate_approaches_zero_rate_payment() {
        let result = calculate_payment(&terms(12_000.0, 0.0, 0.0, 1e-12, 12.0)).unwrap();
        assert_eq!(result.monthly_payment, 1_000.0);
    }

    #[test]
    fn test_zero_vehicle_price_percent() {
        let result = calculate_payment(&terms(0.0, 0.0, 0.0, 5.0, 60.0)).unwrap();
        assert_eq!(result.down_payment_percent, "0.0");
        assert_eq!(result.monthly_payment, 0.0);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let cases = [
            (terms(-1.0, 0.0, 0.0, 5.0, 60.0), "vehiclePrice"),
            (terms(1.0, -1.0, 0.0, 5.0, 60.0), "downPayment"),
            (terms(1.0, 0.0, -1.0, 5.0, 60.0), "tradeInValue"),
            (terms(1.0, 0.0, 0.0, -0.1, 60.0), "interestRate"),
        ];

        for (input, field) in cases {
            let err = calculate_payment(&input).unwrap_err();
            assert_eq!(err.field, field);
        }
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(calculate_payment(&terms(f64::NAN, 0.0, 0.0, 5.0, 60.0)).is_err());
        assert!(calculate_payment(&terms(1.0, f64::INFINITY, 0.0, 5.0, 60.0)).is_err());
        assert!(calculate_payment(&terms(1.0, 0.0, 0.0, f64::NAN, 60.0)).is_err());
    }

    #[test]
    fn test_invalid_terms_rejected() {
        for months in [0.0, -12.0, 60.5, f64::NAN, 601.0] {
            let err = calculate_payment(&terms(20_000.0, 0.0, 0.0, 5.0, months)).unwrap_err();
            assert_eq!(err.field, "loanTermMonths");
        }
    }

    #[test]
    fn test_maximum_term_accepted() {
        assert!(calculate_payment(&terms(20_000.0, 0.0, 0.0, 5.0, 600.0)).is_ok());
    }

    #[test]
    fn test_schedule_length_and_final_balance() {
        let schedule = amortization_schedule(&terms(20_000.0, 2_000.0, 0.0, 6.0, 60.0)).unwrap();

        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule[0].interest, 90.0);
        assert_eq!(schedule[0].principal, 257.99);
        assert_eq!(schedule[0].balance, 17_742.01);
        assert_eq!(schedule[59].balance, 0.0);
    }

    #[test]
    fn test_schedule_principal_sums_to_loan_amount() {
        let schedule = amortization_schedule(&terms(15_500.0, 500.0, 0.0, 3.9, 36.0)).unwrap();

        let principal: f64 = schedule.iter().map(|e| e.principal).sum();
        assert_close(principal, 15_000.0, 0.36 / 2.0);
    }

    #[test]
    fn test_schedule_interest_matches_total_interest() {
        let input = terms(25_000.0, 3_000.0, 1_000.0, 7.25, 72.0);
        let result = calculate_payment(&input).unwrap();
        let schedule = amortization_schedule(&input).unwrap();

        let interest: f64 = schedule.iter().map(|e| e.interest).sum();
        assert_close(interest, result.total_interest, 0.5);
    }

    #[test]
    fn test_schedule_empty_when_nothing_financed() {
        let schedule = amortization_schedule(&terms(5_000.0, 5_000.0, 0.0, 6.0, 60.0)).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_round_cents_never_negative_zero() {
        assert!(round_cents(-0.0001).is_sign_positive());
        assert_eq!(round_cents(1.005_000_1), 1.01);
        assert_eq!(round_cents(2.344), 2.34);
    }

    #[test]
    fn test_rate_above_cap_is_invalid_input() {
        let err = calculate_payment(&terms(20_000.0, 0.0, 0.0, 100_000.0, 600.0)).unwrap_err();
        assert_eq!(err.field, "interestRate");
    }

    #[test]
    fn test_amount_above_cap_is_invalid_input() {
        let err = calculate_payment(&terms(1e307, 0.0, 0.0, 6.0, 60.0)).unwrap_err();
        assert_eq!(err.field, "vehiclePrice");

        let err = calculate_payment(&terms(20_000.0, 0.0, 2e12, 6.0, 60.0)).unwrap_err();
        assert_eq!(err.field, "tradeInValue");
    }

    #[test]
    fn test_extreme_accepted_inputs_stay_finite() {
        let result =
            calculate_payment(&terms(MAX_AMOUNT, 0.0, 0.0, MAX_INTEREST_RATE, 600.0)).unwrap();

        assert!(result.monthly_payment.is_finite());
        assert!(result.total_payments.is_finite());
        assert!(result.total_interest.is_finite());
        assert!(result.total_interest > 0.0);
        // Interest-only limit: P * r for a very long, very expensive loan.
        assert_close(result.monthly_payment, MAX_AMOUNT * MAX_INTEREST_RATE / 1200.0, 1.0);

        let schedule =
            amortization_schedule(&terms(MAX_AMOUNT, 0.0, 0.0, MAX_INTEREST_RATE, 600.0)).unwrap();
        assert!(schedule.iter().all(|e| e.payment.is_finite() && e.balance.is_finite()));
        assert_eq!(schedule.last().unwrap().balance, 0.0);
    }
}
