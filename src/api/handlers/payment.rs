//! Handler for the loan payment estimator.

use axum::Json;
use tracing::debug;

use crate::api::dto::payment::{PaymentRequest, PaymentResponse};
use crate::domain::finance::{LoanTerms, amortization_schedule, calculate_payment};
use crate::error::AppError;

/// Estimates the monthly payment for a vehicle loan.
///
/// # Endpoint
///
/// `POST /api/calculate-payment`
///
/// # Request Body
///
/// ```json
/// {
///   "vehiclePrice": 20000,
///   "downPayment": 2000,
///   "tradeInValue": 0,
///   "interestRate": 6,
///   "loanTermMonths": 60,
///   "includeSchedule": false
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with an `InvalidInput` detail naming the offending field for
/// negative or non-finite amounts and non-integer or out-of-range terms.
pub async fn calculate_payment_handler(
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let terms = LoanTerms::from(&payload);

    let result = calculate_payment(&terms)?;
    let schedule = if payload.include_schedule {
        Some(amortization_schedule(&terms)?)
    } else {
        None
    };

    metrics::counter!("payments_calculated_total").increment(1);
    debug!(
        loan_amount = result.loan_amount,
        months = result.loan_term_months,
        "Payment estimated"
    );

    Ok(Json(PaymentResponse::new(result, schedule)))
}
