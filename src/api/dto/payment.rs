//! DTOs for the payment estimator endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::finance::{AmortizationEntry, LoanTerms, PaymentResult};

/// Request body for `POST /api/calculate-payment`.
///
/// `downPayment` and `tradeInValue` default to zero. `loanTermMonths` is
/// accepted as any JSON number; fractional and non-positive terms are
/// rejected by the calculator with a field-level error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub vehicle_price: f64,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default)]
    pub trade_in_value: f64,
    pub interest_rate: f64,
    pub loan_term_months: f64,
    /// When true, the response carries the month-by-month schedule.
    #[serde(default)]
    pub include_schedule: bool,
}

impl From<&PaymentRequest> for LoanTerms {
    fn from(req: &PaymentRequest) -> Self {
        LoanTerms {
            vehicle_price: req.vehicle_price,
            down_payment: req.down_payment,
            trade_in_value: req.trade_in_value,
            interest_rate: req.interest_rate,
            loan_term_months: req.loan_term_months,
        }
    }
}

/// Payment breakdown returned to the estimator widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub loan_term_months: u32,
    pub monthly_payment: f64,
    pub total_payments: f64,
    pub total_interest: f64,
    pub down_payment_percent: String,
    pub apr_estimate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

impl From<AmortizationEntry> for ScheduleEntry {
    fn from(e: AmortizationEntry) -> Self {
        ScheduleEntry {
            month: e.month,
            payment: e.payment,
            principal: e.principal,
            interest: e.interest,
            balance: e.balance,
        }
    }
}

impl PaymentResponse {
    pub fn new(result: PaymentResult, schedule: Option<Vec<AmortizationEntry>>) -> Self {
        PaymentResponse {
            vehicle_price: result.vehicle_price,
            down_payment: result.down_payment,
            trade_in_value: result.trade_in_value,
            loan_amount: result.loan_amount,
            interest_rate: result.interest_rate,
            loan_term_months: result.loan_term_months,
            monthly_payment: result.monthly_payment,
            total_payments: result.total_payments,
            total_interest: result.total_interest,
            down_payment_percent: result.down_payment_percent,
            apr_estimate: result.apr_estimate,
            schedule: schedule.map(|entries| entries.into_iter().map(Into::into).collect()),
        }
    }
}
