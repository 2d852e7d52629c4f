//! Payment redirect handling.
//!
//! The payment provider redirects back with query parameters; success
//! parameters are validated before anything is forwarded to the backend.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use crate::net::types::{PaymentConfirmRequest, PaymentConfirmation};

/// Confirmation progress on the success page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaymentState {
    #[default]
    Confirming,
    Confirmed(PaymentConfirmation),
    Failed(String),
}

/// Provider-reported failure shown on the fail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentFailure {
    pub code: String,
    pub message: String,
}

/// Build the confirm request from the success redirect query.
///
/// # Errors
///
/// Returns a user-facing message when a parameter is missing or malformed.
pub fn parse_payment_success<F>(query: F) -> Result<PaymentConfirmRequest, &'static str>
where
    F: Fn(&str) -> Option<String>,
{
    let payment_key = non_empty(query("paymentKey")).ok_or("결제 정보가 올바르지 않아요.")?;
    let order_id = non_empty(query("orderId")).ok_or("주문 번호가 없어요.")?;
    let amount = non_empty(query("amount"))
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|amount| *amount > 0)
        .ok_or("결제 금액이 올바르지 않아요.")?;
    Ok(PaymentConfirmRequest { payment_key, order_id, amount })
}

/// Read the fail redirect query, defaulting blank fields.
pub fn parse_payment_failure<F>(query: F) -> PaymentFailure
where
    F: Fn(&str) -> Option<String>,
{
    PaymentFailure {
        code: non_empty(query("code")).unwrap_or_else(|| "UNKNOWN_ERROR".to_owned()),
        message: non_empty(query("message")).unwrap_or_else(|| "결제에 실패했어요.".to_owned()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
