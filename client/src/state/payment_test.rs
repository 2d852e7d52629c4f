use std::collections::HashMap;

use super::*;

fn query(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn success_query_builds_confirm_request() {
    let req = parse_payment_success(query(&[("paymentKey", "pk_1"), ("orderId", "order-9"), ("amount", "15000")]))
        .expect("valid");
    assert_eq!(req, PaymentConfirmRequest { payment_key: "pk_1".to_owned(), order_id: "order-9".to_owned(), amount: 15000 });
}

#[test]
fn success_query_rejects_missing_or_bad_amount() {
    assert!(parse_payment_success(query(&[("paymentKey", "pk"), ("orderId", "o")])).is_err());
    assert!(parse_payment_success(query(&[("paymentKey", "pk"), ("orderId", "o"), ("amount", "-5")])).is_err());
    assert!(parse_payment_success(query(&[("paymentKey", "pk"), ("orderId", "o"), ("amount", "1.5")])).is_err());
}

#[test]
fn success_query_rejects_blank_key() {
    let result = parse_payment_success(query(&[("paymentKey", " "), ("orderId", "o"), ("amount", "100")]));
    assert_eq!(result, Err("결제 정보가 올바르지 않아요."));
}

#[test]
fn failure_query_falls_back_to_defaults() {
    let failure = parse_payment_failure(query(&[("code", "PAY_PROCESS_CANCELED")]));
    assert_eq!(failure.code, "PAY_PROCESS_CANCELED");
    assert_eq!(failure.message, "결제에 실패했어요.");
}
