use super::*;

#[test]
fn validate_tracking_strips_separators() {
    assert_eq!(
        validate_tracking("CJ대한통운", "1234-5678 9012"),
        Ok(("CJ대한통운".to_owned(), "123456789012".to_owned()))
    );
}

#[test]
fn validate_tracking_requires_courier_and_number() {
    assert_eq!(validate_tracking("  ", "123456789"), Err("택배사를 선택해 주세요."));
    assert_eq!(validate_tracking("한진택배", " - "), Err("송장번호를 입력해 주세요."));
}

#[test]
fn validate_tracking_rejects_letters_and_bad_lengths() {
    assert_eq!(validate_tracking("한진택배", "12AB5678"), Err("송장번호를 확인해 주세요."));
    assert_eq!(validate_tracking("한진택배", "1234567"), Err("송장번호를 확인해 주세요."));
    assert_eq!(validate_tracking("한진택배", &"1".repeat(21)), Err("송장번호를 확인해 주세요."));
}

#[test]
fn couriers_default_to_first_entry() {
    assert!(validate_tracking(COURIERS[0], "12345678").is_ok());
}
