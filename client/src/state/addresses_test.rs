use super::*;

fn address(address_id: Id, default: bool) -> Address {
    Address {
        address_id,
        recipient_name: "홍길동".to_owned(),
        phone_number: "010-1234-5678".to_owned(),
        zip_code: "06236".to_owned(),
        road_address: "서울 강남구 테헤란로 1".to_owned(),
        detail_address: String::new(),
        default,
    }
}

fn valid_form() -> AddressForm {
    AddressForm {
        recipient_name: " 홍길동 ".to_owned(),
        phone_number: "01012345678".to_owned(),
        zip_code: "06236".to_owned(),
        road_address: "서울 강남구 테헤란로 1".to_owned(),
        detail_address: " 3층 ".to_owned(),
        default: true,
    }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_normalizes_fields() {
    let req = valid_form().validate().expect("valid");
    assert_eq!(req.recipient_name, "홍길동");
    assert_eq!(req.phone_number, "010-1234-5678");
    assert_eq!(req.detail_address, "3층");
    assert!(req.default);
}

#[test]
fn validate_accepts_ten_digit_phone() {
    let form = AddressForm { phone_number: "011-123-4567".to_owned(), ..valid_form() };
    assert_eq!(form.validate().expect("valid").phone_number, "011-123-4567");
}

#[test]
fn validate_rejects_missing_name() {
    let form = AddressForm { recipient_name: "  ".to_owned(), ..valid_form() };
    assert_eq!(form.validate(), Err("받는 분 이름을 입력해 주세요."));
}

#[test]
fn validate_rejects_bad_phone_and_zip() {
    let form = AddressForm { phone_number: "02-123-4567".to_owned(), ..valid_form() };
    assert!(form.validate().is_err());
    let form = AddressForm { zip_code: "1234".to_owned(), ..valid_form() };
    assert_eq!(form.validate(), Err("우편번호 5자리를 입력해 주세요."));
}

// =============================================================
// Address book
// =============================================================

#[test]
fn upsert_default_clears_other_defaults() {
    let mut book = AddressBookState::default();
    book.replace(vec![address(1, true), address(2, false)]);
    book.upsert(address(3, true));
    assert_eq!(book.default_address().map(|a| a.address_id), Some(3));
    assert_eq!(book.addresses.iter().filter(|a| a.default).count(), 1);
}

#[test]
fn set_default_and_remove() {
    let mut book = AddressBookState::default();
    book.replace(vec![address(1, true), address(2, false)]);
    book.set_default(2);
    assert_eq!(book.default_address().map(|a| a.address_id), Some(2));
    book.remove(2);
    assert!(book.default_address().is_none());
    assert_eq!(book.addresses.len(), 1);
}

#[test]
fn form_prefills_from_address() {
    let form = AddressForm::from_address(&address(1, true));
    assert_eq!(form.zip_code, "06236");
    assert!(form.default);
}
