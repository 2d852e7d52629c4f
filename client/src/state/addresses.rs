//! Address book state and form validation for the my-page view.

#[cfg(test)]
#[path = "addresses_test.rs"]
mod addresses_test;

use crate::net::types::{Address, AddressRequest, Id};

/// Saved addresses plus edit-form status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressBookState {
    pub addresses: Vec<Address>,
    pub loading: bool,
    pub error: Option<String>,
    /// Address being edited; `Some(None)` means a new address.
    pub editing: Option<Option<Id>>,
}

impl AddressBookState {
    pub fn replace(&mut self, addresses: Vec<Address>) {
        self.addresses = addresses;
        self.loading = false;
        self.error = None;
    }

    /// Insert or replace after a create/update.
    pub fn upsert(&mut self, address: Address) {
        if address.default {
            for a in &mut self.addresses {
                a.default = false;
            }
        }
        match self.addresses.iter_mut().find(|a| a.address_id == address.address_id) {
            Some(existing) => *existing = address,
            None => self.addresses.push(address),
        }
    }

    pub fn remove(&mut self, address_id: Id) {
        self.addresses.retain(|a| a.address_id != address_id);
    }

    /// Exactly one default after this call.
    pub fn set_default(&mut self, address_id: Id) {
        for a in &mut self.addresses {
            a.default = a.address_id == address_id;
        }
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.default)
    }
}

/// Raw address form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub recipient_name: String,
    pub phone_number: String,
    pub zip_code: String,
    pub road_address: String,
    pub detail_address: String,
    pub default: bool,
}

impl AddressForm {
    /// Prefill from a saved address for editing.
    pub fn from_address(address: &Address) -> Self {
        Self {
            recipient_name: address.recipient_name.clone(),
            phone_number: address.phone_number.clone(),
            zip_code: address.zip_code.clone(),
            road_address: address.road_address.clone(),
            detail_address: address.detail_address.clone(),
            default: address.default,
        }
    }

    /// Validate and normalize into a request body.
    ///
    /// # Errors
    ///
    /// Returns the first user-facing validation message.
    pub fn validate(&self) -> Result<AddressRequest, &'static str> {
        let recipient_name = self.recipient_name.trim();
        if recipient_name.is_empty() {
            return Err("받는 분 이름을 입력해 주세요.");
        }
        let phone_number = normalize_phone(&self.phone_number).ok_or("휴대폰 번호를 확인해 주세요.")?;
        let zip_code = self.zip_code.trim();
        if zip_code.len() != 5 || !zip_code.chars().all(|c| c.is_ascii_digit()) {
            return Err("우편번호 5자리를 입력해 주세요.");
        }
        let road_address = self.road_address.trim();
        if road_address.is_empty() {
            return Err("주소를 입력해 주세요.");
        }
        Ok(AddressRequest {
            recipient_name: recipient_name.to_owned(),
            phone_number,
            zip_code: zip_code.to_owned(),
            road_address: road_address.to_owned(),
            detail_address: self.detail_address.trim().to_owned(),
            default: self.default,
        })
    }
}

/// Strip separators and format a 10/11 digit mobile number as `010-1234-5678`.
fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    if !digits.starts_with("01") || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match digits.len() {
        10 => Some(format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])),
        11 => Some(format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..])),
        _ => None,
    }
}
