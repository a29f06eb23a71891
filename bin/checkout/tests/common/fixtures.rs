use fake::faker::address::en::{CityName, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde_json::{json, Value};

pub const TEST_CARD_NUMBER: &str = "4111 1111 1111 1111";

/// Billing customer with random but well-formed details.
pub fn customer() -> Value {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = SafeEmail().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let postcode: String = ZipCode().fake();

    json!({
        "firstName": first_name,
        "lastName": last_name,
        "email": email,
        "address1": format!("1 {}", street),
        "city": city,
        "postcode": postcode,
        "countryCode": "US"
    })
}

pub fn card(expiry: &str) -> Value {
    json!({
        "cardNumber": TEST_CARD_NUMBER,
        "expiry": expiry,
        "cvv": "123"
    })
}

pub fn cart(total_amount: &str, currency_code: &str) -> Value {
    json!({
        "totalAmount": total_amount,
        "currencyCode": currency_code
    })
}

pub fn card_charge_body() -> Value {
    json!({
        "cart": cart("42.5", "USD"),
        "customer": customer(),
        "cardDetails": card("04/28")
    })
}
