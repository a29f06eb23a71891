use checkout_primitives::error::ApiError;
use checkout_primitives::models::dtos::checkout_dto::{
    CardChargeRequest, CardDetails, CartSnapshot, CreateOrderRequest, CustomerInfo,
    INVALID_AMOUNT, INVALID_CART_AMOUNT, INVALID_COUNTRY_CODE, MISSING_CARD_DETAILS,
    MISSING_CART_CURRENCY, MISSING_CART_PARTS, MISSING_CURRENCY, MISSING_CUSTOMER_DETAILS,
};
use checkout_primitives::models::dtos::providers::paypal::{
    BillingAddress, CardSource, Money, OrderIntent, OrderRequest, Payer, PayerName,
    PaymentSource, PurchaseUnitRequest,
};
use rust_decimal::{Decimal, RoundingStrategy};
use secrecy::SecretString;
use std::str::FromStr;
use uuid::Uuid;

pub const INVALID_EXPIRY: &str = "Invalid card expiry date format. Use MM/YY or MM/YYYY.";

/// Which checkout path an order is being built for.
#[derive(Debug, Clone, Copy)]
pub enum OrderFlow<'a> {
    /// Buyer approves in the PayPal popup; only amount and currency are known.
    AmountOnly {
        amount: Option<&'a str>,
        currency: Option<&'a str>,
    },
    /// Direct card charge; the card is sent as the payment source.
    CardPresent {
        cart: Option<&'a CartSnapshot>,
        customer: Option<&'a CustomerInfo>,
        card: Option<&'a CardDetails>,
    },
}

impl<'a> From<&'a CreateOrderRequest> for OrderFlow<'a> {
    fn from(req: &'a CreateOrderRequest) -> Self {
        OrderFlow::AmountOnly {
            amount: req.amount.as_deref(),
            currency: req.currency.as_deref(),
        }
    }
}

impl<'a> From<&'a CardChargeRequest> for OrderFlow<'a> {
    fn from(req: &'a CardChargeRequest) -> Self {
        OrderFlow::CardPresent {
            cart: req.cart.as_ref(),
            customer: req.customer.as_ref(),
            card: req.card_details.as_ref(),
        }
    }
}

/// An Orders v2 create body plus the `PayPal-Request-Id` to send with it, if any.
#[derive(Debug, Clone)]
pub struct PreparedOrder {
    pub body: OrderRequest,
    pub request_id: Option<String>,
}

pub fn build_create_request(flow: OrderFlow<'_>) -> Result<PreparedOrder, ApiError> {
    match flow {
        OrderFlow::AmountOnly { amount, currency } => {
            let value = amount
                .and_then(format_amount)
                .ok_or_else(|| ApiError::Validation(INVALID_AMOUNT.into()))?;
            let currency_code = non_blank(currency)
                .map(|c| c.to_ascii_uppercase())
                .ok_or_else(|| ApiError::Validation(MISSING_CURRENCY.into()))?;

            Ok(PreparedOrder {
                body: OrderRequest {
                    intent: OrderIntent::Capture,
                    payer: None,
                    payment_source: None,
                    purchase_units: vec![purchase_unit(currency_code, value)],
                },
                request_id: None,
            })
        }
        OrderFlow::CardPresent {
            cart,
            customer,
            card,
        } => {
            let (cart, customer, card) = match (cart, customer, card) {
                (Some(cart), Some(customer), Some(card)) => (cart, customer, card),
                _ => return Err(ApiError::Validation(MISSING_CART_PARTS.into())),
            };

            let value = cart
                .total_amount
                .as_deref()
                .and_then(format_amount)
                .ok_or_else(|| ApiError::Validation(INVALID_CART_AMOUNT.into()))?;
            // card-present currency is forwarded as the storefront sent it
            let currency_code = non_blank(cart.currency_code.as_deref())
                .map(str::to_string)
                .ok_or_else(|| ApiError::Validation(MISSING_CART_CURRENCY.into()))?;

            let payment_source = card_source(card, customer)?;
            let payer = payer(customer)?;

            Ok(PreparedOrder {
                body: OrderRequest {
                    intent: OrderIntent::Capture,
                    payer: Some(payer),
                    payment_source: Some(payment_source),
                    purchase_units: vec![purchase_unit(currency_code, value)],
                },
                request_id: Some(Uuid::new_v4().to_string()),
            })
        }
    }
}

/// Positive decimal text rendered with exactly two fraction digits,
/// rounding half away from zero (`"10.005"` becomes `"10.01"`).
pub fn format_amount(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;

    let mut rounded = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return None;
    }
    rounded.rescale(2);
    // values too large for two fraction digits keep their old scale
    if rounded.scale() != 2 {
        return None;
    }
    Some(rounded.to_string())
}

/// `MM/YY`, `MM/YYYY` and their separator-free or spaced variants to `YYYY-MM`.
pub fn normalize_expiry(raw: &str) -> Result<String, ApiError> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/' && *c != '-')
        .collect();

    if !matches!(digits.len(), 4 | 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(INVALID_EXPIRY.into()));
    }

    let (month, year) = digits.split_at(2);
    if !matches!(month.parse::<u8>(), Ok(1..=12)) {
        return Err(ApiError::Validation(INVALID_EXPIRY.into()));
    }

    let year = if year.len() == 2 {
        format!("20{}", year)
    } else {
        year.to_string()
    };

    Ok(format!("{}-{}", year, month))
}

fn purchase_unit(currency_code: String, value: String) -> PurchaseUnitRequest {
    PurchaseUnitRequest {
        amount: Money {
            currency_code,
            value,
        },
    }
}

fn card_source(card: &CardDetails, customer: &CustomerInfo) -> Result<PaymentSource, ApiError> {
    let missing_card = || ApiError::Validation(MISSING_CARD_DETAILS.into());

    let number: String = non_blank(card.card_number.as_deref())
        .ok_or_else(missing_card)?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let expiry = normalize_expiry(non_blank(card.expiry.as_deref()).ok_or_else(missing_card)?)?;
    let security_code = non_blank(card.cvv.as_deref()).ok_or_else(missing_card)?;

    let country_code = customer
        .country_code
        .as_deref()
        .map(str::trim)
        .filter(|c| c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()))
        .ok_or_else(|| ApiError::Validation(INVALID_COUNTRY_CODE.into()))?;

    let name = format!(
        "{} {}",
        customer.first_name.as_deref().unwrap_or_default(),
        customer.last_name.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string();

    Ok(PaymentSource {
        card: CardSource {
            number: SecretString::from(number),
            expiry,
            security_code: SecretString::from(security_code.to_string()),
            name,
            billing_address: BillingAddress {
                address_line_1: customer.address1.clone().unwrap_or_default(),
                admin_area_2: customer.city.clone().unwrap_or_default(),
                postal_code: customer.postcode.clone().unwrap_or_default(),
                country_code: country_code.to_string(),
            },
        },
    })
}

fn payer(customer: &CustomerInfo) -> Result<Payer, ApiError> {
    let missing = || ApiError::Validation(MISSING_CUSTOMER_DETAILS.into());

    Ok(Payer {
        name: PayerName {
            given_name: non_blank(customer.first_name.as_deref())
                .ok_or_else(missing)?
                .to_string(),
            surname: non_blank(customer.last_name.as_deref())
                .ok_or_else(missing)?
                .to_string(),
        },
        email_address: non_blank(customer.email.as_deref())
            .ok_or_else(missing)?
            .to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
