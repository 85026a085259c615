//! The composite order and the parts it owns.
//!
//! An [`Order`] owns exactly one [`Delivery`], one [`Payment`] and an
//! ordered list of [`Item`]s. The JSON shape of these types is the inbound
//! message format. Storage-generated surrogate ids are never part of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::error::{DomainError, OrderPart};
use super::id::OrderUid;

/// One purchase: header fields plus its delivery, payment and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Order {
    #[validate(custom(function = "validate_order_uid"))]
    pub order_uid: OrderUid,
    pub track_number: String,
    pub entry: String,
    pub delivery: Delivery,
    pub payment: Payment,
    /// Display order only; carries no meaning beyond presentation.
    pub items: Vec<Item>,
    pub locale: String,
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i32,
    pub date_created: DateTime<Utc>,
    pub oof_shard: String,
}

/// Where and to whom an order is shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Delivery {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub zip: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub region: String,
    #[validate(email)]
    pub email: String,
}

/// Payment details of an order. Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: i64,
    /// Unix timestamp (seconds) of the payment.
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: i64,
    pub goods_total: i64,
    pub custom_fee: i64,
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub chrt_id: i64,
    pub track_number: String,
    pub price: i64,
    pub rid: String,
    pub name: String,
    /// Discount percentage.
    pub sale: i32,
    pub size: String,
    pub total_price: i64,
    pub nm_id: i64,
    pub brand: String,
    pub status: i32,
}

fn validate_order_uid(uid: &OrderUid) -> Result<(), ValidationError> {
    if uid.is_blank() {
        return Err(ValidationError::new("blank_order_uid"));
    }
    Ok(())
}

impl Order {
    /// Check the order header, then its delivery.
    ///
    /// Only a blank `order_uid` rejects the header. Every delivery field is
    /// required and `email` must be well formed. Payment and item contents
    /// are stored as received.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOrder`] naming the failing part.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|source| self.rejected(OrderPart::Order, source))?;
        self.delivery
            .validate()
            .map_err(|source| self.rejected(OrderPart::Delivery, source))?;
        Ok(())
    }

    /// Number of items in the order.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn rejected(&self, part: OrderPart, source: validator::ValidationErrors) -> DomainError {
        DomainError::InvalidOrder {
            order_uid: self.order_uid.to_string(),
            part,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
      "order_uid": "b563feb7b2b84b6test",
      "track_number": "WBILMTESTTRACK",
      "entry": "WBIL",
      "delivery": {
        "name": "Test Testov",
        "phone": "+9720000000",
        "zip": "2639809",
        "city": "Kiryat Mozkin",
        "address": "Ploshad Mira 15",
        "region": "Kraiot",
        "email": "test@gmail.com"
      },
      "payment": {
        "transaction": "b563feb7b2b84b6test",
        "request_id": "",
        "currency": "USD",
        "provider": "wbpay",
        "amount": 1817,
        "payment_dt": 1637907727,
        "bank": "alpha",
        "delivery_cost": 1500,
        "goods_total": 317,
        "custom_fee": 0
      },
      "items": [
        {
          "chrt_id": 9934930,
          "track_number": "WBILMTESTTRACK",
          "price": 453,
          "rid": "ab4219087a764ae0btest",
          "name": "Mascaras",
          "sale": 30,
          "size": "0",
          "total_price": 317,
          "nm_id": 2389212,
          "brand": "Vivienne Sabo",
          "status": 202
        }
      ],
      "locale": "en",
      "internal_signature": "",
      "customer_id": "test",
      "delivery_service": "meest",
      "shardkey": "9",
      "sm_id": 99,
      "date_created": "2021-11-26T06:22:19Z",
      "oof_shard": "1"
    }"#;

    fn model() -> Order {
        serde_json::from_str(MODEL).unwrap()
    }

    #[test]
    fn model_order_decodes() {
        let order = model();
        assert_eq!(order.order_uid.as_str(), "b563feb7b2b84b6test");
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.items[0].chrt_id, 9934930);
        assert_eq!(order.delivery.email, "test@gmail.com");
        assert_eq!(order.date_created.to_rfc3339(), "2021-11-26T06:22:19+00:00");
    }

    #[test]
    fn model_order_passes_checks() {
        assert!(model().check().is_ok());
    }

    #[test]
    fn empty_request_id_and_signature_are_allowed() {
        let order = model();
        assert!(order.payment.request_id.is_empty());
        assert!(order.internal_signature.is_empty());
        assert!(order.check().is_ok());
    }

    #[test]
    fn empty_email_rejects_delivery() {
        let mut order = model();
        order.delivery.email.clear();

        let err = order.check().unwrap_err();
        assert_eq!(err.part(), OrderPart::Delivery);
    }

    #[test]
    fn malformed_email_rejects_delivery() {
        let mut order = model();
        order.delivery.email = "not-an-email".to_string();

        let err = order.check().unwrap_err();
        assert_eq!(err.part(), OrderPart::Delivery);
    }

    #[test]
    fn missing_delivery_city_rejects_delivery() {
        let mut order = model();
        order.delivery.city = String::new();

        assert_eq!(order.check().unwrap_err().part(), OrderPart::Delivery);
    }

    #[test]
    fn blank_order_uid_rejects_order() {
        let mut order = model();
        order.order_uid = OrderUid::new("  ");

        assert_eq!(order.check().unwrap_err().part(), OrderPart::Order);
    }

    #[test]
    fn blank_header_fields_are_accepted() {
        let mut order = model();
        order.entry.clear();
        order.track_number.clear();
        order.locale.clear();
        order.customer_id.clear();
        order.delivery_service.clear();

        assert!(order.check().is_ok());
    }

    #[test]
    fn payment_contents_are_not_checked() {
        let mut order = model();
        order.payment.bank.clear();
        order.payment.currency.clear();
        order.payment.amount = -1;
        order.payment.custom_fee = -50;

        assert!(order.check().is_ok());
    }

    #[test]
    fn item_contents_are_not_checked() {
        let mut order = model();
        let mut second = order.items[0].clone();
        second.brand.clear();
        second.rid.clear();
        second.sale = 150;
        second.price = -453;
        order.items.push(second);

        assert!(order.check().is_ok());
    }

    #[test]
    fn zero_items_is_valid() {
        let mut order = model();
        order.items.clear();

        assert!(order.check().is_ok());
    }

    #[test]
    fn header_checked_before_delivery() {
        let mut order = model();
        order.order_uid = OrderUid::new("");
        order.delivery.email.clear();

        assert_eq!(order.check().unwrap_err().part(), OrderPart::Order);
    }

    #[test]
    fn missing_field_fails_decode() {
        let without_items = MODEL.replace("\"items\"", "\"things\"");
        assert!(serde_json::from_str::<Order>(&without_items).is_err());
    }

    #[test]
    fn error_message_names_order_and_part() {
        let mut order = model();
        order.delivery.email.clear();

        let message = order.check().unwrap_err().to_string();
        assert!(message.contains("b563feb7b2b84b6test"));
        assert!(message.contains("delivery"));
    }
}
