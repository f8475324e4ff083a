//! Orders as returned by the paginated admin order list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use storedesk_core::{Money, OrderId, OrderStatus, Tone};

use super::de;
use crate::components::Searchable;

/// Label shown when an order carries no status.
pub const NO_STATUS: &str = "N/A";

/// Customer snapshot embedded in an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default, alias = "firstname", deserialize_with = "de::opt_text")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastname", deserialize_with = "de::opt_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub email: Option<String>,
}

/// A line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<Money>,
    #[serde(default)]
    pub product: Option<Value>,
}

impl OrderItem {
    /// Product title when the API embeds the product, else `#<product_id>`.
    #[must_use]
    pub fn label(&self) -> String {
        self.product
            .as_ref()
            .and_then(|p| p.get("title").or_else(|| p.get("name")))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| self.product_id.map(|id| format!("#{id}")))
            .unwrap_or_else(|| "-".to_string())
    }
}

/// An order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "de::id")]
    pub id: OrderId,
    #[serde(default)]
    pub user: Option<OrderCustomer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub total: Option<Money>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub total_amount: Option<Money>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub payment_status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub address: Option<Value>,
}

impl Order {
    /// "first last" of the embedded customer; empty when absent.
    #[must_use]
    pub fn customer_name(&self) -> String {
        self.user.as_ref().map_or_else(String::new, |u| {
            format!(
                "{} {}",
                u.first_name.as_deref().unwrap_or_default(),
                u.last_name.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string()
        })
    }

    #[must_use]
    pub fn customer_email(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .unwrap_or("-")
    }

    /// `total`, then `total_amount`, then zero.
    #[must_use]
    pub fn total(&self) -> Money {
        self.total.or(self.total_amount).unwrap_or(Money::ZERO)
    }

    /// Raw status: `status`, falling back to `payment_status`.
    #[must_use]
    pub fn raw_status(&self) -> Option<&str> {
        self.status.as_deref().or(self.payment_status.as_deref())
    }

    /// Parsed status, if it is one the console knows.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.raw_status().and_then(OrderStatus::parse)
    }

    /// Status to display; unknown or missing statuses show as `N/A`.
    #[must_use]
    pub fn status_label(&self) -> String {
        self.status()
            .map_or_else(|| NO_STATUS.to_string(), |s| s.as_str().to_string())
    }

    #[must_use]
    pub fn tone(&self) -> Tone {
        OrderStatus::tone_of(self.raw_status())
    }

    #[must_use]
    pub fn placed(&self) -> String {
        de::display_date(self.created_at.as_deref())
    }

    /// Shipping address flattened to one line.
    #[must_use]
    pub fn address_line(&self) -> String {
        match &self.address {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(obj)) => [
                "address_line_1",
                "address",
                "address_extra",
                "city",
                "state",
                "pincode",
                "zip",
                "country",
            ]
            .iter()
            .filter_map(|k| obj.get(*k).and_then(de::value_as_text))
            .collect::<Vec<_>>()
            .join(", "),
            _ => "-".to_string(),
        }
    }
}

impl Searchable for Order {
    fn matches(&self, needle: &str) -> bool {
        self.customer_name().to_lowercase().contains(needle) || self.id.to_string().contains(needle)
    }
}

/// `PUT /admin/orders/{id}/status` body.
#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn order(value: Value) -> Order {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_total_fallbacks() {
        assert_eq!(
            order(json!({"id": 1, "total": "1450.50"})).total(),
            Money::new(Decimal::new(145_050, 2))
        );
        assert_eq!(
            order(json!({"id": 1, "total_amount": 99})).total(),
            Money::new(Decimal::from(99))
        );
        assert_eq!(order(json!({"id": 1, "total": "n/a"})).total(), Money::ZERO);
    }

    #[test]
    fn test_status_fallbacks() {
        let o = order(json!({"id": 1, "payment_status": "Pending"}));
        assert_eq!(o.status(), Some(OrderStatus::Pending));
        assert_eq!(o.tone(), Tone::Warning);

        let o = order(json!({"id": 1, "status": "on_hold"}));
        assert_eq!(o.status_label(), NO_STATUS);
        assert_eq!(o.tone(), Tone::Neutral);

        assert_eq!(order(json!({"id": 1})).status_label(), NO_STATUS);
    }

    #[test]
    fn test_search_by_name_and_id() {
        let o = order(json!({"id": 1042, "user": {"first_name": "Asha", "last_name": "Rao"}}));
        assert!(o.matches("asha rao"));
        assert!(o.matches("104"));
        assert!(!o.matches("kumar"));
    }

    #[test]
    fn test_items_and_address() {
        let o = order(json!({
            "id": 7,
            "items": [{"product_id": 3, "quantity": "2", "price": "250"}],
            "address": {"address_line_1": "12 MG Road", "city": "Pune"}
        }));
        assert_eq!(o.items.first().unwrap().quantity, Some(2));
        assert_eq!(o.items.first().unwrap().label(), "#3");
        assert_eq!(o.address_line(), "12 MG Road, Pune");
    }
}
