//! Products and the create/edit draft.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storedesk_core::{Money, ProductId, ProductStatus, Tone};

use super::de;
use crate::components::Searchable;
use crate::error::ConsoleError;

pub const DEFAULT_MAIN_CATEGORY: i64 = 6;
pub const DEFAULT_CHILD_CATEGORY: i64 = 7;
pub const DEFAULT_TAX_PERCENTAGE: i64 = 18;
pub const DEFAULT_WEIGHT: &str = "1";
pub const DEFAULT_WEIGHT_TYPE: &str = "kg";

/// Category reference: either embedded `{title}` or a bare name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Named {
        #[serde(default, deserialize_with = "de::opt_i64")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "de::opt_text")]
        title: Option<String>,
    },
    Plain(String),
    Other(Value),
}

impl Category {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Named { title, .. } => title.as_deref(),
            Self::Plain(name) => Some(name.as_str()).filter(|s| !s.trim().is_empty()),
            Self::Other(_) => None,
        }
    }
}

/// A product as listed by the admin or public product endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "de::id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<Money>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub selling_price: Option<Money>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub status: Value,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub image: Option<String>,
}

impl Product {
    /// `title`, then `name`, then "Unnamed".
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unnamed")
    }

    #[must_use]
    pub fn category_title(&self) -> Option<&str> {
        self.category.as_ref().and_then(Category::title)
    }

    /// `price`, then `selling_price`, then zero.
    #[must_use]
    pub fn price(&self) -> Money {
        self.price.or(self.selling_price).unwrap_or(Money::ZERO)
    }

    /// `quantity`, then `stock`.
    #[must_use]
    pub fn stock(&self) -> Option<i64> {
        self.quantity.or(self.stock)
    }

    /// Lower-cased status label.
    ///
    /// `1` is active, `0` inactive, strings are lower-cased as-is, and a
    /// missing status is derived from the stock level.
    #[must_use]
    pub fn status_label(&self) -> String {
        match &self.status {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            Value::Null | Value::String(_) => self
                .stock()
                .map_or(ProductStatus::Active, ProductStatus::from_stock)
                .label()
                .to_string(),
            other => match de::value_as_i64(other) {
                Some(1) => ProductStatus::Active.label().to_string(),
                Some(0) => ProductStatus::Inactive.label().to_string(),
                _ => other.to_string().to_lowercase(),
            },
        }
    }

    /// Parsed status, when the label is one the console knows.
    #[must_use]
    pub fn status(&self) -> Option<ProductStatus> {
        ProductStatus::parse(&self.status_label())
    }

    #[must_use]
    pub fn tone(&self) -> Tone {
        self.status().map_or(Tone::Neutral, ProductStatus::tone)
    }

    /// Prefill an edit draft from this record.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.display_name().to_string(),
            price: self.price().amount().normalize().to_string(),
            quantity: self.stock().map(|q| q.to_string()).unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            ..ProductDraft::default()
        }
    }
}

impl Searchable for Product {
    fn matches(&self, needle: &str) -> bool {
        self.display_name().to_lowercase().contains(needle)
            || self
                .category_title()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

/// Product form input; every field is raw text as typed.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub tax_amount: String,
    pub tax_percentage: String,
    pub discount: String,
    pub discount_amount: String,
    pub description: String,
    pub availability: String,
    pub quantity: String,
    pub image: String,
    pub weight: String,
    pub weight_type: String,
    pub main_category_id: String,
    pub child_category_id: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            tax_amount: "0".to_string(),
            tax_percentage: DEFAULT_TAX_PERCENTAGE.to_string(),
            discount: "0".to_string(),
            discount_amount: "0".to_string(),
            description: String::new(),
            availability: String::new(),
            quantity: String::new(),
            image: String::new(),
            weight: DEFAULT_WEIGHT.to_string(),
            weight_type: DEFAULT_WEIGHT_TYPE.to_string(),
            main_category_id: String::new(),
            child_category_id: String::new(),
        }
    }
}

/// Product create/update body with every numeric field typed.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub main_category_id: i64,
    pub child_category_id: i64,
    pub title: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    pub description: String,
    pub status: i64,
    pub availability: i64,
    pub quantity: i64,
    pub image: String,
    pub weight: String,
    pub weight_type: String,
}

fn decimal_or(field: &str, raw: &str, default: Decimal) -> Result<Decimal, ConsoleError> {
    if raw.trim().is_empty() {
        return Ok(default);
    }
    Money::parse_lenient(raw)
        .map(|m| m.amount())
        .ok_or_else(|| ConsoleError::validation(format!("{field} must be a number.")))
}

fn int_or(field: &str, raw: &str, default: i64) -> Result<i64, ConsoleError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse()
        .map_err(|_| ConsoleError::validation(format!("{field} must be a whole number.")))
}

fn text_or(raw: &str, default: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() { default.to_string() } else { raw.to_string() }
}

impl ProductDraft {
    /// Validate the draft and convert it into the request body.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the title is empty, the price
    /// is missing or not positive, or a numeric field does not parse.
    pub fn to_payload(&self) -> Result<ProductPayload, ConsoleError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ConsoleError::validation("Product title is required."));
        }
        let price = Money::parse_lenient(&self.price)
            .map(|m| m.amount())
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| ConsoleError::validation("Price must be a positive number."))?;

        Ok(ProductPayload {
            main_category_id: int_or("Main category", &self.main_category_id, DEFAULT_MAIN_CATEGORY)?,
            child_category_id: int_or("Child category", &self.child_category_id, DEFAULT_CHILD_CATEGORY)?,
            title: title.to_string(),
            name: title.to_string(),
            price,
            tax_amount: decimal_or("Tax amount", &self.tax_amount, Decimal::ZERO)?,
            tax_percentage: decimal_or(
                "Tax percentage",
                &self.tax_percentage,
                Decimal::from(DEFAULT_TAX_PERCENTAGE),
            )?,
            discount: decimal_or("Discount", &self.discount, Decimal::ZERO)?,
            discount_amount: decimal_or("Discount amount", &self.discount_amount, Decimal::ZERO)?,
            description: self.description.trim().to_string(),
            status: 1,
            availability: int_or("Availability", &self.availability, 0)?,
            quantity: int_or("Quantity", &self.quantity, 0)?,
            image: self.image.trim().to_string(),
            weight: text_or(&self.weight, DEFAULT_WEIGHT),
            weight_type: text_or(&self.weight_type, DEFAULT_WEIGHT_TYPE),
        })
    }
}

/// Headline counts for the product screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: usize,
    pub active: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl ProductCounts {
    #[must_use]
    pub fn tally(products: &[Product]) -> Self {
        products.iter().fold(
            Self {
                total: products.len(),
                ..Self::default()
            },
            |mut acc, p| {
                match p.status() {
                    Some(ProductStatus::Active) => acc.active += 1,
                    Some(ProductStatus::LowStock) => acc.low_stock += 1,
                    Some(ProductStatus::OutOfStock) => acc.out_of_stock += 1,
                    _ => {}
                }
                acc
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_payload_numbers_are_numeric() {
        let draft = ProductDraft {
            title: "Cotton Saree".to_string(),
            price: "1450".to_string(),
            quantity: "100".to_string(),
            ..ProductDraft::default()
        };
        let body = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert!(body["price"].is_number());
        assert_eq!(body["price"].as_f64(), Some(1450.0));
        assert_eq!(body["quantity"], json!(100));
        assert_eq!(body["tax_percentage"].as_f64(), Some(18.0));
        assert_eq!(body["main_category_id"], json!(6));
        assert_eq!(body["child_category_id"], json!(7));
        assert_eq!(body["status"], json!(1));
        assert_eq!(body["weight"], "1");
        assert_eq!(body["weight_type"], "kg");
        assert_eq!(body["name"], "Cotton Saree");
    }

    #[test]
    fn test_payload_validation() {
        let missing_title = ProductDraft {
            price: "10".to_string(),
            ..ProductDraft::default()
        };
        assert!(matches!(missing_title.to_payload(), Err(ConsoleError::Validation(_))));

        let zero_price = ProductDraft {
            title: "Thing".to_string(),
            price: "0".to_string(),
            ..ProductDraft::default()
        };
        assert!(matches!(zero_price.to_payload(), Err(ConsoleError::Validation(_))));

        let bad_quantity = ProductDraft {
            title: "Thing".to_string(),
            price: "₹1,450".to_string(),
            quantity: "lots".to_string(),
            ..ProductDraft::default()
        };
        assert!(matches!(bad_quantity.to_payload(), Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_status_label_variants() {
        assert_eq!(product(json!({"id": 1, "status": 1})).status_label(), "active");
        assert_eq!(product(json!({"id": 1, "status": 0})).status_label(), "inactive");
        assert_eq!(product(json!({"id": 1, "status": "Low Stock"})).status_label(), "low stock");
        assert_eq!(product(json!({"id": 1, "status": "Archived"})).status_label(), "archived");
        assert_eq!(product(json!({"id": 1, "quantity": "0"})).status_label(), "out of stock");
        assert_eq!(product(json!({"id": 1, "stock": 4})).status_label(), "low stock");
    }

    #[test]
    fn test_tones() {
        assert_eq!(product(json!({"id": 1, "status": 1})).tone(), Tone::Success);
        assert_eq!(product(json!({"id": 1, "status": "out of stock"})).tone(), Tone::Danger);
        assert_eq!(product(json!({"id": 1, "status": "archived"})).tone(), Tone::Neutral);
    }

    #[test]
    fn test_category_shapes_and_search() {
        let p = product(json!({"id": 1, "name": "Kurta", "category": {"title": "Ethnic Wear"}}));
        assert_eq!(p.category_title(), Some("Ethnic Wear"));
        assert!(p.matches("ethnic"));
        let p = product(json!({"id": 2, "title": "Mug", "category": "Kitchen"}));
        assert_eq!(p.category_title(), Some("Kitchen"));
        assert!(p.matches("mug"));
    }

    #[test]
    fn test_price_fallback() {
        let p = product(json!({"id": 1, "selling_price": "₹499.00"}));
        assert_eq!(p.price(), Money::new(Decimal::from(499)));
    }

    #[test]
    fn test_counts() {
        let products = vec![
            product(json!({"id": 1, "status": 1})),
            product(json!({"id": 2, "status": "low stock"})),
            product(json!({"id": 3, "status": "out of stock"})),
            product(json!({"id": 4, "status": 0})),
        ];
        assert_eq!(
            ProductCounts::tally(&products),
            ProductCounts {
                total: 4,
                active: 1,
                low_stock: 1,
                out_of_stock: 1
            }
        );
    }
}
