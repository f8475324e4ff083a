//! Store summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use storedesk_core::Money;

use crate::api::{ApiClient, Paginated, endpoints};
use crate::error::ConsoleError;
use crate::models::Order;
use crate::models::de::parse_timestamp;

/// Orders shown in the "recent" list.
pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub customers: usize,
    pub orders: u64,
    pub products: usize,
    /// Sum of the first orders page; unreadable totals count as zero.
    pub revenue: Money,
    /// Newest first.
    pub recent: Vec<Order>,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(customers: usize, orders: Paginated<Order>, products: usize) -> Self {
        let total = orders.total_or_len();
        let revenue = orders.records.iter().map(Order::total).sum();
        let mut recent = orders.records;
        recent.sort_by_key(|o| {
            std::cmp::Reverse(
                o.created_at
                    .as_deref()
                    .and_then(parse_timestamp)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            )
        });
        recent.truncate(RECENT_ORDERS);
        Self {
            customers,
            orders: total,
            products,
            revenue,
            recent,
        }
    }
}

#[derive(Debug)]
pub struct DashboardScreen {
    api: ApiClient,
    summary: Option<DashboardSummary>,
}

impl DashboardScreen {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api, summary: None }
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    /// Fetch customers, the first orders page and products together.
    ///
    /// A failed product fetch counts as zero products.
    ///
    /// # Errors
    ///
    /// Returns the customers or orders error.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&DashboardSummary, ConsoleError> {
        let (customers, orders, products) = tokio::join!(
            self.api.list_records::<Value>(endpoints::ALL_CUSTOMERS),
            self.api.first_page::<Order>(endpoints::ORDERS),
            self.api.list_records::<Value>(endpoints::ALL_PRODUCTS),
        );
        let products = products.map_or_else(
            |e| {
                tracing::warn!(error = %e, "Product count unavailable");
                0
            },
            |p| p.len(),
        );
        let summary = DashboardSummary::build(customers?.len(), orders?, products);
        Ok(self.summary.insert(summary))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders(rows: Value, total: Option<u64>) -> Paginated<Order> {
        let records: Vec<Order> = serde_json::from_value(rows).unwrap();
        Paginated {
            records,
            last_page: 1,
            total,
            pages_fetched: 1,
            truncated_at: None,
        }
    }

    #[test]
    fn test_summary_revenue_and_recent() {
        let page = orders(
            json!([
                {"id": 1, "total": "100.50", "created_at": "2024-01-01T10:00:00Z"},
                {"id": 2, "total": "abc", "created_at": "2024-03-01T10:00:00Z"},
                {"id": 3, "total_amount": 49.5, "created_at": "2024-02-01T10:00:00Z"},
                {"id": 4, "total": 10},
                {"id": 5, "total": 10, "created_at": "2023-12-01T10:00:00Z"},
                {"id": 6, "total": 10, "created_at": "2023-11-01T10:00:00Z"}
            ]),
            Some(42),
        );
        let summary = DashboardSummary::build(7, page, 3);
        assert_eq!(summary.orders, 42);
        assert_eq!(summary.revenue, Money::parse_lenient("180.00").unwrap());
        let ids: Vec<i64> = summary.recent.iter().map(|o| o.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3, 1, 5, 6]);
    }

    #[test]
    fn test_order_count_falls_back_to_page_length() {
        let summary = DashboardSummary::build(0, orders(json!([{"id": 1}]), None), 0);
        assert_eq!(summary.orders, 1);
        assert_eq!(summary.revenue, Money::ZERO);
    }
}
