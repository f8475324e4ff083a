//! Orders screen.

use tracing::instrument;

use storedesk_core::{OrderId, OrderStatus};

use crate::api::{ApiClient, endpoints};
use crate::components::{ListView, Notice};
use crate::error::ConsoleError;
use crate::models::Order;
use crate::models::order::StatusUpdate;

/// Order list over every server page, with detail and status updates.
#[derive(Debug)]
pub struct OrdersScreen {
    api: ApiClient,
    pub view: ListView<Order>,
    total: Option<u64>,
    truncated_at: Option<u32>,
}

impl OrdersScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            view: ListView::new(),
            total: None,
            truncated_at: None,
        }
    }

    /// Fetch all order pages.
    ///
    /// A page failure after the first keeps the orders fetched so far; see
    /// [`OrdersScreen::truncated_at`].
    ///
    /// # Errors
    ///
    /// Returns the error of the first page after recording it in the view.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.view.begin_load();
        let result = self.api.fetch_all_pages::<Order>(endpoints::ORDERS).await;
        let records = result.map(|page| {
            if self.view.is_mounted() {
                self.total = page.total;
                self.truncated_at = page.truncated_at;
            }
            page.records
        });
        self.view.apply(records)
    }

    /// Server-reported order count, if any.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// First page that failed during the last load.
    #[must_use]
    pub const fn truncated_at(&self) -> Option<u32> {
        self.truncated_at
    }

    /// Order detail from the loaded list.
    #[must_use]
    pub fn show(&self, id: OrderId) -> Option<&Order> {
        self.view.records().iter().find(|o| o.id == id)
    }

    /// Set an order's status, then re-fetch.
    ///
    /// Setting the status the order already has sends nothing.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    #[instrument(skip(self))]
    pub async fn update_status(&mut self, id: OrderId, status: OrderStatus) -> Result<Notice, ConsoleError> {
        if self.show(id).and_then(Order::status) == Some(status) {
            tracing::debug!("Status unchanged, skipping update");
            return Ok(Notice::info(format!("Order #{id} is already {status}.")));
        }
        self.api
            .put_json(&endpoints::order_status(id), &StatusUpdate { status })
            .await?;
        tracing::info!("Order status updated");
        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "Re-fetch after status update failed");
        }
        Ok(Notice::success(format!("Order #{id} marked {status}.")))
    }
}
