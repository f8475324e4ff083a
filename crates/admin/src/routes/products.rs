//! Products screen.

use std::collections::BTreeSet;

use tracing::instrument;

use storedesk_core::ProductId;

use crate::api::{ApiClient, endpoints};
use crate::components::{Confirm, ListView, Notice};
use crate::error::ConsoleError;
use crate::models::{Product, ProductCounts, ProductDraft};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

/// Product list with search, category and status filters, and CRUD.
#[derive(Debug)]
pub struct ProductsScreen {
    api: ApiClient,
    pub view: ListView<Product>,
    category_filter: String,
    status_filter: String,
}

impl ProductsScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            view: ListView::new(),
            category_filter: ALL.to_string(),
            status_filter: ALL.to_string(),
        }
    }

    /// Fetch products from the admin endpoint, falling back to the public one.
    ///
    /// # Errors
    ///
    /// Returns the last endpoint's error after recording it in the view.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.view.begin_load();
        let result = self
            .api
            .first_list(&[endpoints::ADMIN_PRODUCTS, endpoints::PUBLIC_PRODUCTS])
            .await;
        self.view.apply(result)
    }

    /// Category title to match exactly (case-insensitive), or `all`.
    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        self.category_filter = category.into();
    }

    /// Status label to match (`active`, `low stock`, ...), or `all`.
    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.status_filter = status.into();
    }

    /// Products passing the search box and both filters.
    pub fn visible(&self) -> impl Iterator<Item = &Product> {
        let category = self.category_filter.trim().to_lowercase();
        let status = self.status_filter.trim().to_lowercase();
        self.view.filtered().filter(move |p| {
            let category_ok = category.is_empty()
                || category == ALL
                || p.category_title()
                    .is_some_and(|c| c.to_lowercase() == category);
            let status_ok = status.is_empty() || status == ALL || p.status_label() == status;
            category_ok && status_ok
        })
    }

    /// Distinct category titles, for the category filter.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.view
            .records()
            .iter()
            .filter_map(Product::category_title)
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn counts(&self) -> ProductCounts {
        ProductCounts::tally(self.view.records())
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.view.records().iter().find(|p| p.id == id)
    }

    /// Create a product, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for a bad draft (no request is
    /// sent) or the API error.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&mut self, draft: &ProductDraft) -> Result<Notice, ConsoleError> {
        let body = draft.to_payload()?;
        self.api.post_json(endpoints::NEW_PRODUCT, &body).await?;
        tracing::info!("Product created");
        self.reload().await;
        Ok(Notice::success(format!("{} added successfully!", body.title)))
    }

    /// Update a product, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for a bad draft (no request is
    /// sent) or the API error.
    #[instrument(skip(self, draft))]
    pub async fn update(&mut self, id: ProductId, draft: &ProductDraft) -> Result<Notice, ConsoleError> {
        let body = draft.to_payload()?;
        self.api
            .put_json(&endpoints::update_product(id), &body)
            .await?;
        tracing::info!("Product updated");
        self.reload().await;
        Ok(Notice::success(format!("{} updated successfully!", body.title)))
    }

    /// Delete a product after confirmation, then re-fetch.
    ///
    /// Returns `Ok(None)` when the confirmation is declined; nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    #[instrument(skip(self, confirm))]
    pub async fn delete(
        &mut self,
        id: ProductId,
        confirm: &impl Confirm,
    ) -> Result<Option<Notice>, ConsoleError> {
        let name = self
            .find(id)
            .map_or_else(|| format!("product #{id}"), |p| p.display_name().to_string());
        if !confirm.confirm(&format!("Are you sure you want to delete {name}?")) {
            tracing::debug!("Delete declined");
            return Ok(None);
        }
        self.api.delete(&endpoints::delete_product(id)).await?;
        tracing::info!("Product deleted");
        self.reload().await;
        Ok(Some(Notice::success(format!("{name} deleted successfully!"))))
    }

    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "Re-fetch after mutation failed");
        }
    }
}
