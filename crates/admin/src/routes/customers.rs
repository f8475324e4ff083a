//! Customers screen.

use tracing::instrument;

use storedesk_core::CustomerId;

use crate::api::{ApiClient, endpoints};
use crate::components::{Confirm, ListView, Notice};
use crate::error::ConsoleError;
use crate::models::{Customer, CustomerForm};

/// Customer list with add, edit and delete.
#[derive(Debug)]
pub struct CustomersScreen {
    api: ApiClient,
    pub view: ListView<Customer>,
}

impl CustomersScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            view: ListView::new(),
        }
    }

    /// Fetch the customer list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it in the view.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.view.begin_load();
        let result = self.api.list_records(endpoints::ALL_CUSTOMERS).await;
        self.view.apply(result)
    }

    #[must_use]
    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.view.records().iter().find(|c| c.id == id)
    }

    /// Register a new customer, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for bad input (no request is sent)
    /// or the API error.
    #[instrument(skip(self, form))]
    pub async fn add(&mut self, form: &CustomerForm) -> Result<Notice, ConsoleError> {
        let body = form.to_register()?;
        self.api
            .post_json(endpoints::REGISTER_CUSTOMER, &body)
            .await?;
        tracing::info!("Customer registered");
        self.reload().await;
        Ok(Notice::success("Customer added successfully!"))
    }

    /// Update a customer, then re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for bad input (no request is sent)
    /// or the API error.
    #[instrument(skip(self, form))]
    pub async fn edit(&mut self, id: CustomerId, form: &CustomerForm) -> Result<Notice, ConsoleError> {
        let body = form.to_update()?;
        self.api.put_json(&endpoints::update_user(id), &body).await?;
        tracing::info!("Customer updated");
        self.reload().await;
        Ok(Notice::success("Customer updated successfully!"))
    }

    /// Delete a customer after confirmation, then re-fetch.
    ///
    /// Returns `Ok(None)` when the confirmation is declined; nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    #[instrument(skip(self, confirm))]
    pub async fn delete(
        &mut self,
        id: CustomerId,
        confirm: &impl Confirm,
    ) -> Result<Option<Notice>, ConsoleError> {
        let name = self
            .find(id)
            .map_or_else(|| format!("customer #{id}"), Customer::full_name);
        if !confirm.confirm(&format!("Are you sure you want to delete {name}?")) {
            tracing::debug!("Delete declined");
            return Ok(None);
        }
        self.api.delete(&endpoints::destroy_user(id)).await?;
        tracing::info!("Customer deleted");
        self.reload().await;
        Ok(Some(Notice::success("Customer deleted successfully!")))
    }

    /// Re-fetch after a mutation. A failure shows in the view state only.
    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "Re-fetch after mutation failed");
        }
    }
}
