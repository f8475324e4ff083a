//! `orders list|show|status`.

use storedesk_admin::{ConsoleError, Notice, Route, Shell};
use storedesk_core::{OrderId, OrderStatus};

use super::require;
use crate::output::{self, Table};

pub async fn list(shell: &Shell, search: Option<String>) -> Result<(), ConsoleError> {
    require(shell, Route::Orders)?;
    let mut screen = shell.orders();
    screen.load().await?;
    screen.view.set_search(search.unwrap_or_default());

    let mut table = Table::new(&["Order", "Customer", "Email", "Total", "Status", "", "Placed"]);
    for o in screen.view.filtered() {
        table.row(vec![
            format!("#{}", o.id),
            o.customer_name(),
            o.customer_email().to_string(),
            o.total().to_string(),
            o.status_label(),
            o.tone().label().to_string(),
            o.placed(),
        ]);
    }
    table.print();
    if let Some(page) = screen.truncated_at() {
        output::notice(&Notice::warning(format!(
            "Page {page} failed to load; showing the orders before it."
        )));
    }
    Ok(())
}

pub async fn show(shell: &Shell, id: OrderId) -> Result<(), ConsoleError> {
    require(shell, Route::Orders)?;
    let mut screen = shell.orders();
    screen.load().await?;
    let order = screen
        .show(id)
        .ok_or_else(|| ConsoleError::validation(format!("No order #{id}")))?;

    output::heading(&format!("Order #{}", order.id));
    output::field("Customer", order.customer_name());
    output::field("Email", order.customer_email());
    output::field("Status", order.status_label());
    output::field("Total", order.total());
    output::field("Placed", order.placed());
    output::field("Address", order.address_line());
    output::blank();

    let mut items = Table::new(&["Item", "Qty", "Price"]);
    for item in &order.items {
        items.row(vec![
            item.label(),
            item.quantity.map_or_else(|| "-".to_string(), |q| q.to_string()),
            item.price.map_or_else(|| "-".to_string(), |p| p.to_string()),
        ]);
    }
    items.print();
    Ok(())
}

pub async fn set_status(shell: &Shell, id: OrderId, status: OrderStatus) -> Result<(), ConsoleError> {
    require(shell, Route::Orders)?;
    let mut screen = shell.orders();
    screen.load().await?;
    if screen.show(id).is_none() {
        return Err(ConsoleError::validation(format!("No order #{id}")));
    }
    let notice = screen.update_status(id, status).await?;
    output::notice(&notice);
    Ok(())
}
