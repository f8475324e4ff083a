//! `dashboard`.

use storedesk_admin::{ConsoleError, Route, Shell};

use super::require;
use crate::output::{self, Table};

pub async fn show(shell: &Shell) -> Result<(), ConsoleError> {
    require(shell, Route::Dashboard)?;
    let mut screen = shell.dashboard();
    let summary = screen.load().await?;

    output::heading("Dashboard");
    output::field("Customers", summary.customers);
    output::field("Orders", summary.orders);
    output::field("Products", summary.products);
    output::field("Revenue", summary.revenue);
    output::blank();

    let mut recent = Table::new(&["Order", "Customer", "Total", "Status", "Placed"]);
    for o in &summary.recent {
        recent.row(vec![
            format!("#{}", o.id),
            o.customer_name(),
            o.total().to_string(),
            o.status_label(),
            o.placed(),
        ]);
    }
    recent.print();
    Ok(())
}
