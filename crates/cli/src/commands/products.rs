//! `products list|add|edit|delete`.

use storedesk_admin::models::{Product, ProductDraft};
use storedesk_admin::{Confirm, ConsoleError, Route, Shell};
use storedesk_core::ProductId;

use super::{overlay, require};
use crate::ProductFields;
use crate::output::{self, Table};

pub async fn list(
    shell: &Shell,
    search: Option<String>,
    category: String,
    status: String,
) -> Result<(), ConsoleError> {
    require(shell, Route::Products)?;
    let mut screen = shell.products();
    screen.load().await?;
    screen.view.set_search(search.unwrap_or_default());
    screen.set_category_filter(category);
    screen.set_status_filter(status);

    let mut table = Table::new(&["ID", "Name", "Category", "Price", "Stock", "Status"]);
    for p in screen.visible() {
        table.row(vec![
            p.id.to_string(),
            p.display_name().to_string(),
            p.category_title().unwrap_or("-").to_string(),
            p.price().to_string(),
            p.stock().map_or_else(|| "-".to_string(), |s| s.to_string()),
            p.status_label(),
        ]);
    }
    table.print();

    let counts = screen.counts();
    output::blank();
    output::field("Total", counts.total);
    output::field("Active", counts.active);
    output::field("Low stock", counts.low_stock);
    output::field("Out of stock", counts.out_of_stock);
    Ok(())
}

pub async fn add(shell: &Shell, fields: ProductFields) -> Result<(), ConsoleError> {
    require(shell, Route::Products)?;
    let mut draft = ProductDraft::default();
    apply(&mut draft, fields);
    let notice = shell.products().create(&draft).await?;
    output::notice(&notice);
    Ok(())
}

pub async fn edit(shell: &Shell, id: ProductId, fields: ProductFields) -> Result<(), ConsoleError> {
    require(shell, Route::Products)?;
    let mut screen = shell.products();
    screen.load().await?;
    let mut draft = screen
        .find(id)
        .map(Product::to_draft)
        .ok_or_else(|| ConsoleError::validation(format!("No product #{id}")))?;
    apply(&mut draft, fields);
    let notice = screen.update(id, &draft).await?;
    output::notice(&notice);
    Ok(())
}

pub async fn delete(shell: &Shell, id: ProductId, confirm: &impl Confirm) -> Result<(), ConsoleError> {
    require(shell, Route::Products)?;
    let mut screen = shell.products();
    screen.load().await?;
    if let Some(notice) = screen.delete(id, confirm).await? {
        output::notice(&notice);
    }
    Ok(())
}

fn apply(draft: &mut ProductDraft, fields: ProductFields) {
    overlay(&mut draft.title, fields.title);
    overlay(&mut draft.price, fields.price);
    overlay(&mut draft.quantity, fields.quantity);
    overlay(&mut draft.description, fields.description);
    overlay(&mut draft.image, fields.image);
    overlay(&mut draft.tax_percentage, fields.tax_percentage);
    overlay(&mut draft.discount, fields.discount);
    overlay(&mut draft.main_category_id, fields.main_category_id);
    overlay(&mut draft.child_category_id, fields.child_category_id);
}
