//! `customers list|add|edit|delete`.

use storedesk_admin::models::CustomerForm;
use storedesk_admin::{Confirm, ConsoleError, Route, Shell};
use storedesk_core::CustomerId;

use super::{overlay, require};
use crate::CustomerFields;
use crate::output::{self, Table};

pub async fn list(shell: &Shell, search: Option<String>) -> Result<(), ConsoleError> {
    require(shell, Route::Customers)?;
    let mut screen = shell.customers();
    screen.load().await?;
    screen.view.set_search(search.unwrap_or_default());

    let mut table = Table::new(&["ID", "Name", "Email", "Mobile", "Status", "Joined"]);
    for c in screen.view.filtered() {
        table.row(vec![
            c.id.to_string(),
            c.full_name(),
            c.email.clone().unwrap_or_else(|| "-".to_string()),
            c.mobile.clone().unwrap_or_else(|| "-".to_string()),
            c.status_label().to_string(),
            c.joined(),
        ]);
    }
    table.print();
    Ok(())
}

pub async fn add(
    shell: &Shell,
    fields: CustomerFields,
    password: String,
    password_confirmation: String,
) -> Result<(), ConsoleError> {
    require(shell, Route::Customers)?;
    let mut form = CustomerForm {
        password,
        password_confirmation,
        ..CustomerForm::default()
    };
    apply(&mut form, fields);
    let notice = shell.customers().add(&form).await?;
    output::notice(&notice);
    Ok(())
}

pub async fn edit(shell: &Shell, id: CustomerId, fields: CustomerFields) -> Result<(), ConsoleError> {
    require(shell, Route::Customers)?;
    let mut screen = shell.customers();
    screen.load().await?;
    let mut form = screen
        .find(id)
        .map(storedesk_admin::models::Customer::to_form)
        .ok_or_else(|| ConsoleError::validation(format!("No customer #{id}")))?;
    apply(&mut form, fields);
    let notice = screen.edit(id, &form).await?;
    output::notice(&notice);
    Ok(())
}

pub async fn delete(shell: &Shell, id: CustomerId, confirm: &impl Confirm) -> Result<(), ConsoleError> {
    require(shell, Route::Customers)?;
    let mut screen = shell.customers();
    screen.load().await?;
    if let Some(notice) = screen.delete(id, confirm).await? {
        output::notice(&notice);
    }
    Ok(())
}

fn apply(form: &mut CustomerForm, fields: CustomerFields) {
    overlay(&mut form.first_name, fields.first_name);
    overlay(&mut form.last_name, fields.last_name);
    overlay(&mut form.email, fields.email);
    overlay(&mut form.mobile, fields.mobile);
}
