//! `settings two-factor|password`.

use storedesk_admin::models::PasswordChange;
use storedesk_admin::{ConsoleError, Route, Shell};

use super::{read_secret, require};
use crate::output;

pub async fn two_factor(shell: &Shell, enabled: bool) -> Result<(), ConsoleError> {
    require(shell, Route::Settings)?;
    let notice = shell.settings().toggle_two_factor(enabled).await?;
    output::notice(&notice);
    Ok(())
}

pub async fn password(shell: &Shell) -> Result<(), ConsoleError> {
    require(shell, Route::Settings)?;
    let current = read_secret("Current password: ").unwrap_or_default();
    let new = read_secret("New password: ").unwrap_or_default();
    let confirmation = read_secret("Confirm new password: ").unwrap_or_default();
    let change = PasswordChange::new(&current, &new, &confirmation);

    let (notice, _) = shell.settings().change_password(&change).await?;
    output::notice(&notice);
    Ok(())
}
