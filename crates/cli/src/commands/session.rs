//! `login`, `logout` and `whoami`.

use storedesk_admin::{ConsoleError, Credentials, Navigation, Notice, Route, Shell};

use super::read_secret;
use crate::output;

pub async fn login(shell: &Shell, email: &str, password: Option<String>) -> Result<(), ConsoleError> {
    if shell.navigate(Route::Login.path()) == Navigation::Redirect(Route::DEFAULT) {
        output::notice(&Notice::info("Already signed in; signing in again."));
    }
    let password = match password {
        Some(p) => p,
        None => read_secret("Password: ").unwrap_or_default(),
    };
    let (user, _) = shell.sign_in(&Credentials::new(email, &password)).await?;
    output::notice(&Notice::success(format!("Signed in as {}", user.display_name())));
    Ok(())
}

pub fn logout(shell: &Shell) -> Result<(), ConsoleError> {
    shell.sign_out()?;
    output::notice(&Notice::success("Signed out."));
    Ok(())
}

pub fn whoami(shell: &Shell) -> Result<(), ConsoleError> {
    super::require(shell, Route::Profile)?;
    let user = shell
        .console()
        .session()
        .user()?
        .ok_or_else(ConsoleError::not_signed_in)?;
    output::field("Name", user.display_name());
    output::field("Email", user.email.as_deref().unwrap_or("-"));
    output::field("Roles", user.roles().join(", "));
    Ok(())
}
