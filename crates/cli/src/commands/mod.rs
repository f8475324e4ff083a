//! Command handlers, one module per screen.

#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod profile;
pub mod session;
pub mod settings;
pub mod tickets;

use std::io::{BufRead, Write};

use storedesk_admin::{Confirm, ConsoleError, Navigation, Route, Shell};

/// Stdin confirmation, or an unconditional yes with `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    assume_yes: bool,
}

impl Prompt {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        read_line(&format!("{prompt} [y/N] "))
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Print `prompt` to stderr and read one line from stdin.
fn read_line(prompt: &str) -> Option<String> {
    eprint!("{prompt}");
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    Some(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt for a secret without echoing it to the terminal.
pub fn read_secret(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(secret) => Some(secret),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read from the terminal");
            None
        }
    }
}

/// Open `route` through the shell; a redirect to sign-in stops the command.
pub fn require(shell: &Shell, route: Route) -> Result<(), ConsoleError> {
    match shell.navigate(route.path()) {
        Navigation::Render(r) if r == route => Ok(()),
        Navigation::Redirect(Route::Login) => Err(ConsoleError::Auth("sign in first".to_string())),
        other => Err(ConsoleError::validation(format!(
            "Cannot open {route}: {other:?}"
        ))),
    }
}

/// Replace `current` with `edit` when one was given.
pub fn overlay(current: &mut String, edit: Option<String>) {
    if let Some(value) = edit {
        *current = value;
    }
}
