//! `profile show|update`.

use storedesk_admin::models::ProfileView;
use storedesk_admin::{ConsoleError, Route, Shell};

use super::{overlay, require};
use crate::output;

/// Fields given on the command line; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProfileEdits {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
}

pub async fn show(shell: &Shell) -> Result<(), ConsoleError> {
    require(shell, Route::Profile)?;
    let mut screen = shell.profile();
    print(screen.load().await?);
    Ok(())
}

pub async fn update(shell: &Shell, edits: ProfileEdits) -> Result<(), ConsoleError> {
    require(shell, Route::Profile)?;
    let mut screen = shell.profile();
    let mut form = screen.load().await?.to_form();
    overlay(&mut form.first_name, edits.first_name);
    overlay(&mut form.last_name, edits.last_name);
    overlay(&mut form.email, edits.email);
    overlay(&mut form.mobile, edits.mobile);
    overlay(&mut form.city, edits.city);
    overlay(&mut form.bio, edits.bio);

    let notice = screen.update(&form).await?;
    output::notice(&notice);
    if let Some(profile) = screen.profile() {
        output::blank();
        print(profile);
    }
    Ok(())
}

fn print(profile: &ProfileView) {
    output::heading(&profile.name);
    output::field("Position", &profile.position);
    output::field("Email", &profile.email);
    output::field("Phone", &profile.phone);
    output::field("Location", &profile.location);
    output::field("Bio", &profile.bio);
    output::field("Status", profile.status_label());
    output::field("Two-factor", if profile.two_factor { "on" } else { "off" });
    output::field("Member since", profile.member_since());
    if let Some(avatar) = &profile.avatar {
        output::field("Avatar", avatar);
    }
}
