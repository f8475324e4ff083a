//! The signed-in administrator's own profile.

use chrono::Utc;
use tracing::instrument;

use storedesk_core::UserId;

use crate::api::endpoints;
use crate::components::Notice;
use crate::error::ConsoleError;
use crate::models::{ProfileForm, ProfileView, UserDetails};
use crate::state::Console;

#[derive(Debug)]
pub struct ProfileScreen {
    console: Console,
    profile: Option<ProfileView>,
}

impl ProfileScreen {
    #[must_use]
    pub const fn new(console: Console) -> Self {
        Self {
            console,
            profile: None,
        }
    }

    /// The last loaded profile.
    #[must_use]
    pub const fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    fn user_id(&self) -> Result<UserId, ConsoleError> {
        self.console
            .session()
            .user()?
            .map(|u| u.id)
            .ok_or_else(ConsoleError::not_signed_in)
    }

    /// Fetch the profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Auth` without a session user (no request is
    /// sent) or the API error.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&ProfileView, ConsoleError> {
        let id = self.user_id()?;
        self.fetch(&endpoints::user_details(id)).await
    }

    async fn fetch(&mut self, path: &str) -> Result<&ProfileView, ConsoleError> {
        let body = self.console.api().get(path).await?;
        let details = UserDetails::from_response(body)?;
        let view = ProfileView::from_details(&details, self.console.config());
        Ok(self.profile.insert(view))
    }

    /// Save the profile, refresh the cached session user and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for bad input (no request is sent),
    /// `ConsoleError::Auth` without a session user, or the API error.
    #[instrument(skip(self, form))]
    pub async fn update(&mut self, form: &ProfileForm) -> Result<Notice, ConsoleError> {
        let body = form.to_update()?;
        let session = self.console.session();
        let mut user = session.user()?.ok_or_else(ConsoleError::not_signed_in)?;
        let id = user.id;

        self.console
            .api()
            .put_json(&endpoints::update_user(id), &body)
            .await?;
        tracing::info!(user_id = %id, "Profile updated");

        body.apply_to(&mut user);
        session.update_user(&user)?;

        let fresh = endpoints::with_query(
            &endpoints::user_details(id),
            "_",
            Utc::now().timestamp_millis(),
        );
        if let Err(e) = self.fetch(&fresh).await {
            tracing::warn!(error = %e, "Re-fetch after profile update failed");
        }
        Ok(Notice::success("Profile updated successfully!"))
    }
}
