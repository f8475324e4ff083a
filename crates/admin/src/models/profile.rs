//! The signed-in administrator's own profile and account settings forms.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use storedesk_core::{Email, Mobile, UserId};

use super::de;
use super::session::SessionUser;
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;

/// Placeholder for empty profile fields.
pub const EMPTY: &str = "—";
pub const DEFAULT_POSITION: &str = "Administrator";
pub const DEFAULT_BIO: &str = "No bio available.";

/// `GET /user/user-details/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetails {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<UserId>,
    #[serde(default, alias = "first_name", deserialize_with = "de::opt_text")]
    pub firstname: Option<String>,
    #[serde(default, alias = "last_name", deserialize_with = "de::opt_text")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub role: Value,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub address_extra: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub profile_photo_path: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_active: bool,
    #[serde(default, alias = "two_factor_enabled", deserialize_with = "de::flag")]
    pub twofactor: bool,
}

impl UserDetails {
    /// Unwrap the record from a bare object or a `{data}` / `{user}` envelope.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` when the body is not a user record.
    pub fn from_response(body: Value) -> Result<Self, ConsoleError> {
        let record = match body {
            Value::Object(mut obj) if !obj.contains_key("email") => obj
                .remove("data")
                .or_else(|| obj.remove("user"))
                .unwrap_or(Value::Object(obj)),
            other => other,
        };
        serde_json::from_value(record)
            .map_err(|e| ConsoleError::Network(format!("Unexpected profile response: {e}")))
    }
}

/// Normalised profile for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub location: String,
    pub bio: String,
    pub created_at: Option<String>,
    pub avatar: Option<String>,
    pub active: bool,
    pub two_factor: bool,
}

fn or_placeholder(value: Option<&String>, placeholder: &str) -> String {
    value.cloned().unwrap_or_else(|| placeholder.to_string())
}

impl ProfileView {
    /// Normalise API details, resolving the avatar against the storage base.
    #[must_use]
    pub fn from_details(details: &UserDetails, config: &ConsoleConfig) -> Self {
        let name = format!(
            "{} {}",
            details.firstname.as_deref().unwrap_or_default(),
            details.lastname.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();
        let position = match &details.role {
            Value::Array(roles) => roles
                .first()
                .and_then(|r| r.get("name"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        }
        .unwrap_or_else(|| DEFAULT_POSITION.to_string());

        Self {
            name,
            email: or_placeholder(details.email.as_ref(), EMPTY),
            phone: or_placeholder(details.mobile.as_ref(), EMPTY),
            position,
            location: or_placeholder(details.city.as_ref(), EMPTY),
            bio: or_placeholder(details.address_extra.as_ref(), DEFAULT_BIO),
            created_at: details.created_at.clone(),
            avatar: details
                .profile_photo_path
                .as_deref()
                .map(|path| config.storage_url(path)),
            active: details.is_active,
            two_factor: details.twofactor,
        }
    }

    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }

    #[must_use]
    pub fn member_since(&self) -> String {
        de::display_date(self.created_at.as_deref())
    }

    /// Prefill an edit form; placeholders become empty fields.
    #[must_use]
    pub fn to_form(&self) -> ProfileForm {
        let unset = |v: &str, placeholder: &str| {
            if v == placeholder { String::new() } else { v.to_string() }
        };
        let mut parts = self.name.splitn(2, ' ');
        ProfileForm {
            first_name: parts.next().unwrap_or_default().to_string(),
            last_name: parts.next().unwrap_or_default().trim().to_string(),
            email: unset(&self.email, EMPTY),
            mobile: unset(&self.phone, EMPTY),
            city: unset(&self.location, EMPTY),
            bio: unset(&self.bio, DEFAULT_BIO),
        }
    }
}

/// Profile edit form.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub bio: String,
}

/// `PUT /admin/users/update/{id}` body for the own profile.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfile {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub address_extra: String,
}

impl ProfileForm {
    /// Validate and build the request body.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the first name is empty or the
    /// email is malformed.
    pub fn to_update(&self) -> Result<UpdateProfile, ConsoleError> {
        if self.first_name.trim().is_empty() {
            return Err(ConsoleError::validation("First name is required."));
        }
        let email = Email::parse(self.email.trim())
            .map_err(|e| ConsoleError::validation(format!("Invalid email: {e}")))?;
        Ok(UpdateProfile {
            firstname: self.first_name.trim().to_string(),
            lastname: self.last_name.trim().to_string(),
            email: email.into_inner(),
            mobile: Mobile::sanitize(&self.mobile),
            city: self.city.trim().to_string(),
            address_extra: self.bio.trim().to_string(),
        })
    }
}

impl UpdateProfile {
    /// Apply the edit to the cached session user.
    pub fn apply_to(&self, user: &mut SessionUser) {
        let opt = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        user.firstname = opt(&self.firstname);
        user.lastname = opt(&self.lastname);
        user.email = opt(&self.email);
        user.mobile = opt(&self.mobile);
        user.city = opt(&self.city);
        user.address_extra = opt(&self.address_extra);
    }
}

/// Password change form.
///
/// Passwords stay wrapped until the request body is built.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub new_password_confirmation: SecretString,
}

impl PasswordChange {
    #[must_use]
    pub fn new(current: &str, new: &str, confirmation: &str) -> Self {
        Self {
            current_password: SecretString::from(current),
            new_password: SecretString::from(new),
            new_password_confirmation: SecretString::from(confirmation),
        }
    }

    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when a field is empty or the
    /// confirmation does not match.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        let current = self.current_password.expose_secret();
        let new = self.new_password.expose_secret();
        let confirmation = self.new_password_confirmation.expose_secret();
        if current.is_empty() || new.is_empty() || confirmation.is_empty() {
            return Err(ConsoleError::validation("All password fields are required."));
        }
        if new != confirmation {
            return Err(ConsoleError::validation("New passwords do not match."));
        }
        Ok(())
    }

    /// `POST /user/change-password` body.
    pub(crate) fn body(&self) -> Value {
        json!({
            "current_password": self.current_password.expose_secret(),
            "new_password": self.new_password.expose_secret(),
            "new_password_confirmation": self.new_password_confirmation.expose_secret(),
        })
    }
}

/// `POST /user/twofactor-toggle` body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TwoFactorToggle {
    pub enabled: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ConsoleConfig {
        ConsoleConfig::for_api_base("http://localhost:1").unwrap()
    }

    #[test]
    fn test_normalises_details() {
        let details = UserDetails::from_response(json!({
            "id": 4,
            "firstname": "Asha",
            "lastname": "Rao",
            "email": "asha@example.com",
            "role": [{"name": "superadmin"}],
            "profile_photo_path": "profile-photos/a.png",
            "is_active": 1
        }))
        .unwrap();
        let view = ProfileView::from_details(&details, &config());
        assert_eq!(view.name, "Asha Rao");
        assert_eq!(view.position, "superadmin");
        assert_eq!(view.phone, EMPTY);
        assert_eq!(view.bio, DEFAULT_BIO);
        assert_eq!(
            view.avatar.as_deref(),
            Some("https://api.sartree.com/storage/profile-photos/a.png")
        );
        assert_eq!(view.status_label(), "Active");
    }

    #[test]
    fn test_position_defaults_to_administrator() {
        let details = UserDetails::from_response(json!({"data": {"email": "a@b.in", "role": "x"}})).unwrap();
        let view = ProfileView::from_details(&details, &config());
        assert_eq!(view.position, DEFAULT_POSITION);
        assert!(view.avatar.is_none());
    }

    #[test]
    fn test_form_round_trip_drops_placeholders() {
        let details = UserDetails::from_response(json!({"firstname": "Asha", "lastname": "Rao", "email": "asha@example.com"})).unwrap();
        let form = ProfileView::from_details(&details, &config()).to_form();
        assert_eq!(form.first_name, "Asha");
        assert_eq!(form.last_name, "Rao");
        assert_eq!(form.mobile, "");
        assert_eq!(form.bio, "");
        let body = form.to_update().unwrap();
        assert_eq!(body.address_extra, "");
    }

    #[test]
    fn test_password_change_validation() {
        let change = PasswordChange::new("old-password", "new-password", "new-passw0rd");
        assert!(matches!(change.validate(), Err(ConsoleError::Validation(_))));
        let change = PasswordChange::new("old-password", "new-password", "new-password");
        assert!(change.validate().is_ok());
        assert_eq!(change.body()["new_password_confirmation"], "new-password");
        assert!(PasswordChange::new("", "new-password", "new-password").validate().is_err());
        assert!(!format!("{change:?}").contains("old-password"));
    }

    #[test]
    fn test_apply_to_session_user() {
        let mut user: SessionUser = serde_json::from_value(json!({"id": 4, "firstname": "Old"})).unwrap();
        let update = UpdateProfile {
            firstname: "Asha".to_string(),
            lastname: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            mobile: String::new(),
            city: "Pune".to_string(),
            address_extra: String::new(),
        };
        update.apply_to(&mut user);
        assert_eq!(user.firstname.as_deref(), Some("Asha"));
        assert_eq!(user.city.as_deref(), Some("Pune"));
        assert!(user.mobile.is_none());
    }
}
