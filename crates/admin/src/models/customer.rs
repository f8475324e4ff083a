//! Customer records and the add/edit form.

use serde::{Deserialize, Serialize};

use storedesk_core::{CustomerId, Email, Mobile};

use super::de;
use crate::components::Searchable;
use crate::error::ConsoleError;

/// Minimum password length accepted by the registration endpoint.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A customer as listed by `GET /admin/all-customers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de::id")]
    pub id: CustomerId,
    #[serde(default, alias = "first_name", deserialize_with = "de::opt_text")]
    pub firstname: Option<String>,
    #[serde(default, alias = "last_name", deserialize_with = "de::opt_text")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
}

impl Customer {
    /// "First Last", or `-` when neither is known.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.firstname.as_deref().unwrap_or_default(),
            self.lastname.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        if name.is_empty() { "-".to_string() } else { name.to_string() }
    }

    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }

    #[must_use]
    pub fn joined(&self) -> String {
        de::display_date(self.created_at.as_deref())
    }

    /// Prefill an edit form from this record.
    #[must_use]
    pub fn to_form(&self) -> CustomerForm {
        CustomerForm {
            first_name: self.firstname.clone().unwrap_or_default(),
            last_name: self.lastname.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            mobile: self.mobile.clone().unwrap_or_default(),
            password: String::new(),
            password_confirmation: String::new(),
        }
    }
}

impl Searchable for Customer {
    fn matches(&self, needle: &str) -> bool {
        [self.firstname.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Raw add/edit customer form input.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub password_confirmation: String,
}

/// `POST /admin/customer-register` body.
#[derive(Debug, Serialize)]
pub struct RegisterCustomer {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub password_confirmation: String,
}

/// `PUT /admin/users/update/{id}` body for a customer.
#[derive(Debug, Serialize)]
pub struct UpdateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
}

impl CustomerForm {
    fn validated_email(&self) -> Result<Email, ConsoleError> {
        if self.first_name.trim().is_empty() {
            return Err(ConsoleError::validation("First name is required."));
        }
        if self.email.trim().is_empty() {
            return Err(ConsoleError::validation("Email is required."));
        }
        Email::parse(self.email.trim())
            .map_err(|e| ConsoleError::validation(format!("Invalid email: {e}")))
    }

    /// Validate for registration and build the request body.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when a required field is missing,
    /// the email is malformed, or the password is short or unconfirmed.
    pub fn to_register(&self) -> Result<RegisterCustomer, ConsoleError> {
        let email = self.validated_email()?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ConsoleError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        if self.password != self.password_confirmation {
            return Err(ConsoleError::validation("Passwords do not match."));
        }
        Ok(RegisterCustomer {
            username: email.as_str().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.into_inner(),
            mobile: Mobile::sanitize(&self.mobile),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        })
    }

    /// Validate for an edit and build the request body.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the first name or email is
    /// missing or the email is malformed.
    pub fn to_update(&self) -> Result<UpdateCustomer, ConsoleError> {
        let email = self.validated_email()?;
        Ok(UpdateCustomer {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.into_inner(),
            mobile: Mobile::sanitize(&self.mobile),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            mobile: "9876543210".to_string(),
            password: "longenough".to_string(),
            password_confirmation: "longenough".to_string(),
        }
    }

    #[test]
    fn test_register_uses_email_as_username() {
        let body = form().to_register().unwrap();
        assert_eq!(body.username, "asha@example.com");
        assert_eq!(body.mobile, "9876543210");
    }

    #[test]
    fn test_invalid_mobile_sent_empty() {
        let mut f = form();
        f.mobile = "12-34".to_string();
        assert_eq!(f.to_update().unwrap().mobile, "");
    }

    #[test]
    fn test_register_validation() {
        let mut f = form();
        f.password = "short".to_string();
        f.password_confirmation = "short".to_string();
        assert!(matches!(f.to_register(), Err(ConsoleError::Validation(_))));

        let mut f = form();
        f.password_confirmation = "different1".to_string();
        assert!(matches!(f.to_register(), Err(ConsoleError::Validation(_))));

        let mut f = form();
        f.first_name = "  ".to_string();
        assert!(matches!(f.to_register(), Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_update_does_not_need_password() {
        let mut f = form();
        f.password.clear();
        f.password_confirmation.clear();
        assert!(f.to_update().is_ok());
    }

    #[test]
    fn test_deserialize_and_search() {
        let c: Customer = serde_json::from_value(json!({
            "id": 12,
            "firstname": "Asha",
            "lastname": null,
            "email": "asha@example.com",
            "is_active": 1,
            "created_at": "2024-01-15T10:30:00.000000Z"
        }))
        .unwrap();
        assert_eq!(c.full_name(), "Asha");
        assert_eq!(c.status_label(), "Active");
        assert!(c.matches("asha@"));
        assert!(!c.matches("rao"));
    }
}
