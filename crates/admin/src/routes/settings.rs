//! Store settings and account security.
//!
//! Store, payment and notification preferences have no backing endpoint and
//! are validated and held locally. Two-factor and password changes go to the
//! API.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use storedesk_core::Email;

use super::{Navigation, Route};
use crate::api::{ApiClient, endpoints};
use crate::components::Notice;
use crate::error::ConsoleError;
use crate::models::PasswordChange;
use crate::models::profile::TwoFactorToggle;

pub const PASSWORD_CHANGED: &str = "Password updated successfully! Please log in again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "ECommerce Store".to_string(),
            email: "admin@ecommerce.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            address: "123 Commerce St, City, State 12345".to_string(),
        }
    }
}

impl StoreInfo {
    fn validate(&self) -> Result<(), ConsoleError> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::validation("Store name is required."));
        }
        Email::parse(self.email.trim())
            .map_err(|e| ConsoleError::validation(format!("Invalid store email: {e}")))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// ISO 4217 code.
    pub currency: String,
    /// Percentage, kept as typed.
    pub tax_rate: String,
    pub paypal: bool,
    pub stripe: bool,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            tax_rate: "8.5".to_string(),
            paypal: true,
            stripe: true,
        }
    }
}

impl PaymentSettings {
    /// Parsed tax rate.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` unless the rate is a number in 0..=100.
    pub fn tax_rate(&self) -> Result<Decimal, ConsoleError> {
        let rate = Decimal::from_str(self.tax_rate.trim())
            .map_err(|_| ConsoleError::validation("Tax rate must be a number."))?;
        if rate.is_sign_negative() || rate > Decimal::ONE_HUNDRED {
            return Err(ConsoleError::validation("Tax rate must be between 0 and 100."));
        }
        Ok(rate)
    }

    fn validate(&self) -> Result<(), ConsoleError> {
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConsoleError::validation("Currency must be a 3-letter code."));
        }
        self.tax_rate().map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_stock: bool,
    pub notification_email: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            low_stock: true,
            notification_email: "admin@ecommerce.com".to_string(),
        }
    }
}

impl NotificationSettings {
    fn validate(&self) -> Result<(), ConsoleError> {
        if self.email_notifications {
            Email::parse(self.notification_email.trim()).map_err(|e| {
                ConsoleError::validation(format!("Invalid notification email: {e}"))
            })?;
        }
        Ok(())
    }
}

/// Settings screen.
#[derive(Debug)]
pub struct SettingsScreen {
    api: ApiClient,
    store: StoreInfo,
    payment: PaymentSettings,
    notifications: NotificationSettings,
    two_factor: bool,
}

impl SettingsScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: StoreInfo::default(),
            payment: PaymentSettings::default(),
            notifications: NotificationSettings::default(),
            two_factor: false,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &StoreInfo {
        &self.store
    }

    #[must_use]
    pub const fn payment(&self) -> &PaymentSettings {
        &self.payment
    }

    #[must_use]
    pub const fn notifications(&self) -> &NotificationSettings {
        &self.notifications
    }

    #[must_use]
    pub const fn two_factor(&self) -> bool {
        self.two_factor
    }

    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` and keeps the previous values.
    pub fn save_store(&mut self, store: StoreInfo) -> Result<Notice, ConsoleError> {
        store.validate()?;
        self.store = store;
        Ok(Notice::success("Store information saved successfully!"))
    }

    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` and keeps the previous values.
    pub fn save_payment(&mut self, payment: PaymentSettings) -> Result<Notice, ConsoleError> {
        payment.validate()?;
        self.payment = PaymentSettings {
            currency: payment.currency.trim().to_uppercase(),
            ..payment
        };
        Ok(Notice::success("Payment settings saved successfully!"))
    }

    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` and keeps the previous values.
    pub fn save_notifications(
        &mut self,
        notifications: NotificationSettings,
    ) -> Result<Notice, ConsoleError> {
        notifications.validate()?;
        self.notifications = notifications;
        Ok(Notice::success("Notification settings saved successfully!"))
    }

    /// Turn two-factor authentication on or off.
    ///
    /// The local switch only moves once the API accepts the change.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    #[instrument(skip(self))]
    pub async fn toggle_two_factor(&mut self, enabled: bool) -> Result<Notice, ConsoleError> {
        self.api
            .post_json(endpoints::TWO_FACTOR_TOGGLE, &TwoFactorToggle { enabled })
            .await?;
        self.two_factor = enabled;
        tracing::info!(enabled, "Two-factor setting changed");
        let state = if enabled { "Enabled" } else { "Disabled" };
        Ok(Notice::success(format!("Two-Factor {state}")))
    }

    /// Change the password and end the session.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` for bad input (no request is sent),
    /// the API error, or `ConsoleError::Storage` if the session cannot be
    /// cleared.
    #[instrument(skip_all)]
    pub async fn change_password(
        &mut self,
        change: &PasswordChange,
    ) -> Result<(Notice, Navigation), ConsoleError> {
        change.validate()?;
        self.api
            .post_json(endpoints::CHANGE_PASSWORD, &change.body())
            .await?;
        tracing::info!("Password changed, signing out");
        self.api.session().clear()?;
        Ok((
            Notice::success(PASSWORD_CHANGED),
            Navigation::Redirect(Route::Login),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::session::SessionContext;

    fn screen() -> SettingsScreen {
        let config = ConsoleConfig::for_api_base("http://127.0.0.1:9").unwrap();
        SettingsScreen::new(ApiClient::new(&config, SessionContext::in_memory()).unwrap())
    }

    #[test]
    fn test_defaults() {
        let screen = screen();
        assert_eq!(screen.store().name, "ECommerce Store");
        assert_eq!(screen.payment().tax_rate().unwrap(), Decimal::new(85, 1));
        assert!(screen.notifications().email_notifications);
        assert!(!screen.two_factor());
    }

    #[test]
    fn test_invalid_store_email_keeps_previous() {
        let mut screen = screen();
        let store = StoreInfo {
            email: "not-an-email".to_string(),
            ..StoreInfo::default()
        };
        assert!(matches!(screen.save_store(store), Err(ConsoleError::Validation(_))));
        assert_eq!(screen.store().email, "admin@ecommerce.com");
    }

    #[test]
    fn test_payment_validation() {
        let mut screen = screen();
        let bad = PaymentSettings {
            tax_rate: "120".to_string(),
            ..PaymentSettings::default()
        };
        assert!(screen.save_payment(bad).is_err());
        let good = PaymentSettings {
            currency: " inr ".to_string(),
            tax_rate: "18".to_string(),
            ..PaymentSettings::default()
        };
        screen.save_payment(good).unwrap();
        assert_eq!(screen.payment().currency, "INR");
    }

    #[test]
    fn test_notification_email_only_checked_when_enabled() {
        let mut screen = screen();
        let off = NotificationSettings {
            email_notifications: false,
            notification_email: String::new(),
            ..NotificationSettings::default()
        };
        assert!(screen.save_notifications(off).is_ok());
        let on = NotificationSettings {
            notification_email: String::new(),
            ..NotificationSettings::default()
        };
        assert!(screen.save_notifications(on).is_err());
    }

    #[tokio::test]
    async fn test_mismatched_password_sends_nothing() {
        let mut screen = screen();
        let change = PasswordChange::new("old-password", "a-new-one", "another");
        let err = screen.change_password(&change).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
    }
}
