//! Sign-in and sign-out.
//!
//! Sign-in is an OAuth password grant against `/admin/login`. A valid
//! credential is not enough: the returned user must carry the super-admin
//! claim (see [`SessionUser::is_super_admin`]), otherwise the token is
//! discarded and the session stays empty.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use storedesk_core::{Email, strip_invisible};

use crate::api::{ApiClient, endpoints};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::models::SessionUser;

/// Message shown when the account lacks the super-admin claim.
pub const ACCESS_DENIED: &str = "Only Super Admin can log in.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Sign-in form input, cleaned of invisible characters.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Strip zero-width spaces and byte-order marks, then trim.
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: strip_invisible(email),
            password: SecretString::from(strip_invisible(password)),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when either field is empty or the
    /// email is malformed.
    pub fn validate(&self) -> Result<Email, ConsoleError> {
        if self.email.is_empty() || self.password.expose_secret().is_empty() {
            return Err(ConsoleError::validation("Email and password are required."));
        }
        Email::parse(&self.email).map_err(|e| ConsoleError::validation(format!("Invalid email: {e}")))
    }
}

#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(rename = "tokenDetails")]
    token_details: Option<TokenDetails>,
    #[serde(rename = "userDetails")]
    user_details: Option<Value>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct TokenDetails {
    access_token: Option<String>,
}

impl std::fmt::Debug for TokenDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDetails")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    api: &'a ApiClient,
    config: &'a ConsoleConfig,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient, config: &'a ConsoleConfig) -> Self {
        Self { api, config }
    }

    /// Exchange credentials for a session.
    ///
    /// On success the token and user are stored and the user is returned.
    ///
    /// # Errors
    ///
    /// - `ConsoleError::Validation` for empty or malformed input
    /// - `ConsoleError::Config` when no OAuth client is configured
    /// - `ConsoleError::Request` when the server rejects the credentials
    /// - `ConsoleError::Auth` when the response carries no access token
    /// - `ConsoleError::Network` when the user record cannot be decoded
    /// - `ConsoleError::AccessDenied` when the user is not a super admin
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionUser, ConsoleError> {
        credentials.validate()?;
        let oauth = self.config.oauth()?;

        let form = [
            ("email", credentials.email()),
            ("username", credentials.email()),
            ("password", credentials.password.expose_secret()),
            ("client_id", oauth.client_id.as_str()),
            ("client_secret", oauth.secret()),
            ("grant_type", "password"),
        ];
        let (status, body) = self.api.post_form(endpoints::LOGIN, &form).await?;
        let response: LoginResponse = serde_json::from_value(body).unwrap_or_default();
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| INVALID_CREDENTIALS.to_string());

        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "Sign-in rejected");
            return Err(ConsoleError::Request {
                status: status.as_u16(),
                message,
            });
        }
        let Some(token) = response
            .token_details
            .and_then(|t| t.access_token)
            .filter(|t| !t.trim().is_empty())
        else {
            return Err(ConsoleError::Auth(message));
        };
        let token = SecretString::from(token);

        let user = match response
            .user_details
            .map(serde_json::from_value::<SessionUser>)
            .transpose()
        {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in response carried an unreadable user record");
                self.api.session().clear()?;
                return Err(ConsoleError::Network(format!(
                    "Unexpected userDetails in sign-in response: {e}"
                )));
            }
        };
        let Some(user) = user.filter(SessionUser::is_super_admin) else {
            tracing::warn!("Sign-in refused: account lacks super-admin claim");
            self.api.session().clear()?;
            return Err(ConsoleError::AccessDenied(ACCESS_DENIED.to_string()));
        };

        self.api.session().set(&token, &user)?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Drop the stored session.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Storage` if the session cannot be cleared.
    pub fn sign_out(&self) -> Result<(), ConsoleError> {
        self.api.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
