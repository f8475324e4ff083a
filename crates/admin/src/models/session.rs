//! Session-related types for admin authentication.
//!
//! The signed-in administrator is cached next to the bearer token so screens
//! can read the user id and display name without another round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storedesk_core::UserId;

use super::de;

/// Role name granting console access.
pub const SUPER_ADMIN_ROLE: &str = "superadmin";

/// Cached user record of the signed-in administrator.
///
/// Unknown fields are preserved in `extra` so the record written back to the
/// session store after a profile edit loses nothing the API sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// API user id.
    #[serde(deserialize_with = "de::id")]
    pub id: UserId,
    #[serde(default, alias = "first_name", deserialize_with = "de::opt_text")]
    pub firstname: Option<String>,
    #[serde(default, alias = "last_name", deserialize_with = "de::opt_text")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub address_extra: Option<String>,
    /// Role claim: a string, an array of strings, or an array of `{name}`.
    #[serde(default)]
    pub role: Value,
    /// `1` for system administrators.
    #[serde(default)]
    pub sys_admin: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Every role name carried by the role claim.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        match &self.role {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_owned),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this user may use the console.
    ///
    /// True when `sys_admin` is the number `1`, or when the role claim is
    /// exactly `superadmin` (as a string or as an array element). Role names
    /// are compared case-sensitively.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.sys_admin.as_i64() == Some(1) || self.roles().iter().any(|r| r == SUPER_ADMIN_ROLE)
    }

    /// "First Last", falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.firstname.as_deref().unwrap_or_default(),
            self.lastname.as_deref().unwrap_or_default()
        );
        let name = name.trim();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| format!("user {}", self.id))
        } else {
            name.to_string()
        }
    }
}

/// Keys of the session document.
pub mod keys {
    /// Bearer token.
    pub const ADMIN_TOKEN: &str = "adminToken";

    /// Serialized [`super::SessionUser`].
    pub const ADMIN_USER: &str = "adminUser";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: Value) -> SessionUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sys_admin_flag_grants_access() {
        assert!(user(json!({"id": 1, "sys_admin": 1})).is_super_admin());
        assert!(!user(json!({"id": 1, "sys_admin": 0})).is_super_admin());
    }

    #[test]
    fn test_sys_admin_must_be_numeric_one() {
        for flag in [json!(true), json!("yes"), json!("true"), json!("1"), json!(2)] {
            let u = user(json!({"id": 1, "role": "customer", "sys_admin": flag.clone()}));
            assert!(!u.is_super_admin(), "sys_admin {flag} must not grant access");
        }
    }

    #[test]
    fn test_role_match_is_exact() {
        assert!(!user(json!({"id": 1, "role": "SuperAdmin"})).is_super_admin());
        assert!(!user(json!({"id": 1, "role": "not-superadmin"})).is_super_admin());
        assert!(!user(json!({"id": 1, "role": ["SUPERADMIN"]})).is_super_admin());
        assert!(!user(json!({"id": 1, "role": [{"name": "Superadmin"}]})).is_super_admin());
    }

    #[test]
    fn test_numeric_string_id() {
        assert_eq!(user(json!({"id": "5", "sys_admin": 1})).id, UserId::new(5));
        assert!(serde_json::from_value::<SessionUser>(json!({"id": "five"})).is_err());
    }

    #[test]
    fn test_role_shapes() {
        assert!(user(json!({"id": 1, "role": "superadmin"})).is_super_admin());
        assert!(user(json!({"id": 1, "role": ["editor", "superadmin"]})).is_super_admin());
        assert!(user(json!({"id": 1, "role": [{"name": "superadmin"}]})).is_super_admin());
        assert!(!user(json!({"id": 1, "role": [{"name": "customer"}]})).is_super_admin());
        assert!(!user(json!({"id": 1, "role": "customer"})).is_super_admin());
        assert!(!user(json!({"id": 1})).is_super_admin());
    }

    #[test]
    fn test_roles_lists_names() {
        let u = user(json!({"id": 1, "role": [{"name": "superadmin"}, "auditor", 7]}));
        assert_eq!(u.roles(), vec!["superadmin", "auditor"]);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let u = user(json!({"id": 3, "first_name": "Asha", "profile_photo_path": "a.png"}));
        assert_eq!(u.firstname.as_deref(), Some("Asha"));
        let back = serde_json::to_value(&u).unwrap();
        assert_eq!(back["profile_photo_path"], "a.png");
        assert_eq!(back["firstname"], "Asha");
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(
            user(json!({"id": 3, "firstname": "Asha", "lastname": "Rao"})).display_name(),
            "Asha Rao"
        );
        assert_eq!(
            user(json!({"id": 3, "email": "a@example.com"})).display_name(),
            "a@example.com"
        );
    }
}
