//! Mobile phone numbers as accepted by the customer registration endpoint.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A mobile number consisting of 8 to 15 ASCII digits.
///
/// The registration endpoint rejects anything else, so forms send an empty
/// string instead of an invalid number (see [`Mobile::sanitize`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mobile(String);

impl Mobile {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a mobile number, returning `None` when it is not 8-15 digits.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let valid = (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&s.len())
            && s.bytes().all(|b| b.is_ascii_digit());
        valid.then(|| Self(s.to_owned()))
    }

    /// The value to submit for free-form input: the number when valid,
    /// otherwise an empty string.
    ///
    /// ```
    /// use storedesk_core::Mobile;
    ///
    /// assert_eq!(Mobile::sanitize("9876543210"), "9876543210");
    /// assert_eq!(Mobile::sanitize("+91 98765"), "");
    /// ```
    #[must_use]
    pub fn sanitize(s: &str) -> String {
        Self::parse(s).map(Self::into_inner).unwrap_or_default()
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Mobile` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(Mobile::parse("1234567").is_none());
        assert!(Mobile::parse("12345678").is_some());
        assert!(Mobile::parse("123456789012345").is_some());
        assert!(Mobile::parse("1234567890123456").is_none());
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(Mobile::parse("98765-43210").is_none());
        assert_eq!(Mobile::sanitize("phone"), "");
    }
}
