//! Services shared by the screens and the command-line front end.
//!
//! - `auth` - password-grant sign-in with the super-admin check, and sign-out

pub mod auth;

pub use auth::{AuthService, Credentials};
