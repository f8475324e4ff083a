//! Core types for StoreDesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError, strip_invisible};
pub use id::*;
pub use money::Money;
pub use phone::Mobile;
pub use status::*;
