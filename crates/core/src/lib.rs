//! StoreDesk Core - Shared domain types.
//!
//! This crate provides the types shared by every StoreDesk component:
//! - `admin` - Console library (session, API client, screens)
//! - `cli` - Terminal front end for the console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no persistence. The remote REST API is the system of record; these
//! types describe what the console displays and validates before sending.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, phone numbers, money and status lookups

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
