//! StoreDesk Admin library.
//!
//! A console over the store's admin REST API. The remote API is the system
//! of record; this crate holds the session, talks to the API and keeps the
//! per-screen view state the front end renders.
//!
//! # Security
//!
//! Only accounts carrying the super-admin claim may sign in. The bearer token
//! and OAuth client secret are kept in [`secrecy::SecretString`] and never
//! logged.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`session`] - Persistent token and cached user
//! - [`api`] - Authenticated REST client
//! - [`services`] - Sign-in and sign-out
//! - [`routes`] - Navigation shell and entity screens
//! - [`models`] - Wire models and forms
//! - [`components`] - List view state, notices, confirmation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use components::{AlwaysConfirm, Confirm, NeverConfirm, Notice, NoticeLevel};
pub use config::{ConfigError, ConsoleConfig, OAuthClientConfig};
pub use error::ConsoleError;
pub use routes::{Navigation, Route, Shell, ShellState};
pub use services::Credentials;
pub use session::{FileBackend, MemoryBackend, SessionBackend, SessionContext};
pub use state::Console;
