//! Screen building blocks shared by every entity screen.

mod confirm;
mod list_view;
mod notice;

pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm};
pub use list_view::{ListView, Searchable, ViewState};
pub use notice::{Notice, NoticeLevel};
