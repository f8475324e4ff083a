//! Wire models and form types for the admin REST API.
//!
//! Response types deserialize leniently (see [`de`]); request bodies are
//! built from form types that validate their raw text input first.

pub mod customer;
pub mod de;
pub mod order;
pub mod product;
pub mod profile;
pub mod session;
pub mod ticket;

pub use customer::{Customer, CustomerForm};
pub use order::{Order, OrderItem};
pub use product::{Product, ProductCounts, ProductDraft};
pub use profile::{PasswordChange, ProfileForm, ProfileView, UserDetails};
pub use session::SessionUser;
pub use ticket::{NewTicket, Ticket};
