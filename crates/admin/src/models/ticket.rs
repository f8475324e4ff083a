//! Support tickets.
//!
//! There is no ticket endpoint yet; the screen works on a local list seeded
//! from [`fixtures`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storedesk_core::{TicketPriority, TicketStatus};

use crate::components::Searchable;
use crate::error::ConsoleError;

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Display id, `#T-NNN`.
    pub id: String,
    pub customer: String,
    pub subject: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created: NaiveDate,
    pub updated: NaiveDate,
}

impl Ticket {
    /// Numeric part of the display id.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.id.strip_prefix("#T-").and_then(|n| n.parse().ok())
    }
}

impl Searchable for Ticket {
    fn matches(&self, needle: &str) -> bool {
        [&self.id, &self.customer, &self.subject]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// New-ticket form input.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub customer: String,
    pub subject: String,
    pub priority: TicketPriority,
}

impl NewTicket {
    /// Build the ticket that will be prepended to `existing`.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the customer or subject is empty.
    pub fn into_ticket(self, existing: &[Ticket], today: NaiveDate) -> Result<Ticket, ConsoleError> {
        let customer = self.customer.trim();
        let subject = self.subject.trim();
        if customer.is_empty() {
            return Err(ConsoleError::validation("Customer is required."));
        }
        if subject.is_empty() {
            return Err(ConsoleError::validation("Subject is required."));
        }
        let next = existing.iter().filter_map(Ticket::number).max().unwrap_or(0) + 1;
        Ok(Ticket {
            id: format!("#T-{next:03}"),
            customer: customer.to_string(),
            subject: subject.to_string(),
            priority: self.priority,
            status: TicketStatus::Open,
            created: today,
            updated: today,
        })
    }
}

/// Seed tickets shown until a ticket endpoint exists.
#[must_use]
pub fn fixtures() -> Vec<Ticket> {
    let rows = [
        ("#T-001", "John Doe", "Order not received", TicketPriority::High, TicketStatus::Open, 15, 15),
        ("#T-002", "Jane Smith", "Product defect", TicketPriority::Medium, TicketStatus::InProgress, 14, 15),
        ("#T-003", "Bob Johnson", "Refund request", TicketPriority::Low, TicketStatus::Resolved, 13, 14),
        ("#T-004", "Alice Brown", "Login issues", TicketPriority::High, TicketStatus::Open, 12, 12),
        ("#T-005", "Charlie Wilson", "Shipping inquiry", TicketPriority::Medium, TicketStatus::InProgress, 11, 13),
    ];
    rows.into_iter()
        .filter_map(|(id, customer, subject, priority, status, created, updated)| {
            Some(Ticket {
                id: id.to_string(),
                customer: customer.to_string(),
                subject: subject.to_string(),
                priority,
                status,
                created: NaiveDate::from_ymd_opt(2024, 1, created)?,
                updated: NaiveDate::from_ymd_opt(2024, 1, updated)?,
            })
        })
        .collect()
}
