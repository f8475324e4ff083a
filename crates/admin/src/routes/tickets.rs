//! Support tickets screen.
//!
//! Tickets are held locally; creating one prepends it to the list.

use chrono::{NaiveDate, Utc};

use storedesk_core::TicketStatus;

use crate::components::{ListView, Notice};
use crate::error::ConsoleError;
use crate::models::ticket::{self, NewTicket, Ticket};

#[derive(Debug)]
pub struct TicketsScreen {
    pub view: ListView<Ticket>,
}

impl Default for TicketsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketsScreen {
    /// A screen seeded with the fixture tickets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tickets(ticket::fixtures())
    }

    #[must_use]
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let mut view = ListView::new();
        // Infallible: the input is Ok and a fresh view is mounted.
        let _ = view.apply(Ok(tickets));
        Self { view }
    }

    /// Create a ticket dated today.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the customer or subject is empty.
    pub fn create(&mut self, new: NewTicket) -> Result<Notice, ConsoleError> {
        self.create_on(new, Utc::now().date_naive())
    }

    /// Create a ticket with an explicit date.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Validation` when the customer or subject is empty.
    pub fn create_on(&mut self, new: NewTicket, today: NaiveDate) -> Result<Notice, ConsoleError> {
        let ticket = new.into_ticket(self.view.records(), today)?;
        let id = ticket.id.clone();
        self.view.update(|tickets| tickets.insert(0, ticket));
        tracing::info!(ticket = %id, "Ticket created");
        Ok(Notice::success(format!("Ticket {id} created.")))
    }

    /// Number of tickets in `status`.
    #[must_use]
    pub fn count(&self, status: TicketStatus) -> usize {
        self.view
            .records()
            .iter()
            .filter(|t| t.status == status)
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::Searchable;
    use storedesk_core::TicketPriority;

    #[test]
    fn test_create_prepends() {
        let mut screen = TicketsScreen::new();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        screen
            .create_on(
                NewTicket {
                    customer: "Asha Rao".to_string(),
                    subject: "Wrong size".to_string(),
                    priority: TicketPriority::Medium,
                },
                today,
            )
            .unwrap();
        let first = screen.view.records().first().unwrap();
        assert_eq!(first.id, "#T-006");
        assert_eq!(screen.view.records().len(), 6);
        assert_eq!(screen.count(TicketStatus::Open), 3);
    }

    #[test]
    fn test_search_over_tickets() {
        let mut screen = TicketsScreen::new();
        screen.view.set_search("jane");
        let hits: Vec<_> = screen.view.filtered().collect();
        assert_eq!(hits.len(), 1);
        assert!(hits.first().unwrap().matches("defect"));
    }
}
