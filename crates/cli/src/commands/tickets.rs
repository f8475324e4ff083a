//! `tickets list|add`.
//!
//! Tickets live in memory, so an added ticket is only shown by the command
//! that added it.

use storedesk_admin::models::NewTicket;
use storedesk_admin::routes::TicketsScreen;
use storedesk_admin::{ConsoleError, Route, Shell};
use storedesk_core::{TicketPriority, TicketStatus};

use super::require;
use crate::output::{self, Table};

pub fn list(shell: &Shell, search: Option<String>) -> Result<(), ConsoleError> {
    require(shell, Route::Tickets)?;
    let mut screen = shell.tickets();
    screen.view.set_search(search.unwrap_or_default());
    print(&screen);
    Ok(())
}

pub fn add(
    shell: &Shell,
    customer: String,
    subject: String,
    priority: TicketPriority,
) -> Result<(), ConsoleError> {
    require(shell, Route::Tickets)?;
    let mut screen = shell.tickets();
    let notice = screen.create(NewTicket {
        customer,
        subject,
        priority,
    })?;
    output::notice(&notice);
    print(&screen);
    Ok(())
}

fn print(screen: &TicketsScreen) {
    let mut table = Table::new(&["Ticket", "Customer", "Subject", "Priority", "Status", "Updated"]);
    for t in screen.view.filtered() {
        table.row(vec![
            t.id.clone(),
            t.customer.clone(),
            t.subject.clone(),
            t.priority.to_string(),
            t.status.to_string(),
            t.updated.format("%Y-%m-%d").to_string(),
        ]);
    }
    table.print();
    output::blank();
    for status in [TicketStatus::Open, TicketStatus::InProgress, TicketStatus::Resolved] {
        output::field(&status.to_string(), screen.count(status));
    }
}
