//! Plain-text rendering for terminal output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use storedesk_admin::Notice;

/// A left-aligned text table.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn print(&self) {
        if self.rows.is_empty() {
            println!("(no records)");
            return;
        }
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let headers: Vec<String> = self.headers.iter().map(ToString::to_string).collect();
        print_line(&headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        print_line(&rule, &widths);
        for row in &self.rows {
            print_line(row, &widths);
        }
    }
}

fn print_line(cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", line.trim_end());
}

/// `label: value` line for detail views.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("{label:>14}: {value}");
}

pub fn heading(text: &str) {
    println!("{text}");
    println!("{}", "=".repeat(text.chars().count()));
}

pub fn blank() {
    println!();
}

/// Errors go to stderr, everything else to stdout.
pub fn notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_collects_rows() {
        let mut table = Table::new(&["ID", "Name"]);
        table.row(vec!["1".to_string(), "Asha Rao".to_string()]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.headers, vec!["ID", "Name"]);
    }
}
