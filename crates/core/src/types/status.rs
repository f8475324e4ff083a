//! Status enums and their display tones.
//!
//! Every status-bearing entity maps its status to a [`Tone`] through a fixed
//! lookup. Values the console does not recognise fall back to
//! [`Tone::Neutral`] instead of failing, because the API is free to add
//! statuses the console has never seen.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display category for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Finished or healthy (green).
    Success,
    /// Needs attention soon (yellow).
    Warning,
    /// In flight (orange).
    Progress,
    /// Failed, cancelled or unavailable (red).
    Danger,
    /// Informational (blue).
    Info,
    /// Unknown or inactive (grey).
    #[default]
    Neutral,
}

impl Tone {
    /// Short label used by text front ends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Warning => "warn",
            Self::Progress => "busy",
            Self::Danger => "alert",
            Self::Info => "info",
            Self::Neutral => "-",
        }
    }
}

/// Order lifecycle status as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// All statuses an administrator may set.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Delivered,
        Self::Cancelled,
        Self::Failed,
    ];

    /// Parse a raw status case-insensitively. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "delivered" => Some(Self::Delivered),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Badge tone for this status.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Completed | Self::Delivered => Tone::Success,
            Self::Processing | Self::Pending => Tone::Warning,
            Self::Cancelled | Self::Failed => Tone::Danger,
        }
    }

    /// Tone for a raw, possibly unknown, status string.
    #[must_use]
    pub fn tone_of(raw: Option<&str>) -> Tone {
        raw.and_then(Self::parse).map_or(Tone::Neutral, Self::tone)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Product availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Inactive,
    LowStock,
    OutOfStock,
}

impl ProductStatus {
    /// Stock at or below this level counts as low stock.
    pub const LOW_STOCK_THRESHOLD: i64 = 10;

    /// Parse a display label (`active`, `low stock`, `out of stock`, ...).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "low stock" => Some(Self::LowStock),
            "out of stock" => Some(Self::OutOfStock),
            _ => None,
        }
    }

    /// Derive a status from the stock level when the API supplies none.
    #[must_use]
    pub const fn from_stock(quantity: i64) -> Self {
        if quantity <= 0 {
            Self::OutOfStock
        } else if quantity <= Self::LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::Active
        }
    }

    /// Display label, also used by the status filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::LowStock => "low stock",
            Self::OutOfStock => "out of stock",
        }
    }

    /// Badge tone for this status.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::LowStock => Tone::Warning,
            Self::OutOfStock => Tone::Danger,
            Self::Inactive => Tone::Neutral,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Support ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

impl TicketPriority {
    /// Badge tone for this priority.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::High => Tone::Danger,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Success,
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

impl core::str::FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("invalid ticket priority: {s}")),
        }
    }
}

/// Support ticket workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Badge tone for this status.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Open => Tone::Info,
            Self::InProgress => Tone::Progress,
            Self::Resolved => Tone::Success,
            Self::Closed => Tone::Neutral,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        })
    }
}
