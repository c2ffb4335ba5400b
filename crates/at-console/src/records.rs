//! # Console Records
//!
//! The record shapes behind each console screen. Plain serde structs with a
//! stable `id`; optional fields stay optional so the engine's fail-closed
//! semantics apply instead of a deserialization error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login/activity session row (the activity-log screen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub user_type: Option<String>,
    pub action: String,
    pub device: Option<Device>,
    pub ip: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Device info nested inside a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type")]
    pub kind: String,
    pub os: Option<String>,
}

/// An invoice row (the billing screen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client: String,
    pub client_email: Option<String>,
    /// "draft" | "sent" | "paid" | "overdue"
    pub status: String,
    pub total: Option<f64>,
    pub issued_at: Option<DateTime<Utc>>,
}

/// A creator payout row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub creator: String,
    /// "bank_transfer" | "paypal" | "stripe"
    pub method: Option<String>,
    /// "pending" | "processing" | "completed" | "failed"
    pub status: String,
    pub amount: Option<f64>,
    pub requested_at: Option<DateTime<Utc>>,
}

/// A support ticket row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub requester: String,
    pub requester_email: Option<String>,
    /// "low" | "medium" | "high" | "urgent"
    pub priority: Option<String>,
    /// "open" | "in_progress" | "resolved" | "closed"
    pub status: String,
    pub opened_at: Option<DateTime<Utc>>,
}

/// An audit-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub resource: String,
    /// "info" | "warning" | "critical"
    pub severity: Option<String>,
    pub detail: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A content-moderation case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationCase {
    pub id: String,
    /// "listing" | "photo" | "review" | "message"
    pub content_type: String,
    pub reporter: String,
    pub reason: String,
    /// "pending" | "approved" | "removed" | "escalated"
    pub status: String,
    pub reported_at: Option<DateTime<Utc>>,
}
