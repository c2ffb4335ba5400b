//! # Fixtures
//!
//! Deterministic mock datasets standing in for the platform store, one per
//! console screen. Timestamps are offsets from a caller-supplied anchor so
//! time-range filters stay meaningful no matter when the fixtures are built.
//!
//! The `generate_*` functions produce larger seeded datasets for volume
//! testing; the same `(count, seed, anchor)` always yields the same rows.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::records::{
    AuditEntry, Device, Invoice, ModerationCase, Payout, Session, SupportTicket,
};

// =============================================================================
// Hand-written sets (the original console's mock arrays)
// =============================================================================

pub fn sessions(anchor: DateTime<Utc>) -> Vec<Session> {
    vec![
        Session {
            id: "ses-001".into(),
            user_name: "Admin User".into(),
            user_email: Some("admin@atrium.test".into()),
            user_type: Some("staff".into()),
            action: "login".into(),
            device: Some(Device {
                kind: "desktop".into(),
                os: Some("macOS".into()),
            }),
            ip: Some("10.0.0.12".into()),
            timestamp: Some(anchor - Duration::minutes(12)),
        },
        Session {
            id: "ses-002".into(),
            user_name: "Sarah Johnson".into(),
            user_email: Some("sarah.johnson@atrium.test".into()),
            user_type: Some("host".into()),
            action: "update_listing".into(),
            device: Some(Device {
                kind: "mobile".into(),
                os: Some("iOS".into()),
            }),
            ip: Some("192.0.2.44".into()),
            timestamp: Some(anchor - Duration::hours(3)),
        },
        Session {
            id: "ses-003".into(),
            user_name: "Mike Rodriguez".into(),
            user_email: Some("mike.r@atrium.test".into()),
            user_type: Some("guest".into()),
            action: "login".into(),
            device: Some(Device {
                kind: "desktop".into(),
                os: Some("Windows".into()),
            }),
            ip: Some("198.51.100.7".into()),
            timestamp: Some(anchor - Duration::hours(26)),
        },
        Session {
            id: "ses-004".into(),
            user_name: "Emily Chen".into(),
            user_email: None,
            user_type: Some("creator".into()),
            action: "upload_media".into(),
            device: Some(Device {
                kind: "tablet".into(),
                os: None,
            }),
            ip: None,
            timestamp: Some(anchor - Duration::days(6)),
        },
        Session {
            id: "ses-005".into(),
            user_name: "Legacy Import".into(),
            user_email: None,
            user_type: None,
            action: "password_reset".into(),
            device: None,
            ip: None,
            timestamp: None,
        },
    ]
}

pub fn invoices(anchor: DateTime<Utc>) -> Vec<Invoice> {
    vec![
        Invoice {
            id: "inv-001".into(),
            number: "INV-2025-0041".into(),
            client: "Harbor View Rentals".into(),
            client_email: Some("billing@harborview.test".into()),
            status: "paid".into(),
            total: Some(5400.0),
            issued_at: Some(anchor - Duration::days(21)),
        },
        Invoice {
            id: "inv-002".into(),
            number: "INV-2025-0042".into(),
            client: "Cedar & Pine Stays".into(),
            client_email: Some("accounts@cedarpine.test".into()),
            status: "sent".into(),
            total: Some(4050.0),
            issued_at: Some(anchor - Duration::days(9)),
        },
        Invoice {
            id: "inv-003".into(),
            number: "INV-2025-0043".into(),
            client: "Sarah Johnson".into(),
            client_email: Some("sarah.johnson@atrium.test".into()),
            status: "overdue".into(),
            total: Some(2700.0),
            issued_at: Some(anchor - Duration::days(45)),
        },
        Invoice {
            id: "inv-004".into(),
            number: "INV-2025-0044".into(),
            client: "Lakeside Collective".into(),
            client_email: None,
            status: "draft".into(),
            total: Some(0.0),
            issued_at: Some(anchor - Duration::hours(4)),
        },
    ]
}

pub fn payouts(anchor: DateTime<Utc>) -> Vec<Payout> {
    vec![
        Payout {
            id: "pay-001".into(),
            creator: "Emily Chen".into(),
            method: Some("bank_transfer".into()),
            status: "completed".into(),
            amount: Some(1250.0),
            requested_at: Some(anchor - Duration::days(3)),
        },
        Payout {
            id: "pay-002".into(),
            creator: "Marcus Webb".into(),
            method: Some("paypal".into()),
            status: "processing".into(),
            amount: Some(860.5),
            requested_at: Some(anchor - Duration::hours(18)),
        },
        Payout {
            id: "pay-003".into(),
            creator: "Ana Silva".into(),
            method: Some("stripe".into()),
            status: "pending".into(),
            amount: Some(430.0),
            requested_at: Some(anchor - Duration::hours(2)),
        },
        Payout {
            id: "pay-004".into(),
            creator: "Marcus Webb".into(),
            method: Some("paypal".into()),
            status: "failed".into(),
            amount: Some(95.0),
            requested_at: Some(anchor - Duration::days(12)),
        },
    ]
}

pub fn tickets(anchor: DateTime<Utc>) -> Vec<SupportTicket> {
    vec![
        SupportTicket {
            id: "tic-001".into(),
            subject: "Payout stuck in processing".into(),
            requester: "Marcus Webb".into(),
            requester_email: Some("marcus@creators.test".into()),
            priority: Some("high".into()),
            status: "open".into(),
            opened_at: Some(anchor - Duration::hours(5)),
        },
        SupportTicket {
            id: "tic-002".into(),
            subject: "Cannot update listing photos".into(),
            requester: "Sarah Johnson".into(),
            requester_email: Some("sarah.johnson@atrium.test".into()),
            priority: Some("medium".into()),
            status: "in_progress".into(),
            opened_at: Some(anchor - Duration::days(1)),
        },
        SupportTicket {
            id: "tic-003".into(),
            subject: "Invoice totals look wrong".into(),
            requester: "Harbor View Rentals".into(),
            requester_email: None,
            priority: Some("urgent".into()),
            status: "open".into(),
            opened_at: Some(anchor - Duration::hours(1)),
        },
        SupportTicket {
            id: "tic-004".into(),
            subject: "Account deletion request".into(),
            requester: "Old Tenant".into(),
            requester_email: None,
            priority: None,
            status: "closed".into(),
            opened_at: Some(anchor - Duration::days(40)),
        },
    ]
}

pub fn audit(anchor: DateTime<Utc>) -> Vec<AuditEntry> {
    vec![
        AuditEntry {
            id: "aud-001".into(),
            actor: "admin@atrium.test".into(),
            action: "revoke_api_key".into(),
            resource: "key-7f3a".into(),
            severity: Some("warning".into()),
            detail: Some("Key unused for 90 days".into()),
            timestamp: Some(anchor - Duration::minutes(40)),
        },
        AuditEntry {
            id: "aud-002".into(),
            actor: "admin@atrium.test".into(),
            action: "update_config".into(),
            resource: "payout_schedule".into(),
            severity: Some("info".into()),
            detail: None,
            timestamp: Some(anchor - Duration::hours(7)),
        },
        AuditEntry {
            id: "aud-003".into(),
            actor: "ops@atrium.test".into(),
            action: "force_logout".into(),
            resource: "ses-003".into(),
            severity: Some("critical".into()),
            detail: Some("Suspicious IP range".into()),
            timestamp: Some(anchor - Duration::days(2)),
        },
    ]
}

pub fn moderation(anchor: DateTime<Utc>) -> Vec<ModerationCase> {
    vec![
        ModerationCase {
            id: "mod-001".into(),
            content_type: "listing".into(),
            reporter: "guest-4411".into(),
            reason: "Misleading photos".into(),
            status: "pending".into(),
            reported_at: Some(anchor - Duration::hours(9)),
        },
        ModerationCase {
            id: "mod-002".into(),
            content_type: "review".into(),
            reporter: "host-2280".into(),
            reason: "Harassment".into(),
            status: "escalated".into(),
            reported_at: Some(anchor - Duration::hours(30)),
        },
        ModerationCase {
            id: "mod-003".into(),
            content_type: "photo".into(),
            reporter: "guest-1094".into(),
            reason: "Copyright claim".into(),
            status: "removed".into(),
            reported_at: Some(anchor - Duration::days(8)),
        },
        ModerationCase {
            id: "mod-004".into(),
            content_type: "message".into(),
            reporter: "guest-4411".into(),
            reason: "Spam".into(),
            status: "approved".into(),
            reported_at: Some(anchor - Duration::days(1)),
        },
    ]
}

// =============================================================================
// Seeded volume generators
// =============================================================================

const FIRST_NAMES: &[&str] = &[
    "Sarah", "Mike", "Emily", "Marcus", "Ana", "Priya", "Tom", "Lena", "Omar", "Grace",
];
const LAST_NAMES: &[&str] = &[
    "Johnson", "Rodriguez", "Chen", "Webb", "Silva", "Patel", "Novak", "Kim", "Haddad", "Okafor",
];
const ACTIONS: &[&str] = &[
    "login",
    "logout",
    "update_listing",
    "upload_media",
    "password_reset",
    "export_report",
];
const DEVICE_KINDS: &[&str] = &["desktop", "mobile", "tablet"];
const USER_TYPES: &[&str] = &["guest", "host", "creator", "staff"];
const PAYOUT_METHODS: &[&str] = &["bank_transfer", "paypal", "stripe"];
const PAYOUT_STATUSES: &[&str] = &["pending", "processing", "completed", "failed"];

fn pick<'a>(rng: &mut StdRng, options: &'a [&str]) -> &'a str {
    options.choose(rng).copied().unwrap_or("")
}

fn person(rng: &mut StdRng) -> String {
    format!(
        "{} {}",
        pick(rng, FIRST_NAMES),
        pick(rng, LAST_NAMES)
    )
}

pub fn generate_sessions(count: usize, seed: u64, anchor: DateTime<Utc>) -> Vec<Session> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let name = person(&mut rng);
            let email = format!(
                "{}@atrium.test",
                name.to_lowercase().replace(' ', ".")
            );
            Session {
                id: format!("ses-gen-{i:05}"),
                user_name: name,
                user_email: Some(email),
                user_type: Some(pick(&mut rng, USER_TYPES).to_string()),
                action: pick(&mut rng, ACTIONS).to_string(),
                device: Some(Device {
                    kind: pick(&mut rng, DEVICE_KINDS).to_string(),
                    os: None,
                }),
                ip: Some(format!(
                    "203.0.113.{}",
                    rng.gen_range(1..=254)
                )),
                timestamp: Some(anchor - Duration::minutes(rng.gen_range(1..=60 * 24 * 30))),
            }
        })
        .collect()
}

pub fn generate_payouts(count: usize, seed: u64, anchor: DateTime<Utc>) -> Vec<Payout> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| Payout {
            id: format!("pay-gen-{i:05}"),
            creator: person(&mut rng),
            method: Some(pick(&mut rng, PAYOUT_METHODS).to_string()),
            status: pick(&mut rng, PAYOUT_STATUSES).to_string(),
            amount: Some((rng.gen_range(1000..=250_000) as f64) / 100.0),
            requested_at: Some(anchor - Duration::minutes(rng.gen_range(1..=60 * 24 * 90))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn fixture_ids_are_unique() {
        let ids: Vec<String> = sessions(anchor()).into_iter().map(|s| s.id).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn generators_are_deterministic_per_seed() {
        let a = generate_sessions(50, 7, anchor());
        let b = generate_sessions(50, 7, anchor());
        let c = generate_sessions(50, 8, anchor());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn generated_payouts_have_known_statuses() {
        let rows = generate_payouts(100, 42, anchor());
        assert!(rows
            .iter()
            .all(|p| PAYOUT_STATUSES.contains(&p.status.as_str())));
    }
}
