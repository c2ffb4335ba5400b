//! # Page Configurations
//!
//! One module per console screen. Each declares the page's searchable
//! fields, facets, time-range rule, and stats header — the parts the
//! original console duplicated by hand on every page — and nothing else.

pub mod audit;
pub mod invoices;
pub mod moderation;
pub mod payouts;
pub mod sessions;
pub mod tickets;

use crate::console::PageDef;

/// Every built-in page, in sidebar order.
pub fn all() -> Vec<Box<dyn PageDef>> {
    vec![
        Box::new(sessions::page()),
        Box::new(invoices::page()),
        Box::new(payouts::page()),
        Box::new(tickets::page()),
        Box::new(audit::page()),
        Box::new(moderation::page()),
    ]
}
