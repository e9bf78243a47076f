use crate::domain::model::TicketSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Namespace the ticket plugin writes under in a report's extra data.
pub const REPORT_NAMESPACE: &str = "ticket-filter";
pub const TICKETS_KEY: &str = "Tickets";

/// Extra per-item data owned by a reporting collaborator, grouped by the
/// plugin that wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportExtra(BTreeMap<String, BTreeMap<String, String>>);

impl ReportExtra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, namespace: &str, key: &str, value: String) {
        self.0
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.0
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.0.contains_key(namespace)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Writes the joined ticket list into `extra`. Items without tickets, or
/// never seen by the filter, leave `extra` untouched.
pub fn record_tickets(tickets: Option<&TicketSet>, extra: &mut ReportExtra) {
    if let Some(tickets) = tickets.filter(|tickets| !tickets.is_empty()) {
        extra.insert(REPORT_NAMESPACE, TICKETS_KEY, tickets.joined());
    }
}
