use crate::core::{CollectedItem, Result};
use crate::domain::model::{FilterList, TicketReference, TicketSet, ToolSet};
use crate::utils::error::TicketError;
use std::collections::HashMap;

/// Outcome of one filtering pass, both halves in collection order.
#[derive(Debug)]
pub struct Partition<I> {
    pub selected: Vec<I>,
    pub deselected: Vec<I>,
}

/// Selects test items by the tickets they are annotated with.
///
/// The resolved [`TicketSet`] of every filtered item is kept in a side
/// table keyed by node id for the rest of the run, so later stages such as
/// reporting can read it through [`TicketFilter::tickets_for`].
#[derive(Debug, Default)]
pub struct TicketFilter {
    tools: ToolSet,
    filter: FilterList,
    stash: HashMap<String, TicketSet>,
}

impl TicketFilter {
    pub fn new(tools: ToolSet, filter: FilterList) -> Self {
        for entry in filter.entries() {
            if !entry.contains('#') {
                tracing::warn!(
                    "Ticket filter '{}' is not of the form tool#id and will only match verbatim",
                    entry
                );
            }
        }

        Self {
            tools,
            filter,
            stash: HashMap::new(),
        }
    }

    /// Normalizes every marker of `item` into a sorted ticket list.
    pub fn resolve_tickets<I: CollectedItem>(&self, item: &I) -> Result<TicketSet> {
        let mut tickets = Vec::new();

        for marker in item.ticket_markers() {
            for (tool, values) in marker.kwargs() {
                if !self.tools.contains(tool) {
                    tracing::error!(
                        "Item {} uses unconfigured ticket tool '{}'",
                        item.node_id(),
                        tool
                    );
                    return Err(TicketError::UnknownTool {
                        tool: tool.to_string(),
                        configured: self.tools.names().to_vec(),
                    });
                }

                tickets.extend(
                    values
                        .as_slice()
                        .iter()
                        .map(|value| TicketReference::new(tool, value)),
                );
            }
        }

        Ok(TicketSet::from_unsorted(tickets))
    }

    pub fn is_selected(&self, tickets: &TicketSet) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        if tickets.is_empty() {
            return false;
        }
        tickets.matches_any(&self.filter)
    }

    /// Splits `items` into selected and deselected items.
    ///
    /// All items are resolved before anything is recorded, so an unknown
    /// tool leaves the side table untouched.
    pub fn filter_items<I: CollectedItem>(&mut self, items: Vec<I>) -> Result<Partition<I>> {
        let resolved = self.resolve_all(&items)?;
        Ok(self.partition_resolved(items, resolved))
    }

    /// Filters `items` in place and returns the removed items. On error
    /// `items` is left as it was.
    pub fn retain_selected<I: CollectedItem>(&mut self, items: &mut Vec<I>) -> Result<Vec<I>> {
        let resolved = self.resolve_all(items)?;
        let partition = self.partition_resolved(std::mem::take(items), resolved);
        *items = partition.selected;
        Ok(partition.deselected)
    }

    fn resolve_all<I: CollectedItem>(&self, items: &[I]) -> Result<Vec<TicketSet>> {
        items.iter().map(|item| self.resolve_tickets(item)).collect()
    }

    fn partition_resolved<I: CollectedItem>(
        &mut self,
        items: Vec<I>,
        resolved: Vec<TicketSet>,
    ) -> Partition<I> {
        let mut selected = Vec::new();
        let mut deselected = Vec::new();

        for (item, tickets) in items.into_iter().zip(resolved) {
            let keep = self.is_selected(&tickets);
            tracing::debug!(
                "{} {} [{}]",
                if keep { "select" } else { "deselect" },
                item.node_id(),
                tickets.joined()
            );

            self.stash.insert(item.node_id().to_string(), tickets);
            if keep {
                selected.push(item);
            } else {
                deselected.push(item);
            }
        }

        Partition {
            selected,
            deselected,
        }
    }

    pub fn tickets_for(&self, node_id: &str) -> Option<&TicketSet> {
        self.stash.get(node_id)
    }
}
