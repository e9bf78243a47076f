use crate::core::filter::TicketFilter;
use crate::core::report::{record_tickets, ReportExtra};
use crate::core::{CollectedItem, CollectionHost, PluginHost, Result};
use crate::domain::model::{FilterList, TicketSet, ToolSet};

pub const MARKER_NAME: &str = "ticket";

pub const MARKER_HELP: &str = "ticket(bz=..., gh=..., jira=...): tickets associated with the test, \
the values can be either single ticket id or list of tickets";

/// Glue between a host test framework and [`TicketFilter`].
#[derive(Debug)]
pub struct TicketPlugin {
    filter: TicketFilter,
}

impl TicketPlugin {
    pub fn new(tools: ToolSet, filter: FilterList) -> Self {
        Self {
            filter: TicketFilter::new(tools, filter),
        }
    }

    /// Registers the `ticket` marker with the host and builds the plugin
    /// for this run.
    pub fn configure<H: PluginHost>(tools: ToolSet, filter: FilterList, host: &mut H) -> Self {
        host.register_marker(MARKER_HELP);
        tracing::debug!(
            "Ticket plugin configured with tools {:?} and filter {:?}",
            tools.names(),
            filter.entries()
        );
        Self::new(tools, filter)
    }

    /// Collection hook: drops deselected items from `items` and hands them
    /// to the host. An unknown tool aborts before anything is changed.
    pub fn collection_modify_items<I, H>(&mut self, items: &mut Vec<I>, host: &mut H) -> Result<()>
    where
        I: CollectedItem,
        H: CollectionHost<I>,
    {
        let collected = items.len();
        let deselected = self.filter.retain_selected(items)?;

        tracing::info!(
            "collected {} items / {} selected / {} deselected",
            collected,
            items.len(),
            deselected.len()
        );

        host.notify_deselected(deselected);
        Ok(())
    }

    /// Reporting hook. Only fires when the host has a reporting
    /// collaborator registered.
    pub fn item_collected<I, H>(&self, host: &H, item: &I, extra: &mut ReportExtra)
    where
        I: CollectedItem,
        H: PluginHost,
    {
        if !host.reporting_enabled() {
            return;
        }
        record_tickets(self.tickets_for(item.node_id()), extra);
    }

    pub fn tickets_for(&self, node_id: &str) -> Option<&TicketSet> {
        self.filter.tickets_for(node_id)
    }
}
