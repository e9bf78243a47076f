use crate::domain::model::TicketMarker;

/// A test item as seen by the ticket filter.
pub trait CollectedItem {
    /// Identity of the item for the run, e.g. `test_mod.py::TestMark::test_1`.
    fn node_id(&self) -> &str;

    /// Every `ticket` marker applying to the item, own markers first and
    /// then the ones inherited from enclosing groups. The host resolves
    /// inheritance; the filter only consumes the flat list.
    fn ticket_markers(&self) -> Vec<TicketMarker>;
}

/// Run-wide hooks of the host test framework.
pub trait PluginHost {
    /// Adds a line to the host's marker documentation.
    fn register_marker(&mut self, line: &str);

    /// Whether a reporting collaborator is registered for this run.
    fn reporting_enabled(&self) -> bool {
        false
    }
}

/// Collection-phase hooks for one item type.
pub trait CollectionHost<I: CollectedItem>: PluginHost {
    /// Receives the items removed from the collection.
    fn notify_deselected(&mut self, items: Vec<I>);
}
