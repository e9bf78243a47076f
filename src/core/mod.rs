pub mod filter;
pub mod plugin;
pub mod report;

pub use crate::domain::model::{FilterList, TicketMarker, TicketReference, TicketSet, ToolSet};
pub use crate::domain::ports::{CollectedItem, CollectionHost, PluginHost};
pub use crate::utils::error::Result;
