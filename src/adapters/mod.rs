// Adapters layer: concrete host implementations for the ticket plugin.

pub mod manifest;
