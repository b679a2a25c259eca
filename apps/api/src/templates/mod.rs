// Template engine: placeholder discovery, base/additional field reconciliation,
// the variable catalog and cursor-aware authoring. Everything here is pure and
// synchronous; remote round trips live in the handlers.

pub mod authoring;
pub mod body;
pub mod catalog;
pub mod handlers;
pub mod placeholders;
pub mod reconcile;
