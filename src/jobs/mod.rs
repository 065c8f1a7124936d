//! Asynchronous job layer: submit batches, poll progress.

/// Job registry, records, and background workers.
pub mod registry;
