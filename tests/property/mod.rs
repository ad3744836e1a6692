//! Property-based tests for ordering and deduplication guarantees

mod scheduling;
