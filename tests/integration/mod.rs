//! Integration tests for the instruction table generator

mod idempotence;
mod pipeline;
pub mod test_utils;
