//! tablegen: Instruction Table Generator
//!
//! Reads a hand-maintained instruction database written as macro invocations
//! inside a marked source region, derives the lookup tables an assembler needs
//! (id enumeration, packed names, per-encoding opcode tables) and writes them
//! back into marked regions of the same source tree.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod generator;
pub mod isa;
pub mod logging;
pub mod record;
pub mod region;
pub mod report;
pub mod schedule;
pub mod table;
pub mod task;
