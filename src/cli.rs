//! CLI domain: parse, route and output only.
//! No generation logic; the route table dispatches to the generator.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
