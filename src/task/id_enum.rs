//! Instruction id enumeration, annotated from the ISA description.

use super::Task;
use crate::context::GeneratorContext;
use crate::error::TableGenError;
use crate::isa;

/// Column the `//!<` annotation starts at.
const COMMENT_COLUMN: usize = 37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdEnum;

impl IdEnum {
    pub fn render(ctx: &GeneratorContext) -> String {
        let mut out = String::new();

        for record in ctx.records() {
            let mut line = format!(
                "kId{}{},",
                record.enum_symbol,
                if record.id == 0 { " = 0" } else { "" }
            );

            let comment = if record.is_sentinel() {
                String::new()
            } else {
                let entries = isa::query_mode(ctx.isa(), &record.display_name, ctx.mode());
                isa::comment_of(&entries)
            };
            if !comment.is_empty() {
                line = format!("{:<width$}//!< {}", line, comment, width = COMMENT_COLUMN);
            }

            out.push_str(&line);
            out.push('\n');
        }

        out.push_str("_kIdCount\n");
        out
    }
}

impl Task for IdEnum {
    fn name(&self) -> &str {
        "IdEnum"
    }

    fn run(&self, ctx: &mut GeneratorContext) -> Result<usize, TableGenError> {
        let text = Self::render(ctx);
        ctx.inject("InstId", &text, 0)
    }
}
