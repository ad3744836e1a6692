//! Extractor: parses the instruction-info region into records.
//!
//! The region is located with the same marker rules the injector uses. Every
//! `MACRO(` opening inside it is parsed with the invocation grammar, in source
//! order. As a cross-check against silently skipped invocations, the number of
//! parsed invocations (records plus skipped headers) must equal the number of
//! literal `MACRO(` occurrences in the region.

mod cursor;
mod invocation;

use crate::error::ExtractionError;
use crate::record::{InstructionRecord, PreviousIndices};
use crate::region::{self, Located};
use cursor::{is_ident_char, Cursor};
use invocation::{parse_invocation, Invocation};
use tracing::{debug, info};

/// Parse all invocations of `macro_name` inside region `region` of `text`.
pub fn extract(
    text: &str,
    region: &str,
    macro_name: &str,
) -> Result<Vec<InstructionRecord>, ExtractionError> {
    let span = match region::locate(text, region) {
        Located::Found(span) => span,
        Located::Duplicated(count) => {
            return Err(ExtractionError::RegionDuplicated {
                region: region.to_string(),
                count,
            })
        }
        Located::Missing | Located::Unterminated => {
            return Err(ExtractionError::RegionMissing {
                region: region.to_string(),
            })
        }
    };

    let opening = format!("{}(", macro_name);
    let body_end = span.end;
    let mut records = Vec::new();
    let mut headers = 0usize;
    let mut search_from = span.start;

    while let Some(found) = text[search_from..body_end].find(opening.as_str()) {
        let at = search_from + found;
        let preceded_by_ident = text[..at].chars().next_back().is_some_and(is_ident_char);
        if preceded_by_ident {
            search_from = at + opening.len();
            continue;
        }

        let mut cursor = Cursor::new(&text[..body_end], at + opening.len());
        match parse_invocation(&mut cursor) {
            Ok(Invocation::Record(fields)) => {
                let mut record = InstructionRecord::new(
                    fields.symbol,
                    fields.encoding,
                    fields.opcode_data,
                    fields.rw_info,
                    fields.flags,
                );
                record.previous = PreviousIndices {
                    opcode_data_index: fields.opcode_data_index.to_string(),
                    name_index: fields.name_index.to_string(),
                };
                records.push(record);
            }
            Ok(Invocation::Header) => {
                debug!(offset = at, "Skipped macro header inside instruction region");
                headers += 1;
            }
            Err(failure) => {
                let (line, column) = line_column(text, failure.offset);
                return Err(ExtractionError::Malformed {
                    line,
                    column,
                    reason: failure.reason,
                });
            }
        }
        search_from = cursor.pos();
    }

    if records.is_empty() {
        return Err(ExtractionError::NoInvocations {
            region: region.to_string(),
        });
    }

    let openings = span.body(text).matches(opening.as_str()).count();
    let parsed = records.len() + headers;
    if parsed != openings {
        return Err(ExtractionError::CountMismatch {
            macro_name: macro_name.to_string(),
            parsed,
            openings,
        });
    }

    info!(count = records.len(), region, "Number of instructions");
    Ok(records)
}

/// 1-based line and column of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|nl| before[nl + 1..].chars().count())
        .unwrap_or_else(|| before.chars().count())
        + 1;
    (line, column)
}
