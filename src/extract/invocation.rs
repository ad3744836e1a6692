//! Grammar of a single instruction invocation.
//!
//! ```text
//! invocation  := ident ',' field ',' opcode-data ',' field ',' flags ',' field ',' field ')'
//! opcode-data := '(' [^()]+ ')'
//! flags       := term ('|'? term)* '|'?
//! term        := digits | 'F(' [^)]* ')'
//! field       := [^,()]+
//! ```
//!
//! The last two fields hold indices written by a previous run; they are
//! carried through verbatim. An invocation whose first two fields spell the
//! macro's own parameter names is a header (a `#define` line caught inside the
//! region) and is skipped.

use super::cursor::{is_ident_char, Cursor};

/// Parameter names that identify the macro's own definition line.
pub(crate) const HEADER_SIGNATURE: [&str; 2] = ["id", "encoding"];

/// Field slices of one parsed invocation, trimmed, borrowed from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawFields<'a> {
    pub symbol: &'a str,
    pub encoding: &'a str,
    pub opcode_data: &'a str,
    pub rw_info: &'a str,
    pub flags: &'a str,
    pub opcode_data_index: &'a str,
    pub name_index: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Invocation<'a> {
    Record(RawFields<'a>),
    Header,
}

/// Parse failure at a byte offset of the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseFailure {
    pub offset: usize,
    pub reason: String,
}

type ParseResult<T> = Result<T, ParseFailure>;

fn fail<T>(cursor: &Cursor<'_>, reason: impl Into<String>) -> ParseResult<T> {
    Err(ParseFailure {
        offset: cursor.pos(),
        reason: reason.into(),
    })
}

fn describe(cursor: &Cursor<'_>) -> String {
    if cursor.is_eof() {
        "end of region".to_string()
    } else {
        format!("'{}'", cursor.first())
    }
}

fn expect(cursor: &mut Cursor<'_>, c: char, context: &str) -> ParseResult<()> {
    cursor.skip_whitespace();
    if cursor.eat(c) {
        Ok(())
    } else {
        let found = describe(cursor);
        fail(cursor, format!("expected '{}' {}, found {}", c, context, found))
    }
}

fn field<'a>(cursor: &mut Cursor<'a>, what: &str) -> ParseResult<&'a str> {
    let text = cursor
        .eat_while(|c| c != ',' && c != '(' && c != ')')
        .trim();
    if text.is_empty() {
        let found = describe(cursor);
        return fail(cursor, format!("expected {}, found {}", what, found));
    }
    Ok(text)
}

fn opcode_data<'a>(cursor: &mut Cursor<'a>) -> ParseResult<&'a str> {
    cursor.skip_whitespace();
    let start = cursor.pos();
    if !cursor.eat('(') {
        let found = describe(cursor);
        return fail(cursor, format!("expected parenthesized opcode data, found {}", found));
    }
    let inner = cursor.eat_while(|c| c != '(' && c != ')');
    match cursor.first() {
        '(' => return fail(cursor, "nested parentheses in opcode data"),
        ')' if inner.trim().is_empty() => return fail(cursor, "empty opcode data"),
        ')' => {
            cursor.bump();
        }
        _ => return fail(cursor, "unterminated opcode data"),
    }
    Ok(cursor.slice(start, cursor.pos()))
}

fn flag_term(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    let c = cursor.first();
    if c.is_ascii_digit() {
        cursor.eat_while(|c| c.is_ascii_digit());
        return Ok(());
    }
    if cursor.eat('F') {
        if !cursor.eat('(') {
            let found = describe(cursor);
            return fail(cursor, format!("expected '(' after 'F', found {}", found));
        }
        cursor.eat_while(|c| c != ')');
        if !cursor.eat(')') {
            return fail(cursor, "unterminated flag call");
        }
        return Ok(());
    }
    let found = describe(cursor);
    fail(cursor, format!("expected flag term, found {}", found))
}

/// Flag terms may be separated by `|` and the last term may carry a dangling
/// `|`; both are kept in the returned text.
fn flags<'a>(cursor: &mut Cursor<'a>) -> ParseResult<&'a str> {
    cursor.skip_whitespace();
    let start = cursor.pos();
    loop {
        flag_term(cursor)?;
        let mut end = cursor.pos();
        cursor.skip_whitespace();
        if cursor.eat('|') {
            end = cursor.pos();
            cursor.skip_whitespace();
        }
        if cursor.is_eof() || cursor.first() == ',' {
            return Ok(cursor.slice(start, end));
        }
    }
}

fn skip_header(cursor: &mut Cursor<'_>) -> ParseResult<()> {
    let mut depth = 1usize;
    while let Some(c) = cursor.bump() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    fail(cursor, "unterminated macro header")
}

/// Parse one invocation; `cursor` must sit just past the opening `MACRO(`.
pub(crate) fn parse_invocation<'a>(cursor: &mut Cursor<'a>) -> ParseResult<Invocation<'a>> {
    cursor.skip_whitespace();
    let symbol = cursor.eat_while(is_ident_char);
    if symbol.is_empty() {
        let found = describe(cursor);
        return fail(cursor, format!("expected instruction identifier, found {}", found));
    }

    expect(cursor, ',', "after instruction identifier")?;
    let encoding = field(cursor, "encoding class")?;

    if symbol.to_lowercase() == HEADER_SIGNATURE[0] && encoding == HEADER_SIGNATURE[1] {
        skip_header(cursor)?;
        return Ok(Invocation::Header);
    }

    expect(cursor, ',', "after encoding class")?;
    let opcode_data = opcode_data(cursor)?;
    expect(cursor, ',', "after opcode data")?;
    let rw_info = field(cursor, "rw info")?;
    expect(cursor, ',', "after rw info")?;
    let flags = flags(cursor)?;
    expect(cursor, ',', "after instruction flags")?;
    let opcode_data_index = field(cursor, "opcode data index")?;
    expect(cursor, ',', "after opcode data index")?;
    let name_index = field(cursor, "name data index")?;
    expect(cursor, ')', "closing the invocation")?;

    Ok(Invocation::Record(RawFields {
        symbol,
        encoding,
        opcode_data,
        rw_info,
        flags,
        opcode_data_index,
        name_index,
    }))
}
