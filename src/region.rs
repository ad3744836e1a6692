//! Marked regions inside source text.
//!
//! A region is delimited by a begin line containing `// ${Name:Begin}` and an
//! end line starting with `// ${Name:End` (anything may follow `:End`). The
//! text strictly between the two lines is owned by one generation task and is
//! replaced wholesale on every run. Everything outside the markers, including
//! the marker lines themselves, is preserved byte for byte.

/// First line of every generated block.
pub const DISCLAIMER_BEGIN: &str =
    "// ------------------- Automatically generated, do not edit -------------------";

/// Last line of every generated block.
pub const DISCLAIMER_END: &str =
    "// ----------------------------------------------------------------------------";

pub fn begin_marker(region: &str) -> String {
    format!("// ${{{}:Begin}}", region)
}

/// End marker, matched as a prefix.
pub fn end_marker(region: &str) -> String {
    format!("// ${{{}:End", region)
}

/// Byte span of a region's body plus the indentation of its begin marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpan {
    pub start: usize,
    pub end: usize,
    pub indent: String,
}

impl RegionSpan {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Outcome of looking for one region in one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Missing,
    Found(RegionSpan),
    Duplicated(usize),
    Unterminated,
}

pub fn locate(text: &str, region: &str) -> Located {
    let begin = begin_marker(region);
    let count = text.matches(begin.as_str()).count();
    match count {
        0 => return Located::Missing,
        1 => {}
        n => return Located::Duplicated(n),
    }

    let Some(begin_at) = text.find(begin.as_str()) else {
        return Located::Missing;
    };

    let line_start = text[..begin_at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &text[line_start..begin_at];
    let indent = if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        String::new()
    };

    let after_marker = begin_at + begin.len();
    let start = match text[after_marker..].find('\n') {
        Some(i) => after_marker + i + 1,
        None => return Located::Unterminated,
    };

    let end_at = match text[start..].find(end_marker(region).as_str()) {
        Some(i) => start + i,
        None => return Located::Unterminated,
    };

    let end_line_start = text[..end_at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = if end_line_start >= start
        && text[end_line_start..end_at]
            .chars()
            .all(|c| c == ' ' || c == '\t')
    {
        end_line_start
    } else {
        end_at
    };

    Located::Found(RegionSpan { start, end, indent })
}

/// Wrap generated content in the disclaimer and indent it like the begin marker.
pub fn render_block(content: &str, indent: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2 * DISCLAIMER_BEGIN.len() + 2);
    let mut push_line = |line: &str| {
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    };

    push_line(DISCLAIMER_BEGIN);
    for line in content.lines() {
        push_line(line);
    }
    push_line(DISCLAIMER_END);
    out
}

/// Number of characters in the differing middle of `old` and `new`; 0 if equal.
pub fn changed_chars(old: &str, new: &str) -> usize {
    if old == new {
        return 0;
    }
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();

    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    (old.len() - prefix - suffix).max(new.len() - prefix - suffix)
}

/// Replace a region body, returning the new text.
pub fn splice(text: &str, span: &RegionSpan, body: &str) -> String {
    let mut out = String::with_capacity(text.len() - (span.end - span.start) + body.len());
    out.push_str(&text[..span.start]);
    out.push_str(body);
    out.push_str(&text[span.end..]);
    out
}
