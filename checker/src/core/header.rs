//! `Case #<n>:` header recognition.

/// Literal prefix that starts every case header and ends every case window.
pub const HEADER_PREFIX: &str = "Case #";

/// Longest slice of an offending line echoed back in diagnostics.
const PREVIEW_CHARS: usize = 10;

/// Header text expected for the given 1-based case index.
pub fn expected_header(index: usize) -> String {
    format!("{HEADER_PREFIX}{index}:")
}

/// True if the line opens some case window (any index).
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX)
}

/// Strip the header for case `index` and return the trimmed remainder.
///
/// Returns `None` if the line does not start with exactly `Case #<index>:`.
pub fn strip_case_header(line: &str, index: usize) -> Option<&str> {
    let rest = line.strip_prefix(HEADER_PREFIX)?;
    let rest = rest.strip_prefix(index.to_string().as_str())?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}

/// Case index named by a well-formed header line, if any.
pub fn header_index(line: &str) -> Option<usize> {
    let rest = line.strip_prefix(HEADER_PREFIX)?;
    let (index, _) = rest.split_once(':')?;
    index.parse().ok()
}

/// Short view of a line for "incorrect header" diagnostics.
pub fn preview(line: &str) -> String {
    if line.chars().count() <= PREVIEW_CHARS {
        return line.to_string();
    }
    let mut head: String = line.chars().take(PREVIEW_CHARS).collect();
    head.push_str("...");
    head
}
