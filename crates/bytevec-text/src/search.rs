//! Linear byte search over a text's logical content.

/// Index of the first `needle` byte in `haystack`.
pub fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Index where `pattern` first occurs in `haystack`.
///
/// An empty pattern matches at 0.
pub fn find_subslice(haystack: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() {
        return Some(0);
    }
    if pattern.len() > haystack.len() {
        return None;
    }
    let first = pattern[0];
    let last_start = haystack.len() - pattern.len();
    let mut start = 0;
    while start <= last_start {
        // Skip to the next candidate start byte.
        let offset = find_byte(&haystack[start..=last_start], first)?;
        start += offset;
        if &haystack[start..start + pattern.len()] == pattern {
            return Some(start);
        }
        start += 1;
    }
    None
}
