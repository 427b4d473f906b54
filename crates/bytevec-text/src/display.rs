//! Quoted rendering of byte content for diagnostic output.

use std::fmt;

/// Displays bytes wrapped in double quotes.
///
/// Valid UTF-8 runs are written as-is; any other byte is written as a
/// `\xNN` escape.
#[derive(Clone, Copy, Debug)]
pub struct Quoted<'a>(pub &'a [u8]);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        write_escaped(f, self.0)?;
        f.write_str("\"")
    }
}

/// Write `bytes` with invalid UTF-8 escaped as `\xNN`.
pub(crate) fn write_escaped(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for chunk in bytes.utf8_chunks() {
        f.write_str(chunk.valid())?;
        for byte in chunk.invalid() {
            write!(f, "\\x{byte:02X}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_quotes() {
        assert_eq!(Quoted(b"Hello").to_string(), "\"Hello\"");
        assert_eq!(Quoted(b"").to_string(), "\"\"");
    }

    #[test]
    fn escapes_invalid_utf8() {
        assert_eq!(Quoted(b"a\xFFb").to_string(), "\"a\\xFFb\"");
        assert_eq!(Quoted("é".as_bytes()).to_string(), "\"é\"");
    }
}
