//! Persistent standard-input reader for the read builtins
//!
//! A single reader serves every `readInt`, `readDouble` and `readString` of a
//! run, so mixing token reads and line reads never loses buffered input.

use super::error::{InterpResult, RuntimeError};
use std::io::BufRead;

pub struct InputReader<R> {
    reader: R,
    /// Current line, terminator included
    line: String,
    /// Byte offset of the unconsumed part of `line`
    pos: usize,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        InputReader {
            reader,
            line: String::new(),
            pos: 0,
        }
    }

    /// Next whitespace-delimited token as an integer
    pub fn read_int(&mut self) -> InterpResult<i64> {
        let token = self.next_token()?;
        token
            .parse::<i64>()
            .map_err(|_| RuntimeError::input(format!("expected an integer, got '{token}'")))
    }

    /// Next whitespace-delimited token as a float
    pub fn read_double(&mut self) -> InterpResult<f64> {
        let token = self.next_token()?;
        token
            .parse::<f64>()
            .map_err(|_| RuntimeError::input(format!("expected a number, got '{token}'")))
    }

    /// Rest of the current line, or the next full line if nothing is pending
    pub fn read_line(&mut self) -> InterpResult<String> {
        if self.pending().is_empty() && !self.fill_line()? {
            return Err(RuntimeError::input("end of input"));
        }
        let rest = self.pending();
        let text = rest
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(rest)
            .to_string();
        self.consume_line();
        Ok(text)
    }

    fn pending(&self) -> &str {
        &self.line[self.pos..]
    }

    fn consume_line(&mut self) {
        self.line.clear();
        self.pos = 0;
    }

    /// Returns false at end of input
    fn fill_line(&mut self) -> InterpResult<bool> {
        self.consume_line();
        let n = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| RuntimeError::io_error(&e))?;
        Ok(n > 0)
    }

    fn next_token(&mut self) -> InterpResult<String> {
        loop {
            let rest = self.pending();
            let skipped = rest.len() - rest.trim_start().len();
            self.pos += skipped;
            if !self.pending().is_empty() {
                break;
            }
            if !self.fill_line()? {
                return Err(RuntimeError::input("end of input"));
            }
        }

        let rest = self.pending();
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..len].to_string();
        self.pos += len;

        // A token that ends its line takes the line break with it
        if self.pending().trim().is_empty() {
            self.consume_line();
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;
    use std::io::Cursor;

    fn reader(text: &str) -> InputReader<Cursor<Vec<u8>>> {
        InputReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_tokens_across_lines() {
        let mut input = reader("  12 -3\n\n  4.5\n");
        assert_eq!(input.read_int().unwrap(), 12);
        assert_eq!(input.read_int().unwrap(), -3);
        assert_eq!(input.read_double().unwrap(), 4.5);
    }

    #[test]
    fn test_line_after_token_reads_next_line() {
        let mut input = reader("5\nhello world\n");
        assert_eq!(input.read_int().unwrap(), 5);
        assert_eq!(input.read_line().unwrap(), "hello world");
    }

    #[test]
    fn test_line_after_token_returns_remainder() {
        let mut input = reader("5 apples\nnext\n");
        assert_eq!(input.read_int().unwrap(), 5);
        assert_eq!(input.read_line().unwrap(), " apples");
        assert_eq!(input.read_line().unwrap(), "next");
    }

    #[test]
    fn test_line_strips_crlf_and_handles_missing_terminator() {
        let mut input = reader("first\r\nlast");
        assert_eq!(input.read_line().unwrap(), "first");
        assert_eq!(input.read_line().unwrap(), "last");
    }

    #[test]
    fn test_empty_line_is_a_line() {
        let mut input = reader("\nafter\n");
        assert_eq!(input.read_line().unwrap(), "");
        assert_eq!(input.read_line().unwrap(), "after");
    }

    #[test]
    fn test_double_accepts_integer_token() {
        let mut input = reader("7");
        assert_eq!(input.read_double().unwrap(), 7.0);
    }

    #[test]
    fn test_bad_token() {
        let mut input = reader("abc\n");
        let err = input.read_int().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_end_of_input() {
        let mut input = reader("  \n");
        assert_eq!(input.read_int().unwrap_err().kind(), ErrorKind::Input);
        assert_eq!(input.read_line().unwrap_err().kind(), ErrorKind::Input);
    }
}
