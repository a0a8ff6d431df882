use std::{collections::VecDeque, io::BufRead};

/// A whitespace-delimited word of a Netpbm file along with the 1-based line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    #[inline]
    pub fn parse_int(&self) -> Result<i64, std::num::ParseIntError> {
        self.text.parse::<i64>()
    }
}

/// Token separators: ASCII whitespace including vertical tab, which `u8::is_ascii_whitespace`
/// leaves out.
#[inline]
fn is_separator(b: &u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Lazy token stream over a buffered reader.
///
/// Input is pulled one line at a time. A `#` drops the remainder of its own line,
/// everything else is split on runs of ASCII whitespace, vertical tab included. Once the
/// reader is exhausted (or fails) the iterator is fused.
pub struct Tokens<R> {
    reader: R,
    line_buf: Vec<u8>,
    pending: VecDeque<Token>,
    line: usize,
    exhausted: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buf: Vec::new(),
            pending: VecDeque::new(),
            line: 0,
            exhausted: false,
        }
    }

    /// Number of lines pulled from the reader so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn split_line(&mut self) {
        let content = match self.line_buf.iter().position(|&b| b == b'#') {
            Some(comment) => &self.line_buf[..comment],
            None => &self.line_buf[..],
        };
        let line = self.line;
        self.pending.extend(
            content
                .split(is_separator)
                .filter(|word| !word.is_empty())
                .map(|word| Token {
                    text: String::from_utf8_lossy(word).into_owned(),
                    line,
                }),
        );
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = std::io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                log::trace!("token {:?} on line {}", token.text, token.line);
                return Some(Ok(token));
            }
            if self.exhausted {
                return None;
            }

            self.line_buf.clear();
            match self.reader.read_until(b'\n', &mut self.line_buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => {
                    self.line += 1;
                    self.split_line();
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Tokens<R> {}
