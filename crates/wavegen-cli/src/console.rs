//! Byte-at-a-time line editor for the command console.
//!
//! Reads raw bytes the way a serial terminal delivers them: CR or LF ends
//! the line, backspace and DEL erase the last character, and everything
//! else is appended. With echo on, accepted bytes are written back and
//! erasures are shown as `BS SP BS`.

use std::io::{self, Read, Write};

const BS: u8 = 8;
const DEL: u8 = 127;
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Erase sequence sent for a backspace when echo is on.
const ERASE: &[u8] = &[BS, b' ', BS];

/// Line reader over any byte source.
#[derive(Debug)]
pub struct LineEditor<R> {
    input: io::Bytes<R>,
    max_line: usize,
    echo: bool,
    skip_lf: bool,
}

impl<R: Read> LineEditor<R> {
    /// Create an editor. A line ends after `max_line - 1` characters.
    pub fn new(input: R, max_line: usize, echo: bool) -> Self {
        Self {
            input: input.bytes(),
            max_line: max_line.max(2),
            echo,
            skip_lf: false,
        }
    }

    /// Read one line, echoing to `echo_out` when echo is on.
    ///
    /// Returns `None` at end of input with nothing buffered. A partial line
    /// at end of input is returned as-is.
    pub fn read_line(&mut self, echo_out: &mut impl Write) -> io::Result<Option<String>> {
        let mut line: Vec<u8> = Vec::new();
        let limit = self.max_line - 1;

        loop {
            let Some(byte) = self.input.next().transpose()? else {
                if line.is_empty() {
                    return Ok(None);
                }
                break;
            };

            // CR LF counts as one terminator
            let skip_lf = std::mem::take(&mut self.skip_lf);
            match byte {
                LF if skip_lf => {}
                CR => {
                    self.skip_lf = true;
                    break;
                }
                LF => break,
                BS | DEL => {
                    if line.pop().is_some() && self.echo {
                        echo_out.write_all(ERASE)?;
                    }
                }
                _ => {
                    line.push(byte);
                    if self.echo {
                        echo_out.write_all(&[byte])?;
                    }
                    if line.len() >= limit {
                        break;
                    }
                }
            }
        }

        if self.echo {
            echo_out.flush()?;
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}
