/// Script acquisition and line-level parsing
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crate::command::{Command, Keyword};
use crate::config::{COMMENT_MARKER, STDIN_SENTINEL};
use crate::error::{ParseError, ScriptError};

/// Where a script is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Stdin,
    File(PathBuf),
}

impl ScriptSource {
    /// `stdin` selects standard input; anything else is a file path
    pub fn from_name(name: &str) -> Self {
        if name == STDIN_SENTINEL {
            ScriptSource::Stdin
        } else {
            ScriptSource::File(PathBuf::from(name))
        }
    }

    pub fn open(&self) -> Result<Box<dyn BufRead>, ScriptError> {
        match self {
            ScriptSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            ScriptSource::File(path) => {
                let file = File::open(path).map_err(|source| ScriptError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// A parsed command with the line its keyword appeared on
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

/// Turns script lines into commands.
///
/// Blank lines and comment lines are skipped. A keyword that takes
/// arguments consumes the following line whether or not it parses.
pub struct Parser<I> {
    lines: I,
    line_no: usize,
}

impl<I, S> Parser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self { lines, line_no: 0 }
    }

    fn next_line(&mut self) -> Option<S> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }
}

impl<I, S> Iterator for Parser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.next_line()?;
            let text = raw.as_ref().trim();
            if text.is_empty() || text.starts_with(COMMENT_MARKER) {
                continue;
            }

            let line = self.line_no;
            let keyword = match text.parse::<Keyword>() {
                Ok(keyword) => keyword,
                Err(kind) => return Some(Err(ParseError { line, kind })),
            };

            let arg_line = if keyword.takes_argument_line() {
                self.next_line()
            } else {
                None
            };
            let arg_text: Option<&str> = arg_line.as_ref().map(|s| s.as_ref());
            let parsed = keyword
                .parse_arguments(arg_text)
                .map(|command| Statement { line, command })
                .map_err(|kind| ParseError { line, kind });
            return Some(parsed);
        }
    }
}
