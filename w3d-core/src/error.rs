/// Error types for script execution
use std::io;
use std::path::PathBuf;

/// Fatal error: the script could not be opened
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("failed to open script {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    /// The underlying I/O error kind
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ScriptError::Open { source, .. } => source.kind(),
        }
    }
}

/// A recoverable problem with one command of a script
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number of the offending line
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("invalid command: {0}")]
    UnknownCommand(String),

    #[error("`{keyword}` expects {expected} arguments, found {found}")]
    Arity {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{keyword}` has malformed arguments: {text:?}")]
    Malformed { keyword: &'static str, text: String },

    #[error("`{keyword}` is missing its argument line")]
    MissingArguments { keyword: &'static str },

    #[error("`save` needs a file name")]
    MissingFilename,
}

/// Refusal to break the transformation stack invariant
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("cannot pop the last coordinate frame")]
    LastFrame,
}

/// Failure to save or present the framebuffer
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to present framebuffer: {0}")]
    Present(String),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Present(err.to_string())
    }
}

/// Anything reported while a script keeps running
#[derive(thiserror::Error, Debug)]
pub enum Diagnostic {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("line {line}: {source}")]
    Stack {
        line: usize,
        #[source]
        source: StackError,
    },

    #[error("line {line}: {source}")]
    Render {
        line: usize,
        #[source]
        source: RenderError,
    },

    /// Reading stopped; `line` is the first line that could not be read
    #[error("line {line}: failed to read script: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}
