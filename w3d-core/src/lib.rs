/// W3D Core Library - script interpreter for a small 3D drawing language
///
/// This library provides the interpreter, the transformation stack, the
/// geometry generators and the software rasterizer. Front ends supply a
/// `Presenter` to show the framebuffer.

pub mod buffer;
pub mod command;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod screen;
pub mod script;
pub mod stack;
pub mod transform;

// Re-export commonly used types
pub use buffer::EdgeBuffer;
pub use command::{Command, Keyword};
pub use config::Config;
pub use error::{Diagnostic, ParseError, RenderError, ScriptError, StackError};
pub use interpreter::{ExecError, Interpreter, Report};
pub use screen::{Color, HeadlessPresenter, Presenter, Screen};
pub use script::ScriptSource;
pub use stack::TransformStack;
