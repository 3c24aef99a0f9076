/// W3D Terminal - run a drawing script
///
/// Usage: w3d-terminal [SCRIPT] [--headless]
///
/// `SCRIPT` defaults to `stdin`. Each `display` command shows the framebuffer
/// in the terminal; `--headless` only logs it.

use std::env;
use std::io;
use w3d_core::config::STDIN_SENTINEL;
use w3d_core::{Config, HeadlessPresenter, Interpreter, Presenter, ScriptSource};
use w3d_terminal::{init_logging, LoggingConfig, TerminalPresenter};

fn main() -> io::Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = env::args().skip(1).collect();
    let headless = args.iter().any(|a| a == "--headless");
    let name = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(STDIN_SENTINEL);

    let source = ScriptSource::from_name(name);
    let reader = source
        .open()
        .map_err(|e| io::Error::new(e.kind(), e.to_string()))?;

    if headless {
        run(reader, HeadlessPresenter::new())
    } else {
        run(reader, TerminalPresenter::new())
    }
}

fn run<P: Presenter>(reader: Box<dyn io::BufRead>, presenter: P) -> io::Result<()> {
    let mut interpreter = Interpreter::new(Config::default(), presenter);
    let report = interpreter.run(reader);
    if !report.diagnostics.is_empty() {
        eprintln!("{} diagnostic(s) reported", report.diagnostics.len());
    }
    Ok(())
}
