/// Terminal front end: shows each `display` frame with an ASCII renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use w3d_core::{Presenter, RenderError, Screen};

pub mod logging;
pub mod renderer;

pub use logging::{init_logging, LoggingConfig};
pub use renderer::AsciiRenderer;

/// Presents frames in the alternate screen and waits for a key before
/// handing control back to the script
pub struct TerminalPresenter {
    frames: u32,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    fn show(&mut self, screen: &Screen) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.render_and_wait(screen);

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn render_and_wait(&mut self, screen: &Screen) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        // Keep the top row for the status line.
        let rows = height.saturating_sub(1) as usize;
        let mut renderer = AsciiRenderer::new(width as usize, rows);
        renderer.rasterize(screen);

        let mut stdout = stdout();
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "W3D | frame {} | {}x{} | press any key to continue",
                self.frames,
                screen.width(),
                screen.height()
            )),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;
        renderer.draw(&mut stdout)?;
        stdout.flush()?;

        loop {
            // Release events are reported on some platforms; only a press continues.
            if let Event::Key(KeyEvent { kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, screen: &Screen) -> Result<(), RenderError> {
        self.frames += 1;
        log::debug!("presenting frame {}", self.frames);
        self.show(screen)?;
        Ok(())
    }
}
