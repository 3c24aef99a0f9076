/// Command interpreter: executes parsed commands against the transform stack
use std::borrow::Cow;
use std::io::BufRead;
use std::ops::ControlFlow;

use nalgebra::Matrix4;

use crate::buffer::EdgeBuffer;
use crate::command::Command;
use crate::config::Config;
use crate::draw;
use crate::error::{Diagnostic, StackError};
use crate::geometry::{self, CurveKind};
use crate::screen::{Presenter, Screen};
use crate::script::{Parser, Statement};
use crate::stack::TransformStack;
use crate::transform;

/// Outcome of running a script
#[derive(Debug, Default)]
pub struct Report {
    /// Commands that parsed and ran
    pub executed: usize,
    /// Recoverable problems, in script order
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the script ended with `quit` rather than end of input
    pub quit: bool,
}

/// How a geometry command's buffer is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Lines,
    Polygons,
}

/// Executes scripts against a transformation stack and a framebuffer.
///
/// The stack and the accumulation buffer live as long as the interpreter;
/// every geometry command fills the buffer, maps it through the top frame,
/// draws it, and empties it again before the next command runs.
pub struct Interpreter<P> {
    config: Config,
    screen: Screen,
    presenter: P,
    stack: TransformStack,
    edges: EdgeBuffer,
    world: Matrix4<f64>,
    objects: EdgeBuffer,
}

impl<P: Presenter> Interpreter<P> {
    pub fn new(config: Config, presenter: P) -> Self {
        let screen = Screen::new(config.width, config.height, config.background);
        Self {
            config,
            screen,
            presenter,
            stack: TransformStack::new(),
            edges: EdgeBuffer::new(),
            world: Matrix4::identity(),
            objects: EdgeBuffer::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    /// The accumulation buffer; empty between commands
    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    /// The separate world transform driven by `ident` and `apply`
    pub fn world(&self) -> &Matrix4<f64> {
        &self.world
    }

    /// Set the world transform directly
    pub fn set_world(&mut self, world: Matrix4<f64>) {
        self.world = world;
    }

    /// The persistent object buffer transformed by `apply` and emptied by `clear`
    pub fn objects(&self) -> &EdgeBuffer {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut EdgeBuffer {
        &mut self.objects
    }

    /// Run a script from a reader.
    ///
    /// Bytes that are not UTF-8 are replaced rather than ending the run. A
    /// read error stops reading and is reported as a diagnostic.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Report {
        let mut read = 0;
        let mut failure = None;
        let lines = reader.split(b'\n').map_while(|chunk| match chunk {
            Ok(bytes) => {
                read += 1;
                Some(decode_line(read, &bytes))
            }
            Err(err) => {
                failure = Some(err);
                None
            }
        });
        let mut report = self.run_lines(lines);

        if let Some(source) = failure {
            let diagnostic = Diagnostic::Read {
                line: read + 1,
                source,
            };
            log::error!("{diagnostic}");
            report.diagnostics.push(diagnostic);
        }
        report
    }

    /// Run a script given as lines
    pub fn run_lines<I, S>(&mut self, lines: I) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Report::default();
        self.screen.clear();

        for parsed in Parser::new(lines.into_iter()) {
            let Statement { line, command } = match parsed {
                Ok(statement) => statement,
                Err(err) => {
                    log::warn!("{err}");
                    report.diagnostics.push(err.into());
                    continue;
                }
            };

            log::debug!("line {line}: {command:?}");
            report.executed += 1;
            match self.execute(&command) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => {
                    report.quit = true;
                    break;
                }
                Err(err) => {
                    let diagnostic = err.at(line);
                    log::warn!("{diagnostic}");
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        log::info!(
            "script finished: {} commands, {} diagnostics",
            report.executed,
            report.diagnostics.len()
        );
        report
    }

    /// Execute one command. `Break` means the script asked to stop.
    pub fn execute(&mut self, command: &Command) -> Result<ControlFlow<()>, ExecError> {
        let segments = self.config.curve_segments;
        match *command {
            Command::Line { from, to } => self.draw_with(Shape::Lines, |buf| {
                buf.add_edge(from[0], from[1], from[2], to[0], to[1], to[2])
            }),
            Command::Circle { cx, cy, r } => self.draw_with(Shape::Lines, |buf| {
                geometry::add_circle(buf, cx, cy, 0.0, r, segments)
            }),
            Command::Hermite(points) => self.draw_with(Shape::Lines, |buf| {
                geometry::add_curve(buf, points, segments, CurveKind::Hermite)
            }),
            Command::Bezier(points) => self.draw_with(Shape::Lines, |buf| {
                geometry::add_curve(buf, points, segments, CurveKind::Bezier)
            }),
            Command::Box { corner, size } => self.draw_with(Shape::Polygons, |buf| {
                let [x, y, z] = corner;
                let [w, h, d] = size;
                geometry::add_box(buf, x, y, z, w, h, d)
            }),
            Command::Sphere { cx, cy, r } => {
                let resolution = self.config.sphere_resolution;
                self.draw_with(Shape::Polygons, |buf| {
                    geometry::add_sphere(buf, cx, cy, r, resolution)
                })
            }
            Command::Torus { cx, cy, r1, r2 } => {
                let resolution = self.config.torus_resolution;
                self.draw_with(Shape::Polygons, |buf| {
                    geometry::add_torus(buf, cx, cy, r1, r2, resolution)
                })
            }
            Command::Scale([sx, sy, sz]) => self.stack.compose(&transform::scale(sx, sy, sz)),
            Command::Translate([tx, ty, tz]) => {
                self.stack.compose(&transform::translation(tx, ty, tz))
            }
            Command::Rotate { axis, degrees } => {
                let theta = transform::degrees_to_radians(degrees);
                self.stack.compose(&axis.rotation(theta))
            }
            Command::Push => self.stack.push(),
            Command::Pop => self.stack.pop()?,
            Command::Ident => self.world = Matrix4::identity(),
            Command::Apply => self.objects.transform(&self.world),
            Command::Clear => self.objects.clear(),
            Command::Display => {
                self.screen.clear();
                self.presenter
                    .present(&self.screen)
                    .map_err(ExecError::Render)?;
            }
            Command::Save(ref path) => {
                self.screen.save(path).map_err(ExecError::Render)?;
                log::info!("saved {}", path.display());
            }
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Fill the accumulation buffer, move it into the top frame, draw it and
    /// empty it again
    fn draw_with(&mut self, shape: Shape, generate: impl FnOnce(&mut EdgeBuffer)) {
        debug_assert!(self.edges.is_empty());
        generate(&mut self.edges);
        self.edges.transform(self.stack.top());

        let color = self.config.draw_color;
        match shape {
            Shape::Lines => draw::draw_lines(&self.edges, &mut self.screen, color),
            Shape::Polygons => draw::draw_polygons(&self.edges, &mut self.screen, color),
        }
        self.edges.clear();
    }
}

fn decode_line(line: usize, bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        log::warn!("line {line}: invalid UTF-8 replaced");
    }
    text.into_owned()
}

/// Failure of a single command while the script keeps running
#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Render(crate::error::RenderError),
}

impl ExecError {
    fn at(self, line: usize) -> Diagnostic {
        match self {
            ExecError::Stack(source) => Diagnostic::Stack { line, source },
            ExecError::Render(source) => Diagnostic::Render { line, source },
        }
    }
}
