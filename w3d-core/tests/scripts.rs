/// End-to-end script runs against the interpreter
use std::io::{self, BufReader, Cursor, Read};

use nalgebra::Vector4;
use w3d_core::{
    Color, Config, Diagnostic, HeadlessPresenter, Interpreter, ParseError, Presenter, RenderError,
    Report, Screen,
};

const GREEN: Color = Color::new(0, 255, 0);

/// Keeps a copy of every presented frame
#[derive(Default)]
struct RecordingPresenter {
    frames: Vec<Vec<u8>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, screen: &Screen) -> Result<(), RenderError> {
        self.frames.push(screen.to_rgb());
        Ok(())
    }
}

fn run(script: &str) -> (Interpreter<HeadlessPresenter>, Report) {
    let mut interp = Interpreter::new(Config::with_size(100, 100), HeadlessPresenter::new());
    let report = interp.run(Cursor::new(script.to_string()));
    (interp, report)
}

fn lit(screen: &Screen) -> Vec<(i64, i64)> {
    let mut points = Vec::new();
    for y in 0..screen.height() as i64 {
        for x in 0..screen.width() as i64 {
            if screen.pixel(x, y) != Some(screen.background()) {
                points.push((x, y));
            }
        }
    }
    points
}

#[test]
fn compose_order_translate_then_scale() {
    let (interp, report) = run("translate\n5 0 0\nscale\n2 2 2\n");
    assert!(report.diagnostics.is_empty());

    let p = interp.stack().top() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!((p - Vector4::new(7.0, 0.0, 0.0, 1.0)).norm() < 1e-9);
}

#[test]
fn xrotate_takes_degrees() {
    let (interp, _) = run("xrotate\n180\n");
    let p = interp.stack().top() * Vector4::new(0.0, 1.0, 0.0, 1.0);
    assert!((p - Vector4::new(0.0, -1.0, 0.0, 1.0)).norm() < 1e-9);
}

#[test]
fn unit_scale_draws_identically() {
    let plain = "box\n20 80 0 40 40 40\ncircle\n50 50 20\n";
    let scaled = format!("scale\n1 1 1\n{plain}");

    let (a, _) = run(plain);
    let (b, _) = run(&scaled);
    assert!(a.screen().lit_pixels() > 0);
    assert_eq!(a.screen().to_rgb(), b.screen().to_rgb());
}

#[test]
fn accumulation_buffer_empty_after_each_geometry_command() {
    let script = "\
line
0 0 0 50 50 0
circle
50 50 10
hermite
10 10 90 10 0 50 0 -50
bezier
10 10 30 90 70 90 90 10
box
10 90 0 20 20 20
sphere
50 50 20
torus
50 50 5 20
";
    let (interp, report) = run(script);
    assert_eq!(report.executed, 7);
    assert!(report.diagnostics.is_empty());
    assert!(interp.edges().is_empty());
    assert!(interp.edges().capacity() > 0);
}

#[test]
fn unknown_command_between_lines_is_skipped() {
    let script = "line\n0 10 0 20 10 0\nfrobnicate\nline\n0 30 0 20 30 0\n";
    let (interp, report) = run(script);

    assert_eq!(report.executed, 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        Diagnostic::Parse(ParseError { line: 3, .. })
    ));
    assert_eq!(interp.screen().pixel(10, 10), Some(GREEN));
    assert_eq!(interp.screen().pixel(10, 30), Some(GREEN));
}

#[test]
fn pop_restores_outer_frame() {
    let script = "\
push
translate
10 0 0
line
0 0 0 1 0 0
pop
line
0 0 0 1 0 0
";
    let (interp, report) = run(script);
    assert!(report.diagnostics.is_empty());
    assert_eq!(interp.stack().depth(), 1);
    assert_eq!(lit(interp.screen()), vec![(0, 0), (1, 0), (10, 0), (11, 0)]);
}

#[test]
fn transforms_apply_only_to_later_geometry() {
    let (interp, _) = run("line\n0 0 0 4 0 0\ntranslate\n0 50 0\n");
    assert_eq!(lit(interp.screen()), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
}

#[test]
fn extra_pops_are_refused() {
    let (interp, report) = run("pop\npush\npop\npop\nline\n0 0 0 2 0 0\n");
    assert_eq!(interp.stack().depth(), 1);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(report
        .diagnostics
        .iter()
        .all(|d| matches!(d, Diagnostic::Stack { .. })));
    assert_eq!(interp.screen().lit_pixels(), 3);
}

#[test]
fn malformed_arguments_skip_the_command() {
    let (interp, report) = run("translate\n10 x 0\nline\n0 0 0 2 0 0\n");
    assert_eq!(report.executed, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(lit(interp.screen()), vec![(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn quit_stops_execution() {
    let (interp, report) = run("quit\nline\n0 0 0 5 5 0\n");
    assert!(report.quit);
    assert_eq!(report.executed, 1);
    assert_eq!(interp.screen().lit_pixels(), 0);
}

#[test]
fn comments_are_silent() {
    let (_, report) = run("# header\n#line\npush\n");
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.executed, 1);
    assert!(!report.quit);
}

#[test]
fn display_presents_cleared_frame() {
    let mut interp = Interpreter::new(Config::with_size(20, 20), RecordingPresenter::default());
    let report = interp.run_lines(["line", "0 0 0 10 10 0", "display"]);
    assert!(report.diagnostics.is_empty());
    assert_eq!(interp.presenter().frames.len(), 1);
    assert!(interp.presenter().frames[0].iter().all(|&b| b == 0));
}

#[test]
fn nested_frames_compose() {
    let script = "\
translate
20 0 0
push
translate
0 20 0
line
0 0 0 0 0 0
pop
line
0 0 0 0 0 0
";
    let (interp, _) = run(script);
    assert_eq!(lit(interp.screen()), vec![(20, 0), (20, 20)]);
}

#[test]
fn rotated_box_still_visible() {
    let (interp, report) = run("translate\n50 50 0\nyrotate\n30\nxrotate\n20\nbox\n-15 15 15 30 30 30\n");
    assert!(report.diagnostics.is_empty());
    assert!(interp.screen().lit_pixels() > 300);
    assert!(interp.edges().is_empty());
}

#[test]
fn save_writes_image() {
    let path = std::env::temp_dir().join(format!("w3d-save-{}.png", std::process::id()));
    let script = format!("line\n0 0 0 99 99 0\nsave\n{}\n", path.display());

    let (_, report) = run(&script);
    assert!(report.diagnostics.is_empty());
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn failed_save_is_not_fatal() {
    let (interp, report) = run("save\nout.not-an-image\nline\n0 0 0 3 0 0\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(report.diagnostics[0], Diagnostic::Render { line: 1, .. }));
    assert_eq!(interp.screen().lit_pixels(), 4);
}

#[test]
fn invalid_utf8_does_not_end_the_run() {
    let script = b"line\n0 0 0 5 0 0\n# caf\xe9\nline\n0 10 0 5 10 0\n".to_vec();
    let mut interp = Interpreter::new(Config::with_size(100, 100), HeadlessPresenter::new());
    let report = interp.run(Cursor::new(script));

    assert_eq!(report.executed, 2);
    assert!(report.diagnostics.is_empty());
    assert_eq!(interp.screen().pixel(2, 10), Some(GREEN));
}

#[test]
fn invalid_utf8_keyword_is_reported() {
    let script = b"l\xffne\n0 0 0 5 0 0\nline\n0 10 0 5 10 0\n".to_vec();
    let mut interp = Interpreter::new(Config::with_size(100, 100), HeadlessPresenter::new());
    let report = interp.run(Cursor::new(script));

    assert!(matches!(
        report.diagnostics.first(),
        Some(Diagnostic::Parse(ParseError { line: 1, .. }))
    ));
    assert_eq!(interp.screen().pixel(2, 10), Some(GREEN));
}

/// Fails every read, as a broken pipe or disk would
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }
}

#[test]
fn read_error_is_reported() {
    let script = Cursor::new(b"line\n0 0 0 5 0 0\n".to_vec());
    let reader = BufReader::new(script.chain(BrokenReader));
    let mut interp = Interpreter::new(Config::with_size(100, 100), HeadlessPresenter::new());
    let report = interp.run(reader);

    assert_eq!(report.executed, 1);
    assert_eq!(interp.screen().pixel(5, 0), Some(GREEN));
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::Read { line: 3, .. }]
    ));
}

#[test]
fn huge_line_is_clipped_not_fatal() {
    let script = "\
line
0 0 0 1e300 0 0
line
0 0 0 -1e300 5 0
line
0 50 0 300000000 50 0
";
    let (interp, report) = run(script);
    assert_eq!(report.executed, 3);
    assert!(report.diagnostics.is_empty());
    assert_eq!(interp.screen().pixel(99, 0), Some(GREEN));
    assert_eq!(interp.screen().pixel(99, 50), Some(GREEN));
}
