/// Script commands and argument-line parsing
use std::path::PathBuf;
use std::str::FromStr;

use nom::{
    character::complete::{space0, space1},
    combinator::all_consuming,
    multi::separated_list0,
    number::complete::double,
    sequence::delimited,
    IResult,
};

use crate::error::ParseErrorKind;
use crate::transform::Axis;

/// Command keyword, one per script line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Line,
    Circle,
    Hermite,
    Bezier,
    Box,
    Sphere,
    Torus,
    Scale,
    Translate,
    XRotate,
    YRotate,
    ZRotate,
    Push,
    Pop,
    Ident,
    Apply,
    Clear,
    Display,
    Save,
    Quit,
}

impl Keyword {
    pub const ALL: [Keyword; 20] = [
        Keyword::Line,
        Keyword::Circle,
        Keyword::Hermite,
        Keyword::Bezier,
        Keyword::Box,
        Keyword::Sphere,
        Keyword::Torus,
        Keyword::Scale,
        Keyword::Translate,
        Keyword::XRotate,
        Keyword::YRotate,
        Keyword::ZRotate,
        Keyword::Push,
        Keyword::Pop,
        Keyword::Ident,
        Keyword::Apply,
        Keyword::Clear,
        Keyword::Display,
        Keyword::Save,
        Keyword::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Keyword::Line => "line",
            Keyword::Circle => "circle",
            Keyword::Hermite => "hermite",
            Keyword::Bezier => "bezier",
            Keyword::Box => "box",
            Keyword::Sphere => "sphere",
            Keyword::Torus => "torus",
            Keyword::Scale => "scale",
            Keyword::Translate => "translate",
            Keyword::XRotate => "xrotate",
            Keyword::YRotate => "yrotate",
            Keyword::ZRotate => "zrotate",
            Keyword::Push => "push",
            Keyword::Pop => "pop",
            Keyword::Ident => "ident",
            Keyword::Apply => "apply",
            Keyword::Clear => "clear",
            Keyword::Display => "display",
            Keyword::Save => "save",
            Keyword::Quit => "quit",
        }
    }

    /// Number of numeric arguments on the following line
    pub fn arity(self) -> usize {
        match self {
            Keyword::Hermite | Keyword::Bezier => 8,
            Keyword::Line | Keyword::Box => 6,
            Keyword::Torus => 4,
            Keyword::Circle | Keyword::Sphere => 3,
            Keyword::Scale | Keyword::Translate => 3,
            Keyword::XRotate | Keyword::YRotate | Keyword::ZRotate => 1,
            Keyword::Push
            | Keyword::Pop
            | Keyword::Ident
            | Keyword::Apply
            | Keyword::Clear
            | Keyword::Display
            | Keyword::Save
            | Keyword::Quit => 0,
        }
    }

    /// Whether the next line belongs to this command
    pub fn takes_argument_line(self) -> bool {
        self == Keyword::Save || self.arity() > 0
    }

    /// Build the command from its argument line (`None` when there is none)
    pub fn parse_arguments(self, line: Option<&str>) -> Result<Command, ParseErrorKind> {
        let command = match self {
            Keyword::Line => {
                let a = self.numbers(line)?;
                Command::Line {
                    from: [a[0], a[1], a[2]],
                    to: [a[3], a[4], a[5]],
                }
            }
            Keyword::Circle => {
                let a = self.numbers(line)?;
                Command::Circle {
                    cx: a[0],
                    cy: a[1],
                    r: a[2],
                }
            }
            Keyword::Hermite => Command::Hermite(pairs(&self.numbers(line)?)),
            Keyword::Bezier => Command::Bezier(pairs(&self.numbers(line)?)),
            Keyword::Box => {
                let a = self.numbers(line)?;
                Command::Box {
                    corner: [a[0], a[1], a[2]],
                    size: [a[3], a[4], a[5]],
                }
            }
            Keyword::Sphere => {
                let a = self.numbers(line)?;
                Command::Sphere {
                    cx: a[0],
                    cy: a[1],
                    r: a[2],
                }
            }
            Keyword::Torus => {
                let a = self.numbers(line)?;
                Command::Torus {
                    cx: a[0],
                    cy: a[1],
                    r1: a[2],
                    r2: a[3],
                }
            }
            Keyword::Scale => {
                let a = self.numbers(line)?;
                Command::Scale([a[0], a[1], a[2]])
            }
            Keyword::Translate => {
                let a = self.numbers(line)?;
                Command::Translate([a[0], a[1], a[2]])
            }
            Keyword::XRotate => self.rotation(Axis::X, line)?,
            Keyword::YRotate => self.rotation(Axis::Y, line)?,
            Keyword::ZRotate => self.rotation(Axis::Z, line)?,
            Keyword::Push => Command::Push,
            Keyword::Pop => Command::Pop,
            Keyword::Ident => Command::Ident,
            Keyword::Apply => Command::Apply,
            Keyword::Clear => Command::Clear,
            Keyword::Display => Command::Display,
            Keyword::Save => {
                let name = line
                    .ok_or(ParseErrorKind::MissingArguments { keyword: self.name() })?
                    .trim();
                if name.is_empty() {
                    return Err(ParseErrorKind::MissingFilename);
                }
                Command::Save(PathBuf::from(name))
            }
            Keyword::Quit => Command::Quit,
        };
        Ok(command)
    }

    fn rotation(self, axis: Axis, line: Option<&str>) -> Result<Command, ParseErrorKind> {
        let a = self.numbers(line)?;
        Ok(Command::Rotate {
            axis,
            degrees: a[0],
        })
    }

    /// Exactly `arity()` numbers from the argument line
    fn numbers(self, line: Option<&str>) -> Result<Vec<f64>, ParseErrorKind> {
        let line = line.ok_or(ParseErrorKind::MissingArguments { keyword: self.name() })?;
        let args = parse_numbers(line).map_err(|_| ParseErrorKind::Malformed {
            keyword: self.name(),
            text: line.to_string(),
        })?;
        if args.len() != self.arity() {
            return Err(ParseErrorKind::Arity {
                keyword: self.name(),
                expected: self.arity(),
                found: args.len(),
            });
        }
        Ok(args)
    }
}

impl FromStr for Keyword {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        Keyword::ALL
            .into_iter()
            .find(|k| k.name() == word)
            .ok_or_else(|| ParseErrorKind::UnknownCommand(word.to_string()))
    }
}

/// A fully parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line { from: [f64; 3], to: [f64; 3] },
    Circle { cx: f64, cy: f64, r: f64 },
    Hermite([(f64, f64); 4]),
    Bezier([(f64, f64); 4]),
    Box { corner: [f64; 3], size: [f64; 3] },
    Sphere { cx: f64, cy: f64, r: f64 },
    Torus { cx: f64, cy: f64, r1: f64, r2: f64 },
    Scale([f64; 3]),
    Translate([f64; 3]),
    Rotate { axis: Axis, degrees: f64 },
    Push,
    Pop,
    Ident,
    Apply,
    Clear,
    Display,
    Save(PathBuf),
    Quit,
}

fn pairs(args: &[f64]) -> [(f64, f64); 4] {
    [
        (args[0], args[1]),
        (args[2], args[3]),
        (args[4], args[5]),
        (args[6], args[7]),
    ]
}

fn number_list(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(space0, separated_list0(space1, double), space0)(input)
}

/// Parse a line of whitespace-separated numbers
pub fn parse_numbers(line: &str) -> Result<Vec<f64>, nom::Err<nom::error::Error<&str>>> {
    all_consuming(number_list)(line).map(|(_, numbers)| numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip_names() {
        for keyword in Keyword::ALL {
            assert_eq!(keyword.name().parse::<Keyword>(), Ok(keyword));
        }
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(
            "lin".parse::<Keyword>(),
            Err(ParseErrorKind::UnknownCommand("lin".to_string()))
        );
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("1 2.5 -3").unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(parse_numbers("  4\t5  ").unwrap(), vec![4.0, 5.0]);
        assert_eq!(parse_numbers("").unwrap(), Vec::<f64>::new());
        assert!(parse_numbers("1 two 3").is_err());
    }

    #[test]
    fn test_line_arguments() {
        let command = Keyword::Line
            .parse_arguments(Some("0 0 0 100 100 0"))
            .unwrap();
        assert_eq!(
            command,
            Command::Line {
                from: [0.0, 0.0, 0.0],
                to: [100.0, 100.0, 0.0],
            }
        );
    }

    #[test]
    fn test_wrong_arity() {
        let err = Keyword::Scale.parse_arguments(Some("1 2")).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::Arity {
                keyword: "scale",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_malformed_arguments() {
        let err = Keyword::XRotate.parse_arguments(Some("ninety")).unwrap_err();
        assert!(matches!(err, ParseErrorKind::Malformed { keyword: "xrotate", .. }));
    }

    #[test]
    fn test_save_takes_literal_filename() {
        let command = Keyword::Save.parse_arguments(Some("  out 1.png ")).unwrap();
        assert_eq!(command, Command::Save(PathBuf::from("out 1.png")));
        assert_eq!(
            Keyword::Save.parse_arguments(Some("   ")),
            Err(ParseErrorKind::MissingFilename)
        );
    }

    #[test]
    fn test_missing_argument_line() {
        assert_eq!(
            Keyword::Torus.parse_arguments(None),
            Err(ParseErrorKind::MissingArguments { keyword: "torus" })
        );
        assert_eq!(Keyword::Push.parse_arguments(None), Ok(Command::Push));
    }

    #[test]
    fn test_rotate_keeps_degrees() {
        let command = Keyword::YRotate.parse_arguments(Some("45")).unwrap();
        assert_eq!(
            command,
            Command::Rotate {
                axis: Axis::Y,
                degrees: 45.0,
            }
        );
    }
}
