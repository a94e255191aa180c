//! Parser for SVG path data strings (the `d` attribute).
//!
//! Implements the grammar from <https://www.w3.org/TR/SVG/paths.html#PathDataBNF>:
//! single-letter commands (uppercase absolute, lowercase relative) followed
//! by runs of numbers, with optional whitespace and at most one comma
//! between tokens. A command's coordinates may repeat without restating the
//! letter; a repeated move-to continues as line-to.
//!
//! Errors do not discard work already done: [parse_path_data] always returns
//! the spline built up to the point of failure together with the error, so
//! a malformed tail still renders the valid prefix.

use crate::basics::{deg2rad, PointD};
use crate::error::{ParseError, ParseErrorKind, ParseOutcome};
use crate::number;
use crate::spline_builder::SplineBuilder;

/// Parse an SVG path data string into a spline.
///
/// The empty string is valid and produces an empty spline. Otherwise the
/// first command must be a move-to. On error, [ParseOutcome::spline] holds
/// every command completed before the failure and [ParseOutcome::error]
/// identifies the byte offset of the problem.
pub fn parse_path_data(d: &str) -> ParseOutcome {
    PathParser::new(d).parse()
}

// ======================================================================
// Tokens
// ======================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Placeholder after a close-path; any further coordinate data without
    /// an explicit command letter is an error.
    InvalidCommand,

    MoveTo,
    ClosePath,

    LineTo,
    HorizontalLineTo,
    VerticalLineTo,

    CurveTo,
    SmoothCurveTo,

    QuadCurveTo,
    SmoothQuadCurveTo,

    EllipticalArc,
}

#[derive(Debug, Clone, Copy)]
struct TokenCommand {
    token: Token,
    relative: bool,
}

/// Which curve family the previous command belonged to, for smooth-curve
/// control point reflection. Reflection only applies within a family;
/// anything else resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurveFamily {
    None,
    Cubic,
    Quadratic,
}

// ======================================================================
// Parser
// ======================================================================

struct PathParser<'a> {
    input: &'a str,
    pos: usize,
    builder: SplineBuilder,

    /// Start of the current subpath, for close-path.
    initial_point: PointD,
    current_point: PointD,

    /// Control points available to smooth commands.
    last_cubic_control: PointD,
    last_quad_control: PointD,
    last_family: CurveFamily,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            builder: SplineBuilder::new(),
            initial_point: PointD::ZERO,
            current_point: PointD::ZERO,
            last_cubic_control: PointD::ZERO,
            last_quad_control: PointD::ZERO,
            last_family: CurveFamily::None,
        }
    }

    fn parse(mut self) -> ParseOutcome {
        self.skip_whitespace();
        if self.at_end() {
            return ParseOutcome::ok(self.builder.build());
        }

        // The first command is read separately since it must be a move-to.
        let command_offset = self.pos;
        let command = match self.read_command() {
            Ok(command) => command,
            Err(error) => return ParseOutcome::partial(self.builder.build(), error),
        };
        if command.token != Token::MoveTo {
            return ParseOutcome::partial(
                self.builder.build(),
                ParseError {
                    kind: ParseErrorKind::InvalidFirstCommand,
                    offset: command_offset,
                },
            );
        }

        if let Err(error) = self.process_until_next_command(command) {
            return ParseOutcome::partial(self.builder.build(), error);
        }

        while !self.at_end() {
            // process_until_next_command only stops at a command letter.
            let command = match self.read_command() {
                Ok(command) => command,
                Err(error) => return ParseOutcome::partial(self.builder.build(), error),
            };
            if let Err(error) = self.process_until_next_command(command) {
                return ParseOutcome::partial(self.builder.build(), error);
            }
        }

        ParseOutcome::ok(self.builder.build())
    }

    // ------------------------------------------------------------------
    // Character-level scanning
    // ------------------------------------------------------------------

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Whitespace per the path grammar: tab, space, newline, form feed,
    /// carriage return. Narrower than Unicode whitespace.
    #[inline]
    fn is_whitespace(byte: u8) -> bool {
        matches!(byte, b'\t' | b' ' | b'\n' | b'\x0C' | b'\r')
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek_byte() {
            if Self::is_whitespace(byte) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skip whitespace with at most one comma mixed in.
    fn skip_comma_whitespace(&mut self) {
        let mut found_comma = false;
        while let Some(byte) = self.peek_byte() {
            if !found_comma && byte == b',' {
                found_comma = true;
                self.pos += 1;
            } else if Self::is_whitespace(byte) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek_command(&self) -> Option<TokenCommand> {
        let byte = self.peek_byte()?;
        let relative = byte.is_ascii_lowercase();

        let token = match byte.to_ascii_lowercase() {
            b'm' => Token::MoveTo,
            b'z' => Token::ClosePath,
            b'l' => Token::LineTo,
            b'h' => Token::HorizontalLineTo,
            b'v' => Token::VerticalLineTo,
            b'c' => Token::CurveTo,
            b's' => Token::SmoothCurveTo,
            b'q' => Token::QuadCurveTo,
            b't' => Token::SmoothQuadCurveTo,
            b'a' => Token::EllipticalArc,
            _ => return None,
        };

        Some(TokenCommand { token, relative })
    }

    fn read_command(&mut self) -> Result<TokenCommand, ParseError> {
        match self.peek_command() {
            Some(command) => {
                self.pos += 1;
                Ok(command)
            }
            None => {
                // Report the full character, not just its first byte.
                let ch = self.input[self.pos..].chars().next().unwrap_or('\0');
                Err(ParseError {
                    kind: ParseErrorKind::UnexpectedToken(ch),
                    offset: self.pos,
                })
            }
        }
    }

    fn read_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        match number::parse_number(&self.input[self.pos..]) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(kind) => Err(ParseError {
                kind,
                offset: self.pos,
            }),
        }
    }

    fn read_numbers<const N: usize>(&mut self) -> Result<[f64; N], ParseError> {
        let mut values = [0.0; N];
        for (i, value) in values.iter_mut().enumerate() {
            if i != 0 {
                self.skip_comma_whitespace();
            }
            *value = self.read_number()?;
        }
        Ok(values)
    }

    fn read_flag(&mut self) -> Result<bool, ParseError> {
        match number::parse_flag(&self.input[self.pos..]) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(kind) => Err(ParseError {
                kind,
                offset: self.pos,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Command processing
    // ------------------------------------------------------------------

    /// Process `command` and any implicit repetitions of it, until the next
    /// command letter or the end of input.
    fn process_until_next_command(&mut self, mut command: TokenCommand) -> Result<(), ParseError> {
        let mut first_iteration = true;
        while first_iteration || (!self.at_end() && self.peek_command().is_none()) {
            first_iteration = false;

            self.process_command(command)?;

            if command.token == Token::MoveTo {
                // Repeated move-to coordinates continue as line-to, keeping
                // the relative flag.
                command.token = Token::LineTo;
            } else if command.token == Token::ClosePath {
                // Close-path takes no coordinates; anything but a new
                // command letter after it is an error.
                command.token = Token::InvalidCommand;
            }

            self.skip_whitespace();
            if self.peek_byte() == Some(b',') {
                // A single comma may follow, but only between coordinates.
                let comma_offset = self.pos;
                self.pos += 1;
                self.skip_whitespace();

                if self.at_end() {
                    return Err(ParseError {
                        kind: ParseErrorKind::TrailingComma,
                        offset: comma_offset,
                    });
                } else if self.peek_command().is_some() {
                    return Err(ParseError {
                        kind: ParseErrorKind::CommaBeforeCommand,
                        offset: comma_offset,
                    });
                }
            }
        }

        Ok(())
    }

    #[inline]
    fn make_absolute(&self, command: TokenCommand, x: f64, y: f64) -> PointD {
        let point = PointD::new(x, y);
        if command.relative {
            point + self.current_point
        } else {
            point
        }
    }

    /// Reflection of the previous control point about the current point.
    #[inline]
    fn reflected_control_point(&self, control: PointD) -> PointD {
        self.current_point * 2.0 - control
    }

    fn process_command(&mut self, command: TokenCommand) -> Result<(), ParseError> {
        let mut family = CurveFamily::None;

        match command.token {
            Token::MoveTo => {
                let [x, y] = self.read_numbers::<2>()?;
                let point = self.make_absolute(command, x, y);
                self.builder.move_to(point);
                self.initial_point = point;
                self.current_point = point;
            }
            Token::ClosePath => {
                self.builder.close_path();
                self.current_point = self.initial_point;
            }
            Token::LineTo => {
                let [x, y] = self.read_numbers::<2>()?;
                let point = self.make_absolute(command, x, y);
                self.builder.line_to(point);
                self.current_point = point;
            }
            Token::HorizontalLineTo => {
                let x = self.read_number()?;
                let point = PointD::new(
                    x + if command.relative { self.current_point.x } else { 0.0 },
                    self.current_point.y,
                );
                self.builder.line_to(point);
                self.current_point = point;
            }
            Token::VerticalLineTo => {
                let y = self.read_number()?;
                let point = PointD::new(
                    self.current_point.x,
                    y + if command.relative { self.current_point.y } else { 0.0 },
                );
                self.builder.line_to(point);
                self.current_point = point;
            }
            Token::CurveTo => {
                let [x1, y1, x2, y2, x, y] = self.read_numbers::<6>()?;
                let ctrl1 = self.make_absolute(command, x1, y1);
                let ctrl2 = self.make_absolute(command, x2, y2);
                let end = self.make_absolute(command, x, y);

                self.builder.curve_to(ctrl1, ctrl2, end);
                self.last_cubic_control = ctrl2;
                self.current_point = end;
                family = CurveFamily::Cubic;
            }
            Token::SmoothCurveTo => {
                let [x2, y2, x, y] = self.read_numbers::<4>()?;
                let ctrl1 = if self.last_family == CurveFamily::Cubic {
                    self.reflected_control_point(self.last_cubic_control)
                } else {
                    self.current_point
                };
                let ctrl2 = self.make_absolute(command, x2, y2);
                let end = self.make_absolute(command, x, y);

                self.builder.curve_to(ctrl1, ctrl2, end);
                self.last_cubic_control = ctrl2;
                self.current_point = end;
                family = CurveFamily::Cubic;
            }
            Token::QuadCurveTo => {
                let [x1, y1, x, y] = self.read_numbers::<4>()?;
                let ctrl = self.make_absolute(command, x1, y1);
                let end = self.make_absolute(command, x, y);

                self.builder.quad_to(ctrl, end);
                self.last_quad_control = ctrl;
                self.current_point = end;
                family = CurveFamily::Quadratic;
            }
            Token::SmoothQuadCurveTo => {
                let [x, y] = self.read_numbers::<2>()?;
                let ctrl = if self.last_family == CurveFamily::Quadratic {
                    self.reflected_control_point(self.last_quad_control)
                } else {
                    self.current_point
                };
                let end = self.make_absolute(command, x, y);

                self.builder.quad_to(ctrl, end);
                self.last_quad_control = ctrl;
                self.current_point = end;
                family = CurveFamily::Quadratic;
            }
            Token::EllipticalArc => {
                let [rx, ry, rotation_degrees] = self.read_numbers::<3>()?;

                self.skip_comma_whitespace();
                let large_arc = self.read_flag()?;
                self.skip_comma_whitespace();
                let sweep = self.read_flag()?;
                self.skip_comma_whitespace();

                let [x, y] = self.read_numbers::<2>()?;
                // Radii and rotation are magnitudes; only the end point is
                // subject to relative interpretation.
                let end = self.make_absolute(command, x, y);

                self.builder.arc_to(
                    PointD::new(rx, ry),
                    deg2rad(rotation_degrees),
                    large_arc,
                    sweep,
                    end,
                );
                self.current_point = end;
            }
            Token::InvalidCommand => {
                return Err(ParseError {
                    kind: ParseErrorKind::ExpectedCommand,
                    offset: self.pos,
                });
            }
        }

        self.last_family = family;
        Ok(())
    }
}
