//! YOLO-style annotation lines with optional keypoints.
//!
//! A line is `<class> <cx> <cy> <w> <h> [<kx> <ky> ...]`, every number a
//! fraction of the current image size. The class token is opaque and is
//! carried through byte-for-byte.

mod remap;

pub use remap::remap_line;

use std::fmt;

use crate::geometry::{Coord, Normalized};

/// Minimum number of whitespace-separated tokens in a usable line.
pub const MIN_TOKENS: usize = 5;

/// One object instance parsed from a label file.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationLine {
    pub class: String,
    pub center: Coord<Normalized>,
    pub width: f64,
    pub height: f64,
    pub keypoints: Vec<Coord<Normalized>>,
}

/// Why a line was dropped instead of being written back.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejected {
    /// Fewer than [`MIN_TOKENS`] tokens (this includes blank lines).
    TooFewTokens { found: usize },
    /// A numeric field did not parse as a float.
    InvalidNumber { field: String, token: String },
    /// An odd number of keypoint tokens; the last one has no partner.
    DanglingKeypointToken { keypoint_tokens: usize },
    /// The line is not valid UTF-8.
    InvalidEncoding { valid_up_to: usize },
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::TooFewTokens { found } => {
                write!(f, "expected at least {MIN_TOKENS} tokens, found {found}")
            }
            Rejected::InvalidNumber { field, token } => {
                write!(f, "invalid {field} '{token}'; expected floating-point number")
            }
            Rejected::DanglingKeypointToken { keypoint_tokens } => write!(
                f,
                "{keypoint_tokens} keypoint token(s) do not form complete (x, y) pairs"
            ),
            Rejected::InvalidEncoding { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {valid_up_to}")
            }
        }
    }
}

impl std::error::Error for Rejected {}

impl AnnotationLine {
    /// Parses one label line.
    pub fn parse(line: &str) -> Result<Self, Rejected> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(Rejected::TooFewTokens {
                found: tokens.len(),
            });
        }

        let keypoint_tokens = &tokens[MIN_TOKENS..];
        if keypoint_tokens.len() % 2 != 0 {
            return Err(Rejected::DanglingKeypointToken {
                keypoint_tokens: keypoint_tokens.len(),
            });
        }

        let cx = parse_number(tokens[1], "x_center")?;
        let cy = parse_number(tokens[2], "y_center")?;
        let width = parse_number(tokens[3], "width")?;
        let height = parse_number(tokens[4], "height")?;

        let keypoints = keypoint_tokens
            .chunks_exact(2)
            .enumerate()
            .map(|(index, pair)| {
                let kx = parse_number(pair[0], &format!("keypoint {index} x"))?;
                let ky = parse_number(pair[1], &format!("keypoint {index} y"))?;
                Ok(Coord::new(kx, ky))
            })
            .collect::<Result<Vec<_>, Rejected>>()?;

        Ok(Self {
            class: tokens[0].to_string(),
            center: Coord::new(cx, cy),
            width,
            height,
            keypoints,
        })
    }

    /// Number of numeric fields this line serializes to (`4 + 2k`).
    pub fn numeric_field_count(&self) -> usize {
        4 + 2 * self.keypoints.len()
    }
}

/// Serializes with six decimal places per number, single-space separated.
impl fmt::Display for AnnotationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class, self.center.x, self.center.y, self.width, self.height
        )?;
        for kp in &self.keypoints {
            write!(f, " {:.6} {:.6}", kp.x, kp.y)?;
        }
        Ok(())
    }
}

/// Splits the raw bytes of a label file into lines.
///
/// Each line is decoded on its own, so one badly encoded line is rejected
/// without affecting the rest of the file. A trailing `\r` is stripped.
pub fn decode_lines(bytes: &[u8]) -> impl Iterator<Item = Result<&str, Rejected>> {
    bytes.split(|&b| b == b'\n').map(|raw| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        std::str::from_utf8(raw).map_err(|err| Rejected::InvalidEncoding {
            valid_up_to: err.valid_up_to(),
        })
    })
}

fn parse_number(raw: &str, field: &str) -> Result<f64, Rejected> {
    raw.parse::<f64>().map_err(|_| Rejected::InvalidNumber {
        field: field.to_string(),
        token: raw.to_string(),
    })
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_line(input: &str) -> Result<(), Rejected> {
    let parsed = AnnotationLine::parse(input)?;
    let _ = parsed.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_box_only_line() {
        let parsed = AnnotationLine::parse("2 0.5 0.25 0.3 0.1").unwrap();
        assert_eq!(parsed.class, "2");
        assert_eq!(parsed.center, Coord::new(0.5, 0.25));
        assert_eq!(parsed.width, 0.3);
        assert_eq!(parsed.height, 0.1);
        assert!(parsed.keypoints.is_empty());
        assert_eq!(parsed.numeric_field_count(), 4);
    }

    #[test]
    fn parses_keypoint_pairs_in_order() {
        let parsed = AnnotationLine::parse("0 0.5 0.5 0.2 0.2 0.1 0.9 0.3 0.4").unwrap();
        assert_eq!(
            parsed.keypoints,
            vec![Coord::new(0.1, 0.9), Coord::new(0.3, 0.4)]
        );
        assert_eq!(parsed.numeric_field_count(), 8);
    }

    #[test]
    fn class_token_is_kept_verbatim() {
        let parsed = AnnotationLine::parse("person_01 0.5 0.5 0.2 0.2").unwrap();
        assert_eq!(parsed.class, "person_01");

        let parsed = AnnotationLine::parse("007 0.5 0.5 0.2 0.2").unwrap();
        assert_eq!(parsed.class, "007");
    }

    #[test]
    fn tolerates_irregular_whitespace() {
        let parsed = AnnotationLine::parse("  1\t0.5  0.5 0.2\t0.2\r").unwrap();
        assert_eq!(parsed.class, "1");
        assert_eq!(parsed.height, 0.2);
    }

    #[test]
    fn rejects_short_and_blank_lines() {
        assert_eq!(
            AnnotationLine::parse("0 0.1 0.2"),
            Err(Rejected::TooFewTokens { found: 3 })
        );
        assert_eq!(
            AnnotationLine::parse("   "),
            Err(Rejected::TooFewTokens { found: 0 })
        );
    }

    #[test]
    fn rejects_dangling_keypoint_token() {
        assert_eq!(
            AnnotationLine::parse("0 0.5 0.5 0.2 0.2 0.1 0.9 0.3"),
            Err(Rejected::DanglingKeypointToken { keypoint_tokens: 3 })
        );
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = AnnotationLine::parse("0 0.5 abc 0.2 0.2").unwrap_err();
        assert_eq!(
            err,
            Rejected::InvalidNumber {
                field: "y_center".to_string(),
                token: "abc".to_string(),
            }
        );

        let err = AnnotationLine::parse("0 0.5 0.5 0.2 0.2 0.1 nope").unwrap_err();
        assert!(matches!(err, Rejected::InvalidNumber { ref field, .. } if field == "keypoint 0 y"));
    }

    #[test]
    fn display_uses_six_decimals() {
        let parsed = AnnotationLine::parse("cat 0.5 0.25 1 0.1 0.123456789 1e-3").unwrap();
        assert_eq!(
            parsed.to_string(),
            "cat 0.500000 0.250000 1.000000 0.100000 0.123457 0.001000"
        );
    }

    #[test]
    fn decode_lines_rejects_only_the_badly_encoded_line() {
        let bytes = b"caf\xe9 0.5 0.5 0.2 0.2\r\n1 0.5 0.5 0.2 0.2\n";
        let lines: Vec<_> = decode_lines(bytes).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Err(Rejected::InvalidEncoding { valid_up_to: 3 }));
        assert_eq!(lines[1], Ok("1 0.5 0.5 0.2 0.2"));
        assert_eq!(lines[2], Ok(""));
    }

    #[test]
    fn rejection_messages_are_readable() {
        let msg = Rejected::TooFewTokens { found: 2 }.to_string();
        assert!(msg.contains("at least 5"));
    }
}
