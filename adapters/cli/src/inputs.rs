//! Parsing of command-line segment specifications and hex colors.

use ring_gauge_core::{Segment, SegmentColor};
use thiserror::Error;

/// Errors reported while parsing gauge inputs from the command line.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum SegmentSpecError {
    /// The spec did not split into the four expected fields.
    #[error("segment spec '{0}' must have the form KEY:WEIGHT:LABEL:HEXCOLOR")]
    MalformedSpec(String),
    /// The weight field did not parse as a number.
    #[error("segment weight '{0}' is not a number")]
    InvalidWeight(String),
    /// Negative weights are rejected at the input surface.
    #[error("segment weight {0} must not be negative")]
    NegativeWeight(f32),
    /// The color field was not a six-digit hex color.
    #[error("color '{0}' is not a #rrggbb hex color")]
    InvalidColor(String),
}

/// Parses a `KEY:WEIGHT:LABEL:HEXCOLOR` segment specification.
pub(crate) fn parse_segment_spec(spec: &str) -> Result<Segment, SegmentSpecError> {
    let mut parts = spec.split(':');
    let key = parts.next().filter(|part| !part.is_empty());
    let weight = parts.next();
    let label = parts.next().filter(|part| !part.is_empty());
    let color = parts.next();

    let (Some(key), Some(weight), Some(label), Some(color)) = (key, weight, label, color) else {
        return Err(SegmentSpecError::MalformedSpec(spec.to_owned()));
    };
    if parts.next().is_some() {
        return Err(SegmentSpecError::MalformedSpec(spec.to_owned()));
    }

    let weight: f32 = weight
        .trim()
        .parse()
        .map_err(|_| SegmentSpecError::InvalidWeight(weight.to_owned()))?;
    if weight < 0.0 || !weight.is_finite() {
        return Err(SegmentSpecError::NegativeWeight(weight));
    }

    Ok(Segment::new(key, weight, label, parse_hex_color(color)?))
}

/// The window size flag did not parse as two positive pixel extents.
#[derive(Debug, Error, PartialEq)]
#[error("window size '{0}' must have the form WIDTHxHEIGHT, e.g. 420x420")]
pub(crate) struct WindowSizeError(String);

/// Parses a `WIDTHxHEIGHT` window size into pixel extents.
pub(crate) fn parse_window_size(value: &str) -> Result<(i32, i32), WindowSizeError> {
    let err = || WindowSizeError(value.to_owned());

    let (width, height) = value
        .trim()
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(err)?;
    let width: i32 = width.trim().parse().map_err(|_| err())?;
    let height: i32 = height.trim().parse().map_err(|_| err())?;
    if width <= 0 || height <= 0 {
        return Err(err());
    }

    Ok((width, height))
}

/// Parses a `#rrggbb` (or `rrggbb`) hex color into a segment color token.
pub(crate) fn parse_hex_color(value: &str) -> Result<SegmentColor, SegmentSpecError> {
    let digits = value.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(SegmentSpecError::InvalidColor(value.to_owned()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| SegmentSpecError::InvalidColor(value.to_owned()))
    };

    Ok(SegmentColor::from_rgb(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_segment_spec() {
        let segment = parse_segment_spec("bad:10:BAD:#ff4d4d").expect("spec parses");

        assert_eq!(segment.key(), "bad");
        assert!((segment.weight() - 10.0).abs() < f32::EPSILON);
        assert_eq!(segment.label(), "BAD");
        assert_eq!(segment.color(), SegmentColor::from_rgb(0xff, 0x4d, 0x4d));
    }

    #[test]
    fn accepts_hex_colors_without_a_hash() {
        let color = parse_hex_color("2de08a").expect("color parses");
        assert_eq!(color, SegmentColor::from_rgb(0x2d, 0xe0, 0x8a));
    }

    #[test]
    fn rejects_specs_with_missing_fields() {
        let error = parse_segment_spec("bad:10:BAD").expect_err("missing color is rejected");
        assert!(matches!(error, SegmentSpecError::MalformedSpec(_)));
    }

    #[test]
    fn rejects_specs_with_extra_fields() {
        let error =
            parse_segment_spec("bad:10:BAD:#ff4d4d:extra").expect_err("extra field is rejected");
        assert!(matches!(error, SegmentSpecError::MalformedSpec(_)));
    }

    #[test]
    fn rejects_non_numeric_weights() {
        let error = parse_segment_spec("bad:heavy:BAD:#ff4d4d").expect_err("weight is rejected");
        assert_eq!(error, SegmentSpecError::InvalidWeight("heavy".to_owned()));
    }

    #[test]
    fn rejects_negative_weights() {
        let error = parse_segment_spec("bad:-1:BAD:#ff4d4d").expect_err("weight is rejected");
        assert_eq!(error, SegmentSpecError::NegativeWeight(-1.0));
    }

    #[test]
    fn zero_weights_are_legal() {
        let segment = parse_segment_spec("empty:0:EMPTY:#000000").expect("zero weight parses");
        assert_eq!(segment.weight(), 0.0);
    }

    #[test]
    fn parses_window_sizes_with_either_separator_case() {
        assert_eq!(parse_window_size("420x420"), Ok((420, 420)));
        assert_eq!(parse_window_size("640X480"), Ok((640, 480)));
    }

    #[test]
    fn rejects_malformed_window_sizes() {
        assert!(parse_window_size("420").is_err());
        assert!(parse_window_size("420x").is_err());
        assert!(parse_window_size("0x420").is_err());
        assert!(parse_window_size("420x-1").is_err());
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        assert!(parse_hex_color("#ff4d").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("").is_err());
    }
}
